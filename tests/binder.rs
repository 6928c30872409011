use chrono::{Duration, Utc};
use tickerboard::config::Holding;
use tickerboard::market::{DataStore, EntryMeta, EntryUpdate, PriceBounds, default_indices};
use tickerboard::view::binder::{
    bind_all_cards, bind_card, bind_detail, bind_index_tiles, bind_portfolio, highlight,
    mark_unavailable, rebuild_cards,
};
use tickerboard::view::{BindContext, Board, CardAction, Freshness, Thresholds, Tone};

fn ctx() -> BindContext {
    BindContext {
        thresholds: Thresholds::default(),
        stale_after_secs: 60,
        now: Utc::now(),
    }
}

fn store_with(entries: &[(&str, f64, f64)]) -> DataStore {
    let mut store = DataStore::new(PriceBounds::default()).with_indices(default_indices());
    let symbols: Vec<&str> = entries.iter().map(|(s, _, _)| *s).collect();
    store.replace_watchlist(&symbols);
    for (symbol, price, change) in entries {
        store.upsert(
            symbol,
            EntryUpdate::Snapshot {
                price: *price,
                change: *change,
                at: Utc::now(),
                meta: Some(EntryMeta {
                    company: format!("{} Corp", symbol),
                    pe: Some(28.4),
                    ..EntryMeta::default()
                }),
            },
        );
    }
    store
}

// --- tone ---

#[test]
fn test_tone_positive_above_threshold() {
    // change 2 over baseline 98 -> +2.0408%
    let store = store_with(&[("X", 100.0, 2.0)]);
    let mut board = Board::default();
    rebuild_cards(&mut board, store.watchlist());
    assert!(bind_card(&mut board, &store, "X", &ctx()));
    let card = board.cards.by_symbol("X").unwrap();
    assert_eq!(card.tone, Tone::Positive);
    assert_eq!(card.change_text, "+2.00 (+2.04%)");
    assert_eq!(card.price_text, "$100.00");
}

#[test]
fn test_tone_neutral_inside_band() {
    // 0.05 over baseline 100 -> +0.05%
    let store = store_with(&[("X", 100.05, 0.05)]);
    let mut board = Board::default();
    rebuild_cards(&mut board, store.watchlist());
    bind_card(&mut board, &store, "X", &ctx());
    assert_eq!(board.cards.by_symbol("X").unwrap().tone, Tone::Neutral);
}

#[test]
fn test_tone_negative_below_threshold() {
    let store = store_with(&[("X", 98.0, -2.0)]);
    let mut board = Board::default();
    rebuild_cards(&mut board, store.watchlist());
    bind_card(&mut board, &store, "X", &ctx());
    let card = board.cards.by_symbol("X").unwrap();
    assert_eq!(card.tone, Tone::Negative);
    assert_eq!(card.change_text, "-2.00 (-2.00%)");
}

#[test]
fn test_tone_boundaries_are_exclusive() {
    let t = Thresholds::default();
    assert_eq!(Tone::classify(0.1, t), Tone::Neutral);
    assert_eq!(Tone::classify(-0.1, t), Tone::Neutral);
    assert_eq!(Tone::classify(0.1001, t), Tone::Positive);
    assert_eq!(Tone::classify(-0.1001, t), Tone::Negative);
}

// --- cards ---

#[test]
fn test_rebuild_leaves_exactly_one_card_per_symbol() {
    let store = store_with(&[("AAPL", 1.0, 0.0), ("MSFT", 1.0, 0.0), ("TSLA", 1.0, 0.0)]);
    let mut board = Board::default();
    rebuild_cards(&mut board, store.watchlist());
    assert_eq!(board.cards.len(), 3);

    let next = vec!["NVDA".to_string(), "KO".to_string()];
    rebuild_cards(&mut board, &next);
    assert_eq!(board.cards.len(), 2);
    assert!(board.cards.by_symbol("AAPL").is_none());
    let symbols: Vec<&str> = board.cards.iter().map(|c| c.symbol.as_str()).collect();
    assert_eq!(symbols, vec!["NVDA", "KO"]);
    for card in board.cards.iter() {
        assert_eq!(card.action(), &CardAction::Select(card.symbol.clone()));
    }
}

#[test]
fn test_stale_card_ids_do_not_activate() {
    let mut board = Board::default();
    rebuild_cards(&mut board, &["AAPL".to_string()]);
    let old = board.cards.id_of("AAPL").unwrap();
    assert_eq!(
        board.cards.activate(old),
        Some(CardAction::Select("AAPL".to_string()))
    );

    rebuild_cards(&mut board, &["AAPL".to_string()]);
    assert_eq!(board.cards.activate(old), None);
    let fresh = board.cards.id_of("AAPL").unwrap();
    assert!(board.cards.activate(fresh).is_some());
}

#[test]
fn test_bind_card_without_entry_is_noop() {
    let store = DataStore::default();
    let mut board = Board::default();
    rebuild_cards(&mut board, &["AAPL".to_string()]);
    assert!(!bind_card(&mut board, &store, "AAPL", &ctx()));
    assert_eq!(board.cards.by_symbol("AAPL").unwrap().price_text, "--");
}

#[test]
fn test_bind_card_without_card_is_noop() {
    let store = store_with(&[("AAPL", 10.0, 1.0)]);
    let mut board = Board::default();
    assert!(!bind_card(&mut board, &store, "AAPL", &ctx()));
}

#[test]
fn test_bind_all_cards_counts_bound() {
    let mut store = store_with(&[("AAPL", 10.0, 1.0)]);
    store.replace_watchlist(["AAPL", "MSFT"]);
    let mut board = Board::default();
    rebuild_cards(&mut board, store.watchlist());
    assert_eq!(bind_all_cards(&mut board, &store, &ctx()), 1);
}

#[test]
fn test_stale_entry_is_flagged() {
    let store = store_with(&[("AAPL", 10.0, 1.0)]);
    let mut board = Board::default();
    rebuild_cards(&mut board, store.watchlist());
    let later = BindContext {
        now: Utc::now() + Duration::seconds(120),
        ..ctx()
    };
    bind_card(&mut board, &store, "AAPL", &later);
    assert_eq!(board.cards.by_symbol("AAPL").unwrap().freshness, Freshness::Stale);
}

#[test]
fn test_highlight_moves_between_cards() {
    let mut board = Board::default();
    rebuild_cards(&mut board, &["A".to_string(), "B".to_string()]);
    highlight(&mut board, Some("A"));
    highlight(&mut board, Some("B"));
    assert!(!board.cards.by_symbol("A").unwrap().highlighted);
    assert!(board.cards.by_symbol("B").unwrap().highlighted);
}

#[test]
fn test_mark_unavailable_degrades_card_and_detail() {
    let mut board = Board::default();
    rebuild_cards(&mut board, &["A".to_string()]);
    board.detail.retarget("A");
    mark_unavailable(&mut board, "A");
    assert_eq!(board.cards.by_symbol("A").unwrap().freshness, Freshness::Unavailable);
    assert_eq!(board.detail.freshness, Freshness::Unavailable);
}

// --- detail, tiles, portfolio ---

#[test]
fn test_bind_detail_only_for_displayed_symbol() {
    let store = store_with(&[("A", 50.0, 1.0), ("B", 20.0, -1.0)]);
    let mut board = Board::default();
    board.detail.retarget("B");
    assert!(!bind_detail(&mut board, &store, "A", &ctx()));
    assert!(bind_detail(&mut board, &store, "B", &ctx()));
    assert_eq!(board.detail.symbol.as_deref(), Some("B"));
    assert_eq!(board.detail.company, "B Corp");
    assert_eq!(board.detail.pe_text, "28.4");
    assert!(board.detail.change_text.starts_with("▼"));
}

#[test]
fn test_index_tiles_follow_store_order() {
    let store = store_with(&[]);
    let mut board = Board::default();
    bind_index_tiles(&mut board, &store, &ctx());
    let names: Vec<&str> = board.indices.iter().map(|t| t.name.as_str()).collect();
    assert_eq!(names, vec!["SP500", "NASDAQ", "DOW", "VIX"]);
    assert_eq!(board.indices[0].value_text, "4,200.50");
    assert_eq!(board.indices[0].change_text, "+1.2%");
    assert_eq!(board.indices[1].tone, Tone::Negative);
}

#[test]
fn test_portfolio_gain_is_change_times_shares() {
    let store = store_with(&[("AAPL", 150.0, 2.5), ("MSFT", 300.0, -1.25)]);
    let holdings = vec![
        Holding {
            symbol: "AAPL".to_string(),
            shares: 10,
        },
        Holding {
            symbol: "MSFT".to_string(),
            shares: 4,
        },
        Holding {
            symbol: "IBM".to_string(),
            shares: 1,
        },
    ];
    let mut board = Board::default();
    bind_portfolio(&mut board, &store, &holdings);
    assert_eq!(board.portfolio[0].gain_text, "+$25.00");
    assert_eq!(board.portfolio[0].tone, Tone::Positive);
    assert_eq!(board.portfolio[1].gain_text, "-$5.00");
    assert_eq!(board.portfolio[1].tone, Tone::Negative);
    assert_eq!(board.portfolio[2].gain_text, "--");
}
