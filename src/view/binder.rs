//! Writes store entries into board nodes.
//!
//! Every function here reads the store and writes the board, nothing else.
//! A symbol with no entry or no node is skipped silently: that is the normal
//! state for a symbol whose first quote has not arrived or that is not part
//! of the rendered watchlist.

use super::board::{Board, Freshness, IndexTile, PLACEHOLDER, PortfolioRow, Tone};
use crate::config::Holding;
use crate::market::{DataStore, MarketEntry};
use crate::ui::formatters::{
    format_arrow_change, format_change_line, format_gain, format_index_change, format_number,
    format_price,
};
use chrono::{DateTime, Local, Utc};

/// Percent-change thresholds; moves between them are Neutral.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Thresholds {
    pub positive: f64,
    pub negative: f64,
}

impl Default for Thresholds {
    fn default() -> Self {
        Self {
            positive: 0.1,
            negative: -0.1,
        }
    }
}

impl Tone {
    pub fn classify(pct: f64, thresholds: Thresholds) -> Tone {
        if pct > thresholds.positive {
            Tone::Positive
        } else if pct < thresholds.negative {
            Tone::Negative
        } else {
            Tone::Neutral
        }
    }
}

/// Inputs shared by one binding pass.
#[derive(Debug, Clone, Copy)]
pub struct BindContext {
    pub thresholds: Thresholds,
    pub stale_after_secs: u64,
    pub now: DateTime<Utc>,
}

impl BindContext {
    fn freshness(&self, entry: &MarketEntry) -> Freshness {
        if entry.is_stale(self.now, self.stale_after_secs) {
            Freshness::Stale
        } else {
            Freshness::Fresh
        }
    }
}

fn clock(at: DateTime<Utc>) -> String {
    at.with_timezone(&Local).format("%H:%M:%S").to_string()
}

/// Drop every card and create one per watchlist symbol, in order.
pub fn rebuild_cards(board: &mut Board, watchlist: &[String]) {
    board.cards.clear();
    for symbol in watchlist {
        board.cards.create(symbol);
    }
}

/// Move the highlight to `symbol` (or clear it).
pub fn highlight(board: &mut Board, symbol: Option<&str>) {
    for pos in 0..board.cards.len() {
        let Some((id, node)) = board.cards.at(pos) else {
            continue;
        };
        let on = Some(node.symbol.as_str()) == symbol;
        if node.highlighted != on {
            if let Some(node) = board.cards.get_mut(id) {
                node.highlighted = on;
            }
        }
    }
}

pub fn bind_card(board: &mut Board, store: &DataStore, symbol: &str, ctx: &BindContext) -> bool {
    let Some(entry) = store.get(symbol) else {
        return false;
    };
    let Some(card) = board.cards.by_symbol_mut(symbol) else {
        return false;
    };
    let pct = entry.change_percent();
    card.price_text = format_price(entry.price());
    card.change_text = format_change_line(entry.change(), pct);
    card.tone = Tone::classify(pct, ctx.thresholds);
    card.last_text = clock(entry.updated_at());
    card.freshness = ctx.freshness(entry);
    true
}

/// Bind every card in display order. Returns how many were written.
pub fn bind_all_cards(board: &mut Board, store: &DataStore, ctx: &BindContext) -> usize {
    let symbols: Vec<String> = board.cards.iter().map(|c| c.symbol.clone()).collect();
    symbols
        .iter()
        .filter(|s| bind_card(board, store, s, ctx))
        .count()
}

/// Write `symbol` into the detail panel, only if the panel shows it.
pub fn bind_detail(board: &mut Board, store: &DataStore, symbol: &str, ctx: &BindContext) -> bool {
    if board.detail.symbol.as_deref() != Some(symbol) {
        return false;
    }
    let Some(entry) = store.get(symbol) else {
        return false;
    };
    let pct = entry.change_percent();
    let meta = entry.meta();
    let panel = &mut board.detail;
    panel.price_text = format_price(entry.price());
    panel.change_text = format_arrow_change(entry.change(), pct);
    panel.tone = Tone::classify(pct, ctx.thresholds);
    panel.company = meta.company.clone();
    panel.sector = meta.sector.clone();
    panel.market_cap = meta.market_cap.clone();
    panel.volume = meta.volume.clone();
    panel.pe_text = meta
        .pe
        .map(|pe| format!("{:.1}", pe))
        .unwrap_or_else(|| PLACEHOLDER.to_string());
    panel.last_text = clock(entry.updated_at());
    panel.freshness = ctx.freshness(entry);
    true
}

/// Visible degraded state after a failed quote.
pub fn mark_unavailable(board: &mut Board, symbol: &str) {
    if let Some(card) = board.cards.by_symbol_mut(symbol) {
        card.freshness = Freshness::Unavailable;
        card.last_text = "unavailable".to_string();
    }
    if board.detail.symbol.as_deref() == Some(symbol) {
        board.detail.freshness = Freshness::Unavailable;
        board.detail.last_text = "Quote unavailable".to_string();
    }
}

pub fn bind_index_tiles(board: &mut Board, store: &DataStore, ctx: &BindContext) {
    board.indices = store
        .indices()
        .iter()
        .map(|(name, entry)| IndexTile {
            name: name.clone(),
            value_text: format_number(entry.value),
            change_text: format_index_change(entry.change),
            tone: Tone::classify(entry.change, ctx.thresholds),
        })
        .collect();
}

/// Rebuild portfolio rows: gain is the day's change times shares held.
pub fn bind_portfolio(board: &mut Board, store: &DataStore, holdings: &[Holding]) {
    board.portfolio = holdings
        .iter()
        .map(|h| match store.get(&h.symbol) {
            Some(entry) => {
                let gain = entry.change() * h.shares as f64;
                PortfolioRow {
                    symbol: h.symbol.clone(),
                    shares: h.shares,
                    gain_text: format_gain(gain),
                    tone: if gain >= 0.0 {
                        Tone::Positive
                    } else {
                        Tone::Negative
                    },
                }
            }
            None => PortfolioRow {
                symbol: h.symbol.clone(),
                shares: h.shares,
                gain_text: PLACEHOLDER.to_string(),
                tone: Tone::Neutral,
            },
        })
        .collect();
}
