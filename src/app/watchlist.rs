use super::{App, InputMode, RequestOrigin};
use crate::market::normalize_symbols;
use crate::view::binder;

impl App {
    pub fn start_watchlist_edit(&mut self) {
        self.input_mode = InputMode::Watchlist;
        self.input_buffer = self.store.watchlist().join(", ");
    }

    pub fn confirm_watchlist_edit(&mut self) {
        let input = std::mem::take(&mut self.input_buffer);
        self.input_mode = InputMode::Normal;
        self.apply_watchlist(&input);
    }

    /// Replace the watchlist from comma-separated input.
    ///
    /// Persisting symbols keep their entries, new ones get a baseline fetch,
    /// every card is rebuilt and the first symbol becomes current. Returns
    /// the new watchlist length, or 0 if the input held no symbols.
    pub fn apply_watchlist(&mut self, input: &str) -> usize {
        let symbols = normalize_symbols(input.split(','));
        if symbols.is_empty() {
            self.status_message = Some("Watchlist cannot be empty".to_string());
            return 0;
        }

        let missing = self.store.replace_watchlist(&symbols);
        binder::rebuild_cards(&mut self.board, self.store.watchlist());
        let ctx = self.bind_context();
        binder::bind_all_cards(&mut self.board, &self.store, &ctx);
        binder::bind_portfolio(&mut self.board, &self.store, &self.config.portfolio);
        self.cursor = 0;

        let first = symbols[0].clone();
        for symbol in missing {
            self.spawn_quote(symbol, RequestOrigin::Refresh);
        }

        self.config.watchlist = self.store.watchlist().to_vec();
        self.save_config();

        self.select(&first);

        let count = self.store.watchlist().len();
        self.status_message = Some(format!("Watchlist updated: {} symbol(s)", count));
        tracing::info!(count, "watchlist replaced");
        count
    }

    /// Fetch a fresh quote for every watchlist member.
    pub fn refresh_all(&mut self) -> usize {
        let symbols: Vec<String> = self.store.watchlist().to_vec();
        for symbol in &symbols {
            self.spawn_quote(symbol.clone(), RequestOrigin::Refresh);
        }
        self.status_message = Some(format!("Refreshing {} quote(s)...", symbols.len()));
        symbols.len()
    }
}
