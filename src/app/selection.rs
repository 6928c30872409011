use super::{App, RequestOrigin};
use crate::view::binder;

/// The one symbol the detail panel and history chart follow.
///
/// Every change bumps `epoch`; requests remember the epoch they were issued
/// under so a late answer for an earlier selection can be recognized.
#[derive(Debug, Clone, Default)]
pub struct Selection {
    current: Option<String>,
    epoch: u64,
}

impl Selection {
    pub fn current(&self) -> Option<&str> {
        self.current.as_deref()
    }

    pub fn epoch(&self) -> u64 {
        self.epoch
    }

    pub fn is_current(&self, epoch: u64) -> bool {
        self.current.is_some() && self.epoch == epoch
    }

    pub(crate) fn set(&mut self, symbol: &str) -> u64 {
        self.current = Some(symbol.to_string());
        self.epoch += 1;
        self.epoch
    }
}

impl App {
    /// Make `symbol` current: highlight its card, point the detail panel at
    /// it and fetch its quote and daily series concurrently.
    ///
    /// Only watchlist members and the pinned analysis symbol can be selected.
    pub fn select(&mut self, symbol: &str) -> bool {
        let symbol = symbol.trim().to_uppercase();
        let in_watchlist = self.store.watchlist().iter().any(|s| *s == symbol);
        if !in_watchlist && self.store.pinned() != Some(symbol.as_str()) {
            self.status_message = Some(format!("{} is not on the watchlist", symbol));
            return false;
        }
        if in_watchlist && self.store.pinned().is_some_and(|p| p != symbol) {
            self.store.unpin();
        }

        let epoch = self.selection.set(&symbol);
        binder::highlight(&mut self.board, Some(&symbol));
        if let Some(pos) = self.board.cards.position_of(&symbol) {
            self.cursor = pos;
        }

        self.board.detail.retarget(&symbol);
        let ctx = self.bind_context();
        binder::bind_detail(&mut self.board, &self.store, &symbol, &ctx);

        self.chart.clear();
        self.chart_status = Some("Loading daily data...".to_string());
        self.predict_status = None;

        self.spawn_quote(symbol.clone(), RequestOrigin::Selection(epoch));
        self.spawn_daily(symbol.clone(), epoch);
        tracing::info!(%symbol, epoch, "selected");
        true
    }

    /// Single-stock analysis: track `symbol` even if it is off the
    /// watchlist, then select it.
    pub fn analyze(&mut self, symbol: &str) -> bool {
        let symbol = symbol.trim().to_uppercase();
        if symbol.is_empty() {
            self.status_message = Some("Enter a symbol to analyze".to_string());
            return false;
        }
        if !self.store.watchlist().contains(&symbol) {
            self.store.pin(&symbol);
        }
        self.select(&symbol)
    }

    pub fn start_analyze(&mut self) {
        self.input_mode = super::InputMode::Analyze;
        self.input_buffer.clear();
    }

    pub fn confirm_analyze(&mut self) {
        let input = std::mem::take(&mut self.input_buffer);
        self.input_mode = super::InputMode::Normal;
        self.analyze(&input);
    }
}
