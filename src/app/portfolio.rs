use super::{App, InputMode, RequestOrigin};
use crate::view::binder;

impl App {
    pub fn start_portfolio_add(&mut self) {
        self.input_mode = InputMode::PortfolioSymbol;
        self.input_buffer = self.selection.current().unwrap_or_default().to_string();
        self.pending_symbol = None;
    }

    pub fn confirm_portfolio_symbol(&mut self) {
        let symbol = self.input_buffer.trim().to_uppercase();
        self.input_buffer.clear();
        if symbol.is_empty() {
            self.status_message = Some("Symbol cannot be empty".to_string());
            self.input_mode = InputMode::Normal;
        } else {
            self.pending_symbol = Some(symbol);
            self.input_mode = InputMode::PortfolioShares;
        }
    }

    pub fn confirm_portfolio_shares(&mut self) {
        let input = std::mem::take(&mut self.input_buffer);
        self.input_mode = InputMode::Normal;
        let Some(symbol) = self.pending_symbol.take() else {
            self.status_message = Some("Missing symbol".to_string());
            return;
        };
        match input.trim().parse::<u32>() {
            Ok(shares) if shares > 0 => {
                self.add_holding(&symbol, shares);
            }
            Ok(_) => self.status_message = Some("Shares must be greater than 0".to_string()),
            Err(_) => self.status_message = Some("Invalid number of shares".to_string()),
        }
    }

    pub fn add_holding(&mut self, symbol: &str, shares: u32) -> bool {
        if !self.config.add_holding(symbol, shares) {
            self.status_message = Some("Share count would overflow".to_string());
            return false;
        }
        let symbol = symbol.trim().to_uppercase();
        self.save_config();
        binder::bind_portfolio(&mut self.board, &self.store, &self.config.portfolio);
        if self.store.is_tracked(&symbol) && self.store.get(&symbol).is_none() {
            self.spawn_quote(symbol.clone(), RequestOrigin::Refresh);
        }
        self.status_message = Some(format!("Added {} share(s) of {}", shares, symbol));
        true
    }

    /// Drop the holding for the current selection.
    pub fn remove_selected_holding(&mut self) -> bool {
        let Some(symbol) = self.selection.current().map(str::to_string) else {
            self.status_message = Some("Select a stock first".to_string());
            return false;
        };
        if !self.config.remove_holding(&symbol) {
            self.status_message = Some(format!("No holding for {}", symbol));
            return false;
        }
        self.save_config();
        binder::bind_portfolio(&mut self.board, &self.store, &self.config.portfolio);
        self.status_message = Some(format!("Removed {} from portfolio", symbol));
        true
    }
}
