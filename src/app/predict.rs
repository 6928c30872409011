use super::{App, InputMode};
use crate::api::clamp_horizon;

impl App {
    pub fn start_forecast(&mut self) {
        self.input_mode = InputMode::Forecast;
        self.input_buffer = self.config.default_horizon_days.to_string();
    }

    pub fn confirm_forecast(&mut self) {
        let input = std::mem::take(&mut self.input_buffer);
        self.input_mode = InputMode::Normal;
        match input.trim().parse::<i64>() {
            Ok(days) => {
                self.request_forecast(days);
            }
            Err(_) => self.predict_status = Some("Enter a number of days.".to_string()),
        }
    }

    /// Ask for a forecast of the current selection. The horizon is clamped
    /// to `[1, 30]` before the request is issued; returns the horizon used.
    pub fn request_forecast(&mut self, days: i64) -> Option<u32> {
        let Some(symbol) = self.selection.current().map(str::to_string) else {
            self.predict_status = Some("Select a stock first.".to_string());
            return None;
        };
        if self.chart.symbol() != Some(symbol.as_str()) {
            self.predict_status = Some("Daily data not loaded yet.".to_string());
            return None;
        }
        let horizon = clamp_horizon(days);
        let epoch = self.selection.epoch();
        self.predict_status = Some(format!("Forecasting {} for {} day(s)...", symbol, horizon));
        tracing::info!(%symbol, horizon, requested = days, "forecast requested");
        self.spawn_prediction(symbol, epoch, horizon);
        Some(horizon)
    }
}
