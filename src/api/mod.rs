pub mod news;
pub mod remote;
pub mod simulated;

pub use news::{Headline, Impact, NewsClient, builtin_headlines};
pub use remote::{ChatReply, RemoteQuoteClient, Sentiment, join_url};
pub use simulated::SimulatedFeed;

use crate::error::FetchResult;
use crate::market::{EntryMeta, EntryUpdate};
use async_trait::async_trait;
use chrono::{DateTime, Utc};

pub const MIN_HORIZON_DAYS: u32 = 1;
pub const MAX_HORIZON_DAYS: u32 = 30;

/// Clamp a requested forecast horizon into `[1, 30]` days.
pub fn clamp_horizon(days: i64) -> u32 {
    days.clamp(MIN_HORIZON_DAYS as i64, MAX_HORIZON_DAYS as i64) as u32
}

/// Latest price for one symbol.
#[derive(Debug, Clone, PartialEq)]
pub struct Quote {
    pub symbol: String,
    pub price: f64,
    pub change: f64,
    /// As reported by the producer. The store derives its own.
    pub change_percent: f64,
    pub timestamp: DateTime<Utc>,
    /// Descriptive fields, when the producer knows them.
    pub meta: Option<EntryMeta>,
}

impl Quote {
    pub fn into_update(self) -> EntryUpdate {
        EntryUpdate::Snapshot {
            price: self.price,
            change: self.change,
            at: self.timestamp,
            meta: self.meta,
        }
    }
}

/// Daily closes for one symbol; `labels` and `closes` have equal length.
#[derive(Debug, Clone, PartialEq)]
pub struct DailySeries {
    pub symbol: String,
    pub labels: Vec<String>,
    pub closes: Vec<f64>,
}

impl DailySeries {
    pub fn len(&self) -> usize {
        self.closes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.closes.is_empty()
    }

    pub fn last_label(&self) -> Option<&str> {
        self.labels.last().map(String::as_str)
    }

    pub fn last_close(&self) -> Option<f64> {
        self.closes.last().copied()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ForecastPoint {
    pub label: String,
    pub estimate: f64,
    pub lower: f64,
    pub upper: f64,
}

/// Forecast overlay valid for exactly one (symbol, horizon) pair.
#[derive(Debug, Clone, PartialEq)]
pub struct ForecastSeries {
    pub symbol: String,
    pub horizon: u32,
    pub points: Vec<ForecastPoint>,
}

/// Producer of quotes, daily history and forecasts.
///
/// Implemented by the HTTP client and by the offline simulator so the
/// dashboard can run, and be tested, against either.
#[async_trait]
pub trait MarketFeed: Send + Sync {
    fn name(&self) -> &'static str;

    async fn fetch_quote(&self, symbol: &str) -> FetchResult<Quote>;

    async fn fetch_daily(&self, symbol: &str) -> FetchResult<DailySeries>;

    /// `horizon` must already be clamped with [`clamp_horizon`].
    async fn fetch_prediction(&self, symbol: &str, horizon: u32) -> FetchResult<ForecastSeries>;
}

/// Glossary and chat collaborators.
#[async_trait]
pub trait Assistant: Send + Sync {
    async fn lookup_term(&self, term: &str) -> FetchResult<String>;

    async fn chat(&self, message: &str) -> FetchResult<ChatReply>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn horizon_is_clamped() {
        assert_eq!(clamp_horizon(45), 30);
        assert_eq!(clamp_horizon(0), 1);
        assert_eq!(clamp_horizon(-3), 1);
        assert_eq!(clamp_horizon(7), 7);
    }
}
