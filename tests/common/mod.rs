#![allow(dead_code)]

use async_trait::async_trait;
use chrono::Utc;
use std::sync::Arc;
use std::time::Duration;
use tickerboard::api::{
    Assistant, ChatReply, DailySeries, ForecastPoint, ForecastSeries, Quote, Sentiment,
    SimulatedFeed,
};
use tickerboard::app::{App, Completion};
use tickerboard::config::Config;
use tickerboard::error::{FetchError, FetchResult};
use tickerboard::market::DeltaSource;
use tokio::sync::mpsc::UnboundedReceiver;

/// Fixed per-tick moves.
pub struct FixedDeltas {
    pub price: f64,
    pub index: f64,
}

impl DeltaSource for FixedDeltas {
    fn price_delta(&mut self, _symbol: &str) -> f64 {
        self.price
    }

    fn index_delta(&mut self, _name: &str) -> f64 {
        self.index
    }
}

/// Replays a list of price moves, then stands still.
pub struct ScriptedDeltas {
    pub prices: Vec<f64>,
    pub next: usize,
}

impl ScriptedDeltas {
    pub fn new(prices: &[f64]) -> Self {
        Self {
            prices: prices.to_vec(),
            next: 0,
        }
    }
}

impl DeltaSource for ScriptedDeltas {
    fn price_delta(&mut self, _symbol: &str) -> f64 {
        let d = self.prices.get(self.next).copied().unwrap_or(0.0);
        self.next += 1;
        d
    }

    fn index_delta(&mut self, _name: &str) -> f64 {
        0.0
    }
}

/// Glossary knows one term; chat echoes.
pub struct StubAssistant;

#[async_trait]
impl Assistant for StubAssistant {
    async fn lookup_term(&self, term: &str) -> FetchResult<String> {
        match term {
            "P/E" => Ok("Price divided by earnings per share.".to_string()),
            "blank" => Ok(String::new()),
            _ => Err(FetchError::server(Some(404), "Term not found")),
        }
    }

    async fn chat(&self, message: &str) -> FetchResult<ChatReply> {
        Ok(ChatReply {
            response: format!("echo: {}", message),
            sentiment: Sentiment {
                label: Some("positive".to_string()),
                confidence: Some(0.9),
                ..Sentiment::default()
            },
        })
    }
}

pub fn make_quote(symbol: &str, price: f64, change: f64) -> Quote {
    Quote {
        symbol: symbol.to_string(),
        price,
        change,
        change_percent: change / (price - change) * 100.0,
        timestamp: Utc::now(),
        meta: None,
    }
}

/// `n` closes labelled 2024-01-01 onward.
pub fn make_daily(symbol: &str, closes: &[f64]) -> DailySeries {
    DailySeries {
        symbol: symbol.to_string(),
        labels: (1..=closes.len())
            .map(|d| format!("2024-01-{:02}", d))
            .collect(),
        closes: closes.to_vec(),
    }
}

pub fn make_forecast(symbol: &str, first_day: u32, estimates: &[f64]) -> ForecastSeries {
    ForecastSeries {
        symbol: symbol.to_string(),
        horizon: estimates.len() as u32,
        points: estimates
            .iter()
            .enumerate()
            .map(|(i, &estimate)| ForecastPoint {
                label: format!("2024-01-{:02}", first_day + i as u32),
                estimate,
                lower: estimate - 1.0,
                upper: estimate + 1.0,
            })
            .collect(),
    }
}

/// App over the seeded simulator, with no file I/O.
pub fn test_app_with(
    config: Config,
    deltas: Box<dyn DeltaSource + Send>,
) -> (App, UnboundedReceiver<Completion>) {
    App::with_feed(
        config,
        Arc::new(SimulatedFeed::new(Some(7))),
        Arc::new(StubAssistant),
        deltas,
    )
}

pub fn test_app() -> (App, UnboundedReceiver<Completion>) {
    test_app_with(
        Config::test_config(),
        Box::new(FixedDeltas {
            price: 0.0,
            index: 0.0,
        }),
    )
}

/// Wait for and apply `n` completions.
pub async fn settle(app: &mut App, rx: &mut UnboundedReceiver<Completion>, n: usize) {
    for _ in 0..n {
        let completion = tokio::time::timeout(Duration::from_secs(5), rx.recv())
            .await
            .expect("completion timed out")
            .expect("channel closed");
        app.apply(completion);
    }
}

/// Wait for the next completion without applying it.
pub async fn next_completion(rx: &mut UnboundedReceiver<Completion>) -> Completion {
    tokio::time::timeout(Duration::from_secs(5), rx.recv())
        .await
        .expect("completion timed out")
        .expect("channel closed")
}
