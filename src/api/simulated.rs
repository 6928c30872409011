use super::{DailySeries, ForecastPoint, ForecastSeries, MarketFeed, Quote};
use crate::error::{FetchError, FetchResult};
use crate::market::EntryMeta;
use async_trait::async_trait;
use chrono::{Days, Local, NaiveDate, Utc};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::collections::HashMap;
use std::sync::Mutex;

const HISTORY_DAYS: u64 = 30;

struct Listing {
    symbol: &'static str,
    company: &'static str,
    sector: &'static str,
    market_cap: &'static str,
    volume: &'static str,
    pe: f64,
    price: f64,
    change: f64,
}

const LISTINGS: &[Listing] = &[
    Listing { symbol: "AAPL", company: "Apple Inc.", sector: "Technology", market_cap: "2.8T", volume: "45.2M", pe: 28.5, price: 175.43, change: 2.15 },
    Listing { symbol: "MSFT", company: "Microsoft Corp.", sector: "Technology", market_cap: "2.5T", volume: "28.7M", pe: 32.8, price: 342.18, change: 4.22 },
    Listing { symbol: "AMZN", company: "Amazon.com Inc.", sector: "E-commerce", market_cap: "1.6T", volume: "3.1M", pe: 58.3, price: 3156.78, change: -22.45 },
    Listing { symbol: "GOOGL", company: "Alphabet Inc.", sector: "Technology", market_cap: "1.9T", volume: "1.2M", pe: 24.1, price: 2847.50, change: -15.30 },
    Listing { symbol: "TSLA", company: "Tesla Inc.", sector: "Automotive", market_cap: "790B", volume: "85.3M", pe: 65.2, price: 248.90, change: 8.75 },
    Listing { symbol: "NVDA", company: "NVIDIA Corp.", sector: "Technology", market_cap: "2.1T", volume: "42.8M", pe: 45.7, price: 875.32, change: 18.90 },
    Listing { symbol: "JPM", company: "JPMorgan Chase & Co.", sector: "Financials", market_cap: "560B", volume: "9.4M", pe: 12.1, price: 196.20, change: -0.85 },
    Listing { symbol: "META", company: "Meta Platforms Inc.", sector: "Technology", market_cap: "1.2T", volume: "14.6M", pe: 27.4, price: 486.15, change: 3.40 },
    Listing { symbol: "INTC", company: "Intel Corp.", sector: "Technology", market_cap: "180B", volume: "38.9M", pe: 31.0, price: 42.71, change: -0.36 },
    Listing { symbol: "KO", company: "Coca-Cola Co.", sector: "Consumer Staples", market_cap: "260B", volume: "12.2M", pe: 24.6, price: 60.12, change: 0.03 },
];

fn listing(symbol: &str) -> Option<&'static Listing> {
    LISTINGS.iter().find(|l| l.symbol == symbol)
}

/// Descriptive fields for a known symbol.
pub fn catalog_meta(symbol: &str) -> Option<EntryMeta> {
    listing(symbol).map(|l| EntryMeta {
        company: l.company.to_string(),
        sector: l.sector.to_string(),
        market_cap: l.market_cap.to_string(),
        volume: l.volume.to_string(),
        pe: Some(l.pe),
    })
}

/// Offline producer: a catalog of listings plus a random walk per symbol.
pub struct SimulatedFeed {
    rng: Mutex<StdRng>,
    // last (price, change) handed out per symbol
    walks: Mutex<HashMap<String, (f64, f64)>>,
}

impl SimulatedFeed {
    pub fn new(seed: Option<u64>) -> Self {
        let rng = match seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        Self {
            rng: Mutex::new(rng),
            walks: Mutex::new(HashMap::new()),
        }
    }

    fn with_rng<T>(&self, f: impl FnOnce(&mut StdRng) -> T) -> FetchResult<T> {
        let mut rng = self
            .rng
            .lock()
            .map_err(|_| FetchError::Network("simulator state poisoned".to_string()))?;
        Ok(f(&mut rng))
    }

    fn baseline(&self, symbol: &str) -> FetchResult<(f64, f64)> {
        if let Some(l) = listing(symbol) {
            return Ok((l.price, l.change));
        }
        self.with_rng(|rng| {
            let price = rng.gen_range(50.0..250.0);
            let change = price * rng.gen_range(-0.02..0.02);
            (price, change)
        })
    }

    fn next_price(&self, symbol: &str) -> FetchResult<(f64, f64)> {
        let known = self
            .walks
            .lock()
            .map_err(|_| FetchError::Network("simulator state poisoned".to_string()))?
            .get(symbol)
            .copied();
        let (price, change) = match known {
            Some((price, change)) => {
                let delta = self.with_rng(|rng| rng.gen_range(-1.0..=1.0))?;
                ((price + delta).max(0.01), change + delta)
            }
            None => self.baseline(symbol)?,
        };
        self.walks
            .lock()
            .map_err(|_| FetchError::Network("simulator state poisoned".to_string()))?
            .insert(symbol.to_string(), (price, change));
        Ok((price, change))
    }

    fn today() -> NaiveDate {
        Local::now().date_naive()
    }
}

impl Default for SimulatedFeed {
    fn default() -> Self {
        Self::new(None)
    }
}

fn label(date: NaiveDate) -> String {
    date.format("%Y-%m-%d").to_string()
}

#[async_trait]
impl MarketFeed for SimulatedFeed {
    fn name(&self) -> &'static str {
        "simulated"
    }

    async fn fetch_quote(&self, symbol: &str) -> FetchResult<Quote> {
        let (price, change) = self.next_price(symbol)?;
        let baseline = price - change;
        let change_percent = if baseline.abs() < f64::EPSILON {
            0.0
        } else {
            change / baseline * 100.0
        };
        Ok(Quote {
            symbol: symbol.to_string(),
            price,
            change,
            change_percent,
            timestamp: Utc::now(),
            meta: Some(catalog_meta(symbol).unwrap_or_else(|| EntryMeta {
                company: format!("{} - Stock Analysis", symbol),
                ..EntryMeta::default()
            })),
        })
    }

    /// Thirty daily closes ending yesterday, walking back from the current
    /// simulated price.
    async fn fetch_daily(&self, symbol: &str) -> FetchResult<DailySeries> {
        let (price, _) = self.next_price(symbol)?;
        let today = Self::today();
        let mut closes = Vec::with_capacity(HISTORY_DAYS as usize);
        let mut close = price;
        self.with_rng(|rng| {
            for _ in 0..HISTORY_DAYS {
                closes.push(close);
                close = (close * (1.0 + rng.gen_range(-0.02..0.02))).max(0.01);
            }
        })?;
        closes.reverse();
        let labels = (1..=HISTORY_DAYS)
            .rev()
            .filter_map(|back| today.checked_sub_days(Days::new(back)))
            .map(label)
            .collect::<Vec<_>>();
        if labels.len() != closes.len() {
            return Err(FetchError::Malformed("calendar underflow".to_string()));
        }
        Ok(DailySeries {
            symbol: symbol.to_string(),
            labels,
            closes,
        })
    }

    /// Drifts within ±10% of the current price over the horizon; bands widen
    /// with the square root of the step. Labels start today.
    async fn fetch_prediction(&self, symbol: &str, horizon: u32) -> FetchResult<ForecastSeries> {
        let (price, _) = self.next_price(symbol)?;
        let drift = self.with_rng(|rng| rng.gen_range(-0.1..0.1))?;
        let today = Self::today();
        let points = (0..horizon)
            .filter_map(|i| {
                let date = today.checked_add_days(Days::new(i as u64))?;
                let step = (i + 1) as f64;
                let estimate = price * (1.0 + drift * step / horizon as f64);
                let spread = price * 0.02 * step.sqrt();
                Some(ForecastPoint {
                    label: label(date),
                    estimate,
                    lower: estimate - spread,
                    upper: estimate + spread,
                })
            })
            .collect::<Vec<_>>();
        if points.len() != horizon as usize {
            return Err(FetchError::Malformed("calendar overflow".to_string()));
        }
        Ok(ForecastSeries {
            symbol: symbol.to_string(),
            horizon,
            points,
        })
    }
}
