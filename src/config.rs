use crate::market::{PriceBounds, normalize_symbols};
use crate::view::Thresholds;
use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;

pub const APP_DIR: &str = "tickerboard";

/// Where market data comes from.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum FeedMode {
    /// Seeded random walk, no network.
    #[default]
    Simulated,
    /// The HTTP backend at `base_url`.
    Remote,
}

impl FeedMode {
    pub fn label(&self) -> &'static str {
        match self {
            FeedMode::Simulated => "simulated",
            FeedMode::Remote => "remote",
        }
    }
}

/// A position held in the portfolio strip.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Holding {
    pub symbol: String,
    pub shares: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    #[serde(default = "default_base_url")]
    pub base_url: String,
    #[serde(default)]
    pub feed: FeedMode,
    #[serde(default = "default_watchlist")]
    pub watchlist: Vec<String>,
    #[serde(default = "default_fast_interval")]
    pub fast_interval_ms: u64,
    #[serde(default = "default_slow_interval")]
    pub slow_interval_secs: u64,
    #[serde(default = "default_price_floor")]
    pub price_floor: f64,
    #[serde(default = "default_price_ceiling")]
    pub price_ceiling: f64,
    #[serde(default = "default_positive_threshold")]
    pub positive_threshold: f64,
    #[serde(default = "default_negative_threshold")]
    pub negative_threshold: f64,
    #[serde(default = "default_stale_after")]
    pub stale_after_secs: u64,
    #[serde(default = "default_horizon")]
    pub default_horizon_days: u32,
    #[serde(default)]
    pub news_sources: Vec<String>,
    #[serde(default = "default_portfolio")]
    pub portfolio: Vec<Holding>,
}

fn default_base_url() -> String {
    "http://127.0.0.1:5000".to_string()
}

fn default_watchlist() -> Vec<String> {
    [
        "AAPL", "MSFT", "AMZN", "GOOGL", "TSLA", "NVDA", "JPM", "META", "INTC", "KO",
    ]
    .iter()
    .map(|s| s.to_string())
    .collect()
}

fn default_fast_interval() -> u64 {
    3000
}

fn default_slow_interval() -> u64 {
    30
}

fn default_price_floor() -> f64 {
    10.0
}

fn default_price_ceiling() -> f64 {
    5000.0
}

fn default_positive_threshold() -> f64 {
    0.1
}

fn default_negative_threshold() -> f64 {
    -0.1
}

fn default_stale_after() -> u64 {
    60
}

fn default_horizon() -> u32 {
    7
}

fn default_portfolio() -> Vec<Holding> {
    vec![
        Holding {
            symbol: "AAPL".to_string(),
            shares: 10,
        },
        Holding {
            symbol: "MSFT".to_string(),
            shares: 5,
        },
        Holding {
            symbol: "TSLA".to_string(),
            shares: 3,
        },
    ]
}

impl Default for Config {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            feed: FeedMode::default(),
            watchlist: default_watchlist(),
            fast_interval_ms: default_fast_interval(),
            slow_interval_secs: default_slow_interval(),
            price_floor: default_price_floor(),
            price_ceiling: default_price_ceiling(),
            positive_threshold: default_positive_threshold(),
            negative_threshold: default_negative_threshold(),
            stale_after_secs: default_stale_after(),
            default_horizon_days: default_horizon(),
            news_sources: Vec::new(),
            portfolio: default_portfolio(),
        }
    }
}

impl Config {
    pub fn config_dir() -> Result<PathBuf> {
        let config_dir = dirs::config_dir()
            .ok_or_else(|| anyhow::anyhow!("Could not find config directory"))?
            .join(APP_DIR);

        if !config_dir.exists() {
            fs::create_dir_all(&config_dir)?;
        }

        Ok(config_dir)
    }

    pub fn config_path() -> Result<PathBuf> {
        Ok(Self::config_dir()?.join("config.json"))
    }

    pub fn load() -> Result<Self> {
        let path = Self::config_path()?;

        if !path.exists() {
            let config = Config::default();
            config.save()?;
            return Ok(config);
        }

        let content = fs::read_to_string(&path)?;
        let mut config = Self::from_json(&content)?;
        if config.sanitize() {
            tracing::info!(path = %path.display(), "config normalized on load");
        }
        Ok(config)
    }

    pub fn from_json(content: &str) -> Result<Self> {
        Ok(serde_json::from_str(content)?)
    }

    pub fn save(&self) -> Result<()> {
        let path = Self::config_path()?;
        let content = serde_json::to_string_pretty(self)?;
        fs::write(&path, content)?;
        Ok(())
    }

    /// Repair values a hand-edited file can get wrong. Returns true if
    /// anything changed.
    pub fn sanitize(&mut self) -> bool {
        let mut changed = false;

        let normalized = normalize_symbols(self.watchlist.iter().map(String::as_str));
        if normalized != self.watchlist {
            self.watchlist = normalized;
            changed = true;
        }
        if self.price_floor > self.price_ceiling {
            std::mem::swap(&mut self.price_floor, &mut self.price_ceiling);
            changed = true;
        }
        if self.negative_threshold > self.positive_threshold {
            std::mem::swap(&mut self.negative_threshold, &mut self.positive_threshold);
            changed = true;
        }
        if self.fast_interval_ms == 0 {
            self.fast_interval_ms = default_fast_interval();
            changed = true;
        }
        if self.slow_interval_secs == 0 {
            self.slow_interval_secs = default_slow_interval();
            changed = true;
        }
        let before = self.portfolio.len();
        self.portfolio.retain(|h| h.shares > 0 && !h.symbol.trim().is_empty());
        changed |= before != self.portfolio.len();

        changed
    }

    pub fn thresholds(&self) -> Thresholds {
        Thresholds {
            positive: self.positive_threshold,
            negative: self.negative_threshold,
        }
    }

    pub fn bounds(&self) -> PriceBounds {
        PriceBounds {
            floor: self.price_floor,
            ceiling: self.price_ceiling,
        }
    }

    /// Add shares to a holding, creating it if needed. Returns false on
    /// overflow, leaving the holding unchanged.
    pub fn add_holding(&mut self, symbol: &str, shares: u32) -> bool {
        let symbol = symbol.trim().to_uppercase();
        if symbol.is_empty() || shares == 0 {
            return false;
        }
        if let Some(holding) = self.portfolio.iter_mut().find(|h| h.symbol == symbol) {
            match holding.shares.checked_add(shares) {
                Some(total) => holding.shares = total,
                None => return false,
            }
        } else {
            self.portfolio.push(Holding { symbol, shares });
        }
        true
    }

    pub fn remove_holding(&mut self, symbol: &str) -> bool {
        let symbol = symbol.trim().to_uppercase();
        let before = self.portfolio.len();
        self.portfolio.retain(|h| h.symbol != symbol);
        before != self.portfolio.len()
    }

    /// In-memory config for tests: no file I/O, fast cadences, no portfolio.
    #[doc(hidden)]
    pub fn test_config() -> Self {
        Self {
            watchlist: vec!["AAPL".to_string(), "MSFT".to_string(), "TSLA".to_string()],
            fast_interval_ms: 10,
            slow_interval_secs: 1,
            portfolio: Vec::new(),
            ..Self::default()
        }
    }
}
