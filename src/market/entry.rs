use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Descriptive fields of a symbol. Fixed once the entry exists.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EntryMeta {
    pub company: String,
    pub sector: String,
    pub market_cap: String,
    pub volume: String,
    pub pe: Option<f64>,
}

impl Default for EntryMeta {
    fn default() -> Self {
        Self {
            company: "N/A".to_string(),
            sector: "N/A".to_string(),
            market_cap: "N/A".to_string(),
            volume: "N/A".to_string(),
            pe: None,
        }
    }
}

/// Floor and ceiling applied to simulated price moves.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PriceBounds {
    pub floor: f64,
    pub ceiling: f64,
}

impl PriceBounds {
    /// Clamp a move away from `current`. A price already outside the band
    /// may move freely but is never pushed further past the bound it broke.
    pub fn clamp_move(&self, current: f64, moved: f64) -> f64 {
        moved.clamp(current.min(self.floor), current.max(self.ceiling))
    }
}

impl Default for PriceBounds {
    fn default() -> Self {
        Self {
            floor: 10.0,
            ceiling: 5000.0,
        }
    }
}

/// A mutation applied through `DataStore::upsert`.
#[derive(Debug, Clone, PartialEq)]
pub enum EntryUpdate {
    /// Simulated move: price and change shift by the same amount.
    Delta(f64),
    /// A fetched quote. `meta` is only used when the entry is created.
    Snapshot {
        price: f64,
        change: f64,
        at: DateTime<Utc>,
        meta: Option<EntryMeta>,
    },
}

/// Per-symbol market snapshot.
#[derive(Debug, Clone, PartialEq)]
pub struct MarketEntry {
    price: f64,
    change: f64,
    meta: EntryMeta,
    updated_at: DateTime<Utc>,
}

impl MarketEntry {
    pub fn new(meta: EntryMeta, price: f64, change: f64, updated_at: DateTime<Utc>) -> Self {
        Self {
            price: price.max(0.0),
            change,
            meta,
            updated_at,
        }
    }

    pub fn price(&self) -> f64 {
        self.price
    }

    pub fn change(&self) -> f64 {
        self.change
    }

    /// `change / (price - change) * 100`, derived on every read.
    ///
    /// The divisor is the pre-change baseline; a zero baseline yields `0.0`.
    pub fn change_percent(&self) -> f64 {
        let baseline = self.price - self.change;
        if baseline.abs() < f64::EPSILON {
            return 0.0;
        }
        self.change / baseline * 100.0
    }

    pub fn meta(&self) -> &EntryMeta {
        &self.meta
    }

    pub fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }

    pub fn is_stale(&self, now: DateTime<Utc>, stale_after_secs: u64) -> bool {
        (now - self.updated_at).num_seconds() > stale_after_secs as i64
    }

    pub(crate) fn apply(&mut self, update: EntryUpdate, bounds: PriceBounds, now: DateTime<Utc>) {
        match update {
            EntryUpdate::Delta(delta) => {
                let moved = self.price + delta;
                let clamped = bounds.clamp_move(self.price, moved);
                // keep price - change constant when the clamp bites
                self.change += delta + (clamped - moved);
                self.price = clamped;
                self.updated_at = now;
            }
            EntryUpdate::Snapshot {
                price, change, at, ..
            } => {
                self.price = price.max(0.0);
                self.change = change;
                self.updated_at = at;
            }
        }
    }
}

/// Market index tile value. `change` is already a percentage.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct IndexEntry {
    pub value: f64,
    pub change: f64,
}

impl IndexEntry {
    pub fn new(value: f64, change: f64) -> Self {
        Self { value, change }
    }

    pub(crate) fn nudge(&mut self, delta: f64) {
        self.change += delta;
        self.value += self.value * delta / 100.0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(price: f64, change: f64) -> MarketEntry {
        MarketEntry::new(EntryMeta::default(), price, change, Utc::now())
    }

    #[test]
    fn change_percent_uses_pre_change_baseline() {
        let e = entry(100.0, 2.0);
        assert!((e.change_percent() - 2.0 / 98.0 * 100.0).abs() < 1e-9);
    }

    #[test]
    fn change_percent_zero_baseline_is_zero() {
        let e = entry(5.0, 5.0);
        assert_eq!(e.change_percent(), 0.0);
    }

    #[test]
    fn clamped_delta_preserves_baseline() {
        let mut e = entry(10.5, 0.5);
        e.apply(EntryUpdate::Delta(-3.0), PriceBounds::default(), Utc::now());
        assert_eq!(e.price(), 10.0);
        assert!((e.price() - e.change() - 10.0).abs() < 1e-9);
    }

    #[test]
    fn clamp_move_leaves_out_of_band_price_alone() {
        let bounds = PriceBounds::default();
        assert_eq!(bounds.clamp_move(2.0, 2.5), 2.5);
        assert_eq!(bounds.clamp_move(2.0, 1.0), 2.0);
        assert_eq!(bounds.clamp_move(6000.0, 6100.0), 6000.0);
        assert_eq!(bounds.clamp_move(6000.0, 5500.0), 5500.0);
        assert_eq!(bounds.clamp_move(20.0, 5.0), 10.0);
    }

    #[test]
    fn index_nudge_moves_value_by_percentage() {
        let mut idx = IndexEntry::new(1000.0, 0.0);
        idx.nudge(0.5);
        assert!((idx.value - 1005.0).abs() < 1e-9);
        assert!((idx.change - 0.5).abs() < 1e-9);
    }
}
