use super::delta::DeltaSource;
use super::entry::{EntryMeta, EntryUpdate, IndexEntry, MarketEntry, PriceBounds};
use chrono::{DateTime, Utc};
use std::collections::{HashMap, HashSet};

/// Normalize user-entered symbols: trim, upper-case, drop empties and repeats.
pub fn normalize_symbols<I, S>(symbols: I) -> Vec<String>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut seen = HashSet::new();
    symbols
        .into_iter()
        .map(|s| s.as_ref().trim().to_uppercase())
        .filter(|s| !s.is_empty())
        .filter(|s| seen.insert(s.clone()))
        .collect()
}

/// Canonical market data shared by every view.
///
/// Entries exist only for tracked symbols: watchlist members plus the single
/// pinned analysis symbol. Everything else is dropped on `replace_watchlist`
/// or `unpin` and ignored by `upsert`.
#[derive(Debug, Clone)]
pub struct DataStore {
    watchlist: Vec<String>,
    pinned: Option<String>,
    entries: HashMap<String, MarketEntry>,
    indices: Vec<(String, IndexEntry)>,
    bounds: PriceBounds,
}

impl DataStore {
    pub fn new(bounds: PriceBounds) -> Self {
        Self {
            watchlist: Vec::new(),
            pinned: None,
            entries: HashMap::new(),
            indices: Vec::new(),
            bounds,
        }
    }

    pub fn with_indices<I>(mut self, indices: I) -> Self
    where
        I: IntoIterator<Item = (String, IndexEntry)>,
    {
        self.indices = indices.into_iter().collect();
        self
    }

    pub fn bounds(&self) -> PriceBounds {
        self.bounds
    }

    pub fn watchlist(&self) -> &[String] {
        &self.watchlist
    }

    pub fn pinned(&self) -> Option<&str> {
        self.pinned.as_deref()
    }

    pub fn is_tracked(&self, symbol: &str) -> bool {
        self.watchlist.iter().any(|s| s == symbol) || self.pinned.as_deref() == Some(symbol)
    }

    pub fn get(&self, symbol: &str) -> Option<&MarketEntry> {
        self.entries.get(symbol)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Apply one update. Returns the post-update entry, or `None` when the
    /// symbol is untracked or a delta targets a symbol with no entry yet.
    pub fn upsert(&mut self, symbol: &str, update: EntryUpdate) -> Option<&MarketEntry> {
        self.upsert_at(symbol, update, Utc::now())
    }

    pub fn upsert_at(
        &mut self,
        symbol: &str,
        update: EntryUpdate,
        now: DateTime<Utc>,
    ) -> Option<&MarketEntry> {
        if !self.is_tracked(symbol) {
            tracing::debug!(symbol, "ignoring update for untracked symbol");
            return None;
        }
        let bounds = self.bounds;
        if !self.entries.contains_key(symbol) {
            match update {
                EntryUpdate::Snapshot {
                    price,
                    change,
                    at,
                    meta,
                } => {
                    let entry = MarketEntry::new(meta.unwrap_or_default(), price, change, at);
                    self.entries.insert(symbol.to_string(), entry);
                    return self.entries.get(symbol);
                }
                EntryUpdate::Delta(_) => return None,
            }
        }
        let entry = self.entries.get_mut(symbol)?;
        entry.apply(update, bounds, now);
        Some(&*entry)
    }

    /// Insert a baseline entry directly, e.g. from a catalog.
    pub fn seed(&mut self, symbol: &str, meta: EntryMeta, price: f64, change: f64) -> bool {
        if !self.is_tracked(symbol) {
            return false;
        }
        self.entries.insert(
            symbol.to_string(),
            MarketEntry::new(meta, price, change, Utc::now()),
        );
        true
    }

    /// Reset the tracked set to exactly `symbols` (plus the pinned symbol).
    ///
    /// Existing entries for persisting symbols survive untouched. Returns the
    /// symbols that have no entry yet, in display order.
    pub fn replace_watchlist<I, S>(&mut self, symbols: I) -> Vec<String>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.watchlist = normalize_symbols(symbols);
        self.collect_garbage();
        self.watchlist
            .iter()
            .filter(|s| !self.entries.contains_key(*s))
            .cloned()
            .collect()
    }

    /// Track one symbol outside the watchlist. Returns true if it needs a
    /// baseline fetch.
    pub fn pin(&mut self, symbol: &str) -> bool {
        let symbol = symbol.trim().to_uppercase();
        if symbol.is_empty() {
            return false;
        }
        self.pinned = Some(symbol.clone());
        self.collect_garbage();
        !self.entries.contains_key(&symbol)
    }

    pub fn unpin(&mut self) {
        if self.pinned.take().is_some() {
            self.collect_garbage();
        }
    }

    fn collect_garbage(&mut self) {
        let watchlist = &self.watchlist;
        let pinned = self.pinned.as_deref();
        self.entries
            .retain(|symbol, _| watchlist.contains(symbol) || pinned == Some(symbol.as_str()));
    }

    /// Apply one simulated delta to every tracked symbol, in display order.
    pub fn jitter_entries(&mut self, deltas: &mut dyn DeltaSource, now: DateTime<Utc>) -> usize {
        let mut symbols: Vec<String> = self.watchlist.clone();
        if let Some(pinned) = &self.pinned {
            if !symbols.contains(pinned) {
                symbols.push(pinned.clone());
            }
        }
        let mut moved = 0;
        for symbol in &symbols {
            let delta = deltas.price_delta(symbol);
            if self.upsert_at(symbol, EntryUpdate::Delta(delta), now).is_some() {
                moved += 1;
            }
        }
        moved
    }

    pub fn indices(&self) -> &[(String, IndexEntry)] {
        &self.indices
    }

    pub fn index(&self, name: &str) -> Option<&IndexEntry> {
        self.indices.iter().find(|(n, _)| n == name).map(|(_, e)| e)
    }

    pub fn jitter_indices(&mut self, deltas: &mut dyn DeltaSource) {
        for (name, entry) in self.indices.iter_mut() {
            let delta = deltas.index_delta(name);
            entry.nudge(delta);
        }
    }
}

impl Default for DataStore {
    fn default() -> Self {
        Self::new(PriceBounds::default())
    }
}

pub fn default_indices() -> Vec<(String, IndexEntry)> {
    vec![
        ("SP500".to_string(), IndexEntry::new(4200.50, 1.2)),
        ("NASDAQ".to_string(), IndexEntry::new(13150.25, -0.8)),
        ("DOW".to_string(), IndexEntry::new(33850.75, 0.5)),
        ("VIX".to_string(), IndexEntry::new(21.5, -2.1)),
    ]
}
