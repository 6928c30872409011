mod delta;
mod entry;
mod store;

pub use delta::{DeltaSource, RandomWalk};
pub use entry::{EntryMeta, EntryUpdate, IndexEntry, MarketEntry, PriceBounds};
pub use store::{DataStore, default_indices, normalize_symbols};
