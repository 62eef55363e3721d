//! Per-track classification history.
//!
//! [`ClassificationHistory`] decides, region by region, whether a tracked
//! object needs a fresh classification or can reuse the result stored for its
//! track identifier. Results live in a bounded [`LruCache`].

mod classification_history;
mod config;
mod entry;
mod entry_state;
mod lru_cache;

pub use classification_history::{
    ClassificationHistory, Decision, Dispatch, HistoryStats, HistoryView,
};
pub use config::{DEFAULT_HISTORY_SIZE, GapFrom, HistoryConfig, PendingPolicy, ReusePolicy};
pub use entry::{InFlight, RoiHistory};
pub use entry_state::EntryState;
pub use lru_cache::{Iter, LruCache};
