//! Cache Module
//!
//! Provides a bounded, time-expiring, thread-safe key/value cache with LRU
//! eviction. The bot uses it to remember referral codes per user id across
//! otherwise-stateless webhook round trips.

mod entry;
mod lru;
mod stats;
mod store;


// Re-export public types
pub use entry::CacheEntry;
pub use lru::LruTracker;
pub use stats::CacheStats;
pub use store::{TimedCache, TimedCacheStore};
