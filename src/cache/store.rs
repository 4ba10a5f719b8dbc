//! Cache Store Module
//!
//! Main cache engine combining HashMap storage with LRU tracking and TTL
//! expiry, plus the thread-safe `TimedCache` facade built on top of it.

use std::collections::HashMap;
use std::hash::Hash;
use std::sync::{Mutex, MutexGuard, PoisonError};
use std::time::{Duration, Instant};

use crate::cache::{CacheEntry, CacheStats, LruTracker};

// == Timed Cache Store ==
/// Single-threaded cache engine with per-entry TTL and LRU eviction.
///
/// Every operation takes the current monotonic instant as an explicit
/// argument, so tests can drive the clock deterministically. Production code
/// goes through [`TimedCache`], which supplies `Instant::now()` and the lock.
#[derive(Debug)]
pub struct TimedCacheStore<K, V> {
    /// Key-value storage
    entries: HashMap<K, CacheEntry<V>>,
    /// LRU access tracker
    lru: LruTracker<K>,
    /// Performance statistics
    stats: CacheStats,
    /// Entries older than this are logically expired
    max_age: Duration,
    /// Maximum number of entries allowed
    max_size: usize,
}

impl<K, V> TimedCacheStore<K, V>
where
    K: Hash + Eq + Clone,
    V: Clone,
{
    // == Constructor ==
    /// Creates a new store with the given TTL and capacity.
    ///
    /// # Panics
    /// Panics if `max_size` is zero; a zero-capacity cache is a contract
    /// violation, rejected at construction rather than surfacing as
    /// undefined eviction behavior later.
    pub fn new(max_age: Duration, max_size: usize) -> Self {
        assert!(max_size > 0, "cache max_size must be at least 1");
        Self {
            entries: HashMap::new(),
            lru: LruTracker::new(),
            stats: CacheStats::new(),
            max_age,
            max_size,
        }
    }

    // == Put ==
    /// Inserts or overwrites the entry for `key` with `(value, now)`.
    ///
    /// Runs the expiry sweep first, places the entry at the most-recently-used
    /// end with a fresh timestamp, then evicts from the least-recently-used
    /// end while the capacity bound is exceeded. A fresh insert is always
    /// most-recently-used, so only pre-existing entries are eviction
    /// candidates.
    pub fn put(&mut self, key: K, value: V, now: Instant) {
        self.sweep_expired(now);

        self.entries.insert(key.clone(), CacheEntry::new(value, now));
        self.lru.touch(&key);

        while self.entries.len() > self.max_size {
            match self.lru.evict_oldest() {
                Some(oldest) => {
                    self.entries.remove(&oldest);
                    self.stats.record_eviction();
                }
                None => break,
            }
        }

        self.stats.set_resident(self.entries.len());
    }

    // == Get ==
    /// Retrieves a clone of the value for `key`, if present and not expired.
    ///
    /// An expired entry is removed on the spot and reported as a miss. A hit
    /// moves the entry to the most-recently-used end; its timestamp is left
    /// unchanged, so recency promotion does not extend the TTL.
    pub fn get(&mut self, key: &K, now: Instant) -> Option<V> {
        let expired = match self.entries.get(key) {
            Some(entry) => entry.is_expired(now, self.max_age),
            None => {
                self.stats.record_miss();
                return None;
            }
        };

        if expired {
            self.entries.remove(key);
            self.lru.remove(key);
            self.stats.record_expiration();
            self.stats.record_miss();
            self.stats.set_resident(self.entries.len());
            return None;
        }

        let value = self.entries.get(key).map(|entry| entry.value.clone());
        self.lru.touch(key);
        self.stats.record_hit();
        value
    }

    // == Contains ==
    /// Checks whether `key` holds a live entry, without promoting recency.
    ///
    /// Expiry is consulted exactly as in [`get`](Self::get) (an expired entry
    /// is removed and reported absent), but a live entry keeps its position
    /// in the LRU order.
    pub fn contains(&mut self, key: &K, now: Instant) -> bool {
        let expired = match self.entries.get(key) {
            Some(entry) => entry.is_expired(now, self.max_age),
            None => return false,
        };

        if expired {
            self.entries.remove(key);
            self.lru.remove(key);
            self.stats.record_expiration();
            self.stats.set_resident(self.entries.len());
            return false;
        }

        true
    }

    // == Expiry Sweep ==
    /// Trims expired entries from the least-recently-used end.
    ///
    /// Stops at the first non-expired entry. Because lookups reorder entries
    /// without refreshing their timestamps, the order is not globally sorted
    /// by write time, so this is a best-effort prefix trim: expired entries
    /// deeper in the order stay resident (but unreturnable) until a lookup
    /// touches them or a later sweep reaches them.
    fn sweep_expired(&mut self, now: Instant) {
        loop {
            let expired = match self.lru.peek_oldest() {
                Some(key) => self
                    .entries
                    .get(key)
                    .map_or(true, |entry| entry.is_expired(now, self.max_age)),
                None => break,
            };
            if !expired {
                break;
            }
            if let Some(key) = self.lru.evict_oldest() {
                self.entries.remove(&key);
                self.stats.record_expiration();
            }
        }
        self.stats.set_resident(self.entries.len());
    }

    // == Length ==
    /// Returns the resident entry count.
    ///
    /// May transiently include entries past their TTL that no sweep or lookup
    /// has removed yet.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    // == Is Empty ==
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    // == Stats ==
    /// Returns a snapshot of the cache statistics.
    pub fn stats(&self) -> CacheStats {
        let mut stats = self.stats.clone();
        stats.set_resident(self.entries.len());
        stats
    }
}

// == Timed Cache ==
/// Thread-safe, bounded, time-expiring key/value cache.
///
/// A single coarse mutex serializes every operation over the whole store:
/// correctness over throughput, sized for bot-command load. The lock is only
/// held for in-memory map work. The cache owns its entries; lookups return
/// clones, so callers cannot mutate stored values through the result.
///
/// # Example
/// ```
/// use std::time::Duration;
/// use referral_bot::cache::TimedCache;
///
/// let cache: TimedCache<i64, String> = TimedCache::new(Duration::from_secs(600), 10_000);
/// cache.put(42, "ref-abc".to_string());
/// assert_eq!(cache.get(&42), Some("ref-abc".to_string()));
/// assert_eq!(cache.get(&7), None);
/// ```
#[derive(Debug)]
pub struct TimedCache<K, V> {
    inner: Mutex<TimedCacheStore<K, V>>,
}

impl<K, V> TimedCache<K, V>
where
    K: Hash + Eq + Clone,
    V: Clone,
{
    // == Constructor ==
    /// Creates a new cache with the given TTL and capacity.
    ///
    /// Both parameters are fixed for the lifetime of the instance.
    ///
    /// # Panics
    /// Panics if `max_size` is zero.
    pub fn new(max_age: Duration, max_size: usize) -> Self {
        Self {
            inner: Mutex::new(TimedCacheStore::new(max_age, max_size)),
        }
    }

    /// Acquires the store lock, recovering from poisoning.
    ///
    /// The store holds plain data and every operation leaves it consistent
    /// even if a panic unwinds mid-way, so a poisoned lock is safe to reuse.
    fn lock(&self) -> MutexGuard<'_, TimedCacheStore<K, V>> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    // == Put ==
    /// Inserts or overwrites the entry for `key`, timestamped now.
    pub fn put(&self, key: K, value: V) {
        self.lock().put(key, value, Instant::now());
    }

    // == Get ==
    /// Retrieves the value for `key`, or `None` if absent or expired.
    ///
    /// Absence is a normal outcome, not a failure.
    pub fn get(&self, key: &K) -> Option<V> {
        self.lock().get(key, Instant::now())
    }

    // == Get Or Default ==
    /// Retrieves the value for `key`, or the type's default on a miss.
    pub fn get_or_default(&self, key: &K) -> V
    where
        V: Default,
    {
        self.get(key).unwrap_or_default()
    }

    // == Contains ==
    /// Existence probe with expiry semantics but without recency promotion.
    pub fn contains(&self, key: &K) -> bool {
        self.lock().contains(key, Instant::now())
    }

    // == Length ==
    /// Returns the resident entry count.
    pub fn len(&self) -> usize {
        self.lock().len()
    }

    // == Is Empty ==
    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    // == Stats ==
    /// Returns a snapshot of the cache statistics.
    pub fn stats(&self) -> CacheStats {
        self.lock().stats()
    }
}
