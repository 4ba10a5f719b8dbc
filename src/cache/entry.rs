//! Cache Entry Module
//!
//! Defines the structure for individual cache entries with age tracking.

use std::time::{Duration, Instant};

// == Cache Entry ==
/// A stored value together with the monotonic instant it was last written.
///
/// The timestamp is set on insert and overwrite only; a lookup promotes the
/// entry in the recency order but leaves the timestamp untouched.
#[derive(Debug, Clone)]
pub struct CacheEntry<V> {
    /// The stored value
    pub value: V,
    /// Monotonic clock reading taken at the last write
    pub written_at: Instant,
}

impl<V> CacheEntry<V> {
    // == Constructor ==
    /// Creates a new cache entry written at `now`.
    pub fn new(value: V, now: Instant) -> Self {
        Self {
            value,
            written_at: now,
        }
    }

    // == Age ==
    /// Returns the entry's age relative to `now`.
    ///
    /// Saturates to zero if `now` is earlier than the write instant.
    pub fn age(&self, now: Instant) -> Duration {
        now.saturating_duration_since(self.written_at)
    }

    // == Is Expired ==
    /// Checks whether the entry has outlived `max_age` as of `now`.
    ///
    /// Boundary condition: an entry is expired once its age is greater than
    /// or equal to `max_age`, so a query at exactly `written_at + max_age`
    /// already misses.
    pub fn is_expired(&self, now: Instant, max_age: Duration) -> bool {
        self.age(now) >= max_age
    }
}

// == Unit Tests ==
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_entry_fresh_is_not_expired() {
        let now = Instant::now();
        let entry = CacheEntry::new("token", now);

        assert_eq!(entry.value, "token");
        assert!(!entry.is_expired(now, Duration::from_secs(600)));
    }

    #[test]
    fn test_entry_age_grows_with_clock() {
        let now = Instant::now();
        let entry = CacheEntry::new("token", now);

        assert_eq!(entry.age(now), Duration::ZERO);
        assert_eq!(
            entry.age(now + Duration::from_secs(5)),
            Duration::from_secs(5)
        );
    }

    #[test]
    fn test_entry_age_saturates_before_write() {
        let now = Instant::now();
        let entry = CacheEntry::new("token", now + Duration::from_secs(10));

        assert_eq!(entry.age(now), Duration::ZERO);
    }

    #[test]
    fn test_entry_expiration_past_max_age() {
        let now = Instant::now();
        let entry = CacheEntry::new("token", now);
        let max_age = Duration::from_secs(600);

        assert!(!entry.is_expired(now + Duration::from_secs(599), max_age));
        assert!(entry.is_expired(now + Duration::from_secs(601), max_age));
    }

    #[test]
    fn test_entry_expiration_boundary_condition() {
        let now = Instant::now();
        let entry = CacheEntry::new("token", now);
        let max_age = Duration::from_secs(600);

        // Expired exactly when the full max_age has elapsed
        assert!(entry.is_expired(now + max_age, max_age));
    }
}
