//! LRU Tracker Module
//!
//! Implements Least Recently Used tracking for cache eviction.

use std::collections::VecDeque;

// == LRU Tracker ==
/// Tracks access order for LRU eviction strategy.
///
/// Keys are stored in a VecDeque where:
/// - Front = Most recently used
/// - Back = Least recently used
///
/// Touch and remove are linear scans, which is fine at the entry counts this
/// cache is sized for (bot-command scale, not hot-path scale).
#[derive(Debug)]
pub struct LruTracker<K> {
    /// Order of keys by access time
    order: VecDeque<K>,
}

impl<K> Default for LruTracker<K> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K> LruTracker<K> {
    // == Constructor ==
    /// Creates a new empty LRU tracker.
    pub fn new() -> Self {
        Self {
            order: VecDeque::new(),
        }
    }

    // == Evict Oldest ==
    /// Returns and removes the least recently used key.
    ///
    /// Returns None if tracker is empty.
    pub fn evict_oldest(&mut self) -> Option<K> {
        self.order.pop_back()
    }

    // == Peek Oldest ==
    /// Returns the least recently used key without removing it.
    pub fn peek_oldest(&self) -> Option<&K> {
        self.order.back()
    }

    // == Length ==
    /// Returns the number of tracked keys.
    pub fn len(&self) -> usize {
        self.order.len()
    }

    // == Is Empty ==
    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }
}

impl<K: PartialEq + Clone> LruTracker<K> {
    // == Touch ==
    /// Marks a key as recently used (moves to front).
    ///
    /// If key exists, removes it first then adds to front.
    /// If key is new, just adds to front.
    pub fn touch(&mut self, key: &K) {
        // Remove existing occurrence
        self.remove(key);
        // Add to front (most recent)
        self.order.push_front(key.clone());
    }

    // == Remove ==
    /// Removes a key from the tracker.
    pub fn remove(&mut self, key: &K) {
        self.order.retain(|k| k != key);
    }

    // == Contains ==
    /// Checks if a key is being tracked.
    #[allow(dead_code)]
    pub fn contains(&self, key: &K) -> bool {
        self.order.iter().any(|k| k == key)
    }
}

// == Unit Tests ==
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lru_new() {
        let lru: LruTracker<i64> = LruTracker::new();
        assert!(lru.is_empty());
        assert_eq!(lru.len(), 0);
    }

    #[test]
    fn test_lru_touch_new_key() {
        let mut lru = LruTracker::new();

        lru.touch(&1i64);
        lru.touch(&2);
        lru.touch(&3);

        assert_eq!(lru.len(), 3);
        // Key 1 is oldest (added first)
        assert_eq!(lru.peek_oldest(), Some(&1));
    }

    #[test]
    fn test_lru_touch_existing_key() {
        let mut lru = LruTracker::new();

        lru.touch(&1i64);
        lru.touch(&2);
        lru.touch(&3);

        // Touch key 1 again - should move to front
        lru.touch(&1);

        assert_eq!(lru.len(), 3);
        // Key 2 is now oldest
        assert_eq!(lru.peek_oldest(), Some(&2));
    }

    #[test]
    fn test_lru_evict_oldest() {
        let mut lru = LruTracker::new();

        lru.touch(&1i64);
        lru.touch(&2);
        lru.touch(&3);

        assert_eq!(lru.evict_oldest(), Some(1));
        assert_eq!(lru.len(), 2);

        assert_eq!(lru.evict_oldest(), Some(2));
        assert_eq!(lru.len(), 1);
    }

    #[test]
    fn test_lru_evict_empty() {
        let mut lru: LruTracker<i64> = LruTracker::new();
        assert_eq!(lru.evict_oldest(), None);
    }

    #[test]
    fn test_lru_remove() {
        let mut lru = LruTracker::new();

        lru.touch(&1i64);
        lru.touch(&2);
        lru.touch(&3);

        lru.remove(&2);

        assert_eq!(lru.len(), 2);
        assert!(!lru.contains(&2));
        assert!(lru.contains(&1));
        assert!(lru.contains(&3));
    }

    #[test]
    fn test_lru_remove_nonexistent_key() {
        let mut lru = LruTracker::new();

        lru.touch(&1i64);
        lru.touch(&2);

        // Remove a key that doesn't exist - should not panic or affect existing keys
        lru.remove(&99);

        assert_eq!(lru.len(), 2);
        assert!(lru.contains(&1));
        assert!(lru.contains(&2));
    }

    #[test]
    fn test_lru_touch_same_key_multiple_times() {
        let mut lru = LruTracker::new();

        lru.touch(&1i64);
        lru.touch(&1);
        lru.touch(&1);

        // Should only have one entry
        assert_eq!(lru.len(), 1);
        assert_eq!(lru.evict_oldest(), Some(1));
        assert!(lru.is_empty());
    }

    #[test]
    fn test_lru_order_after_multiple_touches() {
        let mut lru = LruTracker::new();

        lru.touch(&'a');
        lru.touch(&'b');
        lru.touch(&'c');

        // Re-touch in a different order:
        // touch(a): [a, c, b]
        // touch(c): [c, a, b]
        // touch(b): [b, c, a]
        lru.touch(&'a');
        lru.touch(&'c');
        lru.touch(&'b');

        assert_eq!(lru.evict_oldest(), Some('a'));
        assert_eq!(lru.evict_oldest(), Some('c'));
        assert_eq!(lru.evict_oldest(), Some('b'));
    }

    #[test]
    fn test_lru_string_keys() {
        let mut lru = LruTracker::new();

        lru.touch(&"alpha".to_string());
        lru.touch(&"beta".to_string());

        assert_eq!(lru.peek_oldest(), Some(&"alpha".to_string()));
        lru.touch(&"alpha".to_string());
        assert_eq!(lru.peek_oldest(), Some(&"beta".to_string()));
    }
}
