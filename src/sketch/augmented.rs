//! Hash-filter-backed augmented sketch, grounded on
//! `include/tdc/util/augmented_sketch.hpp`.
//!
//! Frequent keys carry an associated value in the filter; everything else
//! is only approximately counted in the backing [`CountMinSketch`]. The
//! source uses `robin_hood::unordered_map` for the filter; this crate has
//! no such dependency in its stack, so `std::collections::HashMap` takes
//! its place.

use std::collections::HashMap;
use std::hash::Hash;

use super::count_min::CountMinSketch;
use super::min_inc::{Handle, MinInc};

struct FilterEntry<Value> {
    value: Value,
    old_count: u64,
    min_handle: Handle,
}

/// Tracks frequent `(key, value)` pairs exactly while approximating
/// everything else's frequency in a [`CountMinSketch`].
///
/// A key becomes "frequent" (and gains an entry here, evicting whichever
/// key currently has the lowest estimated count) once its sketch estimate
/// exceeds the filter's current minimum.
pub struct AugmentedSketch<Key, Value> {
    filter: HashMap<Key, FilterEntry<Value>>,
    min: MinInc<Key>,
    sketch: CountMinSketch,
    max_filter_size: usize,
}

impl<Key, Value> AugmentedSketch<Key, Value>
where
    Key: Clone + Eq + Hash,
{
    /// Creates an empty sketch holding at most `max_filter_size` frequent
    /// keys, backed by a `sketch_width x sketch_height` count-min sketch.
    pub fn new(max_filter_size: usize, sketch_width: usize, sketch_height: usize) -> Self {
        Self {
            filter: HashMap::new(),
            min: MinInc::new(),
            sketch: CountMinSketch::new(sketch_width, sketch_height),
            max_filter_size,
        }
    }

    /// Counts `key` once, associating `value` with it if and when it is (or
    /// becomes) frequent.
    pub fn count(&mut self, key: Key, value: Value) {
        if let Some(entry) = self.filter.get_mut(&key) {
            let new_handle = self.min.increase_key(entry.min_handle);
            entry.value = value;
            entry.min_handle = new_handle;
            return;
        }

        if self.filter.len() < self.max_filter_size {
            let handle = self.min.insert(key.clone(), 1);
            self.filter.insert(key, FilterEntry { value, old_count: 0, min_handle: handle });
            return;
        }

        let est = self.sketch.count_and_estimate(Self::key_hash(&key), 1);
        let min_key_count = self.min.min();
        if est > min_key_count {
            let evicted = self.min.extract_min();
            let evicted_entry = self.filter.remove(&evicted).expect("MinInc and filter must stay in sync");
            debug_assert!(min_key_count >= evicted_entry.old_count, "a tracked key's count cannot decrease");
            let delta = min_key_count - evicted_entry.old_count;
            self.sketch.count(Self::key_hash(&evicted), delta);

            let handle = self.min.insert(key.clone(), est);
            self.filter.insert(key, FilterEntry { value, old_count: est, min_handle: handle });
        }
    }

    /// Returns a reference to `key`'s associated value if it is currently
    /// frequent.
    pub fn is_frequent(&self, key: &Key) -> Option<&Value> {
        self.filter.get(key).map(|e| &e.value)
    }

    /// The number of keys currently tracked exactly in the filter.
    #[inline]
    pub fn filter_len(&self) -> usize {
        self.filter.len()
    }
}

impl<Key, Value> AugmentedSketch<Key, Value> {
    fn key_hash(key: &Key) -> u64
    where
        Key: Hash,
    {
        use std::hash::Hasher;
        let mut h = std::collections::hash_map::DefaultHasher::new();
        key.hash(&mut h);
        h.finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fills_filter_before_sketching() {
        let mut s: AugmentedSketch<u64, &str> = AugmentedSketch::new(2, 16, 3);
        s.count(1, "a");
        s.count(2, "b");
        assert_eq!(s.filter_len(), 2);
        assert_eq!(s.is_frequent(&1), Some(&"a"));
        assert_eq!(s.is_frequent(&2), Some(&"b"));
    }

    #[test]
    fn non_frequent_key_is_not_reported() {
        let mut s: AugmentedSketch<u64, &str> = AugmentedSketch::new(1, 16, 3);
        s.count(1, "a");
        s.count(2, "b");
        assert_eq!(s.is_frequent(&1), Some(&"a"));
        assert_eq!(s.is_frequent(&2), None);
    }

    #[test]
    fn repeated_key_displaces_a_rarer_one() {
        let mut s: AugmentedSketch<u64, u32> = AugmentedSketch::new(1, 16, 3);
        s.count(1, 100);
        // key 2 is counted many times via the sketch path and should
        // eventually displace key 1 in the filter.
        for i in 0..20 {
            s.count(2, i);
        }
        assert_eq!(s.is_frequent(&2), Some(&19));
        assert_eq!(s.is_frequent(&1), None);
    }

    #[test]
    fn value_updates_on_repeated_frequent_count() {
        let mut s: AugmentedSketch<u64, u32> = AugmentedSketch::new(2, 16, 3);
        s.count(1, 1);
        s.count(1, 2);
        assert_eq!(s.is_frequent(&1), Some(&2));
    }
}
