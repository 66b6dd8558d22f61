//! Open-addressing hash table, generic over its hash/probe functions and
//! its entry shape, grounded on `include/tdc/hash/table.hpp`,
//! `include/tdc/hash/entry.hpp`, and `include/tdc/hash/linear_probing.hpp`.
//!
//! The source models "used" via a parallel `std::vector<bool>` alongside a
//! default-constructed entry array; this implementation folds the two into
//! a single `Vec<Option<E>>`, which is the idiomatic Rust way to express
//! "slot may or may not hold a live entry" without requiring `E: Default`.
//! Similarly, `find` returns `Option<&E>` (and `Accessor`-shaped helpers on
//! top of it) rather than a nullable `Accessor` object with an `exists()`
//! method.

use std::vec::Vec;

/// An entry stored in a [`Table`], exposing the key it is indexed by.
pub trait Entry<K> {
    fn key(&self) -> &K;
}

/// An entry holding only a key, backing [`HashTable`] (a hash set).
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct KeyEntry<K>(K);

impl<K> Entry<K> for KeyEntry<K> {
    #[inline]
    fn key(&self) -> &K {
        &self.0
    }
}

/// An entry holding a key and an associated value, backing [`HashMap`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct KeyValueEntry<K, V> {
    key: K,
    value: V,
}

impl<K, V> Entry<K> for KeyValueEntry<K, V> {
    #[inline]
    fn key(&self) -> &K {
        &self.key
    }
}

impl<K, V> KeyValueEntry<K, V> {
    #[inline]
    pub fn value(&self) -> &V {
        &self.value
    }
}

/// A probe function usable with [`Table`]: linear probing with a fixed step.
///
/// The source's `LinearProbing<m_inc>` is a function-object struct; stable
/// Rust cannot implement the unstable `Fn` traits for a custom type, so this
/// is a closure-returning free function instead.
pub fn linear_probing(step: usize) -> impl Fn(usize) -> usize + Clone {
    move |i| i + step
}

/// A default hash function for any [`std::hash::Hash`] key, using the
/// standard library's `SipHash`-based `DefaultHasher`.
pub fn default_hash_fn<K: std::hash::Hash>() -> impl Fn(&K) -> u64 + Clone {
    |key| {
        use std::hash::{Hash, Hasher};
        let mut hasher = std::collections::hash_map::DefaultHasher::new();
        key.hash(&mut hasher);
        hasher.finish()
    }
}

/// An open-addressing hash table over entries `E` keyed by `K`, with
/// pluggable hash function `H` and probe function `P`.
pub struct Table<K, E, H, P>
where
    E: Entry<K>,
    H: Fn(&K) -> u64,
    P: Fn(usize) -> usize,
{
    hash_func: H,
    probe_func: P,
    cap: usize,
    size: usize,
    probe_max: usize,
    probe_total: usize,
    times_resized: usize,
    load_factor: f64,
    growth_factor: f64,
    entries: Vec<Option<E>>,
    size_max: usize,
    size_grow: usize,
    _key: core::marker::PhantomData<K>,
}

impl<K, E, H, P> Table<K, E, H, P>
where
    K: PartialEq,
    E: Entry<K>,
    H: Fn(&K) -> u64,
    P: Fn(usize) -> usize,
{
    /// Constructs a table with the given hash/probe functions, initial
    /// capacity, maximum load factor, and growth factor.
    pub fn new(hash_func: H, probe_func: P, capacity: usize, load_factor: f64, growth_factor: f64) -> Self {
        assert!(capacity > 0, "hash table capacity must be positive");
        let mut table = Self {
            hash_func,
            probe_func,
            cap: 0,
            size: 0,
            probe_max: 0,
            probe_total: 0,
            times_resized: 0,
            load_factor,
            growth_factor,
            entries: Vec::new(),
            size_max: 0,
            size_grow: 0,
            _key: core::marker::PhantomData,
        };
        table.init(capacity);
        table
    }

    fn init(&mut self, capacity: usize) {
        self.size = 0;
        self.cap = capacity;
        self.probe_max = 0;
        self.probe_total = 0;
        self.entries = (0..capacity).map(|_| None).collect();
        self.size_max = (self.load_factor * capacity as f64) as usize;
        self.size_grow = (self.size_max + 1).max((capacity as f64 * self.growth_factor) as usize);
    }

    #[inline]
    fn hash(&self, key: &K) -> usize {
        (self.hash_func)(key) as usize % self.cap
    }

    /// Number of items stored.
    #[inline]
    pub fn size(&self) -> usize {
        self.size
    }

    /// Current slot capacity.
    #[inline]
    pub fn capacity(&self) -> usize {
        self.cap
    }

    /// Current load (`size / capacity`).
    #[inline]
    pub fn load(&self) -> f64 {
        self.size as f64 / self.cap as f64
    }

    /// The maximum number of probe steps observed to resolve a collision,
    /// over the lifetime of the current capacity.
    #[inline]
    pub fn max_probe(&self) -> usize {
        self.probe_max
    }

    /// The average number of probe steps per contained item.
    pub fn avg_probe(&self) -> f64 {
        self.probe_total as f64 / self.size as f64
    }

    /// The number of times the table has grown.
    #[inline]
    pub fn times_resized(&self) -> usize {
        self.times_resized
    }

    fn insert_internal(&mut self, entry: E) {
        let hkey = self.hash(entry.key());
        let mut h = hkey;
        let mut i = 0;
        let mut probe = 0;

        while self.entries[h].is_some() {
            i = (self.probe_func)(i);
            h = (hkey + i) % self.cap;
            probe += 1;
        }

        self.probe_total += probe;
        self.probe_max = self.probe_max.max(probe);
        self.entries[h] = Some(entry);
        self.size += 1;
    }

    fn resize(&mut self, new_cap: usize) {
        self.times_resized += 1;
        let old_entries = core::mem::take(&mut self.entries);
        self.init(new_cap);
        for entry in old_entries.into_iter().flatten() {
            self.insert_internal(entry);
        }
    }

    /// Inserts `entry`, growing the table first if its load factor would be
    /// exceeded.
    pub fn insert_entry(&mut self, entry: E) {
        if self.size + 1 > self.size_max {
            self.resize(self.size_grow);
        }
        self.insert_internal(entry);
    }

    /// Finds the slot index holding `key`, if any.
    fn find_pos(&self, key: &K) -> Option<usize> {
        let hkey = self.hash(key);

        let h = hkey;
        if let Some(e) = &self.entries[h] {
            if e.key() == key {
                return Some(h);
            }
        }

        let mut i = 0;
        let mut h = hkey;
        for _ in 0..self.probe_max {
            i = (self.probe_func)(i);
            h = (hkey + i) % self.cap;
            if let Some(e) = &self.entries[h] {
                if e.key() == key {
                    return Some(h);
                }
            }
        }
        None
    }

    /// Finds the entry for `key`, if present.
    pub fn find(&self, key: &K) -> Option<&E> {
        self.find_pos(key).map(|h| self.entries[h].as_ref().unwrap())
    }

    /// Tests whether `key` is present.
    pub fn contains(&self, key: &K) -> bool {
        self.find(key).is_some()
    }

    /// Removes the entry for `key`. Returns `false` if it was not present.
    ///
    /// The vacated slot is marked unused but not compacted, so the probe
    /// distance bound for the current capacity is unaffected by erasure.
    pub fn erase(&mut self, key: &K) -> bool {
        match self.find_pos(key) {
            Some(h) => {
                self.entries[h] = None;
                self.size -= 1;
                true
            }
            None => false,
        }
    }
}

/// An open-addressing hash set, with the default linear-probing strategy.
pub struct HashTable<K, H, P = Box<dyn Fn(usize) -> usize>>
where
    H: Fn(&K) -> u64,
    P: Fn(usize) -> usize,
{
    inner: Table<K, KeyEntry<K>, H, P>,
}

impl<K, H, P> HashTable<K, H, P>
where
    K: PartialEq,
    H: Fn(&K) -> u64,
    P: Fn(usize) -> usize,
{
    /// Constructs a hash set with the given hash/probe functions and
    /// initial capacity, a maximum load factor of 1.0, and a growth factor
    /// of 2.0 (the source's defaults).
    pub fn new(hash_func: H, probe_func: P, capacity: usize) -> Self {
        Self { inner: Table::new(hash_func, probe_func, capacity, 1.0, 2.0) }
    }

    /// Constructs a hash set with explicit load/growth factors.
    pub fn with_factors(
        hash_func: H,
        probe_func: P,
        capacity: usize,
        load_factor: f64,
        growth_factor: f64,
    ) -> Self {
        Self { inner: Table::new(hash_func, probe_func, capacity, load_factor, growth_factor) }
    }

    /// Inserts `key`. Does not check for duplicates; inserting an
    /// already-present key stores a second entry, matching the source
    /// (which leaves deduplication to the caller).
    pub fn insert(&mut self, key: K) {
        self.inner.insert_entry(KeyEntry(key));
    }

    pub fn contains(&self, key: &K) -> bool {
        self.inner.contains(key)
    }

    pub fn remove(&mut self, key: &K) -> bool {
        self.inner.erase(key)
    }

    #[inline]
    pub fn size(&self) -> usize {
        self.inner.size()
    }

    #[inline]
    pub fn capacity(&self) -> usize {
        self.inner.capacity()
    }

    #[inline]
    pub fn load(&self) -> f64 {
        self.inner.load()
    }

    #[inline]
    pub fn max_probe(&self) -> usize {
        self.inner.max_probe()
    }
}

/// An open-addressing hash map from `K` to `V`.
pub struct HashMap<K, V, H, P>
where
    H: Fn(&K) -> u64,
    P: Fn(usize) -> usize,
{
    inner: Table<K, KeyValueEntry<K, V>, H, P>,
}

impl<K, V, H, P> HashMap<K, V, H, P>
where
    K: PartialEq,
    H: Fn(&K) -> u64,
    P: Fn(usize) -> usize,
{
    pub fn new(hash_func: H, probe_func: P, capacity: usize) -> Self {
        Self { inner: Table::new(hash_func, probe_func, capacity, 1.0, 2.0) }
    }

    pub fn with_factors(
        hash_func: H,
        probe_func: P,
        capacity: usize,
        load_factor: f64,
        growth_factor: f64,
    ) -> Self {
        Self { inner: Table::new(hash_func, probe_func, capacity, load_factor, growth_factor) }
    }

    /// Inserts `key` with `value`, replacing any prior entry for `key` in
    /// effect (the old one still occupies its slot but is erased first).
    pub fn insert(&mut self, key: K, value: V) {
        self.inner.erase(&key);
        self.inner.insert_entry(KeyValueEntry { key, value });
    }

    pub fn get(&self, key: &K) -> Option<&V> {
        self.inner.find(key).map(KeyValueEntry::value)
    }

    pub fn contains_key(&self, key: &K) -> bool {
        self.inner.contains(key)
    }

    pub fn remove(&mut self, key: &K) -> bool {
        self.inner.erase(key)
    }

    #[inline]
    pub fn size(&self) -> usize {
        self.inner.size()
    }

    #[inline]
    pub fn capacity(&self) -> usize {
        self.inner.capacity()
    }

    #[inline]
    pub fn max_probe(&self) -> usize {
        self.inner.max_probe()
    }
}
