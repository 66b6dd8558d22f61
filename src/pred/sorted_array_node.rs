//! Fixed-capacity sorted array node, an alternative to [`DynamicFusionNode`]
//! for plugging into [`super::btree::BTree`].
//!
//! Grounded on `include/tdc/pred/dynamic/btree/sorted_array_node.hpp`,
//! including its linear-scan-by-default strategy; binary search is a
//! constructor flag rather than a separate type, matching the source's
//! `m_binary_search` template bool.
//!
//! [`DynamicFusionNode`]: super::dynamic_fusion::DynamicFusionNode

use super::Result;

#[cfg(any(test, feature = "std"))]
use std::vec::Vec;

#[cfg(not(any(test, feature = "std")))]
use alloc::vec::Vec;

/// A sorted array of up to `CAP` keys with linear-scan (or, optionally,
/// binary-search) `predecessor`/`successor`.
#[derive(Clone, Debug)]
pub struct SortedArrayNode<const CAP: usize> {
    keys: Vec<u64>,
    binary_search: bool,
}

impl<const CAP: usize> Default for SortedArrayNode<CAP> {
    fn default() -> Self {
        Self { keys: Vec::with_capacity(CAP), binary_search: false }
    }
}

impl<const CAP: usize> SortedArrayNode<CAP> {
    /// An empty node using linear scan for predecessor/successor.
    pub fn new() -> Self {
        Self::default()
    }

    /// An empty node using binary search for predecessor/successor.
    pub fn with_binary_search() -> Self {
        Self { keys: Vec::with_capacity(CAP), binary_search: true }
    }

    /// The maximum number of keys this node can hold.
    #[inline]
    pub const fn capacity(&self) -> usize {
        CAP
    }

    #[inline]
    pub fn size(&self) -> usize {
        self.keys.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }

    #[inline]
    pub fn is_full(&self) -> bool {
        self.keys.len() == CAP
    }

    /// Accesses the element with the given rank.
    #[inline]
    pub fn get(&self, i: usize) -> u64 {
        self.keys[i]
    }

    /// Finds the rank of the predecessor of `x` in the node.
    pub fn predecessor(&self, x: u64) -> Result {
        if self.binary_search {
            match self.keys.binary_search(&x) {
                Ok(i) => Result::found(i),
                Err(0) => Result::none(),
                Err(i) => Result::found(i - 1),
            }
        } else {
            if self.keys.is_empty() || x < self.keys[0] {
                return Result::none();
            }
            if x >= *self.keys.last().unwrap() {
                return Result::found(self.keys.len() - 1);
            }
            let mut i = 1;
            while self.keys[i] <= x {
                i += 1;
            }
            Result::found(i - 1)
        }
    }

    /// Finds the rank of the successor of `x` in the node: the smallest
    /// stored key `>= x`.
    pub fn successor(&self, x: u64) -> Result {
        if self.binary_search {
            let i = self.keys.partition_point(|&k| k < x);
            if i < self.keys.len() {
                Result::found(i)
            } else {
                Result::none()
            }
        } else {
            if self.keys.is_empty() || x > *self.keys.last().unwrap() {
                return Result::none();
            }
            if x <= self.keys[0] {
                return Result::found(0);
            }
            let mut i = 1;
            while self.keys[i] < x {
                i += 1;
            }
            Result::found(i)
        }
    }

    /// Inserts `key`, keeping the array sorted.
    ///
    /// # Panics
    ///
    /// Panics if the node is already at capacity.
    pub fn insert(&mut self, key: u64) {
        assert!(self.keys.len() < CAP, "sorted array node is full ({} keys)", CAP);
        let i = self.keys.partition_point(|&k| k < key);
        self.keys.insert(i, key);
    }

    /// Removes `key`. Returns `false` if it was not present.
    pub fn remove(&mut self, key: u64) -> bool {
        match self.keys.iter().position(|&k| k == key) {
            Some(i) => {
                self.keys.remove(i);
                true
            }
            None => false,
        }
    }
}
