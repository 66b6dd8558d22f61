//! Space-Saving minimum structure with O(1) `increase_key`, grounded on
//! `include/tdc/util/min_inc.hpp`.
//!
//! The source links buckets and, within each bucket, items, via an
//! intrusive doubly-linked list backed by a pool allocator
//! (`LinkedListPool`). This implementation uses the same idea expressed as
//! two index-based arenas (`Vec<Option<_>>` plus a free list), matching
//! this crate's "arena of owned values addressed by integer index instead
//! of raw pointers" policy for graph-shaped structures.

use std::vec::Vec;

struct ItemNode<Item> {
    item: Item,
    prev: Option<usize>,
    next: Option<usize>,
}

struct BucketNode {
    key: u64,
    head_item: Option<usize>,
    size: usize,
    prev: Option<usize>,
    next: Option<usize>,
}

/// A handle to an item stored in a [`MinInc`], returned by
/// [`MinInc::insert`] and threaded through successive
/// [`MinInc::increase_key`] calls.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Handle {
    bucket: usize,
    item: usize,
}

/// Tracks items by an integer key with O(1) `min`, `extract_min`, and
/// `increase_key`, as used by the Space-Saving algorithm.
pub struct MinInc<Item> {
    buckets: Vec<Option<BucketNode>>,
    bucket_free: Vec<usize>,
    items: Vec<Option<ItemNode<Item>>>,
    item_free: Vec<usize>,
    head_bucket: Option<usize>,
    tail_bucket: Option<usize>,
}

impl<Item> Default for MinInc<Item> {
    fn default() -> Self {
        Self::new()
    }
}

impl<Item> MinInc<Item> {
    pub fn new() -> Self {
        Self {
            buckets: Vec::new(),
            bucket_free: Vec::new(),
            items: Vec::new(),
            item_free: Vec::new(),
            head_bucket: None,
            tail_bucket: None,
        }
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.head_bucket.is_none()
    }

    fn alloc_bucket(&mut self, node: BucketNode) -> usize {
        if let Some(idx) = self.bucket_free.pop() {
            self.buckets[idx] = Some(node);
            idx
        } else {
            self.buckets.push(Some(node));
            self.buckets.len() - 1
        }
    }

    fn alloc_item(&mut self, node: ItemNode<Item>) -> usize {
        if let Some(idx) = self.item_free.pop() {
            self.items[idx] = Some(node);
            idx
        } else {
            self.items.push(Some(node));
            self.items.len() - 1
        }
    }

    /// Inserts a new bucket of `key` immediately before `before` (or at the
    /// tail, if `before` is `None`), returning its index.
    fn insert_bucket_before(&mut self, before: Option<usize>, key: u64) -> usize {
        let prev = match before {
            Some(b) => self.buckets[b].as_ref().unwrap().prev,
            None => self.tail_bucket,
        };
        let idx = self.alloc_bucket(BucketNode { key, head_item: None, size: 0, prev, next: before });

        match prev {
            Some(p) => self.buckets[p].as_mut().unwrap().next = Some(idx),
            None => self.head_bucket = Some(idx),
        }
        match before {
            Some(b) => self.buckets[b].as_mut().unwrap().prev = Some(idx),
            None => self.tail_bucket = Some(idx),
        }
        idx
    }

    fn remove_bucket(&mut self, idx: usize) {
        let node = self.buckets[idx].take().unwrap();
        match node.prev {
            Some(p) => self.buckets[p].as_mut().unwrap().next = node.next,
            None => self.head_bucket = node.next,
        }
        match node.next {
            Some(n) => self.buckets[n].as_mut().unwrap().prev = node.prev,
            None => self.tail_bucket = node.prev,
        }
        self.bucket_free.push(idx);
    }

    fn bucket_insert_item_front(&mut self, bucket: usize, item: Item) -> usize {
        let old_head = self.buckets[bucket].as_ref().unwrap().head_item;
        let idx = self.alloc_item(ItemNode { item, prev: None, next: old_head });
        if let Some(h) = old_head {
            self.items[h].as_mut().unwrap().prev = Some(idx);
        }
        let b = self.buckets[bucket].as_mut().unwrap();
        b.head_item = Some(idx);
        b.size += 1;
        idx
    }

    fn bucket_erase_item(&mut self, bucket: usize, item: usize) -> Item {
        let node = self.items[item].take().unwrap();
        match node.prev {
            Some(p) => self.items[p].as_mut().unwrap().next = node.next,
            None => self.buckets[bucket].as_mut().unwrap().head_item = node.next,
        }
        if let Some(n) = node.next {
            self.items[n].as_mut().unwrap().prev = node.prev;
        }
        self.item_free.push(item);
        self.buckets[bucket].as_mut().unwrap().size -= 1;
        node.item
    }

    /// Inserts `item` with `key`. Running time is linear in the number of
    /// distinct keys currently present (matching the source: buckets are
    /// scanned from the smallest key up).
    pub fn insert(&mut self, item: Item, key: u64) -> Handle {
        let mut cur = self.head_bucket;
        let mut before = None;
        while let Some(b) = cur {
            let node = self.buckets[b].as_ref().unwrap();
            if node.key < key {
                cur = node.next;
            } else {
                before = Some(b);
                break;
            }
        }

        let bucket = match before {
            Some(b) if self.buckets[b].as_ref().unwrap().key == key => b,
            _ => self.insert_bucket_before(before, key),
        };

        let item_idx = self.bucket_insert_item_front(bucket, item);
        Handle { bucket, item: item_idx }
    }

    /// The current minimum key.
    ///
    /// # Panics
    ///
    /// Panics if the structure is empty.
    pub fn min(&self) -> u64 {
        let head = self.head_bucket.expect("MinInc::min on an empty structure");
        self.buckets[head].as_ref().unwrap().key
    }

    /// Removes and returns any item whose key equals [`Self::min`].
    ///
    /// # Panics
    ///
    /// Panics if the structure is empty.
    pub fn extract_min(&mut self) -> Item {
        let head = self.head_bucket.expect("MinInc::extract_min on an empty structure");
        let head_item = self.buckets[head].as_ref().unwrap().head_item.expect("bucket is never empty while linked");
        let value = self.bucket_erase_item(head, head_item);
        if self.buckets[head].as_ref().unwrap().size == 0 {
            self.remove_bucket(head);
        }
        value
    }

    /// Increases the key of the item referenced by `h` by one, returning
    /// the handle that supersedes it.
    pub fn increase_key(&mut self, h: Handle) -> Handle {
        let bucket = h.bucket;
        let key = self.buckets[bucket].as_ref().unwrap().key;
        let bucket_size = self.buckets[bucket].as_ref().unwrap().size;
        let next_bucket = self.buckets[bucket].as_ref().unwrap().next;

        let next_needs_creation = match next_bucket {
            None => true,
            Some(nb) => self.buckets[nb].as_ref().unwrap().key > key + 1,
        };

        if next_needs_creation && bucket_size == 1 {
            self.buckets[bucket].as_mut().unwrap().key = key + 1;
            return h;
        }

        let target_bucket =
            if next_needs_creation { self.insert_bucket_before(next_bucket, key + 1) } else { next_bucket.unwrap() };

        let item = self.bucket_erase_item(bucket, h.item);
        if self.buckets[bucket].as_ref().unwrap().size == 0 {
            self.remove_bucket(bucket);
        }

        let item_idx = self.bucket_insert_item_front(target_bucket, item);
        Handle { bucket: target_bucket, item: item_idx }
    }
}
