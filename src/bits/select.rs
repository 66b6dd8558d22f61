//! Select directory over a [`BitVec`](super::BitVec): locate the k-th bit of
//! a given value.

use super::{popcount_word, BitVec};
use crate::util::broadword::select_in_word;

#[cfg(any(test, feature = "std"))]
use std::vec::Vec;

#[cfg(not(any(test, feature = "std")))]
use alloc::vec::Vec;

/// Default superblock size (in occurrences of the selected bit value).
pub const DEFAULT_SUPSIZE: usize = 1024;

/// Default block size (in occurrences of the selected bit value).
pub const DEFAULT_BLOCKSIZE: usize = 32;

/// A select index over a [`BitVec`] for a fixed bit value `ONE`
/// (`true` selects 1-bits, `false` selects 0-bits).
///
/// `select(k)` is 1-indexed (`k = 1` finds the first occurrence), matching
/// the source convention; returns `bv.len()` if fewer than `k` occurrences
/// exist.
#[derive(Clone, Debug)]
pub struct BitSelect<'a, const ONE: bool> {
    bv: &'a BitVec,
    /// supblock[i] = absolute position of the (i*SupSize)-th occurrence.
    supblock: Vec<usize>,
    /// block[j] = position of the (j*BlockSize)-th occurrence, relative to
    /// its containing superblock.
    block: Vec<u32>,
    sup_size: usize,
    block_size: usize,
    count: usize,
}

impl<'a, const ONE: bool> BitSelect<'a, ONE> {
    pub fn new(bv: &'a BitVec) -> Self {
        Self::with_sizes(bv, DEFAULT_SUPSIZE, DEFAULT_BLOCKSIZE)
    }

    pub fn with_sizes(bv: &'a BitVec, sup_size: usize, block_size: usize) -> Self {
        assert!(sup_size > 0 && block_size > 0 && sup_size % block_size == 0);

        let mut supblock = vec![0usize];
        let mut block = vec![0u32];
        let mut count = 0usize;

        for (word_idx, &word) in bv.as_words().iter().enumerate() {
            let word = if ONE { word } else { !word };
            let base = word_idx * 64;
            let mut w = word;
            while w != 0 {
                let bit = w.trailing_zeros() as usize;
                let pos = base + bit;
                if pos >= bv.len() {
                    break;
                }
                count += 1;
                if count % sup_size == 0 {
                    supblock.push(pos);
                }
                if count % block_size == 0 {
                    // the superblock containing this occurrence has already
                    // been pushed, since sup_size is a multiple of block_size
                    let sup_idx = count / sup_size;
                    let sup_base = supblock[sup_idx];
                    block.push((pos - sup_base) as u32);
                }
                w &= w - 1;
            }
        }

        Self {
            bv,
            supblock,
            block,
            sup_size,
            block_size,
            count,
        }
    }

    /// Total number of occurrences of the selected bit value.
    #[inline]
    pub fn count(&self) -> usize {
        self.count
    }

    /// Finds the absolute position of the k-th occurrence (1-indexed).
    /// Returns `bv.len()` if `k == 0` or `k > count()`.
    pub fn select(&self, k: usize) -> usize {
        if k == 0 || k > self.count {
            return self.bv.len();
        }

        let i = k / self.sup_size;
        if k % self.sup_size == 0 {
            return self.supblock[i];
        }

        let j = k / self.block_size;
        let sup_base = self.supblock[i];
        if k % self.block_size == 0 {
            return sup_base + self.block[j] as usize;
        }

        // Scan forward from the block boundary.
        let block_base_rank = j * self.block_size;
        // start_pos is the position of occurrence #block_base_rank; the
        // occurrences we still need to find come strictly after it.
        let start_pos = sup_base + self.block[j] as usize;
        let mut remaining = (k - block_base_rank) as u32;

        let first_word_idx = start_pos / 64;
        let bit_off = start_pos % 64;

        let mut word_idx = first_word_idx;
        loop {
            let raw = self.bv.as_words()[word_idx];
            let word = if ONE { raw } else { !raw };
            let word = if word_idx == first_word_idx {
                // exclude start_pos itself: keep only bits strictly above bit_off
                if bit_off == 63 {
                    0
                } else {
                    word & (!0u64 << (bit_off + 1))
                }
            } else {
                word
            };
            let pc = popcount_word(word);
            if remaining <= pc {
                let pos_in_word = select_in_word(word, remaining - 1);
                return word_idx * 64 + pos_in_word as usize;
            }
            remaining -= pc;
            word_idx += 1;
        }
    }
}
