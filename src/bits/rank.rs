//! Two-level (superblock/block) rank directory over a [`BitVec`](super::BitVec).

use super::{popcount_word, BitVec};

#[cfg(any(test, feature = "std"))]
use std::vec::Vec;

#[cfg(not(any(test, feature = "std")))]
use alloc::vec::Vec;

/// Default superblock size in bits (one superblock covers 64 words).
pub const DEFAULT_SUPERBLOCK_BITS: usize = 4096;

/// A constant-time rank index over a [`BitVec`].
///
/// Two-level scheme: `supblock[i]` holds the cumulative 1-count of all bits
/// before superblock `i`; `block[j]` holds the cumulative 1-count within
/// superblock `j`'s word, counted from the superblock's start up to (not
/// including) word `j`. A query adds the superblock and block counts to the
/// popcount of the masked low bits of the containing word.
///
/// Public queries use the conventional Rust half-open indexing
/// (`rank1(i)` counts bits in `[0, i)`); this is the exclusive counterpart
/// of the inclusive `rank1(x)` formula used internally during construction.
#[derive(Clone, Debug)]
pub struct BitRank<'a> {
    bv: &'a BitVec,
    supblock: Vec<u64>,
    block: Vec<u32>,
    superblock_bits: usize,
    words_per_superblock: usize,
}

impl<'a> BitRank<'a> {
    /// Builds a rank directory with the default superblock size (4096 bits).
    pub fn new(bv: &'a BitVec) -> Self {
        Self::with_superblock_bits(bv, DEFAULT_SUPERBLOCK_BITS)
    }

    /// Builds a rank directory with an explicit superblock size in bits.
    ///
    /// `superblock_bits` must be a positive multiple of 64.
    pub fn with_superblock_bits(bv: &'a BitVec, superblock_bits: usize) -> Self {
        assert!(superblock_bits > 0 && superblock_bits % 64 == 0);
        let words_per_superblock = superblock_bits / 64;
        let words = bv.as_words();

        let num_superblocks = (words.len() + words_per_superblock - 1) / words_per_superblock.max(1);
        let mut supblock = Vec::with_capacity(num_superblocks.max(1));
        let mut block = Vec::with_capacity(words.len());

        let mut total: u64 = 0;
        let mut in_superblock: u32 = 0;
        for (word_idx, &word) in words.iter().enumerate() {
            if word_idx % words_per_superblock == 0 {
                supblock.push(total);
                in_superblock = 0;
            }
            block.push(in_superblock);
            let pc = popcount_word(word);
            in_superblock += pc;
            total += pc as u64;
        }

        Self {
            bv,
            supblock,
            block,
            superblock_bits,
            words_per_superblock,
        }
    }

    /// Number of 1-bits in positions `[0, i)`.
    pub fn rank1(&self, i: usize) -> usize {
        assert!(i <= self.bv.len(), "index {} out of bounds ({})", i, self.bv.len());
        if i == 0 {
            return 0;
        }
        let x = i - 1; // translate to the spec's inclusive-of-x convention
        let word_idx = x >> 6;
        let sup_idx = x / self.superblock_bits;
        let in_word_bits = (x & 63) + 1;
        let mask = if in_word_bits == 64 {
            u64::MAX
        } else {
            (1u64 << in_word_bits) - 1
        };
        let word = self.bv.as_words()[word_idx];
        self.supblock[sup_idx] as usize
            + self.block[word_idx] as usize
            + popcount_word(word & mask) as usize
    }

    /// Number of 0-bits in positions `[0, i)`.
    #[inline]
    pub fn rank0(&self, i: usize) -> usize {
        i - self.rank1(i)
    }

    #[inline]
    pub fn words_per_superblock(&self) -> usize {
        self.words_per_superblock
    }

    /// Approximate heap size in bytes of the auxiliary directory (excludes
    /// the borrowed bit vector).
    pub fn heap_size(&self) -> usize {
        self.supblock.len() * core::mem::size_of::<u64>() + self.block.len() * core::mem::size_of::<u32>()
    }
}
