//! Two-trie cooperative sliding-window factorizer, grounded on
//! `include/tdc/comp/lz77/lz77_sw.hpp`.
//!
//! The source is templated on a `m_allow_ext_match` compile-time boolean;
//! this crate uses a runtime flag set at construction instead (one factorizer
//! type rather than two monomorphizations, since nothing here is hot enough
//! to need the compile-time specialization). Input is taken as a single
//! in-memory byte slice rather than a `std::istream`, since the crate has no
//! streaming I/O elsewhere to match — the block-by-block double-buffering
//! and two-trie rebuilding still proceed exactly as the source describes.

use std::vec::Vec;

use super::factor::Factor;
use super::trie::SlidingWindowTrie;

/// Factorizes `input` against a sliding window of `window` bytes using two
/// cooperating truncated suffix tries (source semantics, no extended
/// matches across block boundaries).
pub fn factorize(input: &[u8], window: u32) -> Vec<Factor> {
    LZSlidingWindow::new(window).factorize(input)
}

/// Factorizes `input`, allowing matches to extend past the window that
/// produced them (the source's `m_allow_ext_match = true` instantiation).
pub fn factorize_extended(input: &[u8], window: u32) -> Vec<Factor> {
    LZSlidingWindow::with_extended_matches(window).factorize(input)
}

/// Sliding-window LZ77 factorizer built on two truncated suffix tries.
pub struct LZSlidingWindow {
    window: u32,
    allow_ext_match: bool,
}

impl LZSlidingWindow {
    pub fn new(window: u32) -> Self {
        Self { window, allow_ext_match: false }
    }

    pub fn with_extended_matches(window: u32) -> Self {
        Self { window, allow_ext_match: true }
    }

    pub fn factorize(&self, input: &[u8]) -> Vec<Factor> {
        let total_n = input.len();
        let w = self.window as usize;
        assert!(w > 0, "window size must be positive");

        let mut factors = Vec::new();
        if total_n == 0 {
            return factors;
        }

        let bufsize = 2 * w;
        let mut buffer = vec![0u8; bufsize + 1];
        let mut prev_buffer = if self.allow_ext_match { vec![0u8; w + 1] } else { Vec::new() };

        let mut tries = [SlidingWindowTrie::new(), SlidingWindowTrie::new()];
        let mut left_idx = 0usize;
        let mut right_idx = 1usize;

        let mut last_block_len;
        let mut n;
        let mut pos_in_stream;

        {
            let r = total_n.min(bufsize);
            buffer[..r].copy_from_slice(&input[..r]);
            buffer[r] = 0;
            tries[right_idx].build(&buffer[..=r], self.window);
            n = r;
            last_block_len = r.min(w);
            pos_in_stream = r;
        }

        let mut i = 0usize;
        let mut b = 0usize;
        let mut window_start = 0usize;
        let mut prev_window_start = 0usize;

        let mut ext_match = false;
        let mut ext_src = 0u64;
        let mut ext_len = 0u32;

        while i < n || pos_in_stream < total_n {
            if i / w > b {
                b = i / w;
                prev_window_start = window_start;
                window_start = b * w;

                std::mem::swap(&mut left_idx, &mut right_idx);

                if ext_match {
                    prev_buffer[..w].copy_from_slice(&buffer[..w]);
                }

                let (first_half, second_half) = buffer.split_at_mut(w);
                first_half.copy_from_slice(&second_half[..w]);

                let r = (total_n - pos_in_stream).min(w);
                buffer[last_block_len..last_block_len + r].copy_from_slice(&input[pos_in_stream..pos_in_stream + r]);
                buffer[last_block_len + r] = 0;
                pos_in_stream += r;

                tries[right_idx].build(&buffer[..=last_block_len + r], self.window);
                n += r;
                last_block_len = r;
            }

            if self.allow_ext_match && ext_match {
                let c = buffer[i - window_start];
                let j = ext_src as usize + ext_len as usize;
                let x = if j >= window_start { buffer[j - window_start] } else { prev_buffer[j - prev_window_start] };
                if c == x {
                    ext_len += 1;
                    i += 1;
                    continue;
                } else {
                    factors.push(Factor::Reference { src: ext_src, len: ext_len });
                    ext_match = false;
                }
            }

            let mut lv = tries[left_idx].cursor();
            let mut lsearch = true;
            let mut rv = tries[right_idx].cursor();
            let mut rsearch = true;

            let mut j = i;
            let mut c = 0u8;
            while j < n && (lsearch || rsearch) {
                c = buffer[j - window_start];

                if lsearch {
                    let mut lc = lv;
                    if lc.descend(&mut tries[left_idx], c)
                        && prev_window_start as u64 + lc.max_pos(&tries[left_idx]) as u64 + w as u64 >= i as u64
                    {
                        lv = lc;
                        lsearch = !lv.reached_leaf(&tries[left_idx]);
                    } else {
                        lsearch = false;
                    }
                }

                if rsearch {
                    let mut rc = rv;
                    if rc.descend(&mut tries[right_idx], c)
                        && window_start as u64 + rc.min_pos(&tries[right_idx]) as u64 < i as u64
                    {
                        rv = rc;
                        rsearch = !rv.reached_leaf(&tries[right_idx]);
                    } else {
                        rsearch = false;
                    }
                }

                j += 1;
            }

            let lv_leaf = lv.reached_leaf(&tries[left_idx]);
            let rv_leaf = rv.reached_leaf(&tries[right_idx]);

            if self.allow_ext_match && j < n && ((lv_leaf && lv.depth > 1) || (rv_leaf && rv.depth > 1)) {
                ext_match = true;
                ext_src = if lv.depth > rv.depth {
                    prev_window_start as u64 + lv.max_pos(&tries[left_idx]) as u64
                } else {
                    window_start as u64 + rv.min_pos(&tries[right_idx]) as u64
                };
                ext_len = lv.depth.max(rv.depth);
                i += ext_len as usize;
            } else {
                let flen = lv.depth.max(rv.depth);
                if flen > 0 {
                    if flen > 1 {
                        let fsrc = if lv.depth > rv.depth {
                            prev_window_start as u64 + lv.max_pos(&tries[left_idx]) as u64
                        } else {
                            window_start as u64 + rv.min_pos(&tries[right_idx]) as u64
                        };
                        factors.push(Factor::Reference { src: fsrc, len: flen });
                    } else {
                        let ch = if lv.depth > 0 { lv.character(&tries[left_idx]) } else { rv.character(&tries[right_idx]) };
                        factors.push(Factor::Literal(ch));
                    }
                    i += flen as usize;
                } else {
                    factors.push(Factor::Literal(c));
                    i += 1;
                }
            }
        }

        if ext_match {
            factors.push(Factor::Reference { src: ext_src, len: ext_len });
        }

        factors
    }
}

/// Decodes a factor stream back into bytes (spec.md invariant 10): literals
/// append a byte, references copy `len` bytes starting at `src` in the
/// output produced so far, byte by byte (so overlapping self-references —
/// `src + len > current output length` — behave like a run-length copy).
pub fn decode(factors: &[Factor]) -> Vec<u8> {
    let mut out = Vec::new();
    for f in factors {
        match *f {
            Factor::Literal(b) => out.push(b),
            Factor::Reference { src, len } => {
                for k in 0..len as u64 {
                    out.push(out[(src + k) as usize]);
                }
            }
        }
    }
    out
}
