//! Suffix array construction (prefix doubling) and Kasai's LCP algorithm.
//!
//! The source (`divsufsort` via `sliding_window_trie.hpp`) links an external
//! C library for this step; this crate has no FFI dependency in its stack,
//! so suffix sorting is done in pure Rust with the classic O(n log n)
//! doubling algorithm instead (documented as an Open Question resolution in
//! the project's design ledger).

use std::vec::Vec;

/// Builds the suffix array of `buf` (including any trailing sentinel
/// already present in `buf`) via prefix doubling.
///
/// Returns `sa` such that `buf[sa[0]..]`, `buf[sa[1]..]`, ... is the list of
/// suffixes of `buf` in lexicographic order.
pub fn build_suffix_array(buf: &[u8]) -> Vec<u32> {
    let n = buf.len();
    if n == 0 {
        return Vec::new();
    }

    let mut sa: Vec<u32> = (0..n as u32).collect();
    let mut rank: Vec<i64> = buf.iter().map(|&b| b as i64).collect();
    let mut tmp: Vec<i64> = vec![0; n];

    let mut k = 1usize;
    let key = |rank: &[i64], i: u32, k: usize| -> (i64, i64) {
        let i = i as usize;
        let a = rank[i];
        let b = if i + k < n { rank[i + k] } else { -1 };
        (a, b)
    };

    while {
        sa.sort_unstable_by(|&a, &b| key(&rank, a, k).cmp(&key(&rank, b, k)));

        tmp[sa[0] as usize] = 0;
        for idx in 1..n {
            let prev = key(&rank, sa[idx - 1], k);
            let cur = key(&rank, sa[idx], k);
            tmp[sa[idx] as usize] = tmp[sa[idx - 1] as usize] + if cur > prev { 1 } else { 0 };
        }
        rank.copy_from_slice(&tmp);

        let distinct = rank[sa[n - 1] as usize] + 1;
        k *= 2;
        (distinct as usize) < n && k < 2 * n
    } {}

    sa
}

/// Computes the LCP array via Kasai's algorithm: `lcp[i]` is the length of
/// the longest common prefix between the suffixes at `sa[i-1]` and `sa[i]`
/// (`lcp[0] == 0` by convention).
pub fn build_lcp_array(buf: &[u8], sa: &[u32]) -> Vec<u32> {
    let n = buf.len();
    if n == 0 {
        return Vec::new();
    }

    let mut rank = vec![0u32; n];
    for (i, &s) in sa.iter().enumerate() {
        rank[s as usize] = i as u32;
    }

    let mut lcp = vec![0u32; n];
    let mut h = 0u32;
    for i in 0..n {
        let r = rank[i] as usize;
        if r > 0 {
            let j = sa[r - 1] as usize;
            while i + h as usize < n && j + h as usize < n && buf[i + h as usize] == buf[j + h as usize] {
                h += 1;
            }
            lcp[r] = h;
            if h > 0 {
                h -= 1;
            }
        } else {
            h = 0;
        }
    }

    lcp
}

#[cfg(test)]
mod tests {
    use super::*;

    fn suffixes_sorted(buf: &[u8], sa: &[u32]) -> bool {
        sa.windows(2).all(|w| buf[w[0] as usize..] <= buf[w[1] as usize..])
    }

    #[test]
    fn sorts_suffixes_of_banana_dollar() {
        let buf = b"banana\0";
        let sa = build_suffix_array(buf);
        assert_eq!(sa.len(), buf.len());
        assert!(suffixes_sorted(buf, &sa));
        assert_eq!(sa[0], 6); // "\0" is lexicographically smallest
    }

    #[test]
    fn lcp_matches_naive_computation() {
        let buf = b"abracadabra\0";
        let sa = build_suffix_array(buf);
        let lcp = build_lcp_array(buf, &sa);
        assert_eq!(lcp[0], 0);
        for i in 1..sa.len() {
            let a = &buf[sa[i - 1] as usize..];
            let b = &buf[sa[i] as usize..];
            let naive = a.iter().zip(b.iter()).take_while(|(x, y)| x == y).count();
            assert_eq!(lcp[i] as usize, naive, "mismatch at rank {i}");
        }
    }

    #[test]
    fn handles_single_byte_and_empty() {
        assert!(build_suffix_array(&[]).is_empty());
        let sa = build_suffix_array(b"\0");
        assert_eq!(sa, vec![0]);
    }
}
