//! Sketch-backed fingerprint factorizer, grounded on
//! `include/tdc/comp/lz77/lzsketch.hpp`, simplified per the project's
//! design ledger to the [`AugmentedSketch`] abstraction (spec.md §4.10)
//! applied directly to fingerprints rather than the source's bespoke
//! q-gram trie filter — same shape as [`super::fingerprint::LZFingerprinting`],
//! but each layer's exact `fingerprint -> earliest position` hashmap is
//! replaced by a bounded [`AugmentedSketch<u64, u64>`].

use std::vec::Vec;

use crate::sketch::AugmentedSketch;
use crate::util::random::DEFAULT_SEED;
use super::factor::Factor;
use super::fingerprint::PrefixHash;

fn is_pow2(x: u32) -> bool {
    x != 0 && (x & (x - 1)) == 0
}

/// Factorizer backed by one [`AugmentedSketch`] per power-of-two
/// fingerprint length, trading recall (cold fingerprints are dropped) for
/// bounded memory.
pub struct LZSketch {
    tau_min: u32,
    tau_max: u32,
    seed: u64,
    max_filter_size: usize,
    sketch_width: usize,
    sketch_height: usize,
}

impl LZSketch {
    pub fn new(tau_min: u32, tau_max: u32, max_filter_size: usize, sketch_width: usize, sketch_height: usize) -> Self {
        Self::with_seed(tau_min, tau_max, max_filter_size, sketch_width, sketch_height, DEFAULT_SEED)
    }

    pub fn with_seed(
        tau_min: u32,
        tau_max: u32,
        max_filter_size: usize,
        sketch_width: usize,
        sketch_height: usize,
        seed: u64,
    ) -> Self {
        assert!(is_pow2(tau_min) && is_pow2(tau_max), "tau_min and tau_max must be powers of two");
        assert!(tau_min <= tau_max, "tau_min must not exceed tau_max");
        Self { tau_min, tau_max, seed, max_filter_size, sketch_width, sketch_height }
    }

    fn taus(&self) -> Vec<u32> {
        let mut v = Vec::new();
        let mut t = self.tau_max;
        while t >= self.tau_min {
            v.push(t);
            t /= 2;
        }
        v
    }

    pub fn factorize(&self, input: &[u8]) -> Vec<Factor> {
        let n = input.len();
        let mut factors = Vec::new();
        if n == 0 {
            return factors;
        }

        let taus = self.taus();
        let ph = PrefixHash::build(input, self.seed);
        let mut layers: Vec<AugmentedSketch<u64, u64>> =
            taus.iter().map(|_| AugmentedSketch::new(self.max_filter_size, self.sketch_width, self.sketch_height)).collect();

        let mut pos = 0usize;
        while pos < n {
            let mut matched_len = None;
            for (li, &tau) in taus.iter().enumerate() {
                let tau_us = tau as usize;
                if pos + tau_us > n {
                    continue;
                }
                let fp = ph.of(pos, pos + tau_us);
                if let Some(&p0) = layers[li].is_frequent(&fp) {
                    let p0 = p0 as usize;
                    if p0 < pos && input[p0..p0 + tau_us] == input[pos..pos + tau_us] {
                        factors.push(Factor::Reference { src: p0 as u64, len: tau });
                        matched_len = Some(tau_us);
                        break;
                    }
                }
            }

            match matched_len {
                Some(len) => {
                    for p in pos..pos + len {
                        for (li, &tau) in taus.iter().enumerate() {
                            let tau_us = tau as usize;
                            if p + tau_us <= n {
                                layers[li].count(ph.of(p, p + tau_us), p as u64);
                            }
                        }
                    }
                    pos += len;
                }
                None => {
                    for (li, &tau) in taus.iter().enumerate() {
                        let tau_us = tau as usize;
                        if pos + tau_us <= n {
                            layers[li].count(ph.of(pos, pos + tau_us), pos as u64);
                        }
                    }
                    factors.push(Factor::Literal(input[pos]));
                    pos += 1;
                }
            }
        }

        factors
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lz::sliding_window::decode;

    #[test]
    fn abracadabra_round_trips() {
        let s = LZSketch::new(2, 8, 16, 64, 4);
        let factors = s.factorize(b"abracadabra");
        assert_eq!(decode(&factors), b"abracadabra");
    }

    #[test]
    fn highly_repetitive_input_round_trips() {
        let input = b"mississippimississippimississippi".repeat(3);
        let s = LZSketch::new(1, 16, 32, 128, 4);
        let factors = s.factorize(&input);
        assert_eq!(decode(&factors), input);
    }

    #[test]
    fn empty_input_yields_no_factors() {
        let s = LZSketch::new(1, 8, 8, 32, 4);
        assert!(s.factorize(b"").is_empty());
    }
}
