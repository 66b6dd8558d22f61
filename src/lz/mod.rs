//! LZ77 sliding-window factorization, Karp-Rabin fingerprinting and its
//! sketch-backed variant, and on-the-wire factor stream encodings.

pub mod factor;
pub mod fingerprint;
pub mod sketch;
pub mod sliding_window;
pub mod suffix_array;
pub mod trie;
pub mod wire;

pub use factor::Factor;
pub use fingerprint::LZFingerprinting;
pub use sketch::LZSketch;
pub use sliding_window::{decode, factorize, factorize_extended, LZSlidingWindow};
pub use trie::SlidingWindowTrie;
pub use wire::{read_binary, write_binary, write_readable, Op, WireError, WireErrorKind};
