//! Frequency sketches: count-min sketch, the Space-Saving `MinInc` minimum
//! structure, and the hash-filter-backed `AugmentedSketch`.

pub mod augmented;
pub mod count_min;
pub mod min_inc;

pub use augmented::AugmentedSketch;
pub use count_min::CountMinSketch;
pub use min_inc::{Handle, MinInc};
