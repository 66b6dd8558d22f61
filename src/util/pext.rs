//! Parallel bit extraction ("compress"): gathers the bits of `x` selected by
//! `mask` into the low bits of the result, in mask-bit order.

/// Extracts the bits of `x` at the set positions of `mask`, packed into the
/// low bits of the result in ascending bit-index order.
///
/// Dispatches to the hardware `PEXT` instruction on x86_64 when the `bmi2`
/// feature is enabled and the CPU supports it at runtime; otherwise falls
/// back to a portable bit-by-bit gather.
#[inline]
pub fn compress(x: u64, mask: u64) -> u64 {
    #[cfg(all(feature = "bmi2", target_arch = "x86_64"))]
    {
        if std::is_x86_feature_detected!("bmi2") {
            // SAFETY: feature presence checked above.
            return unsafe { compress_bmi2(x, mask) };
        }
    }
    compress_portable(x, mask)
}

#[cfg(all(feature = "bmi2", target_arch = "x86_64"))]
/// # Safety
///
/// Caller must ensure the `bmi2` CPU feature is available.
#[target_feature(enable = "bmi2")]
unsafe fn compress_bmi2(x: u64, mask: u64) -> u64 {
    core::arch::x86_64::_pext_u64(x, mask)
}

/// Portable bit-by-bit gather, used when hardware PEXT is unavailable or the
/// `bmi2` feature is disabled.
#[inline]
fn compress_portable(x: u64, mask: u64) -> u64 {
    let mut result = 0u64;
    let mut out_bit = 0u32;
    let mut m = mask;
    while m != 0 {
        let bit = m & m.wrapping_neg(); // lowest set bit
        let idx = bit.trailing_zeros();
        if (x >> idx) & 1 == 1 {
            result |= 1u64 << out_bit;
        }
        out_bit += 1;
        m &= m - 1;
    }
    result
}

/// Broadcasts `b`'s low byte into every byte of a 64-bit word.
#[inline]
pub fn repeat(b: u8) -> u64 {
    (b as u64).wrapping_mul(0x0101_0101_0101_0101)
}

/// Index (from the low byte) of the first byte of `array` strictly greater
/// (unsigned) than the corresponding byte of `cx_repeat`, minus one. Since
/// `array` holds the node's compressed keys packed in ascending sorted
/// order, this is exactly the rank of the compressed key within the array.
///
/// Computed by an 8-way parallel unsigned byte compare (via the XOR
/// sign-flip trick: `a > b` unsigned iff `(a^0x80) > (b^0x80)` signed),
/// then `ctz(cmp) / 8`, matching `pcmpgtub` + `__builtin_ctzll` in the
/// original. Underflows (wraps to `usize::MAX`) when the very first byte
/// already exceeds `cx_repeat`, mirroring the source's unsigned wraparound
/// — the caller's exists-flag guards against ever reading that value.
#[inline]
pub fn rank(cx_repeat: u64, array: u64) -> usize {
    const SIGN: u64 = 0x8080_8080_8080_8080;
    let a = array ^ SIGN;
    let b = cx_repeat ^ SIGN;
    for byte_idx in 0..8usize {
        let shift = byte_idx * 8;
        let av = ((a >> shift) & 0xFF) as i8;
        let bv = ((b >> shift) & 0xFF) as i8;
        if av > bv {
            return byte_idx.wrapping_sub(1);
        }
    }
    8usize.wrapping_sub(1)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn compress_portable_extracts_selected_bits() {
        let x = 0b1101_0110u64;
        let mask = 0b0101_0101u64;
        // selected bits (mask positions 0,2,4,6): x bit0=0,bit2=1,bit4=1,bit6=1
        assert_eq!(compress_portable(x, mask), 0b1110);
    }

    #[test]
    fn compress_identity_with_full_mask() {
        let x = 0xdead_beef_1234_5678u64;
        assert_eq!(compress_portable(x, u64::MAX), x);
    }

    #[test]
    fn compress_zero_mask_is_zero() {
        assert_eq!(compress_portable(0xFFFF_FFFF_FFFF_FFFF, 0), 0);
    }

    #[test]
    fn repeat_broadcasts_byte() {
        assert_eq!(repeat(0xAB), 0xABAB_ABAB_ABAB_ABABu64);
        assert_eq!(repeat(0), 0);
    }

    #[test]
    fn rank_matches_first_greater_minus_one() {
        // array holds ascending bytes (as a sorted compressed-key column).
        // rank(cx) = (index of first byte strictly greater than cx) - 1.
        let bytes: [u8; 8] = [1, 3, 5, 7, 9, 11, 13, 15];
        let array = u64::from_le_bytes(bytes);
        for &cx in &bytes {
            let cxr = repeat(cx);
            let first_greater = bytes.iter().position(|&b| b > cx).unwrap_or(8);
            assert_eq!(rank(cxr, array), first_greater.wrapping_sub(1), "cx={}", cx);
        }
    }

    #[test]
    fn compress_matches_hardware_when_available() {
        #[cfg(all(feature = "bmi2", target_arch = "x86_64"))]
        {
            if std::is_x86_feature_detected!("bmi2") {
                let x = 0x1234_5678_9abc_def0u64;
                let mask = 0xF0F0_F0F0_F0F0_F0F0u64;
                let hw = unsafe { compress_bmi2(x, mask) };
                assert_eq!(hw, compress_portable(x, mask));
            }
        }
    }
}
