//! bfloat16 codec.
//!
//! A bf16 value is the top half of an f32 bit pattern: sign, the full 8-bit
//! exponent and the 7 most significant mantissa bits. Storage uses
//! [`half::bf16`] (a transparent `u16`) so slices can be handed to SIMD code
//! as raw 16-bit memory, but the conversions below are this crate's own:
//!
//! - [`encode_bits`] adds a fixed `0x7FFF` bias before truncating. That is an
//!   approximation of round-to-nearest; ties are not resolved to even.
//! - [`decode_bits`] is an exact widening: zero-extend, shift left 16,
//!   reinterpret. No rounding, no NaN quieting.

use half::bf16;

/// Shift that moves a bf16 held in the low half of a 32-bit lane into f32 position.
pub const BF16_SHIFT: i32 = 16;

/// Mask that keeps a bf16 already sitting in the high half of a 32-bit lane.
pub const BF16_HIGH_MASK: u32 = 0xFFFF_0000;

/// Rounding bias added to the f32 bit pattern before truncation.
pub const ENCODE_BIAS: u32 = 0x7FFF;

/// Encode an f32 to bf16 bits with the biased-truncation rounding.
#[inline(always)]
pub fn encode_bits(f: f32) -> u16 {
    (f.to_bits().wrapping_add(ENCODE_BIAS) >> 16) as u16
}

/// Widen bf16 bits to f32. Exact.
#[inline(always)]
pub fn decode_bits(bits: u16) -> f32 {
    f32::from_bits((bits as u32) << BF16_SHIFT)
}

#[inline(always)]
pub fn encode(f: f32) -> bf16 {
    bf16::from_bits(encode_bits(f))
}

#[inline(always)]
pub fn decode(v: bf16) -> f32 {
    decode_bits(v.to_bits())
}

/// Correctly rounded (ties-to-even) conversion.
///
/// Kernels and workload setup never call this; it exists for callers that
/// need bit-exact bf16 conversion instead of the biased approximation.
#[inline]
pub fn encode_nearest_even(f: f32) -> bf16 {
    bf16::from_f32(f)
}

pub fn encode_slice(src: &[f32]) -> Vec<bf16> {
    src.iter().map(|&f| encode(f)).collect()
}

pub fn decode_slice(src: &[bf16]) -> Vec<f32> {
    src.iter().map(|&v| decode(v)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_is_exact_widening_for_all_inputs() {
        for bits in 0..=u16::MAX {
            let f = decode_bits(bits);
            assert_eq!(f.to_bits(), (bits as u32) << 16, "bits={bits:#06x}");
        }
    }

    #[test]
    fn test_encode_specific_values() {
        assert_eq!(encode_bits(0.0), 0x0000);
        assert_eq!(encode_bits(-0.0), 0x8000);
        assert_eq!(encode_bits(1.0), 0x3F80);
        assert_eq!(encode_bits(-2.0), 0xC000);
        assert_eq!(encode_bits(0.5), 0x3F00);
    }

    #[test]
    fn test_exactly_representable_values_roundtrip() {
        for f in [0.0f32, 1.0, -1.0, 0.5, 0.25, 3.0, -96.0, 1.5, 0.75] {
            assert_eq!(decode(encode(f)), f, "roundtrip failed for {f}");
        }
    }

    #[test]
    fn test_bias_rounds_up_above_half_ulp() {
        // 1.0 + 2^-8 + 2^-16: just above the midpoint between 1.0 and 1.0 + 2^-7.
        let f = f32::from_bits(0x3F80_8001);
        assert_eq!(encode_bits(f), 0x3F81);
        // Exactly on the midpoint the bias does not carry: truncates down.
        let tie = f32::from_bits(0x3F80_8000);
        assert_eq!(encode_bits(tie), 0x3F80);
    }

    #[test]
    fn test_bias_differs_from_nearest_even_only_on_ties() {
        // Odd mantissa tie: nearest-even rounds up, the biased form truncates.
        let tie = f32::from_bits(0x3F81_8000);
        assert_eq!(encode_bits(tie), 0x3F81);
        assert_eq!(encode_nearest_even(tie).to_bits(), 0x3F82);

        let off_tie = f32::from_bits(0x3F81_7FFF);
        assert_eq!(encode_bits(off_tie), encode_nearest_even(off_tie).to_bits());
    }

    #[test]
    fn test_roundtrip_relative_error_on_synthetic_sequence() {
        for i in 0..4096usize {
            let a = i as f32 / (i + 1) as f32;
            let b = 1.0 / (i + 1) as f32;
            for f in [a, b] {
                if f == 0.0 {
                    continue;
                }
                let rel = (decode(encode(f)) - f).abs() / f.abs();
                assert!(rel <= 1.0 / 128.0, "i={i} f={f} rel={rel}");
            }
        }
    }

    #[test]
    fn test_slice_helpers() {
        let src = [1.0f32, -0.5, 0.3333, 1024.0];
        let enc = encode_slice(&src);
        assert_eq!(enc.len(), src.len());
        let dec = decode_slice(&enc);
        for (x, y) in src.iter().zip(dec.iter()) {
            assert!((x - y).abs() <= x.abs() / 128.0);
        }
    }
}
