//! Shared checks for the per-ISA kernel tests.

use half::bf16;

use crate::traits::Element;
use crate::scalar_ops::{dot_bf16, dot_f32};
use crate::types::make_vectors;
use crate::validation::{relative_error, DEFAULT_TOLERANCE};

/// Lengths around every loop boundary of an `lanes`-wide kernel.
pub fn boundary_lengths(lanes: usize) -> Vec<usize> {
    let mut lengths = vec![
        0,
        1,
        lanes - 1,
        lanes,
        lanes + 1,
        2 * lanes - 1,
        2 * lanes,
        2 * lanes + 1,
        4 * lanes - 1,
        4 * lanes,
        4 * lanes + 1,
        5 * lanes + 3,
        8,
        31,
        32,
        33,
        384,
        1024,
    ];
    lengths.sort_unstable();
    lengths.dedup();
    lengths
}

/// Small integers: every partial sum is exact in f32 and every value is
/// exact in bf16, so any summation order gives the same bits.
pub fn integer_vectors(len: usize) -> (Vec<f32>, Vec<f32>) {
    let a = (0..len).map(|i| (i % 7) as f32 - 3.0).collect();
    let b = (0..len).map(|i| (i % 5) as f32 + 1.0).collect();
    (a, b)
}

pub fn check_f32_kernel(label: &str, lanes: usize, kernel: impl Fn(&[f32], &[f32]) -> f32) {
    for len in boundary_lengths(lanes) {
        let (a, b) = integer_vectors(len);
        assert_eq!(
            kernel(a.as_slice(), b.as_slice()),
            dot_f32(&a, &b),
            "{label} [{}]: integer inputs, len={len}",
            <f32 as Element>::NAME
        );

        let pair = make_vectors(len);
        let expected = dot_f32(pair.a(), pair.b());
        let actual = kernel(pair.a(), pair.b());
        let err = relative_error(expected, actual);
        assert!(
            err < DEFAULT_TOLERANCE,
            "{label}: len={len} expected={expected} actual={actual} rel_err={err}"
        );
    }
}

pub fn check_bf16_kernel(label: &str, lanes: usize, kernel: impl Fn(&[bf16], &[bf16]) -> f32) {
    for len in boundary_lengths(lanes) {
        let (a, b) = integer_vectors(len);
        let a16: Vec<bf16> = a.iter().map(|&v| <bf16 as Element>::from_f32(v)).collect();
        let b16: Vec<bf16> = b.iter().map(|&v| <bf16 as Element>::from_f32(v)).collect();
        assert_eq!(
            kernel(a16.as_slice(), b16.as_slice()),
            dot_bf16(&a16, &b16),
            "{label} [{}]: integer inputs, len={len}",
            <bf16 as Element>::NAME
        );

        let pair = make_vectors(len);
        let reduced = pair.to_bf16();
        let expected = dot_f32(pair.a(), pair.b());
        let actual = kernel(reduced.a(), reduced.b());
        let err = relative_error(expected, actual);
        assert!(
            err < DEFAULT_TOLERANCE,
            "{label}: len={len} expected={expected} actual={actual} rel_err={err}"
        );

        let scalar = dot_bf16(reduced.a(), reduced.b());
        let err = relative_error(scalar, actual);
        assert!(err < DEFAULT_TOLERANCE, "{label}: len={len} scalar bf16={scalar} actual={actual}");
    }
}

/// 16-bit values 1, 2, 3, ... so each packed lane is easy to predict.
pub fn counting_bf16(count: usize) -> Vec<bf16> {
    (1..=count as u16).map(bf16::from_bits).collect()
}

/// Expected packed lane `k` for [`counting_bf16`] input.
pub fn expected_packed_lane(k: usize) -> u32 {
    let lo = (2 * k + 1) as u32;
    let hi = (2 * k + 2) as u32;
    lo | (hi << 16)
}
