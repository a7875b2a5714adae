//! Tolerance rules shared by the verifier and the test suites.
//!
//! Kernels accumulate in different orders, so results are compared by
//! relative error against the scalar f32 ground truth, never bit for bit.

use crate::error::{KernelError, KernelResult};

/// Maximum relative error a kernel may show against ground truth.
pub const DEFAULT_TOLERANCE: f32 = 0.01;

/// `|expected - actual| / |expected|`, or `|actual|` when `expected == 0`.
#[inline]
pub fn relative_error(expected: f32, actual: f32) -> f32 {
    if expected == 0.0 {
        actual.abs()
    } else {
        ((expected - actual) / expected).abs()
    }
}

/// Strict `<` check. NaN on either side fails.
#[inline]
pub fn within_tolerance(expected: f32, actual: f32, tolerance: f32) -> bool {
    relative_error(expected, actual) < tolerance
}

/// Tolerance check that reports a failure as [`KernelError::VerificationFailed`].
pub fn check_tolerance(
    kernel: &'static str,
    length: usize,
    expected: f32,
    actual: f32,
    tolerance: f32,
) -> KernelResult<f32> {
    let relative_error = relative_error(expected, actual);
    if relative_error < tolerance {
        Ok(relative_error)
    } else {
        Err(KernelError::VerificationFailed { kernel, length, expected, actual, relative_error })
    }
}
