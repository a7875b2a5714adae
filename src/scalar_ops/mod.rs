//! Scalar dot-product kernels.
//!
//! These serve as:
//! 1. Golden reference for correctness testing (`dot_f32` is ground truth).
//! 2. The ILP baseline the vectorized kernels are measured against.
//!
//! Every entry point is `#[inline(never)]` so each variant stays a distinct
//! symbol for benchmarking and its summation order is fixed at the call site.

pub mod dot;
pub mod unrolled;

pub use dot::{dot, dot_bf16, dot_f32};
pub use unrolled::{dot_bf16_unrolled, dot_f32_unrolled, dot_unrolled};
