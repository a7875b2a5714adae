//! bfdot-kernels: dot-product kernels over f32 and bfloat16 vectors.
//!
//! This crate provides several dot-product strategies that must agree within a
//! relative tolerance while differing in summation order and throughput:
//! - **Scalar**: sequential accumulation, the ground truth (`scalar_ops::dot`)
//! - **Unrolled scalar**: 8-product groups in 32-element blocks for ILP
//! - **Lane-vectorized f32**: single and four-accumulator forms per ISA
//! - **bf16 emulation**: packed 16-bit lanes split with shifts and masks, all
//!   arithmetic in f32 lanes
//!
//! Vectorized kernels are generated once per ISA by the macro layers in
//! `macros` and selected at runtime by [`CpuKernels`] (portable `wide`
//! fallback, AVX2, NEON).
//!
//! # Quick Start
//!
//! ```ignore
//! use bfdot_kernels::{CpuKernels, DotState, KernelVariant};
//!
//! let kernels = CpuKernels::new(); // Auto-detect ISA
//! let state = DotState::new(1024);
//! let truth = KernelVariant::ScalarF32.eval(&kernels, &state);
//! let fast = kernels.dot_bf16_emulated(state.reduced.a(), state.reduced.b());
//!
//! bfdot_kernels::sanity_check()?; // every kernel within 1% at n = 384, 1024
//! ```

#[macro_use]
pub mod macros;

pub mod codec;
pub mod config;
pub mod cpu_kernels;
pub mod error;
pub mod scalar_ops;
pub mod traits;
pub mod types;
pub mod validation;
pub mod verify;

pub use config::VerifierConfig;
pub use cpu_kernels::{get_isa_level, CpuKernels, IsaLevel};
pub use error::{KernelError, KernelResult};
pub use traits::Element;
pub use types::{make_vectors, DotState, KernelVariant, Precision, VectorPair};
pub use validation::{relative_error, within_tolerance, DEFAULT_TOLERANCE};
pub use verify::{sanity_check, verify, CheckRecord, VerificationReport};

pub use half::bf16;
