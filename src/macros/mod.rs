//! Macro system for bfdot-kernels.
//!
//! Follows a strict 3-layer architecture:
//! 1. simd_primitive! (Hardware Primitives)
//! 2. define_dot_ops! (Operator Logic)
//! 3. expand_isa_impls! (Per-ISA Expansion)

#[macro_use]
pub mod simd_primitive;
#[macro_use]
pub mod operator_templates;
#[macro_use]
pub mod expand;
