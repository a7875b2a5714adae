//! Workload types: operand pairs, per-length state and the kernel registry.

use std::fmt;

use half::bf16;

use crate::codec;
use crate::cpu_kernels::CpuKernels;
use crate::error::{KernelError, KernelResult};
use crate::scalar_ops;
use crate::traits::Element;

/// Arithmetic precision of a kernel's operands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Precision {
    /// 32-bit float operands.
    #[default]
    F32,
    /// bfloat16 operands widened to f32 per element; f32 accumulation.
    Bf16,
}

impl Precision {
    pub fn name(&self) -> &'static str {
        match self {
            Self::F32 => "f32",
            Self::Bf16 => "bf16",
        }
    }
}

/// Two operand vectors of equal length.
#[derive(Debug, Clone, PartialEq)]
pub struct VectorPair<E: Element> {
    a: Vec<E>,
    b: Vec<E>,
}

impl<E: Element> VectorPair<E> {
    pub fn new(a: Vec<E>, b: Vec<E>) -> KernelResult<Self> {
        if a.len() != b.len() {
            return Err(KernelError::LengthMismatch { left: a.len(), right: b.len() });
        }
        Ok(Self { a, b })
    }

    #[inline]
    pub fn a(&self) -> &[E] {
        &self.a
    }

    #[inline]
    pub fn b(&self) -> &[E] {
        &self.b
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.a.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.a.is_empty()
    }
}

impl VectorPair<f32> {
    /// Elementwise bf16 encode of both operands.
    pub fn to_bf16(&self) -> VectorPair<bf16> {
        VectorPair { a: codec::encode_slice(&self.a), b: codec::encode_slice(&self.b) }
    }
}

/// Deterministic workload: `a[i] = i / (i + 1)`, `b[i] = 1 / (i + 1)`.
///
/// Every product is positive, so the dot product grows monotonically with the
/// length and has no cancellation. The values are not exactly representable
/// in bf16, which exercises the codec's rounding.
pub fn make_vectors(len: usize) -> VectorPair<f32> {
    let a = (0..len).map(|i| i as f32 / (i + 1) as f32).collect();
    let b = (0..len).map(|i| 1.0 / (i + 1) as f32).collect();
    VectorPair { a, b }
}

/// Both operand pairs for one length. Built once, read-only afterwards.
#[derive(Debug, Clone)]
pub struct DotState {
    pub size: usize,
    pub full: VectorPair<f32>,
    pub reduced: VectorPair<bf16>,
}

impl DotState {
    pub fn new(size: usize) -> Self {
        let full = make_vectors(size);
        let reduced = full.to_bf16();
        Self { size, full, reduced }
    }
}

/// Every dot-product entry point the crate provides.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KernelVariant {
    /// Sequential f32 accumulation; ground truth.
    ScalarF32,
    ScalarBf16,
    UnrolledF32,
    UnrolledBf16,
    SimdF32,
    SimdF32Unrolled,
    SimdBf16Emulated,
}

impl KernelVariant {
    pub const ALL: [KernelVariant; 7] = [
        Self::ScalarF32,
        Self::ScalarBf16,
        Self::UnrolledF32,
        Self::UnrolledBf16,
        Self::SimdF32,
        Self::SimdF32Unrolled,
        Self::SimdBf16Emulated,
    ];

    /// Kernels checked against [`KernelVariant::ScalarF32`].
    pub const CANDIDATES: [KernelVariant; 6] = [
        Self::ScalarBf16,
        Self::UnrolledF32,
        Self::UnrolledBf16,
        Self::SimdF32,
        Self::SimdF32Unrolled,
        Self::SimdBf16Emulated,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Self::ScalarF32 => "scalar_f32",
            Self::ScalarBf16 => "scalar_bf16",
            Self::UnrolledF32 => "unrolled_f32",
            Self::UnrolledBf16 => "unrolled_bf16",
            Self::SimdF32 => "simd_f32",
            Self::SimdF32Unrolled => "simd_f32_unrolled",
            Self::SimdBf16Emulated => "simd_bf16_emulated",
        }
    }

    pub fn precision(&self) -> Precision {
        match self {
            Self::ScalarF32 | Self::UnrolledF32 | Self::SimdF32 | Self::SimdF32Unrolled => {
                Precision::F32
            }
            Self::ScalarBf16 | Self::UnrolledBf16 | Self::SimdBf16Emulated => Precision::Bf16,
        }
    }

    /// Run this kernel on the pair of matching precision in `state`.
    pub fn eval(&self, kernels: &CpuKernels, state: &DotState) -> f32 {
        let (a, b) = (state.full.a(), state.full.b());
        let (a16, b16) = (state.reduced.a(), state.reduced.b());
        match self {
            Self::ScalarF32 => scalar_ops::dot_f32(a, b),
            Self::ScalarBf16 => scalar_ops::dot_bf16(a16, b16),
            Self::UnrolledF32 => scalar_ops::dot_f32_unrolled(a, b),
            Self::UnrolledBf16 => scalar_ops::dot_bf16_unrolled(a16, b16),
            Self::SimdF32 => kernels.dot_f32(a, b),
            Self::SimdF32Unrolled => kernels.dot_f32_unrolled(a, b),
            Self::SimdBf16Emulated => kernels.dot_bf16_emulated(a16, b16),
        }
    }
}

impl fmt::Display for KernelVariant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
