use std::fmt::Debug;

use half::bf16;

use crate::codec;

/// Element types the dot-product kernels accept.
///
/// Arithmetic always happens in f32: `to_f32` is the widening step a kernel
/// applies to each operand immediately before the multiply. For `f32` it is
/// the identity, for `bf16` it is the exact codec decode, so one generic
/// kernel body serves both precisions with the same summation order.
pub trait Element: Debug + Clone + Copy + Send + Sync + Default + 'static {
    const NAME: &'static str;

    fn from_f32(v: f32) -> Self;
    fn to_f32(self) -> f32;
}

impl Element for f32 {
    const NAME: &'static str = "f32";

    #[inline(always)] fn from_f32(v: f32) -> Self { v }
    #[inline(always)] fn to_f32(self) -> f32 { self }
}

impl Element for bf16 {
    const NAME: &'static str = "bf16";

    /// Biased-truncation encode, the same conversion used to build workloads.
    #[inline(always)] fn from_f32(v: f32) -> Self { codec::encode(v) }
    #[inline(always)] fn to_f32(self) -> f32 { codec::decode(self) }
}
