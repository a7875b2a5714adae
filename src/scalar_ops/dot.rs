//! Naive sequential dot product.

use half::bf16;

use crate::traits::Element;

/// `sum(a[i] * b[i])` accumulated left to right into one f32.
///
/// Each operand is widened with [`Element::to_f32`] immediately before its
/// multiply.
#[inline(always)]
pub fn dot<E: Element>(a: &[E], b: &[E]) -> f32 {
    assert_eq!(a.len(), b.len(), "dot: operand length mismatch");
    let mut acc = 0.0f32;
    for i in 0..a.len() {
        acc += a[i].to_f32() * b[i].to_f32();
    }
    acc
}

/// Naive f32 dot product. Ground truth for verification.
#[inline(never)]
pub fn dot_f32(a: &[f32], b: &[f32]) -> f32 {
    dot(a, b)
}

/// Naive dot product on bf16 operands.
#[inline(never)]
pub fn dot_bf16(a: &[bf16], b: &[bf16]) -> f32 {
    dot(a, b)
}
