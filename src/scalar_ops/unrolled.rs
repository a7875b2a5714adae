//! Blocked scalar dot product.
//!
//! Each group of eight products is summed as one expression before it touches
//! the running accumulator, so the accumulator's dependency chain is one add
//! per eight multiplies instead of one per multiply. Layout of a length-`n`
//! run:
//!
//! ```text
//! [0, n % 8)                  sequential, one add per product
//! then, only if n >= 8:
//! [.., last full 32-block)    four 8-groups per block, added in group order
//! [.., n)                     remaining 8-groups
//! ```

use half::bf16;

use crate::traits::Element;

const GROUP: usize = 8;
const BLOCK: usize = 4 * GROUP;

/// One 8-product group starting at `i`, summed left-associated.
#[inline(always)]
fn group8<E: Element>(a: &[E], b: &[E], i: usize) -> f32 {
    b[i].to_f32() * a[i].to_f32()
        + b[i + 1].to_f32() * a[i + 1].to_f32()
        + b[i + 2].to_f32() * a[i + 2].to_f32()
        + b[i + 3].to_f32() * a[i + 3].to_f32()
        + b[i + 4].to_f32() * a[i + 4].to_f32()
        + b[i + 5].to_f32() * a[i + 5].to_f32()
        + b[i + 6].to_f32() * a[i + 6].to_f32()
        + b[i + 7].to_f32() * a[i + 7].to_f32()
}

#[inline(always)]
pub fn dot_unrolled<E: Element>(a: &[E], b: &[E]) -> f32 {
    let len = a.len();
    assert_eq!(len, b.len(), "dot_unrolled: operand length mismatch");

    let mut res = 0.0f32;
    let mut i = 0;
    while i < len % GROUP {
        res += b[i].to_f32() * a[i].to_f32();
        i += 1;
    }
    if len < GROUP {
        return res;
    }

    while i + BLOCK <= len {
        res += group8(a, b, i);
        res += group8(a, b, i + GROUP);
        res += group8(a, b, i + 2 * GROUP);
        res += group8(a, b, i + 3 * GROUP);
        i += BLOCK;
    }
    while i + GROUP <= len {
        res += group8(a, b, i);
        i += GROUP;
    }
    res
}

#[inline(never)]
pub fn dot_f32_unrolled(a: &[f32], b: &[f32]) -> f32 {
    dot_unrolled(a, b)
}

#[inline(never)]
pub fn dot_bf16_unrolled(a: &[bf16], b: &[bf16]) -> f32 {
    dot_unrolled(a, b)
}
