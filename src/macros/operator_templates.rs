/// Defines the lane-vectorized dot-product kernels for one ISA.
///
/// "Layer 2": every body is written once against `simd_primitive!` and is
/// expanded per ISA by `expand_isa_impls!`. The optional feature literal is
/// attached as `#[target_feature(enable = ...)]`, which is why every kernel is
/// an `unsafe fn`: the caller guarantees the CPU supports the ISA.
///
/// Kernels generated:
/// - `dot_f32`: one accumulator, `LANES` elements per step, scalar tail.
/// - `dot_f32_unrolled`: four accumulators over `4 * LANES` chunks when
///   `len > 2 * LANES`, then single-vector steps into the first accumulator,
///   then a scalar tail. Shorter inputs run entirely in the scalar tail.
/// - `dot_bf16_emulated`: bf16 dot product computed on f32 lanes. Each step
///   loads `2 * LANES` bf16 values per operand as packed 32-bit lanes and
///   splits them into even elements (`lane << 16`) and odd elements
///   (`lane & 0xFFFF0000`). Decoded arrays are never materialized.
#[macro_export]
macro_rules! define_dot_ops {
    ($isa:ident $(, $feature:literal)?) => {
        /// f32 lanes per vector register on this ISA.
        pub const LANES: usize = $crate::simd_primitive!($isa, f32, lanes);

        /// Single-accumulator vectorized f32 dot product.
        ///
        /// # Safety
        /// The CPU must support this module's ISA.
        $(#[target_feature(enable = $feature)])?
        #[allow(unused_unsafe)]
        pub unsafe fn dot_f32(a: &[f32], b: &[f32]) -> f32 {
            let len = a.len();
            assert_eq!(len, b.len(), "dot_f32: operand length mismatch");

            let mut i = 0;
            let mut acc = unsafe { $crate::simd_primitive!($isa, f32, zero) };
            while i + LANES <= len {
                unsafe {
                    let va = $crate::simd_primitive!($isa, f32, load, a.as_ptr().add(i));
                    let vb = $crate::simd_primitive!($isa, f32, load, b.as_ptr().add(i));
                    let prod = $crate::simd_primitive!($isa, f32, mul, va, vb);
                    acc = $crate::simd_primitive!($isa, f32, add, acc, prod);
                }
                i += LANES;
            }

            let mut res: f32 = unsafe { $crate::simd_primitive!($isa, f32, reduce_sum, acc) };
            while i < len {
                res += a[i] * b[i];
                i += 1;
            }
            res
        }

        /// Four-accumulator vectorized f32 dot product.
        ///
        /// # Safety
        /// The CPU must support this module's ISA.
        $(#[target_feature(enable = $feature)])?
        #[allow(unused_unsafe)]
        pub unsafe fn dot_f32_unrolled(a: &[f32], b: &[f32]) -> f32 {
            let len = a.len();
            assert_eq!(len, b.len(), "dot_f32_unrolled: operand length mismatch");

            let mut i = 0;
            let mut res = 0.0f32;
            // Below 2 vectors the accumulator setup and reduction cost more than they save.
            if len > 2 * LANES {
                let mut acc1 = unsafe { $crate::simd_primitive!($isa, f32, zero) };
                let mut acc2 = unsafe { $crate::simd_primitive!($isa, f32, zero) };
                let mut acc3 = unsafe { $crate::simd_primitive!($isa, f32, zero) };
                let mut acc4 = unsafe { $crate::simd_primitive!($isa, f32, zero) };

                while i + 4 * LANES <= len {
                    unsafe {
                        let pa = a.as_ptr().add(i);
                        let pb = b.as_ptr().add(i);

                        let va = $crate::simd_primitive!($isa, f32, load, pa);
                        let vb = $crate::simd_primitive!($isa, f32, load, pb);
                        let p1 = $crate::simd_primitive!($isa, f32, mul, va, vb);
                        acc1 = $crate::simd_primitive!($isa, f32, add, acc1, p1);

                        let vc = $crate::simd_primitive!($isa, f32, load, pa.add(LANES));
                        let vd = $crate::simd_primitive!($isa, f32, load, pb.add(LANES));
                        let p2 = $crate::simd_primitive!($isa, f32, mul, vc, vd);
                        acc2 = $crate::simd_primitive!($isa, f32, add, acc2, p2);

                        let ve = $crate::simd_primitive!($isa, f32, load, pa.add(2 * LANES));
                        let vf = $crate::simd_primitive!($isa, f32, load, pb.add(2 * LANES));
                        let p3 = $crate::simd_primitive!($isa, f32, mul, ve, vf);
                        acc3 = $crate::simd_primitive!($isa, f32, add, acc3, p3);

                        let vg = $crate::simd_primitive!($isa, f32, load, pa.add(3 * LANES));
                        let vh = $crate::simd_primitive!($isa, f32, load, pb.add(3 * LANES));
                        let p4 = $crate::simd_primitive!($isa, f32, mul, vg, vh);
                        acc4 = $crate::simd_primitive!($isa, f32, add, acc4, p4);
                    }
                    i += 4 * LANES;
                }

                // vector tail: full vectors left after the 4x loop
                while i + LANES <= len {
                    unsafe {
                        let va = $crate::simd_primitive!($isa, f32, load, a.as_ptr().add(i));
                        let vb = $crate::simd_primitive!($isa, f32, load, b.as_ptr().add(i));
                        let prod = $crate::simd_primitive!($isa, f32, mul, va, vb);
                        acc1 = $crate::simd_primitive!($isa, f32, add, acc1, prod);
                    }
                    i += LANES;
                }

                unsafe {
                    let r1 = $crate::simd_primitive!($isa, f32, add, acc1, acc2);
                    let r2 = $crate::simd_primitive!($isa, f32, add, acc3, acc4);
                    let total = $crate::simd_primitive!($isa, f32, add, r1, r2);
                    res += $crate::simd_primitive!($isa, f32, reduce_sum, total);
                }
            }

            while i < len {
                res += b[i] * a[i];
                i += 1;
            }
            res
        }

        /// bf16 dot product emulated with shifts and masks on packed lanes.
        ///
        /// # Safety
        /// The CPU must support this module's ISA.
        $(#[target_feature(enable = $feature)])?
        #[allow(unused_unsafe)]
        pub unsafe fn dot_bf16_emulated(a: &[::half::bf16], b: &[::half::bf16]) -> f32 {
            const STEP: usize = 2 * LANES;
            let len = a.len();
            assert_eq!(len, b.len(), "dot_bf16_emulated: operand length mismatch");

            // bf16 is repr(transparent) over u16.
            let pa = a.as_ptr() as *const u16;
            let pb = b.as_ptr() as *const u16;

            let mut i = 0;
            let mut acc = unsafe { $crate::simd_primitive!($isa, f32, zero) };
            let mask = unsafe { $crate::simd_primitive!($isa, u32, splat, $crate::codec::BF16_HIGH_MASK) };
            while i + STEP <= len {
                unsafe {
                    let va = $crate::simd_primitive!($isa, u32, load_packed, pa.add(i));
                    let a_even_bits = $crate::simd_primitive!($isa, u32, shl, va, $crate::codec::BF16_SHIFT);
                    let a_even = $crate::simd_primitive!($isa, u32, as_f32, a_even_bits);
                    let a_odd_bits = $crate::simd_primitive!($isa, u32, and, va, mask);
                    let a_odd = $crate::simd_primitive!($isa, u32, as_f32, a_odd_bits);

                    let vb = $crate::simd_primitive!($isa, u32, load_packed, pb.add(i));
                    let b_even_bits = $crate::simd_primitive!($isa, u32, shl, vb, $crate::codec::BF16_SHIFT);
                    let b_even = $crate::simd_primitive!($isa, u32, as_f32, b_even_bits);
                    let b_odd_bits = $crate::simd_primitive!($isa, u32, and, vb, mask);
                    let b_odd = $crate::simd_primitive!($isa, u32, as_f32, b_odd_bits);

                    let even = $crate::simd_primitive!($isa, f32, mul, a_even, b_even);
                    let odd = $crate::simd_primitive!($isa, f32, mul, a_odd, b_odd);
                    let pair = $crate::simd_primitive!($isa, f32, add, even, odd);
                    acc = $crate::simd_primitive!($isa, f32, add, acc, pair);
                }
                i += STEP;
            }

            let mut res: f32 = unsafe { $crate::simd_primitive!($isa, f32, reduce_sum, acc) };
            while i < len {
                res += $crate::codec::decode(a[i]) * $crate::codec::decode(b[i]);
                i += 1;
            }
            res
        }
    };
}
