/// Maps abstract SIMD operations to concrete hardware intrinsics or portable
/// fallbacks.
///
/// # Architecture
/// This macro is "Layer 1" of the macro architecture. It provides a unified
/// interface for:
/// - the f32 lane width of each ISA
/// - f32 compute primitives (zero, load, add, mul, horizontal sum)
/// - 32-bit integer primitives used by the packed bf16 decode (packed load,
///   splat, shift left, and, bit reinterpret as f32)
///
/// `load_packed` reads `2 * lanes` consecutive `u16` values as `lanes` 32-bit
/// lanes. Lane `k` holds element `2k` in its low half and element `2k + 1` in
/// its high half. SIMD ISAs get this from a plain little-endian load; the
/// portable ISA assembles the lanes explicitly.
///
/// # Usage
/// ```ignore
/// simd_primitive!(portable, f32, add, a, b) // -> a + b  (wide::f32x8)
/// simd_primitive!(avx2, f32, add, a, b)     // -> _mm256_add_ps(a, b)
/// ```
#[macro_export]
macro_rules! simd_primitive {
    // ========================================================================
    // Portable (wide::f32x8, runs everywhere)
    // ========================================================================

    (portable, f32, lanes) => { 8 };
    (portable, f32, zero) => { ::wide::f32x8::ZERO };
    (portable, f32, load, $p:expr) => { ::wide::f32x8::from(*($p as *const [f32; 8])) };
    (portable, f32, add, $a:expr, $b:expr) => { $a + $b };
    (portable, f32, mul, $a:expr, $b:expr) => { $a * $b };
    // Pairwise tree, same association as the AVX2 hadd sequence below.
    (portable, f32, reduce_sum, $v:expr) => {
        {
            let x: [f32; 8] = $v.to_array();
            ((x[0] + x[1]) + (x[2] + x[3])) + ((x[4] + x[5]) + (x[6] + x[7]))
        }
    };

    // --- Integer Primitives ([u32; 8]) ---
    (portable, u32, load_packed, $p:expr) => {
        {
            let p: *const u16 = $p;
            ::core::array::from_fn::<u32, 8, _>(|k| unsafe {
                (*p.add(2 * k) as u32) | ((*p.add(2 * k + 1) as u32) << 16)
            })
        }
    };
    (portable, u32, splat, $v:expr) => { [$v; 8] };
    (portable, u32, shl, $a:expr, $shift:expr) => { ($a).map(|x: u32| x << $shift) };
    (portable, u32, and, $a:expr, $b:expr) => {
        {
            let (x, y): ([u32; 8], [u32; 8]) = ($a, $b);
            ::core::array::from_fn::<u32, 8, _>(|k| x[k] & y[k])
        }
    };
    (portable, u32, as_f32, $a:expr) => { ::wide::f32x8::from(($a).map(f32::from_bits)) };

    // ========================================================================
    // AVX2 Implementation
    // ========================================================================

    (avx2, f32, lanes) => { 8 };
    (avx2, f32, zero) => { std::arch::x86_64::_mm256_setzero_ps() };
    (avx2, f32, load, $p:expr) => { std::arch::x86_64::_mm256_loadu_ps($p) };
    (avx2, f32, add, $a:expr, $b:expr) => { std::arch::x86_64::_mm256_add_ps($a, $b) };
    (avx2, f32, mul, $a:expr, $b:expr) => { std::arch::x86_64::_mm256_mul_ps($a, $b) };

    // Reduce sum: horizontal add
    (avx2, f32, reduce_sum, $v:expr) => {
        {
            let h1 = std::arch::x86_64::_mm256_hadd_ps($v, $v);
            let h2 = std::arch::x86_64::_mm256_hadd_ps(h1, h1);
            let t1 = std::arch::x86_64::_mm256_extractf128_ps(h2, 1);
            let t2 = std::arch::x86_64::_mm256_castps256_ps128(h2);
            let res = std::arch::x86_64::_mm_add_ps(t1, t2);
            std::arch::x86_64::_mm_cvtss_f32(res)
        }
    };

    // --- Integer Primitives (__m256i) ---
    (avx2, u32, load_packed, $p:expr) => {
        std::arch::x86_64::_mm256_loadu_si256($p as *const std::arch::x86_64::__m256i)
    };
    (avx2, u32, splat, $v:expr) => { std::arch::x86_64::_mm256_set1_epi32($v as i32) };
    (avx2, u32, shl, $a:expr, $shift:expr) => { std::arch::x86_64::_mm256_slli_epi32::<{ $shift }>($a) };
    (avx2, u32, and, $a:expr, $b:expr) => { std::arch::x86_64::_mm256_and_si256($a, $b) };
    (avx2, u32, as_f32, $a:expr) => { std::arch::x86_64::_mm256_castsi256_ps($a) };

    // ========================================================================
    // NEON Implementation (aarch64)
    // ========================================================================

    (neon, f32, lanes) => { 4 };
    (neon, f32, zero) => { std::arch::aarch64::vdupq_n_f32(0.0) };
    (neon, f32, load, $p:expr) => { std::arch::aarch64::vld1q_f32($p) };
    (neon, f32, add, $a:expr, $b:expr) => { std::arch::aarch64::vaddq_f32($a, $b) };
    (neon, f32, mul, $a:expr, $b:expr) => { std::arch::aarch64::vmulq_f32($a, $b) };
    (neon, f32, reduce_sum, $v:expr) => { std::arch::aarch64::vaddvq_f32($v) };

    // --- Integer Primitives (uint32x4_t) ---
    // 8 x u16 loaded then viewed as 4 x u32; aarch64 is little-endian.
    (neon, u32, load_packed, $p:expr) => {
        std::arch::aarch64::vreinterpretq_u32_u16(std::arch::aarch64::vld1q_u16($p))
    };
    (neon, u32, splat, $v:expr) => { std::arch::aarch64::vdupq_n_u32($v) };
    (neon, u32, shl, $a:expr, $shift:expr) => { std::arch::aarch64::vshlq_n_u32::<{ $shift }>($a) };
    (neon, u32, and, $a:expr, $b:expr) => { std::arch::aarch64::vandq_u32($a, $b) };
    (neon, u32, as_f32, $a:expr) => { std::arch::aarch64::vreinterpretq_f32_u32($a) };
}
