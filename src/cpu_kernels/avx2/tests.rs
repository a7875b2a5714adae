#[cfg(test)]
#[cfg(target_arch = "x86_64")]
mod tests {
    use std::arch::x86_64::{__m256i, _mm256_storeu_si256};

    use crate::cpu_kernels::avx2::avx2_dot;
    use crate::cpu_kernels::test_support::{
        check_bf16_kernel, check_f32_kernel, counting_bf16, expected_packed_lane,
    };
    use crate::cpu_kernels::{get_isa_level, CpuKernels, IsaLevel};

    #[test]
    fn test_avx2_dot_f32() {
        if !is_x86_feature_detected!("avx2") {
            println!("Skipping AVX2 test: AVX2 not supported");
            return;
        }
        check_f32_kernel("avx2 dot_f32", avx2_dot::LANES, |a, b| unsafe { avx2_dot::dot_f32(a, b) });
    }

    #[test]
    fn test_avx2_dot_f32_unrolled() {
        if !is_x86_feature_detected!("avx2") {
            println!("Skipping AVX2 test: AVX2 not supported");
            return;
        }
        check_f32_kernel("avx2 dot_f32_unrolled", avx2_dot::LANES, |a, b| unsafe {
            avx2_dot::dot_f32_unrolled(a, b)
        });
    }

    #[test]
    fn test_avx2_dot_bf16_emulated() {
        if !is_x86_feature_detected!("avx2") {
            println!("Skipping AVX2 test: AVX2 not supported");
            return;
        }
        check_bf16_kernel("avx2 dot_bf16_emulated", avx2_dot::LANES, |a, b| unsafe {
            avx2_dot::dot_bf16_emulated(a, b)
        });
    }

    #[test]
    fn test_avx2_packed_load() {
        if !is_x86_feature_detected!("avx2") {
            println!("Skipping AVX2 packing test");
            return;
        }
        let src = counting_bf16(16);
        let mut lanes = [0u32; 8];
        unsafe {
            let packed = crate::simd_primitive!(avx2, u32, load_packed, src.as_ptr() as *const u16);
            _mm256_storeu_si256(lanes.as_mut_ptr() as *mut __m256i, packed);
        }
        for (k, lane) in lanes.iter().enumerate() {
            assert_eq!(*lane, expected_packed_lane(k), "lane {k}");
        }
    }

    #[test]
    fn test_avx2_matches_portable() {
        if !is_x86_feature_detected!("avx2") {
            println!("Skipping AVX2 comparison test");
            return;
        }
        let avx2 = CpuKernels::with_isa(IsaLevel::Avx2).unwrap();
        let portable = CpuKernels::portable();
        let state = crate::types::DotState::new(1024);
        let (a, b) = (state.full.a(), state.full.b());
        let (a16, b16) = (state.reduced.a(), state.reduced.b());

        // Same lane width and summation order, so the results agree bit for bit.
        assert_eq!(avx2.dot_f32(a, b).to_bits(), portable.dot_f32(a, b).to_bits());
        assert_eq!(
            avx2.dot_f32_unrolled(a, b).to_bits(),
            portable.dot_f32_unrolled(a, b).to_bits()
        );
        assert_eq!(
            avx2.dot_bf16_emulated(a16, b16).to_bits(),
            portable.dot_bf16_emulated(a16, b16).to_bits()
        );
    }

    #[test]
    fn test_avx2_dispatch() {
        if get_isa_level() != IsaLevel::Avx2 {
            println!("Skipping AVX2 dispatch test: current level {:?}", get_isa_level());
            return;
        }
        let kernels = CpuKernels::new();
        assert_eq!(kernels.isa(), IsaLevel::Avx2);
        let a = vec![1.0f32; 20];
        let b = vec![2.0f32; 20];
        assert_eq!(kernels.dot_f32(&a, &b), 40.0);
        assert_eq!(kernels.dot_f32_unrolled(&a, &b), 40.0);
    }
}
