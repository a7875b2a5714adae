// Expand NEON dot-product kernels (4 f32 lanes, 8 bf16 per step)
#[cfg(all(target_arch = "aarch64", target_feature = "neon"))]
crate::expand_isa_impls!(neon_dot, neon, "neon");
