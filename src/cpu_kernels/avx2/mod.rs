// Expand AVX2 dot-product kernels (f32 and packed-lane bf16 emulation)
#[cfg(target_arch = "x86_64")]
crate::expand_isa_impls!(avx2_dot, avx2, "avx2");

#[cfg(test)]
mod tests;
