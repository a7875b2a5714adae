// Expand portable (wide::f32x8) dot-product kernels; no target feature needed.
crate::expand_isa_impls!(portable_dot, portable);
