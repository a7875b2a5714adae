//! # CPU Kernel Architecture
//!
//! Lane-vectorized kernels are generated per ISA from one template:
//!
//! ## Layer 1: `simd_primitive!` (src/macros/simd_primitive.rs)
//! Maps abstract ops to hardware intrinsics: `simd_primitive!(avx2, f32, add, a, b)`.
//! Covers portable/avx2/neon × f32 lanes and the packed 32-bit bf16 lanes.
//!
//! ## Layer 2: `define_dot_ops!` (src/macros/operator_templates.rs)
//! Kernel bodies parameterized by ISA: `dot_f32`, `dot_f32_unrolled`,
//! `dot_bf16_emulated`.
//!
//! ## Layer 3: `expand_isa_impls!` (src/macros/expand.rs)
//! Generates per-ISA modules: `expand_isa_impls!(avx2_dot, avx2, "avx2")`.
//!
//! ## Dispatch (this file)
//! Runtime ISA selection via `get_isa_level()`, cached in a `OnceLock`. The
//! `BFDOT_ISA` environment variable (`portable`, `avx2`, `neon`) forces a
//! level; an unknown or unavailable value is logged and ignored.
//!
//! | ISA | f32 lanes | bf16 elements per step |
//! |---|---|---|
//! | portable (`wide::f32x8`) | 8 | 16 |
//! | avx2 | 8 | 16 |
//! | neon | 4 | 8 |

use std::fmt;
use std::str::FromStr;
use std::sync::OnceLock;

use half::bf16;

use crate::error::{KernelError, KernelResult};

pub mod portable;
#[cfg(target_arch = "x86_64")]
pub mod avx2;
#[cfg(all(target_arch = "aarch64", target_feature = "neon"))]
pub mod neon;

#[cfg(test)]
pub(crate) mod test_support;

/// Environment variable that forces an ISA level.
pub const ISA_ENV: &str = "BFDOT_ISA";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum IsaLevel {
    /// `wide::f32x8`, available on every target.
    Portable,
    Avx2,
    Neon,
}

impl IsaLevel {
    pub const ALL: [IsaLevel; 3] = [IsaLevel::Portable, IsaLevel::Avx2, IsaLevel::Neon];

    pub fn name(&self) -> &'static str {
        match self {
            Self::Portable => "portable",
            Self::Avx2 => "avx2",
            Self::Neon => "neon",
        }
    }

    /// f32 lanes per vector register.
    pub fn lanes(&self) -> usize {
        match self {
            Self::Portable => crate::simd_primitive!(portable, f32, lanes),
            Self::Avx2 => crate::simd_primitive!(avx2, f32, lanes),
            Self::Neon => crate::simd_primitive!(neon, f32, lanes),
        }
    }

    /// Whether this machine can run the level's kernels.
    pub fn is_available(&self) -> bool {
        match self {
            Self::Portable => true,
            Self::Avx2 => avx2_detected(),
            Self::Neon => cfg!(all(target_arch = "aarch64", target_feature = "neon")),
        }
    }

    /// All levels this machine can run, portable first.
    pub fn available() -> Vec<IsaLevel> {
        Self::ALL.into_iter().filter(|isa| isa.is_available()).collect()
    }
}

impl fmt::Display for IsaLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for IsaLevel {
    type Err = KernelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let value = s.trim();
        Self::ALL
            .into_iter()
            .find(|isa| value.eq_ignore_ascii_case(isa.name()))
            .ok_or_else(|| KernelError::InvalidIsaOverride(value.to_string()))
    }
}

#[cfg(target_arch = "x86_64")]
fn avx2_detected() -> bool {
    is_x86_feature_detected!("avx2")
}

#[cfg(not(target_arch = "x86_64"))]
fn avx2_detected() -> bool {
    false
}

static ISA_LEVEL: OnceLock<IsaLevel> = OnceLock::new();

pub fn get_isa_level() -> IsaLevel {
    *ISA_LEVEL.get_or_init(select_isa_level)
}

fn detect_isa_features() -> IsaLevel {
    if IsaLevel::Avx2.is_available() {
        IsaLevel::Avx2
    } else if IsaLevel::Neon.is_available() {
        IsaLevel::Neon
    } else {
        IsaLevel::Portable
    }
}

fn select_isa_level() -> IsaLevel {
    let native = detect_isa_features();
    let isa = match std::env::var(ISA_ENV) {
        Ok(value) => match resolve_isa_override(&value) {
            Ok(isa) => isa,
            Err(err) => {
                log::warn!("ignoring {ISA_ENV}: {err}; using {native}");
                native
            }
        },
        Err(_) => native,
    };
    log::debug!("Detected ISA level: {isa} ({} f32 lanes)", isa.lanes());
    isa
}

/// Parse an ISA override and check that this machine supports it.
pub fn resolve_isa_override(value: &str) -> KernelResult<IsaLevel> {
    let isa: IsaLevel = value.parse()?;
    if !isa.is_available() {
        return Err(KernelError::UnsupportedIsa(isa.name()));
    }
    Ok(isa)
}

/// Route a call to the kernel module of the handle's ISA.
///
/// `CpuKernels` only ever holds a level whose `is_available()` was true, which
/// is the safety contract of the per-ISA `unsafe fn` kernels.
macro_rules! dispatch_dot {
    ($self:ident, $fn_name:ident, $a:expr, $b:expr) => {
        match $self.isa {
            #[cfg(target_arch = "x86_64")]
            IsaLevel::Avx2 => unsafe { avx2::avx2_dot::$fn_name($a, $b) },
            #[cfg(all(target_arch = "aarch64", target_feature = "neon"))]
            IsaLevel::Neon => unsafe { neon::neon_dot::$fn_name($a, $b) },
            _ => unsafe { portable::portable_dot::$fn_name($a, $b) },
        }
    };
}

/// Handle to the lane-vectorized kernels of one ISA level.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CpuKernels {
    isa: IsaLevel,
}

impl CpuKernels {
    /// Kernels for the detected (or overridden) ISA level.
    pub fn new() -> Self {
        Self { isa: get_isa_level() }
    }

    /// Kernels for a specific ISA level.
    pub fn with_isa(isa: IsaLevel) -> KernelResult<Self> {
        if !isa.is_available() {
            return Err(KernelError::UnsupportedIsa(isa.name()));
        }
        Ok(Self { isa })
    }

    pub fn portable() -> Self {
        Self { isa: IsaLevel::Portable }
    }

    pub fn isa(&self) -> IsaLevel {
        self.isa
    }

    pub fn lanes(&self) -> usize {
        self.isa.lanes()
    }

    /// Single-accumulator vectorized f32 dot product.
    #[inline]
    pub fn dot_f32(&self, a: &[f32], b: &[f32]) -> f32 {
        dispatch_dot!(self, dot_f32, a, b)
    }

    /// Four-accumulator vectorized f32 dot product.
    #[inline]
    pub fn dot_f32_unrolled(&self, a: &[f32], b: &[f32]) -> f32 {
        dispatch_dot!(self, dot_f32_unrolled, a, b)
    }

    /// bf16 dot product via packed-lane shift/mask decode.
    #[inline]
    pub fn dot_bf16_emulated(&self, a: &[bf16], b: &[bf16]) -> f32 {
        dispatch_dot!(self, dot_bf16_emulated, a, b)
    }
}

impl Default for CpuKernels {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_isa_names() {
        assert_eq!("portable".parse::<IsaLevel>(), Ok(IsaLevel::Portable));
        assert_eq!(" AVX2 ".parse::<IsaLevel>(), Ok(IsaLevel::Avx2));
        assert_eq!("Neon".parse::<IsaLevel>(), Ok(IsaLevel::Neon));
        assert_eq!(
            "sse9".parse::<IsaLevel>(),
            Err(KernelError::InvalidIsaOverride("sse9".to_string()))
        );
    }

    #[test]
    fn test_portable_always_available() {
        assert!(IsaLevel::Portable.is_available());
        assert_eq!(resolve_isa_override("portable"), Ok(IsaLevel::Portable));
        assert_eq!(CpuKernels::with_isa(IsaLevel::Portable), Ok(CpuKernels::portable()));
        assert!(IsaLevel::available().contains(&IsaLevel::Portable));
    }

    #[test]
    fn test_unavailable_isa_is_rejected() {
        for isa in IsaLevel::ALL {
            if isa.is_available() {
                assert_eq!(CpuKernels::with_isa(isa).map(|k| k.isa()), Ok(isa));
            } else {
                assert_eq!(CpuKernels::with_isa(isa), Err(KernelError::UnsupportedIsa(isa.name())));
                assert_eq!(resolve_isa_override(isa.name()), Err(KernelError::UnsupportedIsa(isa.name())));
            }
        }
    }

    #[test]
    fn test_detected_level_is_available() {
        let isa = get_isa_level();
        println!("Detected ISA Level: {isa:?}");
        assert!(isa.is_available());
        assert_eq!(CpuKernels::new().lanes(), isa.lanes());
    }

    #[test]
    fn test_lane_widths() {
        assert_eq!(IsaLevel::Portable.lanes(), 8);
        assert_eq!(IsaLevel::Avx2.lanes(), 8);
        assert_eq!(IsaLevel::Neon.lanes(), 4);
    }
}
