//! Cross-kernel correctness verification.
//!
//! For every configured length the scalar f32 kernel provides ground truth and
//! each candidate kernel must land within the configured relative tolerance.
//! The first violation aborts the run.

use crate::config::VerifierConfig;
use crate::cpu_kernels::CpuKernels;
use crate::error::KernelResult;
use crate::types::{DotState, KernelVariant, Precision};
use crate::validation::check_tolerance;

/// One successful check.
#[derive(Debug, Clone, PartialEq)]
pub struct CheckRecord {
    pub kernel: KernelVariant,
    pub precision: Precision,
    pub length: usize,
    pub expected: f32,
    pub actual: f32,
    pub relative_error: f32,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct VerificationReport {
    pub records: Vec<CheckRecord>,
}

impl VerificationReport {
    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Largest relative error seen, 0 for an empty report.
    pub fn max_relative_error(&self) -> f32 {
        self.records.iter().map(|r| r.relative_error).fold(0.0, f32::max)
    }

    pub fn records_for(&self, kernel: KernelVariant) -> impl Iterator<Item = &CheckRecord> {
        self.records.iter().filter(move |r| r.kernel == kernel)
    }
}

pub fn verify(kernels: &CpuKernels, config: &VerifierConfig) -> KernelResult<VerificationReport> {
    let mut report = VerificationReport::default();
    for &length in &config.lengths {
        let state = DotState::new(length);
        let expected = KernelVariant::ScalarF32.eval(kernels, &state);
        for kernel in KernelVariant::CANDIDATES {
            let actual = kernel.eval(kernels, &state);
            let relative_error =
                check_tolerance(kernel.name(), length, expected, actual, config.tolerance)?;
            log::debug!(
                "{kernel} [{}] n={length}: expected={expected} actual={actual} rel_err={relative_error:e}",
                kernels.isa()
            );
            report.records.push(CheckRecord {
                kernel,
                precision: kernel.precision(),
                length,
                expected,
                actual,
                relative_error,
            });
        }
    }
    log::info!(
        "verified {} kernels on {} at lengths {:?}",
        KernelVariant::CANDIDATES.len(),
        kernels.isa(),
        config.lengths
    );
    Ok(report)
}

/// Verify the detected ISA with the default lengths (384, 1024) and tolerance,
/// overridden by `BFDOT_LENGTHS` / `BFDOT_TOLERANCE` when set.
pub fn sanity_check() -> KernelResult<VerificationReport> {
    let config = VerifierConfig::from_env()?;
    verify(&CpuKernels::new(), &config)
}
