//! Verifier configuration.

use std::env;

use crate::error::{KernelError, KernelResult};
use crate::validation::DEFAULT_TOLERANCE;

/// Comma-separated vector lengths to verify, e.g. `384,1024`.
pub const LENGTHS_ENV: &str = "BFDOT_LENGTHS";
/// Relative-error tolerance, e.g. `0.01`.
pub const TOLERANCE_ENV: &str = "BFDOT_TOLERANCE";

/// Lengths checked by default.
pub const DEFAULT_LENGTHS: [usize; 2] = [384, 1024];

#[derive(Debug, Clone, PartialEq)]
pub struct VerifierConfig {
    pub lengths: Vec<usize>,
    pub tolerance: f32,
}

impl Default for VerifierConfig {
    fn default() -> Self {
        Self { lengths: DEFAULT_LENGTHS.to_vec(), tolerance: DEFAULT_TOLERANCE }
    }
}

impl VerifierConfig {
    /// Defaults overridden by `BFDOT_LENGTHS` and `BFDOT_TOLERANCE`.
    pub fn from_env() -> KernelResult<Self> {
        let lengths = env::var(LENGTHS_ENV).ok();
        let tolerance = env::var(TOLERANCE_ENV).ok();
        Self::from_overrides(lengths.as_deref(), tolerance.as_deref())
    }

    /// Defaults overridden by whichever raw values are present.
    pub fn from_overrides(lengths: Option<&str>, tolerance: Option<&str>) -> KernelResult<Self> {
        let mut config = Self::default();
        if let Some(value) = lengths {
            config.lengths = parse_lengths(value)?;
        }
        if let Some(value) = tolerance {
            config.tolerance = parse_tolerance(value)?;
        }
        Ok(config)
    }
}

pub fn parse_lengths(value: &str) -> KernelResult<Vec<usize>> {
    let lengths = value
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(|s| {
            s.parse::<usize>()
                .map_err(|_| KernelError::InvalidConfig(format!("{LENGTHS_ENV}: bad length {s:?}")))
        })
        .collect::<KernelResult<Vec<_>>>()?;
    if lengths.is_empty() {
        return Err(KernelError::InvalidConfig(format!("{LENGTHS_ENV}: no lengths given")));
    }
    Ok(lengths)
}

pub fn parse_tolerance(value: &str) -> KernelResult<f32> {
    let value = value.trim();
    match value.parse::<f32>() {
        Ok(t) if t.is_finite() && t > 0.0 => Ok(t),
        _ => Err(KernelError::InvalidConfig(format!(
            "{TOLERANCE_ENV}: expected a positive number, got {value:?}"
        ))),
    }
}
