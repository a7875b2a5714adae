//! Error types shared by setup, dispatch and verification.

use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq)]
pub enum KernelError {
    #[error("operand length mismatch: left has {left} elements, right has {right}")]
    LengthMismatch { left: usize, right: usize },
    #[error(
        "kernel {kernel} failed verification at length {length}: expected {expected}, got {actual} (relative error {relative_error})"
    )]
    VerificationFailed {
        kernel: &'static str,
        length: usize,
        expected: f32,
        actual: f32,
        relative_error: f32,
    },
    #[error("ISA {0} is not available on this CPU")]
    UnsupportedIsa(&'static str),
    #[error("invalid ISA override: {0}")]
    InvalidIsaOverride(String),
    #[error("invalid config: {0}")]
    InvalidConfig(String),
}

pub type KernelResult<T> = Result<T, KernelError>;
