//! Error taxonomy
//!
//! Failure handling is concentrated in level loading and configuration.
//! Per-step physics is total and never returns these.

use std::path::PathBuf;

use thiserror::Error;

/// A single level record that could not be parsed. Recovered by skipping the line.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum LevelLoadError {
    #[error("line {line}: expected {expected} fields for {kind}, found {found}")]
    FieldCount {
        line: usize,
        kind: &'static str,
        expected: usize,
        found: usize,
    },

    #[error("line {line}: field {field} is not a number: {value:?}")]
    BadNumber {
        line: usize,
        field: usize,
        value: String,
    },

    #[error("line {line}: unknown record kind {kind:?}")]
    UnknownKind { line: usize, kind: String },

    #[error("line {line}: size must be positive")]
    NonPositiveSize { line: usize },
}

/// Two static blocks interpenetrate, making resolution order load-bearing
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("static blocks {first} and {second} overlap")]
pub struct InvalidGeometryError {
    /// Registry index of the earlier block
    pub first: usize,
    /// Registry index of the later block
    pub second: usize,
}

/// A simulation invariant was broken. Indicates a defect, not a recoverable condition.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SimulationInvariantViolation {
    #[error("gravity sign must be -1 or +1, got {0}")]
    GravitySign(i32),
}

/// Errors loading a level from disk
#[derive(Debug, Error)]
pub enum LevelFileError {
    #[error("failed to read level {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Errors loading tuning overrides
#[derive(Debug, Error)]
pub enum TuningError {
    #[error("failed to read tuning file: {0}")]
    Io(#[from] std::io::Error),

    #[error("invalid tuning json: {0}")]
    Parse(#[from] serde_json::Error),
}
