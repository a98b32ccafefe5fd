//! Error types for the replay engine.
//!
//! Clean error handling using `thiserror` for ergonomic error definitions.
//! The engine itself is best-effort and swallows per-event malformations
//! (see the diagnostics module); these errors cover the fatal paths only:
//! input discovery, input load, and output sink failure.

use std::path::PathBuf;

use thiserror::Error;

/// Result type alias for replay operations.
pub type Result<T> = std::result::Result<T, ReplayError>;

/// Main error type for replay operations.
#[derive(Error, Debug)]
pub enum ReplayError {
    /// Input file could not be located.
    #[error("input file not found: {}", .0.display())]
    InputNotFound(PathBuf),

    /// Input loaded but produced no usable records.
    #[error("no records loaded from {}", .0.display())]
    EmptyInput(PathBuf),

    /// CSV layer failure (unreadable file, broken encoding).
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// Underlying I/O failure (output sink writes are fatal).
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Generic error with context.
    #[error("{0}")]
    Generic(String),
}

impl ReplayError {
    /// Create a generic error from any string-like type.
    pub fn generic(msg: impl Into<String>) -> Self {
        ReplayError::Generic(msg.into())
    }
}
