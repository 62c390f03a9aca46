//! Errors for whole-operation failures.
//!
//! Per-line and per-variable problems are never errors; they are collected
//! as [`crate::Issue`] records instead.

use std::path::PathBuf;
use thiserror::Error;

/// Errors that abort a single operation.
#[derive(Debug, Error)]
pub enum EnvError {
    /// The file an operation depends on does not exist.
    #[error("File not found: {}", path.display())]
    FileNotFound {
        /// Path that was looked up.
        path: PathBuf,
    },

    /// IO error reading a file that does exist.
    #[error("Failed to read {}: {source}", path.display())]
    Io {
        /// Path that failed to read.
        path: PathBuf,
        /// Underlying IO error.
        source: std::io::Error,
    },
}
