//! # envcheck-monorepo
//!
//! Monorepo support for envcheck.
//!
//! Discovers app directories (by default `apps/*` and `packages/*`), checks
//! each app's `.env` against its example file, and cross-checks variables
//! that several apps declare.
//!
//! ## Usage
//!
//! ```no_run
//! use envcheck_monorepo::{scan_monorepo, MonorepoOptions};
//!
//! let result = scan_monorepo(".", &MonorepoOptions::default())?;
//! println!("{} of {} apps passed", result.summary.passed, result.summary.total);
//! # Ok::<(), envcheck_monorepo::ScanError>(())
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod consistency;
mod discovery;
mod scanner;

use std::path::PathBuf;

pub use consistency::{check_consistency, AppDeclaration, Consistency, Mismatch};
pub use discovery::{discover_apps, find_example, AppDir, ENV_FILE, EXAMPLE_FILES};
pub use scanner::{scan_monorepo, AppResult, MonorepoOptions, MonorepoScanResult, ScanSummary};

/// Errors that can occur during a monorepo scan.
#[derive(Debug, thiserror::Error)]
pub enum ScanError {
    /// The scan root is not a directory.
    #[error("Monorepo root not found: {}", path.display())]
    RootNotFound {
        /// Path that was given as root.
        path: PathBuf,
    },

    /// A container pattern is not a valid glob.
    #[error("Invalid glob pattern: {0}")]
    Pattern(#[from] glob::PatternError),

    /// A matched path could not be read.
    #[error("Glob error: {0}")]
    Glob(#[from] glob::GlobError),

    /// The worker pool could not be built.
    #[error("Failed to build worker pool: {0}")]
    ThreadPool(#[from] rayon::ThreadPoolBuildError),
}
