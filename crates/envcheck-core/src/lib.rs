//! # envcheck-core
//!
//! Parsing and validation engine for `.env` files.
//!
//! This crate provides:
//!
//! - [`parse`] for turning `.env` text into a [`ParsedFile`]
//! - [`validate_type`] and the built-in type registry
//! - [`compare`] for key-set comparison against an example file
//! - [`validate`] for required/empty/type policy checks on one file
//! - [`check`] for validation plus comparison with policy switches
//! - [`generate`] for rendering a new env file from an example
//!
//! ## Example
//!
//! ```no_run
//! use envcheck_core::{check, CheckOptions};
//!
//! let options = CheckOptions {
//!     example_path: Some(".env.example".into()),
//!     required: vec!["DATABASE_URL".into()],
//!     strict: true,
//!     ..CheckOptions::default()
//! };
//! let result = check(".env", &options)?;
//! for issue in &result.issues {
//!     println!("{issue}");
//! }
//! # Ok::<(), envcheck_core::EnvError>(())
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod check;
mod compare;
mod config;
mod diagnostic;
mod error;
mod generate;
mod merge;
mod parser;
mod reader;
mod secrets;
mod types;
mod validate;
mod validators;

pub use check::{check, check_files, CheckOptions, CheckResult};
pub use compare::{compare, compare_files, CompareResult, EmptyVar, ExtraVar, MissingVar};
pub use config::{CheckConfig, Config, ConfigError, MonorepoConfig};
pub use diagnostic::{line_span, IssueDiagnostic};
pub use error::EnvError;
pub use generate::{format_value, generate, render_template};
pub use merge::{layered_merge, TypeMap};
pub use parser::{parse, LineDiagnostic, ParsedFile};
pub use reader::{get, list, read_env_file, read_existing};
pub use secrets::scan_secrets;
pub use types::{has_errors, Issue, IssueKind, Severity, Summary};
pub use validate::{validate, validate_file, ValidateOptions, ValidateResult};
pub use validators::{
    canonical_type, is_known_type, is_string_type, known_types, validate_type, TypeCheck,
};
