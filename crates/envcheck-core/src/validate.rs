//! Single-file validation: required keys, empty values and declared types.

use crate::error::EnvError;
use crate::merge::{layered_merge, TypeMap};
use crate::parser::ParsedFile;
use crate::reader::read_existing;
use crate::types::{has_errors, Issue, IssueKind};
use crate::validators::{validate_type, TypeCheck};

use serde::Serialize;
use std::path::Path;
use tracing::{debug, info};

/// Options for [`validate`] and [`validate_file`].
#[derive(Debug, Clone, Default)]
pub struct ValidateOptions {
    /// Keys that must be present and non-empty.
    pub required: Vec<String>,
    /// Warn on empty values of non-required keys.
    pub no_empty: bool,
    /// Explicit types. These override the file's own type hints.
    pub types: TypeMap,
    /// Run type validation.
    pub validate_types: bool,
}

/// Result of validating one file.
#[derive(Debug, Clone, Serialize)]
pub struct ValidateResult {
    /// False iff any issue is an error.
    pub valid: bool,
    /// Issues in check order.
    pub issues: Vec<Issue>,
}

impl ValidateResult {
    fn from_issues(issues: Vec<Issue>) -> Self {
        Self {
            valid: !has_errors(&issues),
            issues,
        }
    }
}

/// Validates a parsed file.
///
/// Checks run in a fixed order: file existence, parse errors, required
/// keys, empty values, types, then parser warnings.
#[must_use]
pub fn validate_file(file: &ParsedFile, options: &ValidateOptions) -> ValidateResult {
    if !file.exists {
        let path = file
            .path
            .as_deref()
            .map(|p| p.display().to_string())
            .unwrap_or_default();
        return ValidateResult::from_issues(vec![Issue::error(
            IssueKind::FileNotFound,
            format!("File not found: {path}"),
        )]);
    }

    let mut issues = Vec::new();

    for error in &file.errors {
        let message = if error.content.is_empty() {
            error.message.clone()
        } else {
            format!("{}: {}", error.message, error.content)
        };
        issues.push(Issue::error(IssueKind::ParseError, message).with_line(error.line));
    }

    for key in &options.required {
        match file.get(key) {
            None => issues.push(
                Issue::error(
                    IssueKind::MissingRequired,
                    format!("Missing required variable '{key}'"),
                )
                .with_key(key),
            ),
            Some("") => issues.push(
                Issue::error(
                    IssueKind::EmptyRequired,
                    format!("Required variable '{key}' is empty"),
                )
                .with_line_opt(file.line_of(key))
                .with_key(key),
            ),
            Some(_) => {}
        }
    }

    if options.no_empty {
        for (key, value) in file.iter() {
            if value.is_empty() && !options.required.iter().any(|r| r == key) {
                issues.push(
                    Issue::warning(IssueKind::EmptyValue, format!("Variable '{key}' is empty"))
                        .with_line_opt(file.line_of(key))
                        .with_key(key),
                );
            }
        }
    }

    if options.validate_types {
        let types = layered_merge([&file.type_hints, &options.types]);
        debug!("Validating {} typed variable(s)", types.len());
        issues.extend(type_issues(file, &types));
    }

    for warning in &file.warnings {
        issues.push(
            Issue::warning(IssueKind::ParseWarning, warning.message.clone())
                .with_line(warning.line),
        );
    }

    ValidateResult::from_issues(issues)
}

fn type_issues(file: &ParsedFile, types: &TypeMap) -> Vec<Issue> {
    let mut issues = Vec::new();
    for (key, value) in file.iter() {
        let Some(type_name) = types.get(key) else {
            continue;
        };
        if value.is_empty() {
            continue;
        }
        match validate_type(value, type_name) {
            TypeCheck::Valid => {}
            TypeCheck::Invalid { message } => issues.push(
                Issue::error(
                    IssueKind::TypeMismatch,
                    format!("Variable '{key}' {message} (got: {value})"),
                )
                .with_line_opt(file.line_of(key))
                .with_key(key),
            ),
            TypeCheck::UnknownType { type_name } => {
                info!("Unknown type '{type_name}' for '{key}', skipping validation");
            }
        }
    }
    issues
}

/// Reads and validates one file.
///
/// # Errors
///
/// Returns [`EnvError::FileNotFound`] if the file is absent, or
/// [`EnvError::Io`] if it cannot be read.
pub fn validate(
    path: impl AsRef<Path>,
    options: &ValidateOptions,
) -> Result<ValidateResult, EnvError> {
    let file = read_existing(path)?;
    Ok(validate_file(&file, options))
}
