//! Core types for issues and check summaries.

use serde::{Deserialize, Serialize};

/// Severity level for issues.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    /// Anomaly that should be addressed but does not fail a check.
    Warning,
    /// Problem that must be fixed before deploying.
    Error,
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Warning => write!(f, "warning"),
            Self::Error => write!(f, "error"),
        }
    }
}

/// The rule that produced an issue.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum IssueKind {
    /// The file being validated does not exist.
    FileNotFound,
    /// A file exists but could not be read.
    ReadError,
    /// A line could not be parsed as an assignment.
    ParseError,
    /// A recoverable anomaly reported by the parser.
    ParseWarning,
    /// A required variable is absent.
    MissingRequired,
    /// A required variable is present with an empty value.
    EmptyRequired,
    /// A variable is empty while empty values are disallowed.
    EmptyValue,
    /// A value does not satisfy its declared type.
    TypeMismatch,
    /// A variable defined in the example is absent from the env file.
    Missing,
    /// A variable shared with the example has an empty value.
    Empty,
    /// A variable is not defined in the example.
    Extra,
    /// An example value looks like a committed credential.
    PossibleSecret,
}

impl IssueKind {
    /// Returns the kebab-case name of this kind (e.g., "missing-required").
    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Self::FileNotFound => "file-not-found",
            Self::ReadError => "read-error",
            Self::ParseError => "parse-error",
            Self::ParseWarning => "parse-warning",
            Self::MissingRequired => "missing-required",
            Self::EmptyRequired => "empty-required",
            Self::EmptyValue => "empty-value",
            Self::TypeMismatch => "type-mismatch",
            Self::Missing => "missing",
            Self::Empty => "empty",
            Self::Extra => "extra",
            Self::PossibleSecret => "possible-secret",
        }
    }
}

impl std::fmt::Display for IssueKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// A problem found while validating an env file.
///
/// Severity is fixed by the rule that creates the issue. The only
/// transition afterwards is [`Issue::promote`], which turns a warning
/// into an error.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Issue {
    /// Severity of this issue.
    #[serde(rename = "type")]
    pub severity: Severity,
    /// Rule that produced the issue.
    #[serde(rename = "rule")]
    pub kind: IssueKind,
    /// Human-readable message.
    pub message: String,
    /// 1-based source line, when the issue points at one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub line: Option<usize>,
    /// Variable the issue is about, if any.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub key: Option<String>,
}

impl Issue {
    /// Creates a new issue.
    #[must_use]
    pub fn new(kind: IssueKind, severity: Severity, message: impl Into<String>) -> Self {
        Self {
            severity,
            kind,
            message: message.into(),
            line: None,
            key: None,
        }
    }

    /// Creates an error-severity issue.
    #[must_use]
    pub fn error(kind: IssueKind, message: impl Into<String>) -> Self {
        Self::new(kind, Severity::Error, message)
    }

    /// Creates a warning-severity issue.
    #[must_use]
    pub fn warning(kind: IssueKind, message: impl Into<String>) -> Self {
        Self::new(kind, Severity::Warning, message)
    }

    /// Attaches a source line.
    #[must_use]
    pub fn with_line(mut self, line: usize) -> Self {
        self.line = Some(line);
        self
    }

    /// Attaches a source line if one is known.
    #[must_use]
    pub fn with_line_opt(mut self, line: Option<usize>) -> Self {
        self.line = line;
        self
    }

    /// Attaches the affected variable name.
    #[must_use]
    pub fn with_key(mut self, key: impl Into<String>) -> Self {
        self.key = Some(key.into());
        self
    }

    /// Promotes a warning to an error. Errors are left unchanged.
    #[must_use]
    pub fn promote(mut self) -> Self {
        self.severity = Severity::Error;
        self
    }

    /// Returns true if this issue is an error.
    #[must_use]
    pub fn is_error(&self) -> bool {
        self.severity == Severity::Error
    }
}

impl std::fmt::Display for Issue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.line {
            Some(line) => write!(
                f,
                "{line}: {} [{}] {}",
                self.severity, self.kind, self.message
            ),
            None => write!(f, "{} [{}] {}", self.severity, self.kind, self.message),
        }
    }
}

/// Issue counts by severity.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Summary {
    /// Number of error-severity issues.
    pub errors: usize,
    /// Number of warning-severity issues.
    pub warnings: usize,
}

impl Summary {
    /// Tallies the given issues.
    #[must_use]
    pub fn from_issues(issues: &[Issue]) -> Self {
        let errors = issues.iter().filter(|i| i.is_error()).count();
        Self {
            errors,
            warnings: issues.len() - errors,
        }
    }

    /// Returns true if no errors were counted.
    #[must_use]
    pub fn is_clean(&self) -> bool {
        self.errors == 0
    }
}

/// Returns true if any issue is an error.
#[must_use]
pub fn has_errors(issues: &[Issue]) -> bool {
    issues.iter().any(Issue::is_error)
}
