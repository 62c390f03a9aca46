//! Detection of real credentials committed to example files.

use crate::parser::ParsedFile;
use crate::types::{Issue, IssueKind};

use regex::Regex;
use std::sync::LazyLock;

#[allow(clippy::expect_used)]
static PATTERNS: LazyLock<Vec<(Regex, &'static str)>> = LazyLock::new(|| {
    [
        (r"^AKIA[0-9A-Z]{16}$", "an AWS access key id"),
        (r"-----BEGIN [A-Z ]*PRIVATE KEY-----", "a private key"),
        (r"^gh[pousr]_[A-Za-z0-9]{36,}$", "a GitHub token"),
        (r"^xox[abprs]-[A-Za-z0-9-]{10,}$", "a Slack token"),
        (r"^[sr]k_live_[A-Za-z0-9]{16,}$", "a Stripe live key"),
    ]
    .into_iter()
    .map(|(pattern, what)| (Regex::new(pattern).expect("secret pattern is valid"), what))
    .collect()
});

/// Name fragments that mark a variable as holding a credential.
const SECRET_NAMES: &[&str] = &[
    "SECRET",
    "TOKEN",
    "PASSWORD",
    "PASSWD",
    "API_KEY",
    "APIKEY",
    "PRIVATE_KEY",
    "ACCESS_KEY",
];

/// Value fragments that mark a value as a placeholder.
const PLACEHOLDERS: &[&str] = &[
    "your", "example", "changeme", "change_me", "change-me", "placeholder", "xxx", "todo",
    "dummy", "sample", "replace", "<", "...",
];

/// Minimum length for an opaque value under a secret-sounding name.
const MIN_OPAQUE_LEN: usize = 20;

/// Scans a file for values that look like real credentials.
///
/// Each hit is a warning. At most one issue is produced per variable.
#[must_use]
pub fn scan_secrets(file: &ParsedFile) -> Vec<Issue> {
    file.iter()
        .filter_map(|(key, value)| {
            let what = classify(key, value)?;
            Some(
                Issue::warning(
                    IssueKind::PossibleSecret,
                    format!(
                        "Variable '{key}' looks like {what}; example files should only hold placeholders"
                    ),
                )
                .with_line_opt(file.line_of(key))
                .with_key(key),
            )
        })
        .collect()
}

fn classify(key: &str, value: &str) -> Option<&'static str> {
    if value.is_empty() || is_placeholder(value) {
        return None;
    }
    if let Some((_, what)) = PATTERNS.iter().find(|(re, _)| re.is_match(value)) {
        return Some(*what);
    }
    let upper = key.to_uppercase();
    let secret_name = SECRET_NAMES.iter().any(|n| upper.contains(n));
    (secret_name && is_opaque(value)).then_some("a real secret value")
}

fn is_placeholder(value: &str) -> bool {
    let lower = value.to_lowercase();
    PLACEHOLDERS.iter().any(|p| lower.contains(p))
}

/// Long, whitespace-free, and mixing letters with digits.
fn is_opaque(value: &str) -> bool {
    value.len() >= MIN_OPAQUE_LEN
        && !value.chars().any(char::is_whitespace)
        && value.chars().any(|c| c.is_ascii_alphabetic())
        && value.chars().any(|c| c.is_ascii_digit())
}
