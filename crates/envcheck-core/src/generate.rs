//! Generates env file content from an example file.

use crate::error::EnvError;
use crate::parser::resolve_value;

use std::collections::BTreeMap;
use std::path::Path;
use tracing::debug;

/// Renders a new env file from an example on disk.
///
/// Comments and blank lines are kept. Every assignment is written as
/// `KEY=value`, taking the value from `defaults` when present and from the
/// example otherwise.
///
/// # Errors
///
/// Returns [`EnvError::FileNotFound`] if the example does not exist, or
/// [`EnvError::Io`] if it cannot be read.
pub fn generate(
    example_path: impl AsRef<Path>,
    defaults: &BTreeMap<String, String>,
) -> Result<String, EnvError> {
    let path = example_path.as_ref();
    let content = std::fs::read_to_string(path).map_err(|source| {
        if source.kind() == std::io::ErrorKind::NotFound {
            EnvError::FileNotFound {
                path: path.to_path_buf(),
            }
        } else {
            EnvError::Io {
                path: path.to_path_buf(),
                source,
            }
        }
    })?;
    debug!(
        "Generating from {} with {} override(s)",
        path.display(),
        defaults.len()
    );
    Ok(render_template(&content, defaults))
}

/// Renders a new env file from example text.
#[must_use]
pub fn render_template(content: &str, defaults: &BTreeMap<String, String>) -> String {
    let body = content.strip_suffix('\n').unwrap_or(content);
    if body.is_empty() {
        return String::new();
    }

    let mut out = String::with_capacity(content.len());
    for raw in body.split('\n') {
        let line = raw.strip_suffix('\r').unwrap_or(raw);
        let trimmed = line.trim();

        let assignment = if trimmed.is_empty() || trimmed.starts_with('#') {
            None
        } else {
            line.split_once('=')
                .map(|(key, value)| (key.trim(), value))
                .filter(|(key, _)| !key.is_empty())
        };

        match assignment {
            Some((key, raw_value)) => {
                let value = defaults
                    .get(key)
                    .cloned()
                    .unwrap_or_else(|| resolve_value(raw_value));
                out.push_str(key);
                out.push('=');
                out.push_str(&format_value(&value));
            }
            None => out.push_str(line),
        }
        out.push('\n');
    }
    out
}

/// Formats a value for an env file, double-quoting it when needed.
///
/// Parsing the result yields the value back, except when the value holds a
/// literal backslash directly followed by `n`, `r` or `t` and also needs
/// quoting: the parser decodes `\n`, `\r` and `\t` before `\\`, so the
/// escaped backslash is read as the start of a control escape.
#[must_use]
pub fn format_value(value: &str) -> String {
    let needs_quotes = value
        .chars()
        .any(|c| c.is_whitespace() || c.is_control() || matches!(c, '#' | '"' | '\''));
    if !needs_quotes {
        return value.to_string();
    }

    let mut quoted = String::with_capacity(value.len() + 2);
    quoted.push('"');
    for c in value.chars() {
        match c {
            '\\' => quoted.push_str("\\\\"),
            '"' => quoted.push_str("\\\""),
            '\n' => quoted.push_str("\\n"),
            '\r' => quoted.push_str("\\r"),
            '\t' => quoted.push_str("\\t"),
            other => quoted.push(other),
        }
    }
    quoted.push('"');
    quoted
}
