//! Key-set comparison between an env file and its example.

use crate::error::EnvError;
use crate::parser::ParsedFile;
use crate::reader::read_env_file;

use serde::Serialize;
use std::path::Path;

/// A variable defined in the example but absent from the env file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MissingVar {
    /// Variable name.
    pub key: String,
    /// Value in the example file.
    pub example_value: String,
    /// Line in the example file.
    pub line: usize,
}

/// A variable defined in the env file but absent from the example.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ExtraVar {
    /// Variable name.
    pub key: String,
    /// Value in the env file.
    pub value: String,
    /// Line in the env file.
    pub line: usize,
}

/// A variable in both files whose env value is empty.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EmptyVar {
    /// Variable name.
    pub key: String,
    /// Line in the env file.
    pub line: usize,
}

/// Result of comparing an env file with its example.
#[derive(Debug, Clone, Serialize)]
pub struct CompareResult {
    /// The env file.
    pub env: ParsedFile,
    /// The example file.
    pub example: ParsedFile,
    /// Keys in the example but not in the env file, in example order.
    pub missing: Vec<MissingVar>,
    /// Keys in the env file but not in the example, in env order.
    pub extra: Vec<ExtraVar>,
    /// Keys in both with an empty env value, in env order.
    pub empty: Vec<EmptyVar>,
}

impl CompareResult {
    /// Returns true if both files existed, so the lists are meaningful.
    #[must_use]
    pub fn is_comparable(&self) -> bool {
        self.env.exists && self.example.exists
    }

    /// Number of keys present in both files.
    #[must_use]
    pub fn shared_count(&self) -> usize {
        self.env
            .variables
            .keys()
            .filter(|k| self.example.contains(k))
            .count()
    }
}

/// Compares two parsed files by key-set arithmetic.
///
/// If either file does not exist all three lists are empty. Callers should
/// use [`CompareResult::is_comparable`] to tell that apart from a match.
#[must_use]
pub fn compare_files(env: ParsedFile, example: ParsedFile) -> CompareResult {
    let mut result = CompareResult {
        env,
        example,
        missing: Vec::new(),
        extra: Vec::new(),
        empty: Vec::new(),
    };
    if !result.is_comparable() {
        return result;
    }

    let (env, example) = (&result.env, &result.example);

    result.missing = example
        .iter()
        .filter(|(key, _)| !env.contains(key))
        .map(|(key, value)| MissingVar {
            key: key.to_string(),
            example_value: value.to_string(),
            line: example.line_of(key).unwrap_or_default(),
        })
        .collect();

    result.extra = env
        .iter()
        .filter(|(key, _)| !example.contains(key))
        .map(|(key, value)| ExtraVar {
            key: key.to_string(),
            value: value.to_string(),
            line: env.line_of(key).unwrap_or_default(),
        })
        .collect();

    result.empty = env
        .iter()
        .filter(|(key, value)| value.is_empty() && example.contains(key))
        .map(|(key, _)| EmptyVar {
            key: key.to_string(),
            line: env.line_of(key).unwrap_or_default(),
        })
        .collect();

    result
}

/// Reads and compares two files.
///
/// # Errors
///
/// Returns an error only if a file exists but cannot be read. Absent files
/// yield empty lists.
pub fn compare(
    env_path: impl AsRef<Path>,
    example_path: impl AsRef<Path>,
) -> Result<CompareResult, EnvError> {
    let env = read_env_file(env_path)?;
    let example = read_env_file(example_path)?;
    Ok(compare_files(env, example))
}
