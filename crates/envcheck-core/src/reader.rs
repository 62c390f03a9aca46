//! File reader: the I/O boundary in front of the parser.

use crate::error::EnvError;
use crate::parser::{parse, ParsedFile};

use std::io::ErrorKind;
use std::path::Path;
use tracing::debug;

/// Reads and parses an env file.
///
/// An absent file is not an error here: the result has `exists == false`,
/// no variables and one synthetic parse error.
///
/// # Errors
///
/// Returns [`EnvError::Io`] if the file exists but cannot be read.
pub fn read_env_file(path: impl AsRef<Path>) -> Result<ParsedFile, EnvError> {
    let path = path.as_ref();
    match std::fs::read_to_string(path) {
        Ok(content) => {
            debug!("Parsing {}", path.display());
            let mut parsed = parse(&content);
            parsed.path = Some(path.to_path_buf());
            Ok(parsed)
        }
        Err(e) if e.kind() == ErrorKind::NotFound => {
            debug!("{} does not exist", path.display());
            Ok(ParsedFile::missing(path))
        }
        Err(source) => Err(EnvError::Io {
            path: path.to_path_buf(),
            source,
        }),
    }
}

/// Reads an env file that must exist.
///
/// # Errors
///
/// Returns [`EnvError::FileNotFound`] if the file is absent, or
/// [`EnvError::Io`] if it cannot be read.
pub fn read_existing(path: impl AsRef<Path>) -> Result<ParsedFile, EnvError> {
    let parsed = read_env_file(path.as_ref())?;
    if parsed.exists {
        Ok(parsed)
    } else {
        Err(EnvError::FileNotFound {
            path: path.as_ref().to_path_buf(),
        })
    }
}

/// Lists variable names in order of first assignment.
///
/// # Errors
///
/// Returns an error if the file is absent or unreadable.
pub fn list(path: impl AsRef<Path>) -> Result<Vec<String>, EnvError> {
    Ok(read_existing(path)?.keys)
}

/// Looks up one variable. `Ok(None)` means the key is not defined.
///
/// # Errors
///
/// Returns an error if the file is absent or unreadable.
pub fn get(path: impl AsRef<Path>, key: &str) -> Result<Option<String>, EnvError> {
    let mut parsed = read_existing(path)?;
    Ok(parsed.variables.remove(key))
}
