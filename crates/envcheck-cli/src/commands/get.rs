//! Get command implementation.

use anyhow::{Context, Result};
use std::path::Path;

/// Runs the get command. Exits with status 1 if the key is not defined.
pub fn run(file: &Path, key: &str) -> Result<()> {
    let value = envcheck_core::get(file, key)
        .with_context(|| format!("Failed to read {}", file.display()))?;

    match value {
        Some(value) => println!("{value}"),
        None => {
            eprintln!("Variable '{key}' is not defined in {}", file.display());
            std::process::exit(1);
        }
    }
    Ok(())
}
