//! List command implementation.

use anyhow::{Context, Result};
use std::path::Path;

use crate::OutputFormat;

/// Runs the list command.
pub fn run(file: &Path, format: OutputFormat) -> Result<()> {
    let keys = envcheck_core::list(file)
        .with_context(|| format!("Failed to list {}", file.display()))?;

    if format == OutputFormat::Json {
        println!("{}", serde_json::to_string_pretty(&keys)?);
    } else {
        for key in keys {
            println!("{key}");
        }
    }
    Ok(())
}
