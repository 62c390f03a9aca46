//! Compare command implementation.

use anyhow::{bail, Context, Result};
use envcheck_core::compare;
use std::path::Path;

use crate::OutputFormat;

/// Runs the compare command.
///
/// Exits with status 1 when the env file lacks variables the example defines.
pub fn run(env_file: &Path, example: &Path, format: OutputFormat) -> Result<()> {
    let result = compare(env_file, example).context("Comparison failed")?;

    for (path, file) in [(env_file, &result.env), (example, &result.example)] {
        if !file.exists {
            bail!("File not found: {}", path.display());
        }
    }

    super::output::print_compare(&result, format)?;

    if !result.missing.is_empty() {
        std::process::exit(1);
    }
    Ok(())
}
