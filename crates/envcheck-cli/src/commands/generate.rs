//! Generate command implementation.

use anyhow::{bail, Context, Result};
use std::collections::BTreeMap;
use std::path::Path;

/// Runs the generate command.
pub fn run(
    example: &Path,
    overrides: Vec<(String, String)>,
    output: Option<&Path>,
    force: bool,
) -> Result<()> {
    let defaults: BTreeMap<String, String> = overrides.into_iter().collect();
    let content = envcheck_core::generate(example, &defaults)
        .with_context(|| format!("Failed to generate from {}", example.display()))?;

    let Some(output) = output else {
        print!("{content}");
        return Ok(());
    };

    if output.exists() && !force {
        bail!(
            "{} already exists. Use --force to overwrite.",
            output.display()
        );
    }

    std::fs::write(output, content)
        .with_context(|| format!("Failed to write {}", output.display()))?;
    println!("Created {} from {}", output.display(), example.display());
    Ok(())
}
