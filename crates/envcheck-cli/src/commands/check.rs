//! Check command implementation.

use anyhow::{Context, Result};
use envcheck_core::{check, CheckOptions, Config};
use envcheck_monorepo::find_example;
use std::path::Path;

use crate::CheckArgs;

/// Runs the check command.
pub fn run(args: CheckArgs, config: &Config) -> Result<()> {
    let options = build_options(&args, config);

    match &options.example_path {
        Some(example) => tracing::debug!("Comparing against {}", example.display()),
        None => tracing::debug!("No example file found next to {}", args.env_file.display()),
    }

    let result = check(&args.env_file, &options)
        .with_context(|| format!("Failed to check {}", args.env_file.display()))?;

    super::output::print_check(
        &args.env_file,
        options.example_path.as_deref(),
        &result,
        args.format,
    )?;

    // Exit with error code if there are errors
    if !result.valid {
        std::process::exit(1);
    }

    Ok(())
}

/// Layers command-line flags over the configured options.
///
/// Flags can only switch policies on; lists and types are appended.
fn build_options(args: &CheckArgs, config: &Config) -> CheckOptions {
    let mut options = config.check_options();

    if let Some(example) = &args.example {
        options.example_path = Some(example.clone());
    }
    if options.example_path.is_none() {
        options.example_path = detect_example(&args.env_file);
    }

    options.required.extend(args.required.iter().cloned());
    options.types.extend(
        args.types
            .iter()
            .map(|(key, type_name)| (key.clone(), type_name.to_lowercase())),
    );
    options.no_empty |= args.no_empty;
    options.no_extra |= args.no_extra;
    options.strict |= args.strict;
    options.detect_secrets |= args.secrets;
    options
}

fn detect_example(env_file: &Path) -> Option<std::path::PathBuf> {
    let dir = match env_file.parent() {
        Some(p) if !p.as_os_str().is_empty() => p,
        _ => Path::new("."),
    };
    find_example(dir)
}
