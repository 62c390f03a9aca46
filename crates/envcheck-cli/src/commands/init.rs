//! Init command implementation.

use anyhow::{bail, Result};
use std::path::Path;

const DEFAULT_CONFIG: &str = r##"# envcheck configuration

[check]
# Example file to compare against (default: auto-detect .env.example,
# .env.sample or .env.template next to the env file)
# example = ".env.example"

# Variables that must be present and non-empty
required = []

# Warn on empty values
no_empty = false

# Fail on variables that the example does not define
no_extra = false

# Treat empty variables as errors
strict = false

# Flag example values that look like real credentials
detect_secrets = false

# Explicit types; these override "# @type:" hints in the example
[types]
# PORT = "port"
# DATABASE_URL = "url"

[monorepo]
# Directories (glob patterns) that contain one app per subdirectory
containers = ["apps/*", "packages/*"]

# Report variables declared with different types across apps
check_consistency = true

# Number of worker threads (default: one per CPU)
# parallelism = 4
"##;

/// Runs the init command.
pub fn run(force: bool) -> Result<()> {
    let config_path = Path::new("envcheck.toml");

    if config_path.exists() && !force {
        bail!(
            "Configuration file already exists at {}. Use --force to overwrite.",
            config_path.display()
        );
    }

    std::fs::write(config_path, DEFAULT_CONFIG)?;

    println!("Created envcheck.toml");
    println!("\nNext steps:");
    println!("  1. Edit envcheck.toml to declare required variables and types");
    println!("  2. Run: envcheck check");

    Ok(())
}
