//! Monorepo command implementation.

use anyhow::{Context, Result};
use envcheck_core::Config;
use envcheck_monorepo::{scan_monorepo, MonorepoOptions};

use crate::MonorepoArgs;

/// Runs the monorepo command.
///
/// Exits with status 1 if any app failed, or under `--strict` if apps
/// disagree on a variable's type.
pub fn run(args: MonorepoArgs, config: &Config) -> Result<()> {
    let options = build_options(&args, config);
    tracing::info!(
        "Scanning {} (containers: {})",
        args.root.display(),
        options.containers.join(", ")
    );

    let result = scan_monorepo(&args.root, &options)
        .with_context(|| format!("Failed to scan {}", args.root.display()))?;

    super::output::print_scan(&result, args.format)?;

    if result.has_failures() || (options.strict && result.has_mismatches()) {
        std::process::exit(1);
    }
    Ok(())
}

fn build_options(args: &MonorepoArgs, config: &Config) -> MonorepoOptions {
    let mut options = MonorepoOptions::from(&config.monorepo);
    if !args.containers.is_empty() {
        options.containers.clone_from(&args.containers);
    }
    options.types = config.types.clone();
    options.types.extend(
        args.types
            .iter()
            .map(|(key, type_name)| (key.clone(), type_name.to_lowercase())),
    );
    options.no_empty = config.check.no_empty || args.no_empty;
    options.no_extra = config.check.no_extra || args.no_extra;
    options.strict = config.check.strict || args.strict;
    options.check_consistency &= !args.no_consistency;
    options.detect_secrets |= args.secrets;
    if args.jobs.is_some() {
        options.parallelism = args.jobs;
    }
    options
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::OutputFormat;
    use std::path::PathBuf;

    fn args() -> MonorepoArgs {
        MonorepoArgs {
            root: PathBuf::from("."),
            containers: Vec::new(),
            types: Vec::new(),
            no_empty: false,
            no_extra: false,
            strict: false,
            no_consistency: false,
            secrets: false,
            jobs: None,
            format: OutputFormat::Text,
        }
    }

    #[test]
    fn defaults_follow_config() {
        let options = build_options(&args(), &Config::default());
        assert_eq!(options.containers, vec!["apps/*", "packages/*"]);
        assert!(options.check_consistency);
        assert_eq!(options.parallelism, None);
    }

    #[test]
    fn flags_override_config() {
        let mut config = Config::default();
        config.monorepo.parallelism = Some(8);
        config.types.insert("PORT".to_string(), "port".to_string());

        let mut cli = args();
        cli.containers = vec!["services/*".to_string()];
        cli.no_consistency = true;
        cli.jobs = Some(2);
        cli.types = vec![("URL".to_string(), "url".to_string())];

        let options = build_options(&cli, &config);
        assert_eq!(options.containers, vec!["services/*"]);
        assert!(!options.check_consistency);
        assert_eq!(options.parallelism, Some(2));
        assert_eq!(options.types.len(), 2);
    }
}
