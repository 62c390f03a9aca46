//! envcheck CLI tool.
//!
//! Usage:
//! ```bash
//! envcheck [check] [OPTIONS] [ENV_FILE]
//! envcheck compare ENV_FILE EXAMPLE
//! envcheck list [FILE]
//! envcheck get KEY [FILE]
//! envcheck generate [EXAMPLE] --set KEY=VALUE
//! envcheck monorepo [ROOT]
//! envcheck list-types
//! envcheck init
//! ```

use anyhow::Result;
use clap::{Args, Parser, Subcommand};
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;

mod commands;
mod config_resolver;

/// Validate .env files against their examples, with types and monorepo support
#[derive(Parser)]
#[command(name = "envcheck")]
#[command(author, version, about, long_about = None)]
#[command(args_conflicts_with_subcommands = true)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Path to configuration file
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,

    /// Arguments for the default `check` command
    #[command(flatten)]
    check: CheckArgs,
}

#[derive(Subcommand)]
enum Commands {
    /// Validate an env file and compare it against its example (default)
    Check(CheckArgs),

    /// Show missing, extra and empty variables between two files
    Compare {
        /// Env file to inspect
        #[arg(default_value = ".env")]
        env_file: PathBuf,

        /// Example file to compare against
        #[arg(default_value = ".env.example")]
        example: PathBuf,

        /// Output format
        #[arg(short, long, default_value = "text")]
        format: OutputFormat,
    },

    /// List variable names in declaration order
    List {
        /// Env file to read
        #[arg(default_value = ".env")]
        file: PathBuf,

        /// Output format
        #[arg(short, long, default_value = "text")]
        format: OutputFormat,
    },

    /// Print the value of one variable
    Get {
        /// Variable name
        key: String,

        /// Env file to read
        #[arg(default_value = ".env")]
        file: PathBuf,
    },

    /// Generate an env file from an example
    Generate {
        /// Example file to render
        #[arg(default_value = ".env.example")]
        example: PathBuf,

        /// Override a value (can be specified multiple times)
        #[arg(short, long = "set", value_name = "KEY=VALUE", value_parser = parse_key_val)]
        set: Vec<(String, String)>,

        /// Write to this file instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Overwrite an existing output file
        #[arg(long)]
        force: bool,
    },

    /// Check every app of a monorepo and cross-check shared variables
    Monorepo(MonorepoArgs),

    /// List available variable types
    ListTypes,

    /// Initialize configuration file
    Init {
        /// Overwrite existing config
        #[arg(long)]
        force: bool,
    },
}

/// Arguments for the `check` command.
#[derive(Args, Debug)]
pub struct CheckArgs {
    /// Env file to check
    #[arg(default_value = ".env")]
    pub env_file: PathBuf,

    /// Example file (default: auto-detected next to the env file)
    #[arg(short, long)]
    pub example: Option<PathBuf>,

    /// Required variables (comma-separated, can be repeated)
    #[arg(short, long, value_delimiter = ',')]
    pub required: Vec<String>,

    /// Declare a type (can be specified multiple times)
    #[arg(short = 't', long = "type", value_name = "KEY=TYPE", value_parser = parse_key_val)]
    pub types: Vec<(String, String)>,

    /// Warn on empty values
    #[arg(long)]
    pub no_empty: bool,

    /// Fail on variables not defined in the example
    #[arg(long)]
    pub no_extra: bool,

    /// Treat empty shared variables as errors
    #[arg(long)]
    pub strict: bool,

    /// Flag example values that look like real credentials
    #[arg(long)]
    pub secrets: bool,

    /// Output format
    #[arg(short, long, default_value = "text")]
    pub format: OutputFormat,
}

/// Arguments for the `monorepo` command.
#[derive(Args, Debug)]
pub struct MonorepoArgs {
    /// Monorepo root
    #[arg(default_value = ".")]
    pub root: PathBuf,

    /// Container patterns to search for apps (replaces the configured ones)
    #[arg(long = "container", value_name = "PATTERN")]
    pub containers: Vec<String>,

    /// Declare a type (can be specified multiple times)
    #[arg(short = 't', long = "type", value_name = "KEY=TYPE", value_parser = parse_key_val)]
    pub types: Vec<(String, String)>,

    /// Warn on empty values
    #[arg(long)]
    pub no_empty: bool,

    /// Fail on variables not defined in the example
    #[arg(long)]
    pub no_extra: bool,

    /// Treat empty variables and type conflicts as errors
    #[arg(long)]
    pub strict: bool,

    /// Skip the cross-app type consistency check
    #[arg(long)]
    pub no_consistency: bool,

    /// Flag example values that look like real credentials
    #[arg(long)]
    pub secrets: bool,

    /// Number of worker threads
    #[arg(short, long)]
    pub jobs: Option<usize>,

    /// Output format
    #[arg(short, long, default_value = "text")]
    pub format: OutputFormat,
}

/// Output format for check results.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    /// Human-readable text output.
    #[default]
    Text,
    /// JSON output.
    Json,
    /// One-line-per-issue compact format.
    Compact,
    /// Annotated source snippets.
    Pretty,
}

fn parse_key_val(s: &str) -> Result<(String, String), String> {
    let (key, value) = s
        .split_once('=')
        .ok_or_else(|| format!("expected KEY=VALUE, got '{s}'"))?;
    let key = key.trim();
    if key.is_empty() {
        return Err(format!("empty key in '{s}'"));
    }
    Ok((key.to_string(), value.to_string()))
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let explicit = cli.config;

    match cli.command.unwrap_or(Commands::Check(cli.check)) {
        Commands::Check(args) => {
            let dir = args.env_file.parent().unwrap_or(Path::new(""));
            let config = config_resolver::load_for(dir, explicit.as_deref())?;
            commands::check::run(args, &config)
        }
        Commands::Compare {
            env_file,
            example,
            format,
        } => commands::compare::run(&env_file, &example, format),
        Commands::List { file, format } => commands::list::run(&file, format),
        Commands::Get { key, file } => commands::get::run(&file, &key),
        Commands::Generate {
            example,
            set,
            output,
            force,
        } => commands::generate::run(&example, set, output.as_deref(), force),
        Commands::Monorepo(args) => {
            let config = config_resolver::load_for(&args.root, explicit.as_deref())?;
            commands::monorepo::run(args, &config)
        }
        Commands::ListTypes => {
            commands::list_types::run();
            Ok(())
        }
        Commands::Init { force } => commands::init::run(force),
    }
}
