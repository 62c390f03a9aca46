//! Finding and loading `envcheck.toml` for a command.
//!
//! The search starts at the directory the command works on (the env file's
//! directory for `check`, the scan root for `monorepo`) and walks up to the
//! repository root, so `envcheck check services/api/.env` picks up
//! `services/api/envcheck.toml` before a workspace-wide one. Without a
//! project file the user file `~/.envcheck/config.toml` applies, and
//! without that the built-in defaults.

use anyhow::{Context, Result};
use envcheck_core::Config;
use std::path::{Path, PathBuf};

/// Project-level config file names, checked in order in each directory.
pub const CONFIG_FILE_NAMES: &[&str] = &["envcheck.toml", ".envcheck.toml"];

/// Where the configuration came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigOrigin {
    /// Given with `--config`.
    Flag(PathBuf),
    /// Nearest project file at or above the working directory.
    Project(PathBuf),
    /// The per-user file.
    User(PathBuf),
    /// Nothing found.
    BuiltIn,
}

impl ConfigOrigin {
    fn path(&self) -> Option<&Path> {
        match self {
            Self::Flag(p) | Self::Project(p) | Self::User(p) => Some(p),
            Self::BuiltIn => None,
        }
    }
}

/// Loads the configuration that applies to `start`.
///
/// Relative paths inside a config file are taken relative to that file.
///
/// # Errors
///
/// Returns an error if the chosen file cannot be read or parsed. A missing
/// `--config` file is an error; missing project or user files are not.
pub fn load_for(start: &Path, explicit: Option<&Path>) -> Result<Config> {
    let origin = locate(start, explicit, user_config_dir().as_deref());
    let Some(path) = origin.path() else {
        tracing::debug!("No envcheck.toml found, using defaults");
        return Ok(Config::default());
    };

    tracing::debug!("Using config {:?}", origin);
    let mut config = Config::from_file(path)
        .with_context(|| format!("Failed to load config: {}", path.display()))?;
    rebase_paths(&mut config, path);
    Ok(config)
}

fn locate(start: &Path, explicit: Option<&Path>, user_dir: Option<&Path>) -> ConfigOrigin {
    if let Some(p) = explicit {
        return ConfigOrigin::Flag(p.to_path_buf());
    }
    if let Some(p) = nearest_project_file(start) {
        return ConfigOrigin::Project(p);
    }
    user_dir
        .map(|dir| dir.join("config.toml"))
        .filter(|p| p.is_file())
        .map_or(ConfigOrigin::BuiltIn, ConfigOrigin::User)
}

/// Walks from `start` upwards, stopping after the first directory that
/// holds `.git`.
fn nearest_project_file(start: &Path) -> Option<PathBuf> {
    let start = if start.as_os_str().is_empty() {
        Path::new(".")
    } else {
        start
    };
    let start = start.canonicalize().unwrap_or_else(|_| start.to_path_buf());

    for dir in start.ancestors() {
        if let Some(found) = CONFIG_FILE_NAMES
            .iter()
            .map(|name| dir.join(name))
            .find(|p| p.is_file())
        {
            return Some(found);
        }
        if dir.join(".git").exists() {
            break;
        }
    }
    None
}

fn rebase_paths(config: &mut Config, config_path: &Path) {
    let Some(base) = config_path.parent() else {
        return;
    };
    if let Some(example) = &mut config.check.example {
        if example.is_relative() {
            *example = base.join(&*example);
        }
    }
}

/// The per-user config directory: `$ENVCHECK_CONFIG_DIR`, else `~/.envcheck`.
fn user_config_dir() -> Option<PathBuf> {
    std::env::var_os("ENVCHECK_CONFIG_DIR")
        .map(PathBuf::from)
        .or_else(|| home::home_dir().map(|h| h.join(".envcheck")))
}
