//! Discovery of app directories inside a monorepo.

use crate::ScanError;

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Env file name looked for in every app directory.
pub const ENV_FILE: &str = ".env";

/// Example file names, checked in order.
pub const EXAMPLE_FILES: &[&str] = &[".env.example", ".env.sample", ".env.template"];

/// A candidate app directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppDir {
    /// Path relative to the scan root, with `/` separators (e.g., "apps/api").
    pub name: String,
    /// Absolute or root-joined path of the directory.
    pub path: PathBuf,
    /// The `.env` file, if present.
    pub env_path: Option<PathBuf>,
    /// The first example file found, if any.
    pub example_path: Option<PathBuf>,
}

/// Returns the first example file present in `dir`.
#[must_use]
pub fn find_example(dir: &Path) -> Option<PathBuf> {
    EXAMPLE_FILES
        .iter()
        .map(|name| dir.join(name))
        .find(|path| path.is_file())
}

/// Finds app directories matching `containers` under `root`.
///
/// A directory is a candidate when it holds an env file or an example
/// file. Results are sorted by name and free of duplicates.
///
/// # Errors
///
/// Returns an error if a container pattern is not a valid glob or a
/// matched path cannot be read.
pub fn discover_apps(root: &Path, containers: &[String]) -> Result<Vec<AppDir>, ScanError> {
    let escaped_root = glob::Pattern::escape(&root.to_string_lossy());
    let mut found = BTreeMap::new();

    for container in containers {
        let pattern = format!("{escaped_root}/{}", container.trim_start_matches("./"));
        debug!("Discovering apps with pattern {pattern}");

        for entry in glob::glob(&pattern)? {
            let path = entry?;
            if !path.is_dir() {
                continue;
            }

            let env_path = Some(path.join(ENV_FILE)).filter(|p| p.is_file());
            let example_path = find_example(&path);
            if env_path.is_none() && example_path.is_none() {
                debug!("Skipping {}: no env files", path.display());
                continue;
            }

            let name = app_name(root, &path);
            found.entry(name.clone()).or_insert(AppDir {
                name,
                path,
                env_path,
                example_path,
            });
        }
    }

    Ok(found.into_values().collect())
}

fn app_name(root: &Path, path: &Path) -> String {
    path.strip_prefix(root)
        .unwrap_or(path)
        .components()
        .map(|c| c.as_os_str().to_string_lossy())
        .collect::<Vec<_>>()
        .join("/")
}
