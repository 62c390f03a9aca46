//! Monorepo scanner: one check per app, plus consistency across apps.

use crate::consistency::{check_consistency, Consistency};
use crate::discovery::{discover_apps, AppDir};
use crate::ScanError;

use envcheck_core::{
    check_files, read_env_file, read_existing, EnvError, Issue, IssueKind, MonorepoConfig,
    ParsedFile, Summary, TypeMap,
};
use rayon::prelude::*;
use serde::Serialize;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

/// Options for [`scan_monorepo`].
#[derive(Debug, Clone)]
pub struct MonorepoOptions {
    /// Glob patterns, relative to the root, that match app directories.
    pub containers: Vec<String>,
    /// Warn on empty values.
    pub no_empty: bool,
    /// Fail on variables not in an app's example.
    pub no_extra: bool,
    /// Fail on empty variables shared with an app's example.
    pub strict: bool,
    /// Cross-check types of variables shared between apps.
    pub check_consistency: bool,
    /// Scan example files for committed credentials.
    pub detect_secrets: bool,
    /// Explicit types applied to every app.
    pub types: TypeMap,
    /// Maximum number of apps checked in parallel.
    pub parallelism: Option<usize>,
}

impl Default for MonorepoOptions {
    fn default() -> Self {
        Self::from(&MonorepoConfig::default())
    }
}

impl From<&MonorepoConfig> for MonorepoOptions {
    fn from(config: &MonorepoConfig) -> Self {
        Self {
            containers: config.containers.clone(),
            no_empty: false,
            no_extra: false,
            strict: false,
            check_consistency: config.check_consistency,
            detect_secrets: config.detect_secrets,
            types: TypeMap::new(),
            parallelism: config.parallelism,
        }
    }
}

/// Check outcome for one app.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AppResult {
    /// App name, relative to the scan root.
    pub name: String,
    /// App directory.
    pub path: PathBuf,
    /// Whether the app has a `.env` file.
    pub has_env: bool,
    /// Whether the app has an example file.
    pub has_example: bool,
    /// The example file the app was checked against.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub example_path: Option<PathBuf>,
    /// False iff any issue is an error.
    pub valid: bool,
    /// Issues from checking the app.
    pub issues: Vec<Issue>,
    /// Variable names in the app's env file.
    pub variables: Vec<String>,
    /// Whether the app was not checked.
    pub skipped: bool,
    /// Why the app was skipped.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
}

impl AppResult {
    fn new(app: &AppDir) -> Self {
        Self {
            name: app.name.clone(),
            path: app.path.clone(),
            has_env: app.env_path.is_some(),
            has_example: app.example_path.is_some(),
            example_path: app.example_path.clone(),
            valid: true,
            issues: Vec::new(),
            variables: Vec::new(),
            skipped: false,
            reason: None,
        }
    }

    /// Issue counts for this app.
    #[must_use]
    pub fn summary(&self) -> Summary {
        Summary::from_issues(&self.issues)
    }
}

/// Totals across all apps.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct ScanSummary {
    /// Apps discovered.
    pub total: usize,
    /// Apps checked without errors.
    pub passed: usize,
    /// Apps checked with errors.
    pub failed: usize,
    /// Apps not checked.
    pub skipped: usize,
    /// Errors across checked apps.
    pub errors: usize,
    /// Warnings across checked apps.
    pub warnings: usize,
}

/// Result of scanning a monorepo.
#[derive(Debug, Clone, Serialize)]
pub struct MonorepoScanResult {
    /// Scan root.
    pub root: PathBuf,
    /// Per-app results, sorted by name.
    pub apps: Vec<AppResult>,
    /// Cross-app consistency, when requested.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub consistency: Option<Consistency>,
    /// Totals.
    pub summary: ScanSummary,
}

impl MonorepoScanResult {
    /// Returns true if any checked app failed.
    #[must_use]
    pub fn has_failures(&self) -> bool {
        self.summary.failed > 0
    }

    /// Returns true if the consistency check found conflicts.
    #[must_use]
    pub fn has_mismatches(&self) -> bool {
        self.consistency
            .as_ref()
            .is_some_and(|c| !c.is_consistent())
    }
}

/// An app result plus the example it was checked against.
struct ScannedApp {
    result: AppResult,
    example: Option<ParsedFile>,
}

/// Scans every app under `root`.
///
/// Apps are checked in parallel; results keep discovery order. An app
/// whose files cannot be read becomes a failing entry and the scan goes on.
///
/// # Errors
///
/// Returns an error if the root is not a directory, discovery fails, or
/// the worker pool cannot be built.
pub fn scan_monorepo(
    root: impl AsRef<Path>,
    options: &MonorepoOptions,
) -> Result<MonorepoScanResult, ScanError> {
    let root = root.as_ref();
    if !root.is_dir() {
        return Err(ScanError::RootNotFound {
            path: root.to_path_buf(),
        });
    }

    info!("Scanning monorepo at {}", root.display());
    let apps = discover_apps(root, &options.containers)?;
    info!("Found {} app(s)", apps.len());

    let scan = || -> Vec<ScannedApp> {
        apps.par_iter().map(|app| scan_app(app, options)).collect()
    };
    let scanned = match options.parallelism {
        Some(threads) => rayon::ThreadPoolBuilder::new()
            .num_threads(threads)
            .build()?
            .install(scan),
        None => scan(),
    };

    let consistency = options.check_consistency.then(|| {
        let examples: Vec<(&str, &ParsedFile)> = scanned
            .iter()
            .filter_map(|s| s.example.as_ref().map(|e| (s.result.name.as_str(), e)))
            .collect();
        check_consistency(&examples, &options.types)
    });

    let apps: Vec<AppResult> = scanned.into_iter().map(|s| s.result).collect();
    let summary = summarize(&apps);

    Ok(MonorepoScanResult {
        root: root.to_path_buf(),
        apps,
        consistency,
        summary,
    })
}

fn scan_app(app: &AppDir, options: &MonorepoOptions) -> ScannedApp {
    check_app(app, options).unwrap_or_else(|err| {
        warn!("{}: {err}", app.name);
        let mut result = AppResult::new(app);
        result.valid = false;
        result
            .issues
            .push(Issue::error(IssueKind::ReadError, err.to_string()));
        ScannedApp {
            result,
            example: None,
        }
    })
}

fn check_app(app: &AppDir, options: &MonorepoOptions) -> Result<ScannedApp, EnvError> {
    let mut result = AppResult::new(app);

    let Some(example_path) = &app.example_path else {
        debug!("Skipping {}: no example file", app.name);
        result.skipped = true;
        result.reason = Some("No example file found".to_string());
        return Ok(ScannedApp {
            result,
            example: None,
        });
    };
    let example = read_env_file(example_path)?;

    let Some(env_path) = &app.env_path else {
        result.valid = false;
        result.issues.push(Issue::error(
            IssueKind::FileNotFound,
            "Missing .env file",
        ));
        return Ok(ScannedApp {
            result,
            example: Some(example),
        });
    };
    let env = read_existing(env_path)?;
    result.variables.clone_from(&env.keys);

    let check_options = envcheck_core::CheckOptions {
        example_path: Some(example_path.clone()),
        required: Vec::new(),
        no_empty: options.no_empty,
        no_extra: options.no_extra,
        strict: options.strict,
        types: options.types.clone(),
        validate_types: false,
        detect_secrets: options.detect_secrets,
    };
    let checked = check_files(env, Some(example.clone()), &check_options);
    debug!(
        "{}: {} error(s), {} warning(s)",
        app.name, checked.summary.errors, checked.summary.warnings
    );
    result.valid = checked.valid;
    result.issues = checked.issues;

    Ok(ScannedApp {
        result,
        example: Some(example),
    })
}

fn summarize(apps: &[AppResult]) -> ScanSummary {
    let mut summary = ScanSummary {
        total: apps.len(),
        ..ScanSummary::default()
    };
    for app in apps {
        if app.skipped {
            summary.skipped += 1;
            continue;
        }
        if app.valid {
            summary.passed += 1;
        } else {
            summary.failed += 1;
        }
        let counts = app.summary();
        summary.errors += counts.errors;
        summary.warnings += counts.warnings;
    }
    summary
}
