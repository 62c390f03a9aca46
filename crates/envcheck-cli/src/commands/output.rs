//! Shared output formatting for check results.

use anyhow::Result;
use envcheck_core::{CheckResult, CompareResult, Issue, IssueDiagnostic, IssueKind, Severity};
use envcheck_monorepo::{AppResult, MonorepoScanResult};
use miette::GraphicalReportHandler;
use std::path::Path;

use crate::OutputFormat;

/// Print check results in the specified format.
pub fn print_check(
    env_path: &Path,
    example_path: Option<&Path>,
    result: &CheckResult,
    format: OutputFormat,
) -> Result<()> {
    match format {
        OutputFormat::Text => print_text(env_path, result),
        OutputFormat::Json => return print_json(result),
        OutputFormat::Compact => print_compact(env_path, example_path, &result.issues),
        OutputFormat::Pretty => print_pretty(env_path, example_path, &result.issues)?,
    }
    Ok(())
}

/// Print a comparison in the specified format.
pub fn print_compare(result: &CompareResult, format: OutputFormat) -> Result<()> {
    if format == OutputFormat::Json {
        return print_json(result);
    }

    for missing in &result.missing {
        println!(
            "\x1b[31m- {}\x1b[0m (example line {})",
            missing.key, missing.line
        );
    }
    for extra in &result.extra {
        println!("\x1b[33m+ {}\x1b[0m (line {})", extra.key, extra.line);
    }
    for empty in &result.empty {
        println!("\x1b[34m? {}\x1b[0m is empty (line {})", empty.key, empty.line);
    }

    let color = if result.missing.is_empty() {
        "\x1b[32m"
    } else {
        "\x1b[31m"
    };
    println!(
        "{color}{} missing, {} extra, {} empty, {} shared\x1b[0m",
        result.missing.len(),
        result.extra.len(),
        result.empty.len(),
        result.shared_count()
    );
    Ok(())
}

/// Print a monorepo scan in the specified format.
pub fn print_scan(result: &MonorepoScanResult, format: OutputFormat) -> Result<()> {
    if format == OutputFormat::Json {
        return print_json(result);
    }

    for app in &result.apps {
        if app.skipped {
            println!(
                "\x1b[2m○ {} (skipped: {})\x1b[0m",
                app.name,
                app.reason.as_deref().unwrap_or("no reason")
            );
            continue;
        }

        let mark = if app.valid {
            "\x1b[32m✓\x1b[0m"
        } else {
            "\x1b[31m✗\x1b[0m"
        };
        println!("{mark} {}", app.name);

        if format == OutputFormat::Compact {
            for line in app_compact_lines(app) {
                println!("  {line}");
            }
        } else {
            for issue in &app.issues {
                println!("  {}: {}", severity_indicator(issue.severity), issue.message);
            }
        }
    }

    if let Some(consistency) = &result.consistency {
        for mismatch in consistency.mismatches.values() {
            println!("\x1b[33mwarning\x1b[0m: {}", mismatch.issue);
        }
    }

    let summary = &result.summary;
    let color = if summary.failed > 0 {
        "\x1b[31m"
    } else if summary.warnings > 0 || result.has_mismatches() {
        "\x1b[33m"
    } else {
        "\x1b[32m"
    };
    println!();
    println!(
        "{color}{} app(s): {} passed, {} failed, {} skipped; {} error(s), {} warning(s)\x1b[0m",
        summary.total,
        summary.passed,
        summary.failed,
        summary.skipped,
        summary.errors,
        summary.warnings
    );
    Ok(())
}

fn severity_indicator(severity: Severity) -> &'static str {
    match severity {
        Severity::Error => "\x1b[31merror\x1b[0m",
        Severity::Warning => "\x1b[33mwarning\x1b[0m",
    }
}

fn print_text(env_path: &Path, result: &CheckResult) {
    for issue in &result.issues {
        match issue.line {
            Some(line) => println!("{} at {}:{}", issue.kind, env_path.display(), line),
            None => println!("{} in {}", issue.kind, env_path.display()),
        }
        println!("  {}: {}", severity_indicator(issue.severity), issue.message);
        println!();
    }

    let summary = result.summary;
    let summary_color = if summary.errors > 0 {
        "\x1b[31m"
    } else if summary.warnings > 0 {
        "\x1b[33m"
    } else {
        "\x1b[32m"
    };

    let variables = result.env.as_ref().map_or(0, envcheck_core::ParsedFile::len);
    println!(
        "{}Found {} error(s), {} warning(s) in {} variable(s)\x1b[0m",
        summary_color, summary.errors, summary.warnings, variables
    );
}

fn print_json<T: serde::Serialize + ?Sized>(value: &T) -> Result<()> {
    let json = serde_json::to_string_pretty(value)?;
    println!("{json}");
    Ok(())
}

/// Secret warnings point into the example file; everything else into the env file.
fn issue_file<'a>(env_path: &'a Path, example_path: Option<&'a Path>, issue: &Issue) -> &'a Path {
    match (issue.kind, example_path) {
        (IssueKind::PossibleSecret, Some(example)) => example,
        _ => env_path,
    }
}

fn compact_line(env_path: &Path, example_path: Option<&Path>, issue: &Issue) -> String {
    let file = issue_file(env_path, example_path, issue);
    format!(
        "{}:{}: {} [{}] {}",
        file.display(),
        issue.line.unwrap_or(0),
        issue.severity,
        issue.kind,
        issue.message,
    )
}

fn app_compact_lines(app: &AppResult) -> Vec<String> {
    let env_path = app.path.join(envcheck_monorepo::ENV_FILE);
    app.issues
        .iter()
        .map(|issue| compact_line(&env_path, app.example_path.as_deref(), issue))
        .collect()
}

fn print_compact(env_path: &Path, example_path: Option<&Path>, issues: &[Issue]) {
    for issue in issues {
        println!("{}", compact_line(env_path, example_path, issue));
    }
}

fn print_pretty(env_path: &Path, example_path: Option<&Path>, issues: &[Issue]) -> Result<()> {
    let handler = GraphicalReportHandler::new();
    for issue in issues {
        let file = issue_file(env_path, example_path, issue);
        // Unreadable sources still render, just without a snippet.
        let content = std::fs::read_to_string(file).unwrap_or_default();
        let diagnostic = IssueDiagnostic::new(issue, &file.display().to_string(), &content);

        let mut rendered = String::new();
        handler.render_report(&mut rendered, &diagnostic)?;
        println!("{rendered}");
    }
    Ok(())
}
