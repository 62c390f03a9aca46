//! CLI end-to-end tests that invoke the compiled `envcheck` binary.
//!
//! Every run isolates the global config directory so a developer's
//! `~/.envcheck/config.toml` cannot leak into the results.

use std::fs;
use std::path::{Path, PathBuf};
use std::process::{Command, Output};
use tempfile::TempDir;

fn envcheck_bin() -> PathBuf {
    PathBuf::from(env!("CARGO_BIN_EXE_envcheck"))
}

fn run(dir: &Path, args: &[&str]) -> Output {
    Command::new(envcheck_bin())
        .args(args)
        .current_dir(dir)
        .env("ENVCHECK_CONFIG_DIR", dir.join(".no-global-config"))
        .env_remove("RUST_LOG")
        .output()
        .expect("failed to execute envcheck binary")
}

fn stdout(out: &Output) -> String {
    String::from_utf8_lossy(&out.stdout).into_owned()
}

fn stderr(out: &Output) -> String {
    String::from_utf8_lossy(&out.stderr).into_owned()
}

fn project(env: &str, example: &str) -> TempDir {
    let tmp = TempDir::new().unwrap();
    fs::write(tmp.path().join(".env"), env).unwrap();
    fs::write(tmp.path().join(".env.example"), example).unwrap();
    tmp
}

#[test]
fn help_exits_zero() {
    let out = Command::new(envcheck_bin()).arg("--help").output().unwrap();
    assert!(out.status.success());
    let text = stdout(&out);
    assert!(text.contains("monorepo"), "help should list subcommands:\n{text}");
}

#[test]
fn check_passes_for_matching_files() {
    let tmp = project("PORT=3000\nHOST=localhost\n", "# type: port\nPORT=\nHOST=\n");

    let out = run(tmp.path(), &["check"]);
    assert!(out.status.success(), "stderr: {}", stderr(&out));
    assert!(stdout(&out).contains("Found 0 error(s), 0 warning(s)"));
}

#[test]
fn check_is_the_default_command() {
    let tmp = project("A=1\n", "A=\nB=\n");

    let out = run(tmp.path(), &[]);
    assert_eq!(out.status.code(), Some(1));
    assert!(stdout(&out).contains("Missing variable 'B'"));
}

#[test]
fn check_reports_type_mismatch_from_example_hint() {
    let tmp = project("PORT=http\n", "# @type: port\nPORT=3000\n");

    let out = run(tmp.path(), &["check", "--format", "compact"]);
    assert_eq!(out.status.code(), Some(1));
    assert_eq!(
        stdout(&out).trim(),
        ".env:1: error [type-mismatch] Variable 'PORT' must be a valid port number (1-65535) (got: http)"
    );
}

#[test]
fn check_json_output() {
    let tmp = project("A=1\nEXTRA=x\n", "A=\n");

    let out = run(tmp.path(), &["check", "--no-extra", "--format", "json"]);
    assert_eq!(out.status.code(), Some(1));

    let json: serde_json::Value = serde_json::from_str(&stdout(&out)).unwrap();
    assert_eq!(json["valid"], false);
    assert_eq!(json["summary"]["errors"], 1);
    assert_eq!(json["issues"][0]["rule"], "extra");
    assert_eq!(json["issues"][0]["line"], 2);
}

#[test]
fn check_required_and_strict_flags() {
    let tmp = project("A=\n", "A=\n");

    let relaxed = run(tmp.path(), &["check"]);
    assert!(relaxed.status.success());

    let strict = run(tmp.path(), &["check", "--strict"]);
    assert_eq!(strict.status.code(), Some(1));

    let required = run(tmp.path(), &["check", "-r", "A,B"]);
    let text = stdout(&required);
    assert!(text.contains("Required variable 'A' is empty"));
    assert!(text.contains("Missing required variable 'B'"));
}

#[test]
fn check_missing_env_file_fails_with_message() {
    let tmp = TempDir::new().unwrap();

    let out = run(tmp.path(), &["check", "absent.env"]);
    assert!(!out.status.success());
    assert!(stderr(&out).contains("File not found: absent.env"));
}

#[test]
fn check_reads_project_config() {
    let tmp = project("PORT=abc\n", "PORT=\n");
    fs::write(
        tmp.path().join("envcheck.toml"),
        "[check]\nrequired = [\"SECRET\"]\n\n[types]\nPORT = \"port\"\n",
    )
    .unwrap();

    let out = run(tmp.path(), &["check", "--format", "compact"]);
    assert_eq!(out.status.code(), Some(1));
    let text = stdout(&out);
    assert!(text.contains("[missing-required] Missing required variable 'SECRET'"));
    assert!(text.contains("[type-mismatch]"));
}

#[test]
fn check_uses_config_next_to_env_file() {
    let tmp = TempDir::new().unwrap();
    fs::create_dir(tmp.path().join(".git")).unwrap();
    let service = tmp.path().join("services/api");
    fs::create_dir_all(&service).unwrap();
    fs::write(service.join(".env"), "A=1\n").unwrap();
    fs::write(service.join("template.env"), "A=\nB=\n").unwrap();
    fs::write(
        service.join("envcheck.toml"),
        "[check]\nexample = \"template.env\"\n",
    )
    .unwrap();

    let out = run(tmp.path(), &["check", "services/api/.env", "--format", "compact"]);
    assert_eq!(out.status.code(), Some(1));
    assert!(stdout(&out).contains("Missing variable 'B'"), "{}", stdout(&out));
}

#[test]
fn check_pretty_output_renders_snippet() {
    let tmp = project("PORT=http\n", "# type: port\nPORT=\n");

    let out = run(tmp.path(), &["check", "--format", "pretty"]);
    assert_eq!(out.status.code(), Some(1));
    let text = stdout(&out);
    assert!(text.contains("type-mismatch"), "{text}");
    assert!(text.contains("PORT=http"), "{text}");
}

#[test]
fn compare_lists_differences() {
    let tmp = project("A=1\nC=\nD=4\n", "A=\nB=\nC=\n");

    let out = run(tmp.path(), &["compare", ".env", ".env.example", "--format", "json"]);
    assert_eq!(out.status.code(), Some(1));

    let json: serde_json::Value = serde_json::from_str(&stdout(&out)).unwrap();
    assert_eq!(json["missing"][0]["key"], "B");
    assert_eq!(json["extra"][0]["key"], "D");
    assert_eq!(json["empty"][0]["key"], "C");
}

#[test]
fn get_prints_value_or_fails() {
    let tmp = project("GREETING=\"hello world\"\n", "");

    let found = run(tmp.path(), &["get", "GREETING"]);
    assert!(found.status.success());
    assert_eq!(stdout(&found), "hello world\n");

    let missing = run(tmp.path(), &["get", "NOPE"]);
    assert_eq!(missing.status.code(), Some(1));
    assert!(stderr(&missing).contains("Variable 'NOPE' is not defined"));
}

#[test]
fn list_prints_keys_in_order() {
    let tmp = project("Z=1\nA=2\n# comment\nM=3\n", "");

    let out = run(tmp.path(), &["list"]);
    assert!(out.status.success());
    assert_eq!(stdout(&out), "Z\nA\nM\n");
}

#[test]
fn generate_applies_overrides() {
    let tmp = project("", "# Server\nHOST=localhost\nPORT=3000\n");

    let out = run(tmp.path(), &["generate", "--set", "PORT=8080", "--set", "NAME=x"]);
    assert!(out.status.success(), "stderr: {}", stderr(&out));
    assert_eq!(stdout(&out), "# Server\nHOST=localhost\nPORT=8080\n");
}

#[test]
fn generate_refuses_to_overwrite_without_force() {
    let tmp = project("KEEP=me\n", "A=1\n");

    let refused = run(tmp.path(), &["generate", "--output", ".env"]);
    assert!(!refused.status.success());
    assert_eq!(fs::read_to_string(tmp.path().join(".env")).unwrap(), "KEEP=me\n");

    let forced = run(tmp.path(), &["generate", "--output", ".env", "--force"]);
    assert!(forced.status.success());
    assert_eq!(fs::read_to_string(tmp.path().join(".env")).unwrap(), "A=1\n");
}

#[test]
fn init_creates_config_once() {
    let tmp = TempDir::new().unwrap();

    let first = run(tmp.path(), &["init"]);
    assert!(first.status.success());
    assert!(tmp.path().join("envcheck.toml").exists());

    let second = run(tmp.path(), &["init"]);
    assert!(!second.status.success());
    assert!(stderr(&second).contains("already exists"));
}

#[test]
fn list_types_mentions_every_type() {
    let tmp = TempDir::new().unwrap();
    let out = run(tmp.path(), &["list-types"]);
    assert!(out.status.success());
    let text = stdout(&out);
    for name in ["url", "port", "boolean", "email", "number", "integer", "json", "uuid"] {
        assert!(text.contains(name), "missing {name} in:\n{text}");
    }
}

#[test]
fn monorepo_scan() {
    let tmp = TempDir::new().unwrap();
    let api = tmp.path().join("apps/api");
    let web = tmp.path().join("apps/web");
    fs::create_dir_all(&api).unwrap();
    fs::create_dir_all(&web).unwrap();
    fs::write(api.join(".env.example"), "# type: port\nPORT=\n").unwrap();
    fs::write(api.join(".env"), "PORT=4000\n").unwrap();
    fs::write(web.join(".env.example"), "# type: url\nPORT=\nAPI=\n").unwrap();
    fs::write(web.join(".env"), "PORT=http://web\n").unwrap();

    let out = run(tmp.path(), &["monorepo", "--format", "json"]);
    assert_eq!(out.status.code(), Some(1));

    let json: serde_json::Value = serde_json::from_str(&stdout(&out)).unwrap();
    assert_eq!(json["summary"]["total"], 2);
    assert_eq!(json["summary"]["passed"], 1);
    assert_eq!(json["summary"]["failed"], 1);
    assert!(json["consistency"]["mismatches"]["PORT"].is_object());
}

#[test]
fn monorepo_mismatch_fails_only_under_strict() {
    let tmp = TempDir::new().unwrap();
    for (app, hint, value) in [("api", "port", "4000"), ("web", "url", "http://web")] {
        let dir = tmp.path().join("apps").join(app);
        fs::create_dir_all(&dir).unwrap();
        fs::write(dir.join(".env.example"), format!("# type: {hint}\nPORT=\n")).unwrap();
        fs::write(dir.join(".env"), format!("PORT={value}\n")).unwrap();
    }

    let relaxed = run(tmp.path(), &["monorepo"]);
    assert!(relaxed.status.success(), "stdout: {}", stdout(&relaxed));
    assert!(stdout(&relaxed).contains("Conflicting types for 'PORT'"));

    let strict = run(tmp.path(), &["monorepo", "--strict"]);
    assert_eq!(strict.status.code(), Some(1));

    let unchecked = run(tmp.path(), &["monorepo", "--strict", "--no-consistency"]);
    assert!(unchecked.status.success());
}
