//! CLI smoke tests for the projects-cli binary
//!
//! These tests run the real binary against throwaway SQLite databases and
//! check output formats and exit codes.

use std::path::{Path, PathBuf};
use std::process::{Command, Output, Stdio};
use tempfile::TempDir;

/// Helper to run the projects-cli binary with given arguments
fn run_cli(args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_projects-cli"))
        .args(args)
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .output()
        .expect("Failed to execute projects-cli")
}

/// Write a config whose home_dir and database live inside `dir`.
fn write_config(dir: &Path, extra: &str) -> PathBuf {
    let home = dir.to_string_lossy().replace('\\', "/");
    let path = dir.join("config.yaml");
    let yaml = format!(
        r#"
home_dir: "{home}"

database:
  url: "sqlite://database/projects.db?mode=rwc"

logging:
  default:
    console_level: warn
    file: ""
{extra}"#
    );
    std::fs::write(&path, yaml).expect("Failed to write config");
    path
}

fn run_with_config(config: &Path, args: &[&str]) -> Output {
    let mut full = vec!["--config", config.to_str().unwrap()];
    full.extend_from_slice(args);
    run_cli(&full)
}

fn stdout_json(output: &Output) -> serde_json::Value {
    serde_json::from_slice(&output.stdout).unwrap_or_else(|e| {
        panic!(
            "stdout is not JSON ({e}): {}\nstderr: {}",
            String::from_utf8_lossy(&output.stdout),
            String::from_utf8_lossy(&output.stderr)
        )
    })
}

#[test]
fn test_cli_help_command() {
    let output = run_cli(&["--help"]);

    assert!(output.status.success(), "Help command should succeed");

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("Usage:"), "Should contain usage information");
    for sub in ["check", "list", "get", "create", "update", "delete", "share", "unshare"] {
        assert!(stdout.contains(sub), "Should contain '{sub}' subcommand");
    }
    assert!(stdout.contains("--config"), "Should mention config option");
    assert!(stdout.contains("--user"), "Should mention user option");
}

#[test]
fn test_cli_version_command() {
    let output = run_cli(&["--version"]);

    assert!(output.status.success(), "Version command should succeed");

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("projects-cli"), "Should contain binary name");
    assert!(
        stdout.chars().any(|c| c.is_ascii_digit()),
        "Should contain version numbers"
    );
}

#[test]
fn test_cli_invalid_command() {
    let output = run_cli(&["invalid-command"]);

    assert!(!output.status.success(), "Invalid command should fail");

    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(
        stderr.contains("error") || stderr.contains("unrecognized"),
        "Should contain error message about invalid command"
    );
}

#[test]
fn test_cli_config_validation_missing_file() {
    let output = run_cli(&["--config", "/nonexistent/config.yaml", "check"]);

    assert!(!output.status.success(), "Should fail with missing config");

    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(
        stderr.contains("Config file not found"),
        "Should mention config file issue: {}",
        stderr
    );
}

#[test]
fn test_cli_config_validation_invalid_yaml() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let config_path = temp_dir.path().join("invalid.yaml");
    std::fs::write(&config_path, "invalid: yaml: content: [unclosed")
        .expect("Failed to write file");

    let output = run_with_config(&config_path, &["check"]);

    assert!(!output.status.success(), "Should fail with invalid YAML");
}

#[test]
fn test_cli_check_and_print_config() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let config = write_config(temp_dir.path(), "");

    let output = run_with_config(&config, &["check"]);
    assert!(
        output.status.success(),
        "check should pass: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    assert!(String::from_utf8_lossy(&output.stdout).contains("Configuration check passed"));
    assert!(temp_dir.path().join("database/projects.db").exists());

    let output = run_with_config(&config, &["--print-config"]);
    assert!(output.status.success());
    assert!(String::from_utf8_lossy(&output.stdout).contains("database:"));
}

#[test]
fn test_cli_project_command_requires_user() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let config = write_config(temp_dir.path(), "");

    let output = run_with_config(&config, &["list"]);

    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("--user"));
}

#[test]
fn test_cli_mock_create_prints_project() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let config = write_config(temp_dir.path(), "");

    let output = run_with_config(
        &config,
        &["--mock", "--user", "7", "create", "--name", "  Apollo  "],
    );

    assert!(output.status.success());
    let project = stdout_json(&output);
    assert_eq!(project["name"], "Apollo");
    assert_eq!(project["owner_id"], 7);
    assert_eq!(project["collaborators"], serde_json::json!([]));
    assert!(project["description"].is_null());
    assert!(!temp_dir.path().join("database/projects.db").exists());
}

#[test]
fn test_cli_sharing_flow_across_invocations() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let config = write_config(temp_dir.path(), "");

    let created = run_with_config(
        &config,
        &["-u", "1", "create", "--name", "Apollo", "--description", "launch"],
    );
    assert!(created.status.success());
    let id = stdout_json(&created)["id"].as_u64().unwrap().to_string();

    // Stranger cannot see it
    let output = run_with_config(&config, &["-u", "2", "get", &id]);
    assert_eq!(output.status.code(), Some(4));
    let err: serde_json::Value = serde_json::from_slice(
        output.stderr.split(|b| *b == b'\n').find(|l| l.starts_with(b"{")).unwrap(),
    )
    .unwrap();
    assert_eq!(err["error"], "not_found");

    let shared = run_with_config(&config, &["-u", "1", "share", &id, "2"]);
    assert!(shared.status.success());
    assert_eq!(stdout_json(&shared)["collaborators"], serde_json::json!([2]));

    let listed = run_with_config(&config, &["-u", "2", "list"]);
    assert!(listed.status.success());
    let listed = stdout_json(&listed);
    assert_eq!(listed["total"], 1);
    assert_eq!(listed["projects"][0]["name"], "Apollo");

    // Collaborator may view but not edit
    let output = run_with_config(&config, &["-u", "2", "update", &id, "--name", "Mercury"]);
    assert_eq!(output.status.code(), Some(5));

    let output = run_with_config(&config, &["-u", "1", "share", &id, "1"]);
    assert_eq!(output.status.code(), Some(3));

    let unshared = run_with_config(&config, &["-u", "1", "unshare", &id, "2"]);
    assert!(unshared.status.success());
    assert_eq!(stdout_json(&unshared)["collaborators"], serde_json::json!([]));

    let deleted = run_with_config(&config, &["-u", "1", "delete", &id]);
    assert!(deleted.status.success());
    assert_eq!(stdout_json(&deleted)["deleted"], true);

    let output = run_with_config(&config, &["-u", "1", "get", &id]);
    assert_eq!(output.status.code(), Some(4));
}

#[test]
fn test_cli_module_config_limits_names() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let config = write_config(
        temp_dir.path(),
        "\nmodules:\n  projects:\n    max_name_length: 5\n",
    );

    let output = run_with_config(&config, &["--mock", "-u", "1", "create", "--name", "Apollo 11"]);

    assert_eq!(output.status.code(), Some(3));
    assert!(String::from_utf8_lossy(&output.stderr).contains("invalid_input"));
}
