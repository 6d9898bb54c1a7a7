//! Tests for the `wirescope` binary

use super::common::{wirescope_command, SNAPSHOT_YAML};
use assert_cmd::prelude::*;
use predicates::prelude::*;
use std::fs;
use std::path::PathBuf;
use tempfile::TempDir;

fn write_project(temp: &TempDir) -> PathBuf {
    fs::write(temp.path().join("wiring.yaml"), SNAPSHOT_YAML).unwrap();
    let config = temp.path().join("config.yaml");
    fs::write(&config, "show_undeclared: true\n").unwrap();
    config
}

#[test]
fn test_report_renders_all_sections() {
    let temp = TempDir::new().unwrap();
    let config = write_project(&temp);

    wirescope_command()
        .arg("report")
        .arg("--config")
        .arg(&config)
        .current_dir(temp.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("1 MODULES with 2 bindings"))
        .stdout(predicate::str::contains("1 OVERRIDING MODULES with 1 bindings"))
        .stdout(predicate::str::contains("1 UNDECLARED bindings"))
        .stdout(predicate::str::contains("BINDING CHAINS"))
        .stdout(predicate::str::contains(
            "Repository --[linked]--> MissingRepository       *CHAIN REMOVED",
        ))
        .stdout(predicate::str::contains("Service --[linked]--> MockServiceImpl"));
}

#[test]
fn test_report_respects_hidden_sections() {
    let temp = TempDir::new().unwrap();
    fs::write(temp.path().join("wiring.yaml"), SNAPSHOT_YAML).unwrap();
    let config = temp.path().join("config.yaml");
    fs::write(&config, "show_undeclared: false\nshow_chains: false\n").unwrap();

    wirescope_command()
        .args(["report", "--config"])
        .arg(&config)
        .current_dir(temp.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("MODULES with"))
        .stdout(predicate::str::contains("UNDECLARED").not())
        .stdout(predicate::str::contains("BINDING CHAINS").not());
}

#[test]
fn test_report_json() {
    let temp = TempDir::new().unwrap();
    let config = write_project(&temp);

    let output = wirescope_command()
        .args(["report", "--json", "--config"])
        .arg(&config)
        .current_dir(temp.path())
        .output()
        .unwrap();

    assert!(output.status.success());
    let json: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(json["modules"]["module_count"], 1);
    assert_eq!(json["undeclared"].as_array().unwrap().len(), 1);
    assert_eq!(json["chains"].as_array().unwrap().len(), 2);
}

#[test]
fn test_chains_command() {
    let temp = TempDir::new().unwrap();
    let config = write_project(&temp);

    let output = wirescope_command()
        .args(["chains", "--config"])
        .arg(&config)
        .current_dir(temp.path())
        .output()
        .unwrap();

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    let lines: Vec<&str> = stdout.lines().collect();
    assert_eq!(
        lines,
        vec![
            "Repository --[linked]--> MissingRepository       *CHAIN REMOVED",
            "Service --[linked]--> MockServiceImpl",
        ]
    );
}

#[test]
fn test_report_without_snapshot() {
    let temp = TempDir::new().unwrap();
    let config = temp.path().join("config.yaml");
    fs::write(&config, "{}\n").unwrap();

    wirescope_command()
        .args(["report", "--config"])
        .arg(&config)
        .current_dir(temp.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("Could not find wiring.yaml"))
        .stderr(predicate::str::contains("help:"));
}

#[test]
fn test_report_invalid_snapshot() {
    let temp = TempDir::new().unwrap();
    let snapshot = temp.path().join("broken.yaml");
    fs::write(&snapshot, "bindings: 42\n").unwrap();
    let config = temp.path().join("config.yaml");
    fs::write(&config, "{}\n").unwrap();

    wirescope_command()
        .arg("report")
        .arg(&snapshot)
        .arg("--config")
        .arg(&config)
        .assert()
        .failure()
        .stderr(predicate::str::contains("Failed to parse snapshot"));
}

#[test]
fn test_config_init_and_show() {
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("wirescope").join("config.yaml");

    wirescope_command()
        .args(["config", "init", "--path"])
        .arg(&path)
        .assert()
        .success();
    assert!(path.exists());

    wirescope_command()
        .args(["config", "init", "--path"])
        .arg(&path)
        .assert()
        .failure()
        .stderr(predicate::str::contains("already exists"));

    wirescope_command()
        .args(["config", "show", "--path"])
        .arg(&path)
        .assert()
        .success()
        .stdout(predicate::str::contains("show_chains: true"));
}
