//! CLI integration tests against throwaway SQLite databases.

use std::fs;
use std::io::Cursor;
use std::path::Path;

use assert_cmd::cargo::cargo_bin_cmd;
use assert_cmd::Command;
use calamine::{open_workbook_auto_from_rs, Reader};
use crm_dashboard::testkit::database::CrmFixture;
use predicates::prelude::*;
use tempfile::TempDir;

/// The binary, isolated from the caller's home, `.env`, and database settings.
fn crm_dashboard(dir: &Path) -> Command {
    let mut cmd = cargo_bin_cmd!("crm-dashboard");
    cmd.current_dir(dir)
        .env("HOME", dir)
        .env_remove("RUST_LOG")
        .env_remove("DB_USER")
        .env_remove("DB_PASS")
        .env_remove("DB_HOST")
        .env_remove("DB_PORT")
        .env_remove("DB_NAME");
    cmd
}

fn seeded(dir: &TempDir) -> (CrmFixture, String) {
    let path = dir.path().join("crm.db");
    let mut fixture = CrmFixture::file(&path);
    fixture.seed_sample();
    (fixture, path.display().to_string())
}

#[test]
fn help_lists_commands() {
    let dir = TempDir::new().unwrap();
    crm_dashboard(dir.path())
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("show"))
        .stdout(predicate::str::contains("export"))
        .stdout(predicate::str::contains("watch"))
        .stdout(predicate::str::contains("queries"));
}

#[test]
fn version_names_the_binary() {
    let dir = TempDir::new().unwrap();
    crm_dashboard(dir.path())
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("crm-dashboard"));
}

#[test]
fn queries_lists_the_catalog() {
    let dir = TempDir::new().unwrap();
    crm_dashboard(dir.path())
        .args(["queries", "--dialect", "sqlite", "-v"])
        .assert()
        .success()
        .stdout(predicate::str::contains("pipeline_stage_counts"))
        .stdout(predicate::str::contains("strftime('%Y-%m', date_order)"));
}

#[test]
fn queries_json_uses_configured_backend() {
    let dir = TempDir::new().unwrap();
    let output = crm_dashboard(dir.path())
        .args(["--json", "queries"])
        .output()
        .unwrap();

    assert!(output.status.success());
    let value: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(value["dialect"], "postgres");
    assert_eq!(value["queries"].as_array().unwrap().len(), 6);
}

#[test]
fn show_renders_tiles_charts_and_report() {
    let dir = TempDir::new().unwrap();
    let (_fixture, url) = seeded(&dir);

    crm_dashboard(dir.path())
        .env("DATABASE_URL", &url)
        .args(["--color", "never", "show"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Total Leads"))
        .stdout(predicate::str::contains("40.00%"))
        .stdout(predicate::str::contains("₹ 380.00"))
        .stdout(predicate::str::contains("Sales Pipeline"))
        .stdout(predicate::str::contains("2024-02"))
        .stdout(predicate::str::contains("LEAD_NAME"))
        .stdout(predicate::str::contains("Globex"));
}

#[test]
fn show_json_emits_one_document() {
    let dir = TempDir::new().unwrap();
    let (_fixture, url) = seeded(&dir);

    let output = crm_dashboard(dir.path())
        .env("DATABASE_URL", &url)
        .arg("--json")
        .output()
        .unwrap();

    assert!(output.status.success());
    let value: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(value["command"], "show");
    assert_eq!(value["snapshot"]["total_leads"], 5);
    assert_eq!(value["tiles"][1]["value"], "40.00%");
    assert_eq!(value["report"].as_array().unwrap().len(), 5);
}

#[test]
fn show_without_schema_fails_with_generic_notice() {
    let dir = TempDir::new().unwrap();
    let empty = dir.path().join("empty.db");

    crm_dashboard(dir.path())
        .env("DATABASE_URL", empty.display().to_string())
        .arg("show")
        .assert()
        .failure()
        .stdout(predicate::str::contains("Total Leads").not())
        .stderr(predicate::str::contains("Could not load dashboard data."));

    let log = fs::read_to_string(dir.path().join("crm_app.log")).unwrap();
    assert!(log.contains("Failed to load dashboard data"));
    assert!(log.contains("total_leads"));
}

#[test]
fn export_writes_a_two_sheet_workbook() {
    let dir = TempDir::new().unwrap();
    let (_fixture, url) = seeded(&dir);
    let target = dir.path().join("out").join("report.xlsx");

    crm_dashboard(dir.path())
        .env("DATABASE_URL", &url)
        .args(["export", "--output"])
        .arg(&target)
        .assert()
        .success()
        .stdout(predicate::str::contains("Exported"));

    let bytes = fs::read(&target).unwrap();
    let workbook = open_workbook_auto_from_rs(Cursor::new(bytes)).unwrap();
    assert_eq!(workbook.sheet_names(), vec!["Summary", "CRM Report"]);
}

#[test]
fn export_csv_by_extension() {
    let dir = TempDir::new().unwrap();
    let (_fixture, url) = seeded(&dir);

    crm_dashboard(dir.path())
        .env("DATABASE_URL", &url)
        .args(["export", "-o", "leads.csv"])
        .assert()
        .success();

    let text = fs::read_to_string(dir.path().join("leads.csv")).unwrap();
    assert!(text.starts_with("LEAD_ID,"));
    assert_eq!(text.lines().count(), 6);
}

#[test]
fn check_reports_lead_count() {
    let dir = TempDir::new().unwrap();
    let (_fixture, url) = seeded(&dir);

    crm_dashboard(dir.path())
        .env("DATABASE_URL", &url)
        .arg("check")
        .assert()
        .success()
        .stdout(predicate::str::contains("Database reachable"))
        .stdout(predicate::str::contains("5"));
}

#[test]
fn quiet_check_prints_nothing_on_success() {
    let dir = TempDir::new().unwrap();
    let (_fixture, url) = seeded(&dir);

    crm_dashboard(dir.path())
        .env("DATABASE_URL", &url)
        .args(["--quiet", "check"])
        .assert()
        .success()
        .stdout(predicate::str::is_empty());
}

#[test]
fn malformed_config_is_reported_with_location() {
    let dir = TempDir::new().unwrap();
    let config = dir.path().join("config.toml");
    fs::write(&config, "[database]\nport = \"nope\"\n").unwrap();

    crm_dashboard(dir.path())
        .arg("--config")
        .arg(&config)
        .arg("queries")
        .assert()
        .failure()
        .stderr(predicate::str::contains("invalid configuration"));
}

#[test]
fn unsupported_scheme_fails_cleanly() {
    let dir = TempDir::new().unwrap();

    crm_dashboard(dir.path())
        .env("DATABASE_URL", "mysql://root@localhost/crm")
        .arg("show")
        .assert()
        .failure()
        .stderr(predicate::str::contains("unsupported scheme"));
}
