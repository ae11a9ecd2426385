use std::path::Path;

use assert_cmd::Command;
use predicates::prelude::*;

/// A farthing command with its home redirected into a temp dir, so
/// settings and data never touch the real user profile.
fn farthing(home: &Path) -> Command {
    let mut cmd = Command::cargo_bin("farthing").unwrap();
    cmd.env("HOME", home);
    cmd.env_remove("XDG_CONFIG_HOME");
    cmd.env_remove("XDG_DATA_HOME");
    cmd.env_remove("FARTHING_DB");
    cmd
}

fn data_dir(home: &Path) -> std::path::PathBuf {
    home.join("data")
}

fn init(home: &Path) {
    farthing(home)
        .arg("init")
        .arg("--data-dir")
        .arg(data_dir(home))
        .assert()
        .success()
        .stdout(predicate::str::contains("Initialized farthing at"));
}

fn load_demo(home: &Path) {
    farthing(home)
        .arg("demo")
        .assert()
        .success()
        .stdout(predicate::str::contains("Demo data loaded!"));
}

#[test]
fn init_creates_database_and_settings() {
    let home = tempfile::tempdir().unwrap();
    init(home.path());

    assert!(data_dir(home.path()).join("farthing.db").exists());
    assert!(home
        .path()
        .join(".config")
        .join("farthing")
        .join("settings.json")
        .exists());
}

#[test]
fn demo_is_idempotent() {
    let home = tempfile::tempdir().unwrap();
    init(home.path());
    load_demo(home.path());

    farthing(home.path())
        .arg("demo")
        .assert()
        .success()
        .stdout(predicate::str::contains("already loaded"));
}

#[test]
fn demo_requires_init() {
    let home = tempfile::tempdir().unwrap();
    farthing(home.path())
        .arg("demo")
        .assert()
        .failure()
        .stderr(predicate::str::contains("farthing init"));
}

#[test]
fn show_prints_full_dashboard() {
    let home = tempfile::tempdir().unwrap();
    init(home.path());
    load_demo(home.path());

    farthing(home.path())
        .args(["show", "1"])
        .assert()
        .success()
        .stdout(predicate::str::contains("User identified: 1"))
        .stdout(predicate::str::contains("Latest transactions"))
        .stdout(predicate::str::contains("Summary by type"))
        .stdout(predicate::str::contains("Expenses by category"))
        .stdout(predicate::str::contains("Monthly trend"))
        .stdout(predicate::str::contains("$"));
}

#[test]
fn show_unknown_user_reports_no_data() {
    let home = tempfile::tempdir().unwrap();
    init(home.path());
    load_demo(home.path());

    farthing(home.path())
        .args(["show", "999"])
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "No transactions found for this user.",
        ))
        .stdout(predicate::str::contains("Latest transactions").not());
}

#[test]
fn show_rejects_non_integer_user() {
    let home = tempfile::tempdir().unwrap();
    init(home.path());

    farthing(home.path())
        .args(["show", "abc"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("is not an integer"));
}

#[test]
fn show_without_database_hints_init() {
    let home = tempfile::tempdir().unwrap();
    farthing(home.path())
        .args(["show", "1"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("farthing init"));
}

#[test]
fn status_reports_counts() {
    let home = tempfile::tempdir().unwrap();
    init(home.path());
    load_demo(home.path());

    farthing(home.path())
        .arg("status")
        .assert()
        .success()
        .stdout(predicate::str::contains("Users:"))
        .stdout(predicate::str::contains("Transactions:"))
        .stdout(predicate::str::contains("Date range:"));
}

#[test]
fn status_without_database_suggests_init() {
    let home = tempfile::tempdir().unwrap();
    farthing(home.path())
        .arg("status")
        .assert()
        .success()
        .stdout(predicate::str::contains("Database not found"));
}

#[test]
fn db_env_var_overrides_settings_path() {
    let home = tempfile::tempdir().unwrap();
    init(home.path());
    load_demo(home.path());

    // Point the override at a path with no database: reads must fail
    // even though the settings-configured database exists.
    farthing(home.path())
        .env("FARTHING_DB", home.path().join("nowhere.db"))
        .args(["show", "1"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("farthing init"));

    farthing(home.path())
        .env("FARTHING_DB", home.path().join("nowhere.db"))
        .arg("status")
        .assert()
        .success()
        .stdout(predicate::str::contains("FARTHING_DB"));
}

#[test]
fn no_subcommand_prints_quick_start() {
    let home = tempfile::tempdir().unwrap();
    farthing(home.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("Quick start"));
}

#[test]
fn completions_cover_subcommands() {
    let home = tempfile::tempdir().unwrap();
    farthing(home.path())
        .args(["completions", "bash"])
        .assert()
        .success()
        .stdout(predicate::str::contains("farthing"))
        .stdout(predicate::str::contains("serve"));
}
