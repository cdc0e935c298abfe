//! Behavioral specs for `retest init`.

use crate::prelude::*;

#[test]
fn init_creates_retest_toml_in_current_directory() {
    let project = Project::empty();

    project
        .retest(&["init"])
        .assert()
        .success()
        .stderr(predicates::str::contains("Created retest.toml"));

    assert!(project.exists("retest.toml"));
}

#[test]
fn init_refuses_to_overwrite_without_force() {
    let project = Project::empty();
    project.file("retest.toml", "version = 1\n# existing\n");

    project
        .retest(&["init"])
        .assert()
        .code(2)
        .stderr(predicates::str::contains("already exists"))
        .stderr(predicates::str::contains("--force"));

    assert_eq!(project.read("retest.toml"), "version = 1\n# existing\n");
}

#[test]
fn init_force_overwrites_existing_config() {
    let project = Project::empty();
    project.file("retest.toml", "version = 1\n# existing\n");

    project.retest(&["init", "--force"]).assert().success();

    assert!(project.read("retest.toml").contains("[[group]]"));
}

#[test]
fn generated_config_loads() {
    let project = Project::empty();
    project.retest(&["init"]).assert().success();

    project
        .retest(&["status"])
        .assert()
        .success()
        .stdout(predicates::str::contains("unit: stale, never run"))
        .stdout(predicates::str::contains("integration: stale, never run"));
}
