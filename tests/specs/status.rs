//! Behavioral specs for `retest status`.

use crate::prelude::*;

#[test]
fn groups_are_stale_before_first_run() {
    let project = Project::python();

    project
        .retest(&["status"])
        .assert()
        .success()
        .stdout(predicates::str::contains("unit: stale, never run"))
        .stdout(predicates::str::contains("integration: stale, never run"));

    assert!(project.runs().is_empty());
    assert!(!project.exists(".retest"));
}

#[test]
fn groups_are_fresh_after_passing_run() {
    let project = Project::python();
    project.retest(&["run"]).assert().success();

    project
        .retest(&["status"])
        .assert()
        .success()
        .stdout(predicates::str::contains("unit: fresh"))
        .stdout(predicates::str::contains("integration: fresh"));
}

#[test]
fn status_reports_changed_inputs() {
    let project = Project::python();
    project.retest(&["run"]).assert().success();
    project.file("tests/unit/test_new.py", "def test_new(): pass\n");

    project
        .retest(&["status"])
        .assert()
        .success()
        .stdout(predicates::str::contains("unit: stale, inputs changed"))
        .stdout(predicates::str::contains("integration: fresh"));

    assert_eq!(project.runs(), ["unit", "integration"]);
}

#[test]
fn status_json() {
    let project = Project::python();
    project.retest(&["run", "--group", "unit"]).assert().success();

    let output = project.retest(&["status", "-o", "json"]).output().unwrap();

    assert!(output.status.success());
    let status: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    let groups = status["groups"].as_array().unwrap();
    assert_eq!(groups.len(), 2);
    assert_eq!(groups[0]["name"], "unit");
    assert_eq!(groups[0]["fresh"], true);
    assert_eq!(groups[0]["signature"], groups[0]["stored"]);
    assert_eq!(groups[1]["fresh"], false);
    assert_eq!(groups[1]["reason"], "never_run");
}
