//! Behavioral specs for `retest report`.

use crate::prelude::*;

#[test]
fn report_without_run_says_so() {
    let project = Project::python();

    project
        .retest(&["report"])
        .assert()
        .success()
        .stdout("No run recorded.\n");
}

#[test]
fn report_without_run_json_is_empty() {
    let project = Project::python();

    let output = project.retest(&["report", "-o", "json"]).output().unwrap();

    assert!(output.status.success());
    let report: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(report["groups"].as_array().unwrap().len(), 0);
}

#[test]
fn report_replays_last_run_without_running() {
    let project = Project::python();
    project.retest(&["run"]).assert().success();

    project
        .retest(&["report"])
        .assert()
        .success()
        .stdout(predicates::str::contains("unit: passed"))
        .stdout(predicates::str::contains("PASS: 2 of 2 groups ran"));

    assert_eq!(project.runs(), ["unit", "integration"]);
}

#[test]
fn report_json_matches_latest_file() {
    let project = Project::python();
    project.retest(&["run"]).assert().success();

    let output = project.retest(&["report", "-o", "json"]).output().unwrap();

    let printed: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    let saved: serde_json::Value =
        serde_json::from_str(&project.read(".retest/latest.json")).unwrap();
    assert_eq!(printed, saved);
}

#[test]
fn corrupt_latest_file_is_environment_error() {
    let project = Project::python();
    project.file(".retest/latest.json", "{ nope");

    project
        .retest(&["report"])
        .assert()
        .code(3)
        .stderr(predicates::str::contains("latest.json"));
}

fn latest(project: &Project) -> serde_json::Value {
    serde_json::from_str(&project.read(".retest/latest.json")).unwrap()
}

#[test]
fn environment_error_is_recorded_as_failed_run() {
    let project = Project::with_config(
        r#"version = 1

[[group]]
name = "unit"
path = "tests/unit"
runner = "custom"
command = "echo {group} >> runs.log"

[[group]]
name = "integration"
path = "tests/integration"
runner = "custom"
command = "retest-no-such-program-xyz"

[coverage]
enabled = false
"#,
    );

    project
        .retest(&["run"])
        .assert()
        .code(3)
        .stdout(predicates::str::contains("integration: ERROR:"))
        .stdout(predicates::str::contains("FAIL: 1 of 2 groups ran"));

    let report = latest(&project);
    assert_eq!(report["passed"], false);
    assert_eq!(report["groups"][0]["outcome"], "passed");
    assert_eq!(report["groups"][1]["name"], "integration");
    assert_eq!(report["groups"][1]["outcome"], "error");
    assert!(
        report["groups"][1]["error"]
            .as_str()
            .unwrap()
            .contains("not available")
    );
}

#[test]
fn failed_coverage_report_is_recorded_as_failed_run() {
    let project = Project::with_config(
        r#"version = 1

[[group]]
name = "unit"
path = "tests/unit"
runner = "custom"
command = "echo {group} >> \"$COVERAGE_FILE\""

[coverage]
report = ["exit 4"]
"#,
    );

    project.retest(&["run"]).assert().code(1);

    let report = latest(&project);
    assert_eq!(report["passed"], false);
    assert_eq!(report["groups"][0]["outcome"], "passed");
}
