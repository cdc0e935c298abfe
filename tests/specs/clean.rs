//! Behavioral specs for `retest clean`.

use crate::prelude::*;

#[test]
fn clean_forgets_every_group() {
    let project = Project::python();
    project.retest(&["run"]).assert().success();

    project
        .retest(&["clean"])
        .assert()
        .success()
        .stderr(predicates::str::contains("cleaned unit"));

    for group in ["unit", "integration"] {
        assert!(!project.exists(&format!(".retest/{group}.sig")));
        assert!(!project.exists(&format!(".retest/{group}.passed")));
    }

    project.retest(&["run"]).assert().success();
    assert_eq!(project.runs().len(), 4);
}

#[test]
fn clean_single_group() {
    let project = Project::python();
    project.retest(&["run"]).assert().success();

    project
        .retest(&["clean", "--group", "integration"])
        .assert()
        .success();

    assert!(project.exists(".retest/unit.sig"));
    assert!(!project.exists(".retest/integration.sig"));

    project.retest(&["run"]).assert().success();
    assert_eq!(project.runs(), ["unit", "integration", "integration"]);
}

#[test]
fn clean_without_state_succeeds() {
    let project = Project::python();
    project.retest(&["clean"]).assert().success();
}

#[test]
fn clean_unknown_group_exits_2() {
    let project = Project::python();

    project
        .retest(&["clean", "--group", "smoke"])
        .assert()
        .code(2)
        .stderr(predicates::str::contains("unknown group 'smoke'"));
}
