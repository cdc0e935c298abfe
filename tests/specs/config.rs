//! Behavioral specs for configuration loading and validation.

use crate::prelude::*;

fn assert_config_error(config: &str, message: &str) {
    let project = Project::with_config(config);

    project
        .retest(&["run"])
        .assert()
        .code(2)
        .stderr(predicates::str::contains(message));

    assert!(project.runs().is_empty());
}

#[test]
fn invalid_toml_exits_2() {
    assert_config_error("version = \n", "retest.toml");
}

#[test]
fn unsupported_version_exits_2() {
    assert_config_error("version = 2\n", "unsupported config version 2");
}

#[test]
fn missing_version_exits_2() {
    assert_config_error("[state]\ndir = \".cache\"\n", "version");
}

#[test]
fn unknown_field_exits_2() {
    assert_config_error("version = 1\nparallel = true\n", "parallel");
}

#[test]
fn unknown_runner_exits_2() {
    assert_config_error(
        "version = 1\n\n[[group]]\nname = \"unit\"\npath = \"tests/unit\"\nrunner = \"nose\"\n",
        "unknown runner 'nose'",
    );
}

#[test]
fn custom_runner_requires_command() {
    assert_config_error(
        "version = 1\n\n[[group]]\nname = \"unit\"\npath = \"tests/unit\"\nrunner = \"custom\"\n",
        "requires `command`",
    );
}

#[test]
fn invalid_group_name_exits_2() {
    assert_config_error(
        "version = 1\n\n[[group]]\nname = \"unit tests\"\npath = \"tests/unit\"\n",
        "invalid group name",
    );
}

#[test]
fn duplicate_group_name_exits_2() {
    assert_config_error(
        "version = 1\n\n[[group]]\nname = \"unit\"\npath = \"a\"\n\n[[group]]\nname = \"unit\"\npath = \"b\"\n",
        "duplicate group name",
    );
}

#[test]
fn invalid_exclude_pattern_exits_2() {
    assert_config_error(
        "version = 1\n\n[project]\nexclude = [\"[unclosed\"]\n\n[[group]]\nname = \"unit\"\npath = \"tests/unit\"\nrunner = \"custom\"\ncommand = \"true\"\n",
        "[unclosed",
    );
}

#[test]
fn custom_state_dir() {
    let project = Project::with_config(
        r#"version = 1

[state]
dir = "build/retest-state"

[[group]]
name = "unit"
path = "tests/unit"
runner = "custom"
command = "true"

[coverage]
enabled = false
"#,
    );

    project.retest(&["run"]).assert().success();

    assert!(project.exists("build/retest-state/unit.sig"));
    assert!(project.exists("build/retest-state/latest.json"));
    assert!(!project.exists(".retest"));
}
