// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Centralized default values for configuration.
//!
//! All default values are documented here for easy reference.
//! Individual config structs delegate to these via their `default_*` methods.

/// Name of the config file searched for by discovery.
pub const CONFIG_FILE: &str = "retest.toml";

/// Current config format version.
pub const CONFIG_VERSION: u32 = 1;

/// Default project layout.
pub mod project {
    /// Shared production-code directory.
    pub const SOURCE_DIR: &str = "src";

    /// Files whose content feeds every group's signature, in hashing order.
    pub fn config_files() -> Vec<String> {
        vec![
            "pyproject.toml".to_string(),
            "setup.cfg".to_string(),
            "tests/conftest.py".to_string(),
        ]
    }

    /// Transient directories never hashed.
    pub fn exclude() -> Vec<String> {
        vec![
            "__pycache__".to_string(),
            ".pytest_cache".to_string(),
            ".mypy_cache".to_string(),
            ".ruff_cache".to_string(),
            "*.egg-info".to_string(),
            ".retest".to_string(),
        ]
    }
}

/// Default persisted-state location.
pub mod state {
    /// State directory, relative to the project root.
    pub const DIR: &str = ".retest";

    /// Coverage data file inside the state directory.
    pub const COVERAGE_FILE: &str = ".coverage";

    /// Last run report inside the state directory.
    pub const LATEST_FILE: &str = "latest.json";
}

/// Default test groups: fast unit tests first, slow integration tests second.
pub mod groups {
    pub const UNIT_NAME: &str = "unit";
    pub const UNIT_PATH: &str = "tests/unit";
    pub const INTEGRATION_NAME: &str = "integration";
    pub const INTEGRATION_PATH: &str = "tests/integration";

    /// Default runner for groups that don't name one.
    pub const RUNNER: &str = "pytest";
}

/// Default coverage report commands for pytest projects.
pub mod coverage {
    pub fn report() -> Vec<String> {
        vec![
            "python -m coverage report".to_string(),
            "python -m coverage xml".to_string(),
        ]
    }
}

/// Template written by `retest init`.
pub const INIT_TEMPLATE: &str = r#"version = 1

[project]
source = "src"
config_files = ["pyproject.toml", "setup.cfg", "tests/conftest.py"]
exclude = ["__pycache__", ".pytest_cache", ".mypy_cache", ".ruff_cache", "*.egg-info", ".retest"]

[state]
dir = ".retest"

# Groups run in the order listed.
[[group]]
name = "unit"
path = "tests/unit"
runner = "pytest"

[[group]]
name = "integration"
path = "tests/integration"
runner = "pytest"
# timeout = 300

[coverage]
enabled = true
report = ["python -m coverage report", "python -m coverage xml"]
"#;
