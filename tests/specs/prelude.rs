//! Test helpers for behavioral specifications.
//!
//! Provides a small DSL for laying out a Python-style project and driving the
//! retest binary against it. Groups use the `custom` runner with plain shell
//! commands, so no Python toolchain is needed.

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![allow(dead_code)]

pub use assert_cmd::prelude::*;
pub use predicates;
pub use predicates::prelude::PredicateBooleanExt;
use std::path::Path;
use std::process::Command;
use tempfile::TempDir;

/// Returns a Command configured to run the retest binary
pub fn retest_cmd() -> Command {
    let mut cmd = Command::new(assert_cmd::cargo::cargo_bin!("retest"));
    cmd.env_remove("RETEST_CONFIG")
        .env_remove("RETEST_LOG")
        .env("NO_COLOR", "1");
    cmd
}

/// Config with two custom-runner groups that log each run to `runs.log`.
pub const TWO_GROUPS: &str = r#"version = 1

[project]
source = "src"
config_files = ["pyproject.toml"]

[[group]]
name = "unit"
path = "tests/unit"
runner = "custom"
command = "echo {group} >> runs.log"

[[group]]
name = "integration"
path = "tests/integration"
runner = "custom"
command = "echo {group} >> runs.log"

[coverage]
enabled = false
"#;

/// Temporary project directory, bounded by its own `.git` so discovery
/// never wanders into the surrounding filesystem.
pub struct Project {
    dir: TempDir,
}

impl Project {
    pub fn empty() -> Self {
        let dir = TempDir::new().unwrap();
        std::fs::create_dir(dir.path().join(".git")).unwrap();
        Self { dir }
    }

    /// Source, two test directories and `pyproject.toml`, with `config`.
    pub fn with_config(config: &str) -> Self {
        let project = Self::empty();
        project.file("src/pkg/__init__.py", "");
        project.file("src/pkg/app.py", "def answer():\n    return 42\n");
        project.file("tests/unit/test_app.py", "def test_answer(): pass\n");
        project.file("tests/integration/test_flow.py", "def test_flow(): pass\n");
        project.file("pyproject.toml", "[project]\nname = \"pkg\"\n");
        project.config(config);
        project
    }

    /// Standard two-group project.
    pub fn python() -> Self {
        Self::with_config(TWO_GROUPS)
    }

    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    /// Write a file, creating parent directories.
    pub fn file(&self, rel: &str, content: &str) {
        let path = self.dir.path().join(rel);
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).unwrap();
        }
        std::fs::write(path, content).unwrap();
    }

    pub fn config(&self, content: &str) {
        self.file("retest.toml", content);
    }

    pub fn remove(&self, rel: &str) {
        std::fs::remove_file(self.dir.path().join(rel)).unwrap();
    }

    pub fn read(&self, rel: &str) -> String {
        std::fs::read_to_string(self.dir.path().join(rel)).unwrap()
    }

    pub fn exists(&self, rel: &str) -> bool {
        self.dir.path().join(rel).exists()
    }

    /// `retest <args>` in the project directory.
    pub fn retest(&self, args: &[&str]) -> Command {
        let mut cmd = retest_cmd();
        cmd.args(args).current_dir(self.path());
        cmd
    }

    /// Groups that have run so far, in order, from `runs.log`.
    pub fn runs(&self) -> Vec<String> {
        if !self.exists("runs.log") {
            return Vec::new();
        }
        self.read("runs.log").lines().map(str::to_string).collect()
    }
}
