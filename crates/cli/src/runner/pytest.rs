// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! pytest runner.
//!
//! `python -m pytest <path> [--timeout=N] [--cov=<source> --cov-append --cov-report=]`
//!
//! Before the run, `python -c "import pytest, ..."` checks that pytest and
//! the plugins the invocation needs are importable.

use std::ffi::OsString;
use std::io;
use std::process::Command;

use super::{
    ExitContract, RunStatus, RunnerContext, RunnerError, TestRunner, execute, timeout_arg,
};
use crate::config::GroupConfig;

/// pytest exits with 5 when no tests were collected.
pub const PYTEST_NO_TESTS_COLLECTED: i32 = 5;

/// pytest's internal error (3) and usage error (4), which includes unknown
/// options from plugins that are not installed.
pub const PYTEST_TOOL_ERRORS: &[i32] = &[3, 4];

/// Interpreter used to launch pytest, overridable for virtualenvs.
const PYTHON_ENV: &str = "RETEST_PYTHON";
const DEFAULT_PYTHON: &str = "python";

#[derive(Debug, Default)]
pub struct PytestRunner {
    python: Option<OsString>,
}

impl PytestRunner {
    /// Use `python` instead of `$RETEST_PYTHON` or `python`.
    pub fn with_python(python: impl Into<OsString>) -> Self {
        Self {
            python: Some(python.into()),
        }
    }

    fn python(&self) -> OsString {
        self.python
            .clone()
            .or_else(|| std::env::var_os(PYTHON_ENV))
            .unwrap_or_else(|| DEFAULT_PYTHON.into())
    }

    /// Modules the invocation for `group` imports.
    pub fn required_modules(group: &GroupConfig, ctx: &RunnerContext) -> Vec<&'static str> {
        let mut modules = vec!["pytest"];
        if group.timeout.is_some() {
            modules.push("pytest_timeout");
        }
        if ctx.coverage_file.is_some() {
            modules.push("pytest_cov");
        }
        modules
    }

    /// Build the pytest invocation for `group`.
    pub fn command(&self, group: &GroupConfig, ctx: &RunnerContext) -> Command {
        let mut cmd = Command::new(self.python());
        cmd.current_dir(ctx.root)
            .args(["-m", "pytest"])
            .arg(&group.path);

        if group.timeout.is_some() {
            cmd.arg(format!("--timeout={}", timeout_arg(group)));
        }

        if let Some(coverage_file) = ctx.coverage_file {
            cmd.arg(format!("--cov={}", ctx.source.display()))
                .args(["--cov-append", "--cov-report="])
                .env("COVERAGE_FILE", coverage_file);
        }

        cmd.args(&group.args);
        cmd
    }

    fn preflight(&self, group: &GroupConfig, ctx: &RunnerContext) -> Result<(), RunnerError> {
        let import = format!("import {}", Self::required_modules(group, ctx).join(", "));
        let status = Command::new(self.python())
            .current_dir(ctx.root)
            .args(["-c", &import])
            .stdout(io::stderr())
            .status()
            .map_err(|source| RunnerError::Spawn {
                program: self.python().to_string_lossy().into_owned(),
                source,
            })?;

        if status.success() {
            Ok(())
        } else {
            Err(RunnerError::Preflight {
                program: "pytest".to_string(),
                check: format!("python -c \"{import}\""),
            })
        }
    }
}

impl TestRunner for PytestRunner {
    fn name(&self) -> &'static str {
        "pytest"
    }

    fn run(&self, group: &GroupConfig, ctx: &RunnerContext) -> Result<RunStatus, RunnerError> {
        self.preflight(group, ctx)?;
        let contract = ExitContract {
            empty: group.empty_exit_code.or(Some(PYTEST_NO_TESTS_COLLECTED)),
            tool_errors: PYTEST_TOOL_ERRORS,
        };
        execute(self.command(group, ctx), "pytest", contract)
    }
}
