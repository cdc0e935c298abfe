// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Delegated test runners.
//!
//! A runner executes one group's tests and maps the process exit status
//! through its exit-code contract into a [`RunStatus`]. Output is passed
//! through to the terminal untouched.

mod custom;
mod pytest;

pub use custom::CustomRunner;
pub use pytest::PytestRunner;

use std::io;
use std::path::Path;
use std::process::{Command, ExitStatus};
use std::sync::Arc;

use thiserror::Error;
use tracing::debug;

use crate::config::GroupConfig;

/// Names accepted in a group's `runner` field.
pub const RUNNER_NAMES: &[&str] = &["pytest", "custom"];

/// Shell exit codes meaning the command could not be executed or found.
const SHELL_CANNOT_EXECUTE: i32 = 126;
const SHELL_NOT_FOUND: i32 = 127;

/// Result of one group execution, as interpreted by its runner.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunStatus {
    /// All collected tests passed.
    Passed,
    /// The runner found no applicable tests. Counts as a pass.
    EmptyCollection,
    /// Tests failed or timed out. `code` is `None` when killed by a signal.
    Failed { code: Option<i32> },
}

impl RunStatus {
    pub fn is_success(self) -> bool {
        matches!(self, RunStatus::Passed | RunStatus::EmptyCollection)
    }
}

/// The runner itself could not be used.
#[derive(Debug, Error)]
pub enum RunnerError {
    #[error("failed to start {program}: {source}")]
    Spawn {
        program: String,
        #[source]
        source: io::Error,
    },

    #[error("{program} is not available (exit code {code})")]
    Unavailable { program: String, code: i32 },

    #[error("{program} is not available: `{check}` failed")]
    Preflight { program: String, check: String },
}

/// Inputs shared by every runner invocation.
pub struct RunnerContext<'a> {
    /// Project root; runners execute with this as working directory.
    pub root: &'a Path,
    /// Shared source directory, relative to `root`.
    pub source: &'a Path,
    /// Coverage data file to append to, when coverage is collected.
    pub coverage_file: Option<&'a Path>,
}

/// Executes a group's tests.
pub trait TestRunner: Send + Sync {
    fn name(&self) -> &'static str;

    fn run(&self, group: &GroupConfig, ctx: &RunnerContext) -> Result<RunStatus, RunnerError>;
}

/// All built-in runners.
pub fn all_runners() -> Vec<Arc<dyn TestRunner>> {
    vec![Arc::new(PytestRunner::default()), Arc::new(CustomRunner)]
}

/// How a tool's exit codes map onto [`RunStatus`].
#[derive(Debug, Clone, Copy, Default)]
pub struct ExitContract<'a> {
    /// The code the tool uses for "no tests collected".
    pub empty: Option<i32>,
    /// Codes the tool uses for its own errors (usage, internal, plugins).
    pub tool_errors: &'a [i32],
}

/// Run `cmd` to completion and classify its exit status.
pub(crate) fn execute(
    mut cmd: Command,
    program: &str,
    contract: ExitContract,
) -> Result<RunStatus, RunnerError> {
    debug!(?cmd, "executing test command");
    // Test output goes to stderr; stdout is reserved for the report.
    cmd.stdout(io::stderr());
    let status = cmd.status().map_err(|source| RunnerError::Spawn {
        program: program.to_string(),
        source,
    })?;
    classify_exit(status, program, contract)
}

/// Map an exit status through a runner's exit-code contract.
pub fn classify_exit(
    status: ExitStatus,
    program: &str,
    contract: ExitContract,
) -> Result<RunStatus, RunnerError> {
    let unavailable = |code| RunnerError::Unavailable {
        program: program.to_string(),
        code,
    };
    match status.code() {
        Some(0) => Ok(RunStatus::Passed),
        Some(code) if Some(code) == contract.empty => Ok(RunStatus::EmptyCollection),
        Some(code @ (SHELL_CANNOT_EXECUTE | SHELL_NOT_FOUND)) => Err(unavailable(code)),
        Some(code) if contract.tool_errors.contains(&code) => Err(unavailable(code)),
        code => Ok(RunStatus::Failed { code }),
    }
}

/// Render a group's per-test timeout for command lines.
fn timeout_arg(group: &GroupConfig) -> String {
    group.timeout.map(|t| t.to_string()).unwrap_or_default()
}

#[cfg(test)]
#[path = "mod_tests.rs"]
mod tests;
