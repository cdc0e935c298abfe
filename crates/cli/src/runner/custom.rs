// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Custom shell command runner.
//!
//! The group's `command` runs under `sh -c` after placeholder substitution:
//! `{group}`, `{path}`, `{source}`, `{timeout}`. The same values are exported
//! as `RETEST_GROUP`, `RETEST_PATH`, `RETEST_SOURCE` and `RETEST_TIMEOUT`.

use std::process::Command;

use super::{
    ExitContract, RunStatus, RunnerContext, RunnerError, TestRunner, execute, timeout_arg,
};
use crate::config::GroupConfig;

pub struct CustomRunner;

impl CustomRunner {
    /// Substitute placeholders in `template` and append the group's `args`.
    pub fn render(template: &str, group: &GroupConfig, ctx: &RunnerContext) -> String {
        let mut line = template
            .replace("{group}", &group.name)
            .replace("{path}", &group.path.display().to_string())
            .replace("{source}", &ctx.source.display().to_string())
            .replace("{timeout}", &timeout_arg(group));
        for arg in &group.args {
            line.push(' ');
            line.push_str(arg);
        }
        line
    }

    pub fn command(group: &GroupConfig, ctx: &RunnerContext) -> Command {
        let template = group.command.as_deref().unwrap_or_default();
        let mut cmd = Command::new("sh");
        cmd.current_dir(ctx.root)
            .arg("-c")
            .arg(Self::render(template, group, ctx))
            .env("RETEST_GROUP", &group.name)
            .env("RETEST_PATH", &group.path)
            .env("RETEST_SOURCE", ctx.source)
            .env("RETEST_TIMEOUT", timeout_arg(group));
        if let Some(coverage_file) = ctx.coverage_file {
            cmd.env("COVERAGE_FILE", coverage_file);
        }
        cmd
    }
}

impl TestRunner for CustomRunner {
    fn name(&self) -> &'static str {
        "custom"
    }

    fn run(&self, group: &GroupConfig, ctx: &RunnerContext) -> Result<RunStatus, RunnerError> {
        let program = group
            .command
            .as_deref()
            .and_then(|c| c.split_whitespace().next())
            .unwrap_or("sh");
        let contract = ExitContract {
            empty: group.empty_exit_code,
            tool_errors: &[],
        };
        execute(Self::command(group, ctx), program, contract)
    }
}
