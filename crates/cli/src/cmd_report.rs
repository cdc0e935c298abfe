// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Report command implementation.

use std::io::Write;

use anyhow::Context;

use retest::cli::{Cli, OutputFormat, ReportArgs};
use retest::config::defaults;
use retest::discovery;
use retest::error::ExitCode;
use retest::report::{self, RunReport};

/// Run the `retest report` command.
pub fn run(cli: &Cli, args: &ReportArgs) -> anyhow::Result<ExitCode> {
    let cwd = std::env::current_dir()?;
    let project = discovery::load_project(cli.config.as_deref(), &cwd)?;

    let path = project
        .root
        .join(&project.config.state.dir)
        .join(defaults::state::LATEST_FILE);
    let latest = RunReport::load(&path)
        .with_context(|| format!("failed to read {}", path.display()))?;

    let output = report::format_report(args.output, latest.as_ref())?;
    let stdout = std::io::stdout();
    let mut handle = stdout.lock();
    write!(handle, "{output}")?;
    // Add trailing newline for JSON output
    if matches!(args.output, OutputFormat::Json) {
        writeln!(handle)?;
    }
    Ok(ExitCode::Success)
}
