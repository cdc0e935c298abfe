// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Run command implementation.

mod progress;
mod verbose;

use std::io::Write;
use std::time::Instant;

use anyhow::Context;

use retest::cli::{Cli, OutputFormat, RunArgs};
use retest::config::defaults;
use retest::discovery;
use retest::error::ExitCode;
use retest::gate::Session;
use retest::report::{self, RunReport};
use retest::state::FileStateStore;
use retest::tree::FsTree;
use retest::verbose::VerboseLogger;

use progress::TerminalProgress;

/// Run the `retest run` command.
pub fn run(cli: &Cli, args: &RunArgs) -> anyhow::Result<ExitCode> {
    let started = Instant::now();
    let cwd = std::env::current_dir()?;
    let project = discovery::load_project(cli.config.as_deref(), &cwd)?;

    let verbose = VerboseLogger::new(args.verbose);
    verbose::config(&verbose, &project);

    let color = args.color.choice(args.no_color);
    let state = FileStateStore::new(project.root.join(&project.config.state.dir));
    let tree = FsTree::new(&project.root);
    let mut session = Session::new(project.config, &project.root, tree, state)?
        .with_progress(TerminalProgress::new(color));

    let result = session.run_all(args.no_cache, &args.groups)?;

    // Coverage is only reported when every evaluated group passed.
    let (coverage, error) = match result.error {
        Some(err) => (None, Some(err)),
        None => match session.report_coverage() {
            Ok(coverage) => (coverage, None),
            Err(err) => (None, Some(err)),
        },
    };

    let report = RunReport::new(result.records, coverage, error.as_ref());
    let latest = session.state().dir().join(defaults::state::LATEST_FILE);
    report
        .save(&latest)
        .with_context(|| format!("failed to save {}", latest.display()))?;

    let output = report::format_report(args.output, Some(&report))?;
    let stdout = std::io::stdout();
    let mut handle = stdout.lock();
    write!(handle, "{output}")?;
    if matches!(args.output, OutputFormat::Json) {
        writeln!(handle)?;
    }
    handle.flush()?;

    verbose::summary(&verbose, &report, started.elapsed());

    match error {
        Some(err) => Err(err.into()),
        None => Ok(ExitCode::Success),
    }
}
