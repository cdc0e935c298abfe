// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Clean command implementation.

use retest::cli::{CleanArgs, Cli};
use retest::discovery;
use retest::error::{Error, ExitCode};
use retest::state::{FileStateStore, StateStore};

/// Run the `retest clean` command.
pub fn run(cli: &Cli, args: &CleanArgs) -> anyhow::Result<ExitCode> {
    let cwd = std::env::current_dir()?;
    let project = discovery::load_project(cli.config.as_deref(), &cwd)?;
    let config = &project.config;

    if let Some(unknown) = args.groups.iter().find(|n| config.group(n).is_none()) {
        return Err(Error::UnknownGroup(unknown.clone()).into());
    }

    let names: Vec<&str> = if args.groups.is_empty() {
        config.group_names()
    } else {
        args.groups.iter().map(String::as_str).collect()
    };

    let mut state = FileStateStore::new(project.root.join(&config.state.dir));
    for name in &names {
        state.clear(name).map_err(Error::from)?;
        eprintln!("cleaned {name}");
    }
    Ok(ExitCode::Success)
}
