// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Status command implementation.
//!
//! Computes every group's signature and compares it with recorded state.
//! Nothing runs and nothing is written.

use std::io::Write;

use serde::Serialize;

use retest::cli::{Cli, OutputFormat, StatusArgs};
use retest::discovery;
use retest::error::ExitCode;
use retest::gate::{Session, StaleReason};
use retest::state::FileStateStore;
use retest::tree::FsTree;

#[derive(Serialize)]
struct GroupStatus {
    name: String,
    fresh: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    reason: Option<StaleReason>,
    signature: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    stored: Option<String>,
}

#[derive(Serialize)]
struct StatusReport {
    groups: Vec<GroupStatus>,
}

/// Run the `retest status` command.
pub fn run(cli: &Cli, args: &StatusArgs) -> anyhow::Result<ExitCode> {
    let cwd = std::env::current_dir()?;
    let project = discovery::load_project(cli.config.as_deref(), &cwd)?;

    let state = FileStateStore::new(project.root.join(&project.config.state.dir));
    let tree = FsTree::new(&project.root);
    let session = Session::new(project.config, &project.root, tree, state)?;

    let mut groups = Vec::new();
    for group in &session.config().groups {
        let freshness = session.check(group)?;
        let reason = freshness.stale_reason(false);
        groups.push(GroupStatus {
            name: group.name.clone(),
            fresh: reason.is_none(),
            reason,
            signature: freshness.current.to_string(),
            stored: freshness.stored.map(|s| s.to_string()),
        });
    }
    let report = StatusReport { groups };

    let stdout = std::io::stdout();
    let mut handle = stdout.lock();
    match args.output {
        OutputFormat::Text => {
            for group in &report.groups {
                let short = group.signature.get(..12).unwrap_or(&group.signature);
                match group.reason {
                    None => writeln!(handle, "{}: fresh [{short}]", group.name)?,
                    Some(reason) => writeln!(handle, "{}: stale, {reason} [{short}]", group.name)?,
                }
            }
        }
        OutputFormat::Json => {
            serde_json::to_writer_pretty(&mut handle, &report)?;
            writeln!(handle)?;
        }
    }
    Ok(ExitCode::Success)
}
