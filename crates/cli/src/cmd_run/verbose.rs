// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Verbose logging helpers for the run command.

use std::time::Duration;

use retest::discovery::Project;
use retest::report::RunReport;
use retest::verbose::VerboseLogger;

pub(super) fn config(verbose: &VerboseLogger, project: &Project) {
    if !verbose.is_enabled() {
        return;
    }
    verbose.section("Configuration");
    match &project.config_path {
        Some(path) => {
            let display = path.strip_prefix(&project.root).unwrap_or(path);
            verbose.log(&format!("Config: {}", display.display()));
        }
        None => verbose.log("Config: (defaults)"),
    }
    verbose.log(&format!("Root: {}", project.root.display()));

    let config = &project.config;
    verbose.log(&format!("project.source: {}", config.project.source.display()));
    let config_files: Vec<String> = config
        .project
        .config_files
        .iter()
        .map(|p| p.display().to_string())
        .collect();
    verbose.list("project.config_files", &config_files);
    verbose.list("project.exclude", &config.project.exclude);
    verbose.log(&format!("state.dir: {}", config.state.dir.display()));

    verbose.section("Groups");
    for group in &config.groups {
        verbose.log(&format!(
            "{} ({}): {}",
            group.name,
            group.runner,
            group.path.display()
        ));
    }
}

pub(super) fn summary(verbose: &VerboseLogger, report: &RunReport, elapsed: Duration) {
    if verbose.is_enabled() {
        verbose.section("Summary");
        verbose.log(&format!(
            "Groups run: {} of {}",
            report.ran().count(),
            report.groups.len()
        ));
        verbose.log(&format!("Total wall time: {:.2}s", elapsed.as_secs_f64()));
    }
}
