// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! CLI argument parsing with clap derive.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::color::ColorMode;

/// Runs test groups only when their inputs changed since the last pass
#[derive(Parser)]
#[command(name = "retest")]
#[command(version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Use specific config file
    #[arg(short = 'C', long = "config", global = true, env = "RETEST_CONFIG")]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Run stale test groups, then report coverage
    Run(RunArgs),
    /// Show which groups are fresh or stale without running anything
    Status(StatusArgs),
    /// Show the last saved run report
    Report(ReportArgs),
    /// Forget recorded signatures so groups run again
    Clean(CleanArgs),
    /// Initialize retest configuration
    Init(InitArgs),
}

#[derive(clap::Args)]
pub struct RunArgs {
    /// Run every selected group even if fresh
    #[arg(long)]
    pub no_cache: bool,

    /// Only evaluate this group (repeatable)
    #[arg(short, long = "group", value_name = "NAME")]
    pub groups: Vec<String>,

    /// Output format
    #[arg(short, long, default_value = "text")]
    pub output: OutputFormat,

    /// Color output mode
    #[arg(long, default_value = "auto", value_name = "WHEN")]
    pub color: ColorMode,

    /// Disable color output (shorthand for --color=never)
    #[arg(long)]
    pub no_color: bool,

    /// Enable verbose output
    #[arg(long, short = 'v')]
    pub verbose: bool,
}

#[derive(clap::Args)]
pub struct StatusArgs {
    /// Output format
    #[arg(short, long, default_value = "text")]
    pub output: OutputFormat,
}

#[derive(clap::Args)]
pub struct ReportArgs {
    /// Output format
    #[arg(short, long, default_value = "text")]
    pub output: OutputFormat,
}

#[derive(clap::Args)]
pub struct CleanArgs {
    /// Only clean this group (repeatable)
    #[arg(short, long = "group", value_name = "NAME")]
    pub groups: Vec<String>,
}

#[derive(clap::Args)]
pub struct InitArgs {
    /// Overwrite existing config
    #[arg(long)]
    pub force: bool,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

#[cfg(test)]
#[path = "cli_tests.rs"]
mod tests;
