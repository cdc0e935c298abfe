// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! retest binary entry point.

mod cmd_clean;
mod cmd_init;
mod cmd_report;
mod cmd_run;
mod cmd_status;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use retest::cli::{Cli, Command};
use retest::config::ConfigError;
use retest::error::{Error, ExitCode};

/// Env var holding a tracing filter directive (e.g. `retest=debug`).
const LOG_ENV: &str = "RETEST_LOG";

fn init_logging(verbose: bool) {
    let filter = EnvFilter::try_from_env(LOG_ENV)
        .unwrap_or_else(|_| EnvFilter::new(if verbose { "debug" } else { "warn" }));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

fn main() -> std::process::ExitCode {
    let cli = Cli::parse();
    init_logging(matches!(&cli.command, Command::Run(args) if args.verbose));

    let result = match &cli.command {
        Command::Run(args) => cmd_run::run(&cli, args),
        Command::Status(args) => cmd_status::run(&cli, args),
        Command::Report(args) => cmd_report::run(&cli, args),
        Command::Clean(args) => cmd_clean::run(&cli, args),
        Command::Init(args) => cmd_init::run(args),
    };

    match result {
        Ok(code) => code.into(),
        Err(err) => {
            eprintln!("retest: {err:#}");
            exit_code_for(&err).into()
        }
    }
}

/// Exit code of the first recognized error in the chain.
fn exit_code_for(err: &anyhow::Error) -> ExitCode {
    err.chain()
        .find_map(|e| {
            if let Some(e) = e.downcast_ref::<Error>() {
                Some(e.exit_code())
            } else if e.is::<ConfigError>() {
                Some(ExitCode::ConfigError)
            } else {
                None
            }
        })
        .unwrap_or(ExitCode::EnvironmentError)
}
