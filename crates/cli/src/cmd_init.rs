// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Init command implementation.

use anyhow::Context;

use retest::cli::InitArgs;
use retest::config::defaults;
use retest::error::ExitCode;

/// Run the `retest init` command.
pub fn run(args: &InitArgs) -> anyhow::Result<ExitCode> {
    let cwd = std::env::current_dir()?;
    let path = cwd.join(defaults::CONFIG_FILE);

    if path.exists() && !args.force {
        eprintln!(
            "{} already exists. Use --force to overwrite.",
            defaults::CONFIG_FILE
        );
        return Ok(ExitCode::ConfigError);
    }

    std::fs::write(&path, defaults::INIT_TEMPLATE)
        .with_context(|| format!("failed to write {}", path.display()))?;
    eprintln!("Created {}", defaults::CONFIG_FILE);
    Ok(ExitCode::Success)
}
