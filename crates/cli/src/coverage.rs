// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Coverage accumulation across the groups of one invocation.
//!
//! The data file is cleared once, right before the first group that actually
//! runs, so every group that runs in the same invocation appends to it.
//! Skipped groups leave it alone, and the report step reads whatever is there.

use std::io;
use std::path::{Path, PathBuf};
use std::process::Command;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, info};

/// Errors from coverage housekeeping or report commands.
#[derive(Debug, Error)]
pub enum CoverageError {
    #[error("failed to clear coverage data {}: {source}", path.display())]
    Clear { path: PathBuf, source: io::Error },

    #[error("failed to start coverage report `{command}`: {source}")]
    Spawn { command: String, source: io::Error },

    #[error("coverage report `{command}` failed ({})", describe_exit(*code))]
    Report { command: String, code: Option<i32> },
}

fn describe_exit(code: Option<i32>) -> String {
    match code {
        Some(code) => format!("exit code {code}"),
        None => "killed by signal".to_string(),
    }
}

/// Per-invocation coverage data file.
#[derive(Debug)]
pub struct CoverageAccumulator {
    data_file: PathBuf,
    cleared: bool,
    contributors: Vec<String>,
}

impl CoverageAccumulator {
    pub fn new(data_file: impl Into<PathBuf>) -> Self {
        Self {
            data_file: data_file.into(),
            cleared: false,
            contributors: Vec::new(),
        }
    }

    pub fn data_file(&self) -> &Path {
        &self.data_file
    }

    /// Prepare for `group` to run. Clears stale data on the first call only.
    pub fn begin_group(&mut self, group: &str) -> Result<(), CoverageError> {
        if !self.cleared {
            self.clear()?;
            self.cleared = true;
        }
        self.contributors.push(group.to_string());
        Ok(())
    }

    /// Groups that wrote into the data file during this invocation.
    pub fn contributors(&self) -> &[String] {
        &self.contributors
    }

    pub fn has_data(&self) -> bool {
        self.data_file.is_file()
    }

    fn clear(&self) -> Result<(), CoverageError> {
        if let Some(parent) = self.data_file.parent() {
            std::fs::create_dir_all(parent).map_err(|source| CoverageError::Clear {
                path: parent.to_path_buf(),
                source,
            })?;
        }
        match std::fs::remove_file(&self.data_file) {
            Ok(()) => {
                debug!(path = %self.data_file.display(), "cleared coverage data");
                Ok(())
            }
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(()),
            Err(source) => Err(CoverageError::Clear {
                path: self.data_file.clone(),
                source,
            }),
        }
    }

    /// Run each report command in `root` against the accumulated data.
    ///
    /// Does nothing but log when no data has ever been collected.
    pub fn report(
        &self,
        commands: &[String],
        root: &Path,
    ) -> Result<CoverageSummary, CoverageError> {
        let mut summary = CoverageSummary {
            data_file: self.data_file.clone(),
            contributors: self.contributors.clone(),
            reported: false,
        };

        if commands.is_empty() {
            return Ok(summary);
        }
        if !self.has_data() {
            info!(path = %self.data_file.display(), "no coverage data; skipping coverage report");
            return Ok(summary);
        }

        for command in commands {
            debug!(%command, "running coverage report");
            let status = Command::new("sh")
                .current_dir(root)
                .arg("-c")
                .arg(command)
                .env("COVERAGE_FILE", &self.data_file)
                .stdout(io::stderr())
                .status()
                .map_err(|source| CoverageError::Spawn {
                    command: command.clone(),
                    source,
                })?;
            if !status.success() {
                return Err(CoverageError::Report {
                    command: command.clone(),
                    code: status.code(),
                });
            }
        }
        summary.reported = true;
        Ok(summary)
    }
}

/// What the report step saw.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CoverageSummary {
    pub data_file: PathBuf,
    /// Groups that ran (and so appended coverage) in this invocation.
    pub contributors: Vec<String>,
    /// Whether report commands ran.
    pub reported: bool,
}

#[cfg(test)]
#[path = "coverage_tests.rs"]
mod tests;
