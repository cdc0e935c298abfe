// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Aggregate run report.
//!
//! Every `retest run` ends with a [`RunReport`]: one record per evaluated
//! group plus what the coverage step saw. It is printed (text or JSON) and
//! saved as `<state dir>/latest.json` so `retest report` can show it again
//! without running anything.

mod json;
mod text;

use std::io;
use std::path::Path;
use std::time::Duration;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::cli::OutputFormat;
use crate::coverage::CoverageSummary;
use crate::error::Error;
use crate::gate::{GroupOutcome, StaleReason};
use crate::runner::RunStatus;

pub use json::JsonFormatter;
pub use text::TextFormatter;

/// How a group ended in one invocation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Outcome {
    Passed,
    /// Ran, but no tests were collected.
    Empty,
    Skipped,
    Failed,
    /// Evaluation aborted with an environment or configuration error.
    Error,
}

/// Result of one group, as persisted and printed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GroupRecord {
    pub name: String,
    pub outcome: Outcome,

    /// Why the group ran (absent when skipped).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reason: Option<StaleReason>,

    /// Signature the decision was made against (empty if none was computed).
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub signature: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub exit_code: Option<i32>,

    #[serde(default)]
    pub duration_ms: u64,

    /// Message of the error that aborted this group.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl GroupRecord {
    pub fn from_outcome(name: &str, outcome: &GroupOutcome) -> Self {
        match outcome {
            GroupOutcome::Skipped { signature } => Self {
                name: name.to_string(),
                outcome: Outcome::Skipped,
                reason: None,
                signature: signature.to_string(),
                exit_code: None,
                duration_ms: 0,
                error: None,
            },
            GroupOutcome::Ran {
                status,
                reason,
                signature,
                duration,
            } => {
                let (outcome, exit_code) = match *status {
                    RunStatus::Passed => (Outcome::Passed, None),
                    RunStatus::EmptyCollection => (Outcome::Empty, None),
                    RunStatus::Failed { code } => (Outcome::Failed, code),
                };
                Self {
                    name: name.to_string(),
                    outcome,
                    reason: Some(*reason),
                    signature: signature.to_string(),
                    exit_code,
                    duration_ms: millis(*duration),
                    error: None,
                }
            }
        }
    }

    /// Record for a group whose evaluation aborted with `error`.
    pub fn errored(name: &str, error: &Error) -> Self {
        Self {
            name: name.to_string(),
            outcome: Outcome::Error,
            reason: None,
            signature: String::new(),
            exit_code: None,
            duration_ms: 0,
            error: Some(error.to_string()),
        }
    }

    pub fn duration(&self) -> Duration {
        Duration::from_millis(self.duration_ms)
    }
}

fn millis(duration: Duration) -> u64 {
    u64::try_from(duration.as_millis()).unwrap_or(u64::MAX)
}

/// Everything one invocation decided and did.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RunReport {
    /// When the invocation finished (ISO 8601).
    pub updated: DateTime<Utc>,

    /// Whether the invocation succeeded: every evaluated group fresh or
    /// passing, and the coverage report (if any) produced.
    pub passed: bool,

    /// Evaluated groups, in evaluation order.
    pub groups: Vec<GroupRecord>,

    /// Coverage step result (absent when coverage is disabled or a group failed).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub coverage: Option<CoverageSummary>,
}

impl RunReport {
    /// `error` is whatever ended the invocation early, if anything.
    pub fn new(
        groups: Vec<GroupRecord>,
        coverage: Option<CoverageSummary>,
        error: Option<&Error>,
    ) -> Self {
        let passed = error.is_none()
            && groups
                .iter()
                .all(|g| !matches!(g.outcome, Outcome::Failed | Outcome::Error));
        Self {
            updated: Utc::now(),
            passed,
            groups,
            coverage,
        }
    }

    pub fn ran(&self) -> impl Iterator<Item = &GroupRecord> {
        self.groups
            .iter()
            .filter(|g| !matches!(g.outcome, Outcome::Skipped | Outcome::Error))
    }

    /// Save to file, creating parent directories if needed.
    pub fn save(&self, path: &Path) -> anyhow::Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }

    /// Load from file, returning None if not found.
    pub fn load(path: &Path) -> anyhow::Result<Option<Self>> {
        let content = match std::fs::read_to_string(path) {
            Ok(content) => content,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(e.into()),
        };
        Ok(Some(serde_json::from_str(&content)?))
    }
}

/// Formats a [`RunReport`] for output.
pub trait ReportFormatter {
    fn format(&self, report: &RunReport) -> anyhow::Result<String>;

    /// Output for when no run has been recorded.
    fn format_empty(&self) -> String;
}

/// Format a report, or the format-specific empty output if there is none.
pub fn format_report(format: OutputFormat, report: Option<&RunReport>) -> anyhow::Result<String> {
    let formatter: Box<dyn ReportFormatter> = match format {
        OutputFormat::Text => Box::new(TextFormatter),
        OutputFormat::Json => Box::new(JsonFormatter),
    };

    match report {
        Some(r) => formatter.format(r),
        None => Ok(formatter.format_empty()),
    }
}

/// Human-readable duration: `850ms`, `4.2s`, `2m05s`.
pub fn human_duration(duration: Duration) -> String {
    let ms = duration.as_millis();
    if ms < 1000 {
        format!("{ms}ms")
    } else if ms < 60_000 {
        format!("{:.1}s", duration.as_secs_f64())
    } else {
        let secs = duration.as_secs();
        format!("{}m{:02}s", secs / 60, secs % 60)
    }
}

#[cfg(test)]
#[path = "mod_tests.rs"]
mod tests;
