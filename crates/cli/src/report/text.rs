// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Text format report output.

use std::fmt::Write;

use super::{GroupRecord, Outcome, ReportFormatter, RunReport, human_duration};

/// Text format report formatter.
pub struct TextFormatter;

/// Signature characters shown per group.
const SHORT_SIGNATURE: usize = 12;

fn write_group(out: &mut String, group: &GroupRecord) -> std::fmt::Result {
    let sig = group.signature.get(..SHORT_SIGNATURE).unwrap_or(&group.signature);
    match group.outcome {
        Outcome::Skipped => writeln!(out, "{}: skipped, no changes detected [{}]", group.name, sig),
        Outcome::Passed | Outcome::Empty => {
            write!(out, "{}: passed in {}", group.name, human_duration(group.duration()))?;
            if group.outcome == Outcome::Empty {
                write!(out, ", no tests collected")?;
            }
            if let Some(reason) = group.reason {
                write!(out, " ({reason})")?;
            }
            writeln!(out, " [{sig}]")
        }
        Outcome::Failed => {
            write!(out, "{}: FAILED", group.name)?;
            if let Some(code) = group.exit_code {
                write!(out, " (exit code {code})")?;
            }
            writeln!(out, " after {}", human_duration(group.duration()))
        }
        Outcome::Error => {
            let message = group.error.as_deref().unwrap_or("aborted");
            writeln!(out, "{}: ERROR: {message}", group.name)
        }
    }
}

impl ReportFormatter for TextFormatter {
    fn format(&self, report: &RunReport) -> anyhow::Result<String> {
        let mut out = String::new();
        for group in &report.groups {
            write_group(&mut out, group)?;
        }

        if let Some(coverage) = &report.coverage {
            if coverage.reported {
                let from = if coverage.contributors.is_empty() {
                    "previous runs".to_string()
                } else {
                    coverage.contributors.join(", ")
                };
                writeln!(out, "coverage: reported from {from}")?;
            } else {
                writeln!(out, "coverage: no report")?;
            }
        }

        let verdict = if report.passed { "PASS" } else { "FAIL" };
        writeln!(
            out,
            "{verdict}: {} of {} groups ran",
            report.ran().count(),
            report.groups.len()
        )?;
        Ok(out)
    }

    fn format_empty(&self) -> String {
        "No run recorded.\n".to_string()
    }
}
