// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! JSON format report output.

use super::{ReportFormatter, RunReport};

/// JSON format report formatter. Same shape as `latest.json`.
pub struct JsonFormatter;

impl ReportFormatter for JsonFormatter {
    fn format(&self, report: &RunReport) -> anyhow::Result<String> {
        Ok(serde_json::to_string_pretty(report)?)
    }

    fn format_empty(&self) -> String {
        r#"{"groups": []}"#.to_string()
    }
}
