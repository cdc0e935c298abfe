// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Verbose output logger for diagnostic information.
//!
//! Writes diagnostic output to stderr. Enabled with `run --verbose`.

use std::io::{self, Write};

/// Verbose output logger. Writes to stderr when enabled.
/// All output is conditional on verbose mode being enabled.
pub struct VerboseLogger {
    enabled: bool,
}

impl VerboseLogger {
    pub fn new(enabled: bool) -> Self {
        Self { enabled }
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Print a verbose line to stderr (indented as content under a section).
    pub fn log(&self, msg: &str) {
        if self.enabled {
            let _ = self.write_log(&mut io::stderr().lock(), msg);
        }
    }

    /// Print a verbose section header.
    pub fn section(&self, title: &str) {
        if self.enabled {
            let _ = self.write_section(&mut io::stderr().lock(), title);
        }
    }

    /// Print `label: a, b, c` (or a bare `label:` for an empty list).
    pub fn list(&self, label: &str, items: &[String]) {
        if self.enabled {
            self.log(&format_list(label, items));
        }
    }

    fn write_log(&self, w: &mut impl Write, msg: &str) -> io::Result<()> {
        writeln!(w, "  {msg}")
    }

    fn write_section(&self, w: &mut impl Write, title: &str) -> io::Result<()> {
        writeln!(w, "\n{title}:")
    }
}

fn format_list(label: &str, items: &[String]) -> String {
    if items.is_empty() {
        format!("{label}:")
    } else {
        format!("{label}: {}", items.join(", "))
    }
}

#[cfg(test)]
#[path = "verbose_tests.rs"]
mod tests;
