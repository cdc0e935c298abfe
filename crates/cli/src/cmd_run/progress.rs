// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Per-group status lines on stderr.

use std::io;
use std::time::Duration;

use termcolor::{ColorChoice, StandardStream, WriteColor};

use retest::color::scheme;
use retest::gate::{Progress, StaleReason};
use retest::report::human_duration;
use retest::runner::RunStatus;
use retest::signature::Signature;

pub(super) struct TerminalProgress {
    stderr: StandardStream,
}

impl TerminalProgress {
    pub(super) fn new(color: ColorChoice) -> Self {
        Self {
            stderr: StandardStream::stderr(color),
        }
    }
}

fn write_group(w: &mut impl WriteColor, group: &str) -> io::Result<()> {
    w.set_color(&scheme::group_name())?;
    write!(w, "{group}")?;
    w.reset()?;
    write!(w, ": ")
}

fn write_skipped(w: &mut impl WriteColor, group: &str, signature: &Signature) -> io::Result<()> {
    write_group(w, group)?;
    w.set_color(&scheme::skip())?;
    write!(w, "no changes detected; skipping")?;
    w.set_color(&scheme::signature())?;
    write!(w, " [{}]", signature.short())?;
    w.reset()?;
    writeln!(w)
}

fn write_running(w: &mut impl WriteColor, group: &str, reason: StaleReason) -> io::Result<()> {
    write_group(w, group)?;
    write!(w, "running tests ")?;
    w.set_color(&scheme::reason())?;
    write!(w, "({reason})")?;
    w.reset()?;
    writeln!(w)
}

fn write_finished(
    w: &mut impl WriteColor,
    group: &str,
    status: RunStatus,
    duration: Duration,
) -> io::Result<()> {
    write_group(w, group)?;
    match status {
        RunStatus::Passed | RunStatus::EmptyCollection => {
            w.set_color(&scheme::pass())?;
            write!(w, "passed")?;
            w.reset()?;
            if status == RunStatus::EmptyCollection {
                write!(w, ", no tests collected")?;
            }
        }
        RunStatus::Failed { code } => {
            w.set_color(&scheme::fail())?;
            write!(w, "FAILED")?;
            w.reset()?;
            if let Some(code) = code {
                write!(w, " (exit code {code})")?;
            }
        }
    }
    writeln!(w, " in {}", human_duration(duration))
}

// Status lines are best-effort: a closed stderr must not abort the run.
impl Progress for TerminalProgress {
    fn skipped(&self, group: &str, signature: &Signature) {
        let _ = write_skipped(&mut self.stderr.lock(), group, signature);
    }

    fn running(&self, group: &str, reason: StaleReason) {
        let _ = write_running(&mut self.stderr.lock(), group, reason);
    }

    fn finished(&self, group: &str, status: RunStatus, duration: Duration) {
        let _ = write_finished(&mut self.stderr.lock(), group, status, duration);
    }
}
