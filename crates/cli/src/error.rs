// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Error taxonomy and process exit codes.
//!
//! - Test failures stop the invocation with [`ExitCode::TestsFailed`].
//! - Configuration mistakes exit with [`ExitCode::ConfigError`].
//! - A missing runner, unreadable input, or state I/O failure is an
//!   environment error: fatal, never retried.
//!
//! Staleness is not an error; it is what triggers a run.

use thiserror::Error;

use crate::config::ConfigError;
use crate::coverage::CoverageError;
use crate::runner::RunnerError;
use crate::signature::SignatureError;
use crate::state::StateError;

/// Process exit codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum ExitCode {
    Success = 0,
    /// A group's tests failed, or the coverage report failed.
    TestsFailed = 1,
    ConfigError = 2,
    /// Runner missing, unreadable files, or state I/O.
    EnvironmentError = 3,
}

impl From<ExitCode> for std::process::ExitCode {
    fn from(code: ExitCode) -> Self {
        std::process::ExitCode::from(code as u8)
    }
}

/// Errors that end a `retest` invocation.
#[derive(Debug, Error)]
pub enum Error {
    #[error("{group}: tests failed{}", code.map(|c| format!(" (exit code {c})")).unwrap_or_default())]
    TestsFailed { group: String, code: Option<i32> },

    #[error("unknown group '{0}'")]
    UnknownGroup(String),

    #[error("group '{group}': unknown runner '{runner}'")]
    UnknownRunner { group: String, runner: String },

    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("{group}: {source}")]
    Runner {
        group: String,
        #[source]
        source: RunnerError,
    },

    #[error(transparent)]
    Signature(#[from] SignatureError),

    #[error(transparent)]
    State(#[from] StateError),

    #[error(transparent)]
    Coverage(#[from] CoverageError),
}

impl Error {
    pub fn exit_code(&self) -> ExitCode {
        match self {
            Error::TestsFailed { .. } => ExitCode::TestsFailed,
            Error::Coverage(CoverageError::Report { .. }) => ExitCode::TestsFailed,
            Error::UnknownGroup(_) | Error::UnknownRunner { .. } | Error::Config(_) => {
                ExitCode::ConfigError
            }
            Error::Signature(SignatureError::Pattern { .. }) => ExitCode::ConfigError,
            Error::Runner { .. }
            | Error::Signature(_)
            | Error::State(_)
            | Error::Coverage(_) => ExitCode::EnvironmentError,
        }
    }
}

pub type Result<T, E = Error> = std::result::Result<T, E>;

#[cfg(test)]
#[path = "error_tests.rs"]
mod tests;
