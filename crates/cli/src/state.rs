// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Persisted per-group state: last passing signature and completion marker.
//!
//! Layout of [`FileStateStore`]:
//!
//! ```text
//! <dir>/<group>.sig      signature hex + "\n"
//! <dir>/<group>.passed   empty marker file
//! ```
//!
//! A marker only means "passed" while its paired signature matches the
//! current one; the gate checks both.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use thiserror::Error;
use tracing::warn;

use crate::signature::Signature;

/// Errors reading or writing persisted state.
#[derive(Debug, Error)]
#[error("state I/O failed for {}: {source}", path.display())]
pub struct StateError {
    pub path: PathBuf,
    #[source]
    pub source: io::Error,
}

impl StateError {
    fn new(path: &Path, source: io::Error) -> Self {
        Self {
            path: path.to_path_buf(),
            source,
        }
    }
}

/// Storage for group signatures and completion markers.
pub trait StateStore {
    /// Stored signature for `group`, or `None` if never recorded.
    fn load(&self, group: &str) -> Result<Option<Signature>, StateError>;

    /// Record `signature` as the last passing signature of `group`.
    fn store(&mut self, group: &str, signature: &Signature) -> Result<(), StateError>;

    fn marker_present(&self, group: &str) -> Result<bool, StateError>;

    fn touch_marker(&mut self, group: &str) -> Result<(), StateError>;

    /// Forget everything recorded for `group`.
    fn clear(&mut self, group: &str) -> Result<(), StateError>;
}

/// [`StateStore`] backed by flat files in one directory.
pub struct FileStateStore {
    dir: PathBuf,
}

impl FileStateStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn signature_path(&self, group: &str) -> PathBuf {
        self.dir.join(format!("{group}.sig"))
    }

    pub fn marker_path(&self, group: &str) -> PathBuf {
        self.dir.join(format!("{group}.passed"))
    }

    fn ensure_dir(&self) -> Result<(), StateError> {
        fs::create_dir_all(&self.dir).map_err(|e| StateError::new(&self.dir, e))
    }
}

impl StateStore for FileStateStore {
    fn load(&self, group: &str) -> Result<Option<Signature>, StateError> {
        let path = self.signature_path(group);
        let text = match fs::read_to_string(&path) {
            Ok(text) => text,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(StateError::new(&path, e)),
        };
        match text.parse::<Signature>() {
            Ok(signature) => Ok(Some(signature)),
            Err(e) => {
                // Treated as never recorded, which forces a re-run.
                warn!(path = %path.display(), "ignoring stored signature: {e}");
                Ok(None)
            }
        }
    }

    fn store(&mut self, group: &str, signature: &Signature) -> Result<(), StateError> {
        self.ensure_dir()?;
        let path = self.signature_path(group);
        // Readers never observe a partially written digest.
        let tmp = self.dir.join(format!("{group}.sig.tmp"));
        fs::write(&tmp, format!("{signature}\n")).map_err(|e| StateError::new(&tmp, e))?;
        fs::rename(&tmp, &path).map_err(|e| StateError::new(&path, e))
    }

    fn marker_present(&self, group: &str) -> Result<bool, StateError> {
        let path = self.marker_path(group);
        path.try_exists().map_err(|e| StateError::new(&path, e))
    }

    fn touch_marker(&mut self, group: &str) -> Result<(), StateError> {
        self.ensure_dir()?;
        let path = self.marker_path(group);
        fs::write(&path, b"").map_err(|e| StateError::new(&path, e))
    }

    fn clear(&mut self, group: &str) -> Result<(), StateError> {
        for path in [self.marker_path(group), self.signature_path(group)] {
            match fs::remove_file(&path) {
                Ok(()) => {}
                Err(e) if e.kind() == io::ErrorKind::NotFound => {}
                Err(e) => return Err(StateError::new(&path, e)),
            }
        }
        Ok(())
    }
}

#[cfg(test)]
#[path = "state_tests.rs"]
mod tests;
