// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Shared unit test utilities.
//!
//! Provides common helpers for unit tests in the cli crate.

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]

use std::collections::{BTreeMap, HashMap, HashSet, VecDeque};
use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use tempfile::{NamedTempFile, TempDir};

use crate::file_reader::FileContent;
use crate::runner::{RunStatus, RunnerContext, RunnerError, TestRunner};
use crate::config::GroupConfig;
use crate::signature::Signature;
use crate::state::{StateError, StateStore};
use crate::tree::SourceTree;

/// Creates a temp directory with a minimal retest.toml.
pub fn temp_project() -> TempDir {
    let dir = TempDir::new().unwrap();
    fs::write(dir.path().join("retest.toml"), "version = 1\n").unwrap();
    dir
}

/// Creates a directory tree from a list of (path, content) pairs.
///
/// Parent directories are created automatically.
///
/// # Example
///
/// ```ignore
/// let tmp = temp_project();
/// create_tree(tmp.path(), &[
///     ("src/pkg/cli.py", "import click"),
///     ("tests/unit/test_cli.py", "def test(): pass"),
/// ]);
/// ```
pub fn create_tree(root: &Path, files: &[(&str, &str)]) {
    for (path, content) in files {
        let full_path = root.join(path);
        if let Some(parent) = full_path.parent() {
            fs::create_dir_all(parent).unwrap();
        }
        fs::write(full_path, content).unwrap();
    }
}

/// Creates a temp file with the given content for testing.
///
/// Returns the NamedTempFile which keeps the file alive.
pub fn temp_file_with_content(content: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    write!(file, "{}", content).unwrap();
    file.flush().unwrap();
    file
}

/// In-memory [`SourceTree`] whose listing order can be permuted.
///
/// `rotation` shifts and `reversed` flips the order `list_files` returns,
/// standing in for filesystems that enumerate in arbitrary order.
#[derive(Default, Clone)]
pub struct MemoryTree {
    files: BTreeMap<PathBuf, Vec<u8>>,
    rotation: usize,
    reversed: bool,
}

impl MemoryTree {
    pub fn new(files: &[(&str, &str)]) -> Self {
        let mut tree = Self::default();
        for (path, content) in files {
            tree.insert(path, content);
        }
        tree
    }

    pub fn insert(&mut self, path: &str, content: &str) {
        self.files
            .insert(PathBuf::from(path), content.as_bytes().to_vec());
    }

    pub fn remove(&mut self, path: &str) {
        self.files.remove(Path::new(path));
    }

    pub fn permuted(mut self, rotation: usize, reversed: bool) -> Self {
        self.rotation = rotation;
        self.reversed = reversed;
        self
    }
}

impl SourceTree for MemoryTree {
    fn list_files(&self, dir: &Path) -> io::Result<Vec<PathBuf>> {
        let mut listed: Vec<PathBuf> = self
            .files
            .keys()
            .filter(|p| p.starts_with(dir))
            .cloned()
            .collect();
        if !listed.is_empty() {
            let n = self.rotation % listed.len();
            listed.rotate_left(n);
        }
        if self.reversed {
            listed.reverse();
        }
        Ok(listed)
    }

    fn read(&self, path: &Path) -> io::Result<Option<FileContent>> {
        Ok(self
            .files
            .get(path)
            .map(|bytes| FileContent::Owned(bytes.clone())))
    }
}

/// Scripted [`TestRunner`] that records which groups it ran.
pub struct ScriptedRunner {
    outcomes: Mutex<VecDeque<Result<RunStatus, RunnerError>>>,
    calls: Mutex<Vec<String>>,
}

impl ScriptedRunner {
    /// Runner that answers every call with `Passed`.
    pub fn passing() -> Self {
        Self::with_outcomes(Vec::new())
    }

    /// Runner that answers calls with `outcomes` in order, then `Passed`.
    pub fn with_outcomes(outcomes: Vec<Result<RunStatus, RunnerError>>) -> Self {
        Self {
            outcomes: Mutex::new(outcomes.into()),
            calls: Mutex::new(Vec::new()),
        }
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }
}

impl TestRunner for ScriptedRunner {
    fn name(&self) -> &'static str {
        "scripted"
    }

    fn run(&self, group: &GroupConfig, _ctx: &RunnerContext) -> Result<RunStatus, RunnerError> {
        self.calls.lock().unwrap().push(group.name.clone());
        self.outcomes
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or(Ok(RunStatus::Passed))
    }
}

/// In-memory [`StateStore`].
#[derive(Debug, Default, Clone)]
pub struct MemoryStateStore {
    signatures: HashMap<String, Signature>,
    markers: HashSet<String>,
}

impl MemoryStateStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl StateStore for MemoryStateStore {
    fn load(&self, group: &str) -> Result<Option<Signature>, StateError> {
        Ok(self.signatures.get(group).cloned())
    }

    fn store(&mut self, group: &str, signature: &Signature) -> Result<(), StateError> {
        self.signatures.insert(group.to_string(), signature.clone());
        Ok(())
    }

    fn marker_present(&self, group: &str) -> Result<bool, StateError> {
        Ok(self.markers.contains(group))
    }

    fn touch_marker(&mut self, group: &str) -> Result<(), StateError> {
        self.markers.insert(group.to_string());
        Ok(())
    }

    fn clear(&mut self, group: &str) -> Result<(), StateError> {
        self.signatures.remove(group);
        self.markers.remove(group);
        Ok(())
    }
}
