// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Filesystem access used by signature computation.
//!
//! [`SourceTree`] is the seam between the signature algorithm and the
//! filesystem: listing order is whatever the backend returns, and the
//! algorithm is responsible for canonicalizing it.

use std::io;
use std::path::{Path, PathBuf};

use ignore::WalkBuilder;

use crate::file_reader::FileContent;

/// Read-only view of a project tree, addressed by root-relative paths.
pub trait SourceTree: Sync {
    /// List regular files under `dir`, recursively, as root-relative paths.
    ///
    /// A missing `dir` yields an empty list. Order is unspecified.
    fn list_files(&self, dir: &Path) -> io::Result<Vec<PathBuf>>;

    /// Read a file's content, or `None` if it does not exist.
    fn read(&self, path: &Path) -> io::Result<Option<FileContent>>;
}

/// [`SourceTree`] backed by the real filesystem.
pub struct FsTree {
    root: PathBuf,
}

impl FsTree {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }
}

impl SourceTree for FsTree {
    fn list_files(&self, dir: &Path) -> io::Result<Vec<PathBuf>> {
        let abs = self.root.join(dir);
        if !abs.is_dir() {
            return Ok(Vec::new());
        }

        // Every file counts: no gitignore, no hidden-file filtering.
        let walker = WalkBuilder::new(&abs)
            .standard_filters(false)
            .follow_links(false)
            .build();

        let mut files = Vec::new();
        for entry in walker {
            let entry = entry.map_err(io::Error::other)?;
            if !entry.file_type().is_some_and(|t| t.is_file()) {
                continue;
            }
            let rel = entry
                .path()
                .strip_prefix(&self.root)
                .unwrap_or(entry.path())
                .to_path_buf();
            files.push(rel);
        }
        Ok(files)
    }

    fn read(&self, path: &Path) -> io::Result<Option<FileContent>> {
        match FileContent::read(&self.root.join(path)) {
            Ok(content) => Ok(Some(content)),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e),
        }
    }
}

#[cfg(test)]
#[path = "tree_tests.rs"]
mod tests;
