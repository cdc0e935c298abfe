// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Content signatures over directories and config files.
//!
//! A signature is a BLAKE3 digest that changes whenever any covered file is
//! added, removed, renamed, or edited. It is independent of the order in
//! which the filesystem enumerates files: listings are sorted byte-wise
//! before anything is hashed.
//!
//! Layout of the hashed material:
//!
//! ```text
//! dir digest    = H( for each file, sorted: "<H(content)>  <path>\n" )
//! config digest = H( for each config file, in order: len(content) ++ content )
//! signature     = H( dir digest 1 ++ ... ++ dir digest n ++ config digest )
//! ```

use std::borrow::Cow;
use std::fmt;
use std::io;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use globset::{Glob, GlobSet, GlobSetBuilder};
use rayon::prelude::*;
use thiserror::Error;
use tracing::debug;

use crate::tree::SourceTree;

/// Length of a signature in hex characters.
pub const SIGNATURE_HEX_LEN: usize = 64;

/// Digest summarizing every input a test group depends on.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Signature(String);

impl Signature {
    fn from_hash(hash: blake3::Hash) -> Self {
        Self(hash.to_hex().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// First 12 hex characters, for display.
    pub fn short(&self) -> &str {
        &self.0[..12]
    }
}

impl fmt::Display for Signature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for Signature {
    type Err = SignatureError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s.len() == SIGNATURE_HEX_LEN && s.bytes().all(|b| b.is_ascii_hexdigit()) {
            Ok(Self(s.to_ascii_lowercase()))
        } else {
            Err(SignatureError::Malformed(s.to_string()))
        }
    }
}

/// Errors raised while computing or parsing a signature.
#[derive(Debug, Error)]
pub enum SignatureError {
    #[error("failed to list {}: {source}", path.display())]
    List { path: PathBuf, source: io::Error },

    #[error("failed to read {}: {source}", path.display())]
    Read { path: PathBuf, source: io::Error },

    #[error("invalid exclude pattern '{pattern}': {source}")]
    Pattern {
        pattern: String,
        source: globset::Error,
    },

    #[error("malformed signature '{0}'")]
    Malformed(String),
}

/// Path patterns excluded from directory digests.
///
/// A file is excluded when any component of its path, or the whole path,
/// matches one of the globs (e.g. `__pycache__`, `*.egg-info`).
#[derive(Debug, Clone)]
pub struct ExcludeSet {
    globs: GlobSet,
}

impl ExcludeSet {
    pub fn new(patterns: &[String]) -> Result<Self, SignatureError> {
        let mut builder = GlobSetBuilder::new();
        for pattern in patterns {
            let glob = Glob::new(pattern).map_err(|source| SignatureError::Pattern {
                pattern: pattern.clone(),
                source,
            })?;
            builder.add(glob);
        }
        let globs = builder.build().map_err(|source| SignatureError::Pattern {
            pattern: patterns.join(", "),
            source,
        })?;
        Ok(Self { globs })
    }

    pub fn empty() -> Self {
        Self {
            globs: GlobSet::empty(),
        }
    }

    pub fn is_excluded(&self, path: &Path) -> bool {
        self.globs.is_match(path)
            || path
                .components()
                .any(|c| self.globs.is_match(Path::new(c.as_os_str())))
    }
}

/// Compute the signature of `roots` plus `config_files`.
///
/// Missing roots and missing config files contribute empty placeholders.
/// Unreadable files are errors.
pub fn compute_signature(
    tree: &dyn SourceTree,
    roots: &[PathBuf],
    config_files: &[PathBuf],
    exclude: &ExcludeSet,
) -> Result<Signature, SignatureError> {
    let mut hasher = blake3::Hasher::new();
    for root in roots {
        let digest = directory_digest(tree, root, exclude)?;
        hasher.update(digest.as_bytes());
    }
    hasher.update(config_digest(tree, config_files)?.as_bytes());

    let signature = Signature::from_hash(hasher.finalize());
    debug!(signature = signature.short(), "computed signature");
    Ok(signature)
}

/// Digest of every non-excluded file under `root`, in byte-wise path order.
pub fn directory_digest(
    tree: &dyn SourceTree,
    root: &Path,
    exclude: &ExcludeSet,
) -> Result<blake3::Hash, SignatureError> {
    let mut files: Vec<PathBuf> = tree
        .list_files(root)
        .map_err(|source| SignatureError::List {
            path: root.to_path_buf(),
            source,
        })?
        .into_iter()
        .filter(|p| !exclude.is_excluded(p))
        .collect();
    files.sort_by(|a, b| path_bytes(a).cmp(&path_bytes(b)));
    files.dedup();

    let digests: Vec<blake3::Hash> = files
        .par_iter()
        .map(|path| file_digest(tree, path))
        .collect::<Result<_, _>>()?;

    let mut hasher = blake3::Hasher::new();
    for (path, digest) in files.iter().zip(&digests) {
        hasher.update(digest.to_hex().as_bytes());
        hasher.update(b"  ");
        hasher.update(&path_bytes(path));
        hasher.update(b"\n");
    }

    debug!(root = %root.display(), files = files.len(), "hashed directory");
    Ok(hasher.finalize())
}

/// Digest of `config_files` in the given order.
pub fn config_digest(
    tree: &dyn SourceTree,
    config_files: &[PathBuf],
) -> Result<blake3::Hash, SignatureError> {
    let mut hasher = blake3::Hasher::new();
    for path in config_files {
        let content = tree.read(path).map_err(|source| SignatureError::Read {
            path: path.clone(),
            source,
        })?;
        let bytes = content.as_ref().map(|c| c.as_bytes()).unwrap_or_default();
        hasher.update(&(bytes.len() as u64).to_le_bytes());
        hasher.update(bytes);
    }
    Ok(hasher.finalize())
}

fn file_digest(tree: &dyn SourceTree, path: &Path) -> Result<blake3::Hash, SignatureError> {
    let read_error = |source: io::Error| SignatureError::Read {
        path: path.to_path_buf(),
        source,
    };
    let content = tree
        .read(path)
        .map_err(read_error)?
        .ok_or_else(|| read_error(io::Error::from(io::ErrorKind::NotFound)))?;
    Ok(blake3::hash(content.as_bytes()))
}

/// Locale-independent sort key for a path, with `/` separators.
#[cfg(unix)]
fn path_bytes(path: &Path) -> Cow<'_, [u8]> {
    use std::os::unix::ffi::OsStrExt;
    Cow::Borrowed(path.as_os_str().as_bytes())
}

#[cfg(not(unix))]
fn path_bytes(path: &Path) -> Cow<'_, [u8]> {
    Cow::Owned(path.to_string_lossy().replace('\\', "/").into_bytes())
}

#[cfg(test)]
#[path = "signature_tests.rs"]
mod tests;
