// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Config file discovery.
//!
//! Walks from the current directory up to the git root looking for retest.toml.
//! The directory holding the config file is the project root.

use std::path::{Path, PathBuf};

use crate::config::{self, Config, ConfigError, defaults};

/// Find retest.toml starting from `start_dir` and walking up to git root.
pub fn find_config(start_dir: &Path) -> Option<PathBuf> {
    let mut current = start_dir.to_path_buf();

    loop {
        let config_path = current.join(defaults::CONFIG_FILE);
        if config_path.exists() {
            return Some(config_path);
        }

        // Stop at git root
        if current.join(".git").exists() {
            return None;
        }

        match current.parent() {
            Some(parent) => current = parent.to_path_buf(),
            None => return None,
        }
    }
}

/// A loaded configuration and where it applies.
#[derive(Debug)]
pub struct Project {
    pub config: Config,
    /// Directory all configured paths are relative to.
    pub root: PathBuf,
    /// Config file in use, or `None` for built-in defaults.
    pub config_path: Option<PathBuf>,
}

/// Load the config named by `explicit`, or discover one from `cwd`.
///
/// Without either, built-in defaults apply with `cwd` as the project root.
pub fn load_project(explicit: Option<&Path>, cwd: &Path) -> Result<Project, ConfigError> {
    let config_path = match explicit {
        Some(path) => Some(cwd.join(path)),
        None => find_config(cwd),
    };

    let Some(path) = config_path else {
        return Ok(Project {
            config: Config::default(),
            root: cwd.to_path_buf(),
            config_path: None,
        });
    };

    let config = config::load_with_warnings(&path)?;
    let root = path
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
        .map_or_else(|| cwd.to_path_buf(), Path::to_path_buf);
    Ok(Project {
        config,
        root,
        config_path: Some(path),
    })
}

#[cfg(test)]
#[path = "discovery_tests.rs"]
mod tests;
