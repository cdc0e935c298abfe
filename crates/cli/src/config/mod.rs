// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! `retest.toml` configuration.
//!
//! ```toml
//! version = 1
//!
//! [project]
//! source = "src"
//! config_files = ["pyproject.toml", "setup.cfg"]
//!
//! [[group]]
//! name = "unit"
//! path = "tests/unit"
//! ```

pub mod defaults;

use std::collections::HashSet;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use thiserror::Error;

use crate::runner::RUNNER_NAMES;

/// Errors in the configuration file.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read {}: {source}", path.display())]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("{}: {message}", path.display())]
    Parse { path: PathBuf, message: String },

    #[error("{}: unsupported config version {found} (expected {})", path.display(), defaults::CONFIG_VERSION)]
    Version { path: PathBuf, found: u32 },

    #[error("{}: {message}", path.display())]
    Invalid { path: PathBuf, message: String },
}

/// Top-level configuration.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// Config format version (must be 1).
    pub version: u32,

    #[serde(default)]
    pub project: ProjectConfig,

    #[serde(default)]
    pub state: StateConfig,

    /// Test groups, evaluated in the order listed.
    #[serde(default = "Config::default_groups", rename = "group")]
    pub groups: Vec<GroupConfig>,

    #[serde(default)]
    pub coverage: CoverageConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            version: defaults::CONFIG_VERSION,
            project: ProjectConfig::default(),
            state: StateConfig::default(),
            groups: Self::default_groups(),
            coverage: CoverageConfig::default(),
        }
    }
}

impl Config {
    fn default_groups() -> Vec<GroupConfig> {
        use defaults::groups::*;
        vec![
            GroupConfig::new(UNIT_NAME, UNIT_PATH),
            GroupConfig::new(INTEGRATION_NAME, INTEGRATION_PATH),
        ]
    }

    /// Find a group by name.
    pub fn group(&self, name: &str) -> Option<&GroupConfig> {
        self.groups.iter().find(|g| g.name == name)
    }

    /// Names of all groups, in evaluation order.
    pub fn group_names(&self) -> Vec<&str> {
        self.groups.iter().map(|g| g.name.as_str()).collect()
    }
}

/// Shared inputs of every group.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ProjectConfig {
    /// Shared production-code directory.
    #[serde(default = "ProjectConfig::default_source")]
    pub source: PathBuf,

    /// Config files hashed into every signature, in order.
    #[serde(default = "ProjectConfig::default_config_files")]
    pub config_files: Vec<PathBuf>,

    /// Glob patterns for path components that are never hashed.
    #[serde(default = "defaults::project::exclude", alias = "ignore")]
    pub exclude: Vec<String>,
}

impl Default for ProjectConfig {
    fn default() -> Self {
        Self {
            source: Self::default_source(),
            config_files: Self::default_config_files(),
            exclude: defaults::project::exclude(),
        }
    }
}

impl ProjectConfig {
    fn default_source() -> PathBuf {
        PathBuf::from(defaults::project::SOURCE_DIR)
    }

    fn default_config_files() -> Vec<PathBuf> {
        defaults::project::config_files()
            .into_iter()
            .map(PathBuf::from)
            .collect()
    }
}

/// Persisted-state location.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct StateConfig {
    #[serde(default = "StateConfig::default_dir")]
    pub dir: PathBuf,
}

impl Default for StateConfig {
    fn default() -> Self {
        Self {
            dir: Self::default_dir(),
        }
    }
}

impl StateConfig {
    fn default_dir() -> PathBuf {
        PathBuf::from(defaults::state::DIR)
    }
}

/// One independently tracked test group.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct GroupConfig {
    /// Group name; also the file stem of its state files.
    pub name: String,

    /// Test directory, relative to the project root.
    pub path: PathBuf,

    /// Runner name (see `runner::RUNNER_NAMES`).
    #[serde(default = "GroupConfig::default_runner")]
    pub runner: String,

    /// Shell command for the `custom` runner.
    #[serde(default)]
    pub command: Option<String>,

    /// Extra arguments appended to the runner invocation.
    #[serde(default)]
    pub args: Vec<String>,

    /// Per-test-case timeout in seconds.
    #[serde(default)]
    pub timeout: Option<u64>,

    /// Exit code meaning "no tests collected" (overrides the runner's).
    #[serde(default)]
    pub empty_exit_code: Option<i32>,
}

impl GroupConfig {
    pub fn new(name: &str, path: impl Into<PathBuf>) -> Self {
        Self {
            name: name.to_string(),
            path: path.into(),
            runner: Self::default_runner(),
            command: None,
            args: Vec::new(),
            timeout: None,
            empty_exit_code: None,
        }
    }

    fn default_runner() -> String {
        defaults::groups::RUNNER.to_string()
    }
}

/// Coverage accumulation and reporting.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CoverageConfig {
    /// Collect coverage while groups run.
    #[serde(default = "CoverageConfig::default_enabled")]
    pub enabled: bool,

    /// Coverage data file (default: `<state dir>/.coverage`).
    #[serde(default)]
    pub data_file: Option<PathBuf>,

    /// Commands run after all groups to summarize accumulated coverage.
    #[serde(default = "defaults::coverage::report")]
    pub report: Vec<String>,
}

impl Default for CoverageConfig {
    fn default() -> Self {
        Self {
            enabled: Self::default_enabled(),
            data_file: None,
            report: defaults::coverage::report(),
        }
    }
}

impl CoverageConfig {
    fn default_enabled() -> bool {
        true
    }
}

/// Load and validate a config file.
pub fn load(path: &Path) -> Result<Config, ConfigError> {
    let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    parse(&content, path)
}

/// Load a config file, logging non-fatal oddities.
pub fn load_with_warnings(path: &Path) -> Result<Config, ConfigError> {
    let config = load(path)?;
    for group in &config.groups {
        if group.runner != "custom" && group.command.is_some() {
            tracing::warn!(
                group = %group.name,
                runner = %group.runner,
                "`command` is only used by the custom runner; ignoring"
            );
        }
    }
    Ok(config)
}

/// Parse and validate config content. `path` is used for messages only.
pub fn parse(content: &str, path: &Path) -> Result<Config, ConfigError> {
    let config: Config = toml::from_str(content).map_err(|e| ConfigError::Parse {
        path: path.to_path_buf(),
        message: e.to_string(),
    })?;

    if config.version != defaults::CONFIG_VERSION {
        return Err(ConfigError::Version {
            path: path.to_path_buf(),
            found: config.version,
        });
    }

    validate(&config).map_err(|message| ConfigError::Invalid {
        path: path.to_path_buf(),
        message,
    })?;
    Ok(config)
}

fn validate(config: &Config) -> Result<(), String> {
    if config.groups.is_empty() {
        return Err("at least one [[group]] is required".to_string());
    }

    let mut seen = HashSet::new();
    for group in &config.groups {
        if !is_valid_group_name(&group.name) {
            return Err(format!(
                "invalid group name '{}' (use letters, digits, '-' or '_')",
                group.name
            ));
        }
        if !seen.insert(group.name.as_str()) {
            return Err(format!("duplicate group name '{}'", group.name));
        }
        if !RUNNER_NAMES.contains(&group.runner.as_str()) {
            return Err(format!(
                "group '{}': unknown runner '{}' (expected one of: {})",
                group.name,
                group.runner,
                RUNNER_NAMES.join(", ")
            ));
        }
        if group.runner == "custom" && group.command.is_none() {
            return Err(format!(
                "group '{}': the custom runner requires `command`",
                group.name
            ));
        }
    }
    Ok(())
}

fn is_valid_group_name(name: &str) -> bool {
    !name.is_empty()
        && name
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
}

#[cfg(test)]
#[path = "mod_tests.rs"]
mod tests;
