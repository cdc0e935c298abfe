// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Staleness decision and run gate.
//!
//! A group is fresh when its stored signature equals the current one and its
//! completion marker exists. Fresh groups are skipped; stale groups run, and
//! only a passing run (or an empty collection) records the new signature and
//! marker. A failing run leaves state untouched so the next invocation
//! re-runs it.

use std::fmt;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::{Duration, Instant};

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::config::{Config, GroupConfig, defaults};
use crate::coverage::{CoverageAccumulator, CoverageSummary};
use crate::error::{Error, Result};
use crate::report::GroupRecord;
use crate::runner::{RunStatus, RunnerContext, TestRunner, all_runners};
use crate::signature::{ExcludeSet, Signature, compute_signature};
use crate::state::StateStore;
use crate::tree::SourceTree;

/// Why a group has to run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StaleReason {
    /// `--no-cache` was given.
    Forced,
    /// No signature has been recorded.
    NeverRun,
    /// Inputs differ from the last passing run.
    SignatureChanged,
    /// Signature matches but the completion marker is gone.
    MarkerMissing,
}

impl fmt::Display for StaleReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            StaleReason::Forced => "forced",
            StaleReason::NeverRun => "never run",
            StaleReason::SignatureChanged => "inputs changed",
            StaleReason::MarkerMissing => "marker missing",
        };
        f.write_str(text)
    }
}

/// Current versus stored state of one group.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Freshness {
    pub current: Signature,
    pub stored: Option<Signature>,
    pub marker: bool,
}

impl Freshness {
    /// Reason the group must run, or `None` if it can be skipped.
    pub fn stale_reason(&self, force: bool) -> Option<StaleReason> {
        if force {
            return Some(StaleReason::Forced);
        }
        match &self.stored {
            None => Some(StaleReason::NeverRun),
            Some(stored) if *stored != self.current => Some(StaleReason::SignatureChanged),
            Some(_) if !self.marker => Some(StaleReason::MarkerMissing),
            Some(_) => None,
        }
    }
}

/// What happened to one group.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GroupOutcome {
    Ran {
        status: RunStatus,
        reason: StaleReason,
        signature: Signature,
        duration: Duration,
    },
    Skipped {
        signature: Signature,
    },
}

impl GroupOutcome {
    pub fn signature(&self) -> &Signature {
        match self {
            GroupOutcome::Ran { signature, .. } | GroupOutcome::Skipped { signature } => signature,
        }
    }

    pub fn is_skipped(&self) -> bool {
        matches!(self, GroupOutcome::Skipped { .. })
    }
}

/// Notices emitted while groups are evaluated.
pub trait Progress {
    fn skipped(&self, _group: &str, _signature: &Signature) {}

    fn running(&self, _group: &str, _reason: StaleReason) {}

    fn finished(&self, _group: &str, _status: RunStatus, _duration: Duration) {}
}

/// [`Progress`] that prints nothing.
pub struct Silent;

impl Progress for Silent {}

/// Records of every evaluated group, plus the error that stopped evaluation.
#[derive(Debug)]
pub struct SessionResult {
    pub records: Vec<GroupRecord>,
    pub error: Option<Error>,
}

/// One invocation's view of the project: config, inputs, state and runners.
pub struct Session<T: SourceTree, S: StateStore> {
    config: Config,
    root: PathBuf,
    tree: T,
    state: S,
    exclude: ExcludeSet,
    runners: Vec<Arc<dyn TestRunner>>,
    coverage: Option<CoverageAccumulator>,
    progress: Box<dyn Progress>,
}

impl<T: SourceTree, S: StateStore> Session<T, S> {
    pub fn new(config: Config, root: impl Into<PathBuf>, tree: T, state: S) -> Result<Self> {
        let root = root.into();
        let exclude = ExcludeSet::new(&config.project.exclude)?;
        let coverage = config.coverage.enabled.then(|| {
            let data_file = config.coverage.data_file.clone().unwrap_or_else(|| {
                config.state.dir.join(defaults::state::COVERAGE_FILE)
            });
            CoverageAccumulator::new(root.join(data_file))
        });

        Ok(Self {
            config,
            root,
            tree,
            state,
            exclude,
            runners: all_runners(),
            coverage,
            progress: Box::new(Silent),
        })
    }

    /// Replace the runner registry.
    pub fn with_runners(mut self, runners: Vec<Arc<dyn TestRunner>>) -> Self {
        self.runners = runners;
        self
    }

    pub fn with_progress(mut self, progress: impl Progress + 'static) -> Self {
        self.progress = Box::new(progress);
        self
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn state(&self) -> &S {
        &self.state
    }

    pub fn state_mut(&mut self) -> &mut S {
        &mut self.state
    }

    pub fn tree_mut(&mut self) -> &mut T {
        &mut self.tree
    }

    pub fn coverage(&self) -> Option<&CoverageAccumulator> {
        self.coverage.as_ref()
    }

    /// Current signature of `group`: its test dir, the shared source dir,
    /// and the shared config files.
    pub fn signature(&self, group: &GroupConfig) -> Result<Signature> {
        let roots = [group.path.clone(), self.config.project.source.clone()];
        Ok(compute_signature(
            &self.tree,
            &roots,
            &self.config.project.config_files,
            &self.exclude,
        )?)
    }

    /// Compare `group`'s current inputs with its recorded state.
    pub fn check(&self, group: &GroupConfig) -> Result<Freshness> {
        Ok(Freshness {
            current: self.signature(group)?,
            stored: self.state.load(&group.name)?,
            marker: self.state.marker_present(&group.name)?,
        })
    }

    /// Run `group` unless it is fresh.
    ///
    /// A failing run is reported as [`Error::TestsFailed`].
    pub fn ensure_group_fresh(&mut self, group: &GroupConfig, force: bool) -> Result<GroupOutcome> {
        let outcome = self.evaluate(group, force)?;
        if let GroupOutcome::Ran {
            status: RunStatus::Failed { code },
            ..
        } = outcome
        {
            return Err(Error::TestsFailed {
                group: group.name.clone(),
                code,
            });
        }
        Ok(outcome)
    }

    fn evaluate(&mut self, group: &GroupConfig, force: bool) -> Result<GroupOutcome> {
        let freshness = self.check(group)?;
        let Some(reason) = freshness.stale_reason(force) else {
            info!(group = %group.name, signature = freshness.current.short(), "fresh; skipping");
            self.progress.skipped(&group.name, &freshness.current);
            return Ok(GroupOutcome::Skipped {
                signature: freshness.current,
            });
        };

        let runner = self.runner_for(group)?;
        info!(group = %group.name, %reason, runner = runner.name(), "stale; running");
        self.progress.running(&group.name, reason);

        if let Some(coverage) = self.coverage.as_mut() {
            coverage.begin_group(&group.name)?;
        }

        let ctx = RunnerContext {
            root: &self.root,
            source: &self.config.project.source,
            coverage_file: self.coverage.as_ref().map(|c| c.data_file()),
        };
        let started = Instant::now();
        let status = runner.run(group, &ctx).map_err(|source| Error::Runner {
            group: group.name.clone(),
            source,
        })?;
        let duration = started.elapsed();
        self.progress.finished(&group.name, status, duration);

        match status {
            RunStatus::Failed { code } => {
                debug!(group = %group.name, ?code, "tests failed; state left untouched");
            }
            RunStatus::Passed | RunStatus::EmptyCollection => {
                if status == RunStatus::EmptyCollection {
                    info!(group = %group.name, "no tests collected; counting as passed");
                }
                // Signature before marker: a marker alone never means "passed".
                self.state.store(&group.name, &freshness.current)?;
                self.state.touch_marker(&group.name)?;
            }
        }

        Ok(GroupOutcome::Ran {
            status,
            reason,
            signature: freshness.current,
            duration,
        })
    }

    fn runner_for(&self, group: &GroupConfig) -> Result<Arc<dyn TestRunner>> {
        self.runners
            .iter()
            .find(|r| r.name() == group.runner)
            .cloned()
            .ok_or_else(|| Error::UnknownRunner {
                group: group.name.clone(),
                runner: group.runner.clone(),
            })
    }

    /// Groups to evaluate, in configured order. Empty `only` selects all.
    pub fn select(&self, only: &[String]) -> Result<Vec<GroupConfig>> {
        if let Some(unknown) = only.iter().find(|n| self.config.group(n).is_none()) {
            return Err(Error::UnknownGroup(unknown.clone()));
        }
        Ok(self
            .config
            .groups
            .iter()
            .filter(|g| only.is_empty() || only.contains(&g.name))
            .cloned()
            .collect())
    }

    /// Evaluate the selected groups in order, stopping at the first failure.
    ///
    /// The outer error covers selection only; anything that goes wrong while
    /// evaluating lands in [`SessionResult::error`] next to the records
    /// gathered so far, the last of which is an `error` record for the
    /// group that aborted.
    pub fn run_all(&mut self, force: bool, only: &[String]) -> Result<SessionResult> {
        let groups = self.select(only)?;
        let mut records = Vec::with_capacity(groups.len());

        for group in &groups {
            match self.evaluate(group, force) {
                Ok(outcome) => {
                    records.push(GroupRecord::from_outcome(&group.name, &outcome));
                    if let GroupOutcome::Ran {
                        status: RunStatus::Failed { code },
                        ..
                    } = outcome
                    {
                        let error = Error::TestsFailed {
                            group: group.name.clone(),
                            code,
                        };
                        return Ok(SessionResult {
                            records,
                            error: Some(error),
                        });
                    }
                }
                Err(error) => {
                    records.push(GroupRecord::errored(&group.name, &error));
                    return Ok(SessionResult {
                        records,
                        error: Some(error),
                    });
                }
            }
        }

        Ok(SessionResult {
            records,
            error: None,
        })
    }

    /// Run the coverage report commands, if coverage is enabled.
    pub fn report_coverage(&self) -> Result<Option<CoverageSummary>> {
        let Some(coverage) = &self.coverage else {
            return Ok(None);
        };
        Ok(Some(coverage.report(&self.config.coverage.report, &self.root)?))
    }
}

#[cfg(test)]
#[path = "gate_tests.rs"]
mod tests;
