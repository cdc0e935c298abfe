// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Staleness-gated test runner.
//!
//! Each test group is run only when the content signature of its inputs
//! (its own test directory, the shared source directory, and a fixed set of
//! config files) differs from the signature recorded after its last passing
//! run.

pub mod cli;
pub mod color;
pub mod config;
pub mod coverage;
pub mod discovery;
pub mod error;
pub mod file_reader;
pub mod gate;
pub mod report;
pub mod runner;
pub mod signature;
pub mod state;
pub mod tree;
pub mod verbose;

#[cfg(test)]
pub mod test_utils;
