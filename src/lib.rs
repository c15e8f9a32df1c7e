//! fsprobe - Filesystem access with structured diagnostics
//!
//! This library wraps file and directory access so that every failure
//! caused by the environment comes back as a structured [`core::diagnostic::Diagnostic`]
//! while API misuse is a typed [`error::UsageError`].
//!
//! # Architecture
//!
//! The crate is organized into several modules:
//!
//! - [`cli`] - Command-line interface parsing and output formatting
//! - [`core`] - Handles, listings, trees and diagnostics
//! - [`infra`] - Infrastructure layer (native calls, path checks)
//! - [`config`] - Configuration and constants
//! - [`error`] - Error types and handling

pub mod cli;
pub mod config;
pub mod core;
pub mod error;
pub mod infra;

#[cfg(test)]
pub mod test_utils;
