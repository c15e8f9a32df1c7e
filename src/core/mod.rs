//! Core filesystem access module
//!
//! Diagnostics, open modes, file handles, listings and trees. Native calls
//! are made through [`crate::infra::backend`].
//!
//! # Submodules
//!
//! - [`diagnostic`] - Structured recoverable failure reports
//! - [`messages`] - Default English message catalog
//! - [`mode`] - File open modes
//! - [`handle`] - Single-descriptor file handle
//! - [`access`] - Facade over one backend
//! - [`lister`] - Directory listings and filtered deletion
//! - [`tree`] - File nodes, trees and live search
//! - [`hydrator`] - Directory to tree walk
//! - [`dto`] - Schema-checked DTO hydration

pub mod access;
pub mod diagnostic;
pub mod dto;
pub mod handle;
pub mod hydrator;
pub mod lister;
pub mod messages;
pub mod mode;
pub mod tree;
