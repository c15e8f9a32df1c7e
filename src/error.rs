//! Error types for fsprobe
//!
//! Domain-specific error types using thiserror.
//!
//! Failures come in two tiers. Environmental conditions (missing entries,
//! denied permissions, native I/O failures) are reported as a
//! [`Diagnostic`]. API misuse is a [`UsageError`] and is never downgraded to
//! a diagnostic.

use std::path::PathBuf;
use thiserror::Error;

use crate::core::diagnostic::Diagnostic;

/// Programmer errors: the calling code used the API incorrectly
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum UsageError {
    /// Mode string is not one of the recognized open modes
    #[error("Invalid file mode specified: '{mode}'")]
    InvalidFileMode { mode: String },

    /// File is missing and the requested mode cannot create it
    #[error("File '{path}' does not exist and mode '{mode}' is not sufficient to create it")]
    InsufficientFileMode { path: PathBuf, mode: String },

    /// Operation requires an open descriptor
    #[error("File must be opened before calling {operation}")]
    FileNotOpen { operation: &'static str },

    /// Handle already holds a descriptor
    #[error("This handle already has a file open ({path})")]
    FileAlreadyOpen { path: PathBuf },

    /// Read length of zero
    #[error("Length of read buffer must be greater than 0")]
    InvalidReadLength,

    /// Unrecognized sort order
    #[error("Invalid sort order '{value}': must be one of asc, desc, none")]
    InvalidSortOrder { value: String },

    /// Unrecognized traversal order
    #[error("Invalid traversal order '{value}': must be one of bfs, dfs")]
    InvalidTraversalOrder { value: String },

    /// Tree root or search start is not a directory
    #[error("'{path}' is not a valid directory name")]
    DirectoryDoesNotExist { path: PathBuf },

    /// Node id already present in the tree
    #[error("Node {node_id} is already present in the tree")]
    DuplicateNodeId { node_id: usize },

    /// Node refers to a parent the tree does not hold
    #[error("Node {node_id} refers to parent {parent_id} which is not in the tree")]
    UnknownParent { node_id: usize, parent_id: usize },

    /// Second root inserted into a tree
    #[error("Node {node_id} cannot be a root: the tree already has root {root_id}")]
    RootAlreadySet { node_id: usize, root_id: usize },
}

/// Failure of a filesystem operation
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AccessError {
    /// Recoverable environmental condition
    #[error(transparent)]
    Diagnostic(#[from] Diagnostic),

    /// API misuse
    #[error(transparent)]
    Usage(#[from] UsageError),
}

impl AccessError {
    /// Whether the caller can reasonably handle this failure at runtime
    pub fn is_recoverable(&self) -> bool {
        matches!(self, Self::Diagnostic(_))
    }

    /// The diagnostic, if this is an environmental failure
    pub fn diagnostic(&self) -> Option<&Diagnostic> {
        match self {
            Self::Diagnostic(diagnostic) => Some(diagnostic),
            Self::Usage(_) => None,
        }
    }

    /// The usage error, if this is API misuse
    pub fn usage(&self) -> Option<&UsageError> {
        match self {
            Self::Diagnostic(_) => None,
            Self::Usage(usage) => Some(usage),
        }
    }
}

/// DTO hydration errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DtoError {
    /// Declared fields absent from the input mapping
    #[error("DTO {type_name} is missing the following fields: [{}]", .fields.join(","))]
    MissingField {
        type_name: &'static str,
        fields: Vec<String>,
    },

    /// Input mapping has fields the type does not declare
    #[error("DTO {type_name} was passed extra fields: [{}]", .fields.join(","))]
    ExtraField {
        type_name: &'static str,
        fields: Vec<String>,
    },

    /// Value cannot be assigned to the declared field
    #[error("DTO {type_name} error - cannot assign value {value} to field {field}: expected {expected}")]
    InvalidValue {
        type_name: &'static str,
        field: String,
        value: String,
        expected: &'static str,
    },
}
