//! Directory listings and filtered deletion
//!
//! Every native listing goes through the [`Backend`]. Recursive listings
//! never follow symbolic links.

use std::cmp::Ordering;
use std::ffi::{OsStr, OsString};
use std::path::{Path, PathBuf};
use std::str::FromStr;
use std::sync::Arc;

use serde::Serialize;

use crate::config::ListOptions;
use crate::core::diagnostic::{Diagnostic, MessageId};
use crate::error::UsageError;
use crate::infra::backend::{self, Backend, WalkEntry};
use crate::infra::checks;

/// Order of sibling entries in a listing
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
    /// Byte-wise ascending by name
    #[default]
    Ascending,
    /// Byte-wise descending by name
    Descending,
    /// Whatever order the OS returns
    Unsorted,
}

impl SortOrder {
    pub(crate) fn compare(self, a: &OsStr, b: &OsStr) -> Ordering {
        match self {
            Self::Ascending => a.cmp(b),
            Self::Descending => b.cmp(a),
            Self::Unsorted => Ordering::Equal,
        }
    }
}

impl std::fmt::Display for SortOrder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Ascending => write!(f, "asc"),
            Self::Descending => write!(f, "desc"),
            Self::Unsorted => write!(f, "none"),
        }
    }
}

impl FromStr for SortOrder {
    type Err = UsageError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "asc" | "ascending" => Ok(Self::Ascending),
            "desc" | "descending" => Ok(Self::Descending),
            "none" | "unsorted" => Ok(Self::Unsorted),
            other => Err(UsageError::InvalidSortOrder {
                value: other.to_string(),
            }),
        }
    }
}

/// Result of [`DirectoryLister::delete_matching`]
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "outcome", content = "paths", rename_all = "snake_case")]
pub enum DeleteOutcome {
    /// Every matched entry was removed
    Deleted(Vec<PathBuf>),
    /// These matched entries could not be removed
    PartialFailure(Vec<PathBuf>),
    /// Nothing matched the filter
    NoMatches,
}

/// Lists directory contents
#[derive(Clone)]
pub struct DirectoryLister {
    backend: Arc<dyn Backend>,
}

impl DirectoryLister {
    pub fn new() -> Self {
        Self::with_backend(backend::real())
    }

    pub fn with_backend(backend: Arc<dyn Backend>) -> Self {
        Self { backend }
    }

    /// Names of the entries directly inside `dir`
    ///
    /// `.` and `..` are included only with `options.include_dots`;
    /// `options.recurse` is ignored.
    pub fn list_immediate(&self, dir: &Path, options: &ListOptions) -> Result<Vec<OsString>, Diagnostic> {
        checks::directory_is_readable(dir)?;

        let mut names = self
            .backend
            .read_dir(dir)
            .map_err(|e| Diagnostic::for_dir(MessageId::DirectoryNotListable, dir).with_os_error(&e))?;

        if options.include_dots {
            names.insert(0, OsString::from("."));
            names.insert(1, OsString::from(".."));
        }
        if options.sort_order != SortOrder::Unsorted {
            names.sort_by(|a, b| options.sort_order.compare(a, b));
        }

        tracing::trace!("Listed {} entries in {}", names.len(), dir.display());
        Ok(names)
    }

    /// Paths of the entries under `dir`, depth first
    ///
    /// With `options.recurse` each subdirectory is reported before its
    /// contents and is never filtered; without it subdirectories are skipped.
    /// Non-directory entries are reported only when `filter` accepts them.
    pub fn list_recursive<F>(&self, dir: &Path, options: &ListOptions, filter: F) -> Result<Vec<PathBuf>, Diagnostic>
    where
        F: Fn(&Path) -> bool,
    {
        let entries = self.walk(dir, options, &filter)?;
        let mut paths = Vec::with_capacity(entries.len() + 2);
        if options.include_dots {
            paths.push(dir.join("."));
            paths.push(dir.join(".."));
        }
        paths.extend(entries.into_iter().map(|entry| entry.path));
        Ok(paths)
    }

    fn walk(&self, dir: &Path, options: &ListOptions, filter: &dyn Fn(&Path) -> bool) -> Result<Vec<WalkEntry>, Diagnostic> {
        checks::directory_is_readable(dir)?;

        let walked = self
            .backend
            .walk(dir, options.recurse, options.sort_order)
            .map_err(|e| Diagnostic::for_dir(MessageId::DirectoryNotListable, &e.path).with_os_error(&e.source))?;

        let entries: Vec<WalkEntry> = walked
            .into_iter()
            .filter(|entry| if entry.is_dir { options.recurse } else { filter(&entry.path) })
            .collect();

        tracing::trace!("Walked {} matching entries under {}", entries.len(), dir.display());
        Ok(entries)
    }

    /// Remove every non-directory entry under `dir` accepted by `filter`
    pub fn delete_matching<F>(&self, dir: &Path, filter: F) -> Result<DeleteOutcome, Diagnostic>
    where
        F: Fn(&Path) -> bool,
    {
        let matches: Vec<PathBuf> = self
            .walk(dir, &ListOptions::default(), &filter)?
            .into_iter()
            .filter(|entry| !entry.is_dir)
            .map(|entry| entry.path)
            .collect();

        if matches.is_empty() {
            return Ok(DeleteOutcome::NoMatches);
        }

        let mut deleted = Vec::new();
        let mut undeleted = Vec::new();
        for path in matches {
            match self.backend.remove_file(&path) {
                Ok(()) => {
                    tracing::debug!("Deleted {}", path.display());
                    deleted.push(path);
                }
                Err(e) => {
                    tracing::warn!("Failed to delete {}: {}", path.display(), e);
                    undeleted.push(path);
                }
            }
        }

        if undeleted.is_empty() {
            Ok(DeleteOutcome::Deleted(deleted))
        } else {
            Ok(DeleteOutcome::PartialFailure(undeleted))
        }
    }
}

impl Default for DirectoryLister {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for DirectoryLister {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DirectoryLister").finish_non_exhaustive()
    }
}
