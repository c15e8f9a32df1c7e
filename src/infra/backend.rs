//! Native filesystem calls
//!
//! Every call that can fail after its pre-check passed goes through
//! [`Backend`]. [`RealBackend`] uses `std::fs` and `walkdir`; tests substitute
//! their own implementation to make a native call fail on demand.

use std::ffi::OsString;
use std::fs::File;
use std::io::{self, Read, Seek, Write};
use std::path::{Path, PathBuf};
use std::sync::Arc;

use thiserror::Error;

use crate::core::lister::SortOrder;
use crate::core::mode::OpenMode;

/// An open OS file descriptor
pub trait Descriptor: Read + Write + Seek + Send {
    /// Current length of the underlying file in bytes
    fn size(&self) -> io::Result<u64>;

    /// Release the descriptor, reporting any failure to flush
    fn close(self: Box<Self>) -> io::Result<()>;
}

impl Descriptor for File {
    fn size(&self) -> io::Result<u64> {
        Ok(self.metadata()?.len())
    }

    fn close(mut self: Box<Self>) -> io::Result<()> {
        self.flush()
    }
}

/// An entry found by [`Backend::walk`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WalkEntry {
    pub path: PathBuf,
    /// Real directory; a symbolic link to one is not
    pub is_dir: bool,
}

/// A directory that could not be listed during a walk
#[derive(Debug, Error)]
#[error("Failed to list {}: {source}", path.display())]
pub struct WalkError {
    pub path: PathBuf,
    #[source]
    pub source: io::Error,
}

/// Native filesystem operations
pub trait Backend: Send + Sync {
    /// Open `path` with the native options of `mode`
    fn open(&self, path: &Path, mode: OpenMode) -> io::Result<Box<dyn Descriptor>>;

    /// Names of the entries in a directory, without `.` and `..`
    fn read_dir(&self, path: &Path) -> io::Result<Vec<OsString>>;

    /// Remove a non-directory entry
    fn remove_file(&self, path: &Path) -> io::Result<()>;

    /// Entries below `dir` in depth-first pre-order, `dir` itself excluded
    ///
    /// Only the immediate entries unless `recurse`. Siblings follow
    /// `sort_order` and symbolic links are never descended.
    fn walk(&self, dir: &Path, recurse: bool, sort_order: SortOrder) -> Result<Vec<WalkEntry>, WalkError>;
}

/// Backend over the local filesystem
#[derive(Debug, Clone, Copy, Default)]
pub struct RealBackend;

impl Backend for RealBackend {
    fn open(&self, path: &Path, mode: OpenMode) -> io::Result<Box<dyn Descriptor>> {
        let file = mode.open_options().open(path)?;
        Ok(Box::new(file))
    }

    fn read_dir(&self, path: &Path) -> io::Result<Vec<OsString>> {
        std::fs::read_dir(path)?
            .map(|entry| entry.map(|e| e.file_name()))
            .collect()
    }

    fn remove_file(&self, path: &Path) -> io::Result<()> {
        std::fs::remove_file(path)
    }

    fn walk(&self, dir: &Path, recurse: bool, sort_order: SortOrder) -> Result<Vec<WalkEntry>, WalkError> {
        let mut walker = walkdir::WalkDir::new(dir).follow_links(false).min_depth(1);
        if !recurse {
            walker = walker.max_depth(1);
        }
        if sort_order != SortOrder::Unsorted {
            walker = walker.sort_by(move |a, b| sort_order.compare(a.file_name(), b.file_name()));
        }

        walker
            .into_iter()
            .map(|entry| {
                let entry = entry.map_err(|e| WalkError {
                    path: e.path().unwrap_or(dir).to_path_buf(),
                    source: e.into(),
                })?;
                Ok(WalkEntry {
                    is_dir: entry.file_type().is_dir(),
                    path: entry.into_path(),
                })
            })
            .collect()
    }
}

/// Shared handle to the real backend
pub fn real() -> Arc<dyn Backend> {
    Arc::new(RealBackend)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_read_dir_lists_names_without_dots() {
        let dir = TempDir::new().unwrap();
        std::fs::write(dir.path().join("one.txt"), "1").unwrap();
        std::fs::create_dir(dir.path().join("sub")).unwrap();

        let mut names = RealBackend.read_dir(dir.path()).unwrap();
        names.sort();
        assert_eq!(names, vec![OsString::from("one.txt"), OsString::from("sub")]);
    }

    #[test]
    fn test_walk_is_preorder_and_respects_depth() {
        let dir = TempDir::new().unwrap();
        std::fs::create_dir(dir.path().join("b")).unwrap();
        std::fs::write(dir.path().join("b/inner.txt"), "i").unwrap();
        std::fs::write(dir.path().join("a.txt"), "a").unwrap();

        let deep = RealBackend.walk(dir.path(), true, SortOrder::Ascending).unwrap();
        assert_eq!(
            deep,
            vec![
                WalkEntry { path: dir.path().join("a.txt"), is_dir: false },
                WalkEntry { path: dir.path().join("b"), is_dir: true },
                WalkEntry { path: dir.path().join("b/inner.txt"), is_dir: false },
            ]
        );

        let shallow = RealBackend.walk(dir.path(), false, SortOrder::Descending).unwrap();
        let paths: Vec<_> = shallow.into_iter().map(|e| e.path).collect();
        assert_eq!(paths, vec![dir.path().join("b"), dir.path().join("a.txt")]);
    }

    #[test]
    fn test_walk_of_missing_directory_names_it() {
        let dir = TempDir::new().unwrap();
        let missing = dir.path().join("absent");
        let err = RealBackend.walk(&missing, true, SortOrder::Ascending).unwrap_err();
        assert_eq!(err.path, missing);
        assert_eq!(err.source.kind(), io::ErrorKind::NotFound);
    }

    #[test]
    fn test_open_reports_length() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("data.bin");
        std::fs::write(&path, b"12345").unwrap();

        let descriptor = RealBackend.open(&path, OpenMode::Read).unwrap();
        assert_eq!(descriptor.size().unwrap(), 5);
        descriptor.close().unwrap();
    }

    #[test]
    fn test_exclusive_create_fails_on_existing_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("taken.txt");
        std::fs::write(&path, "x").unwrap();

        let err = RealBackend.open(&path, OpenMode::CreateExclusive).err().unwrap();
        assert_eq!(err.kind(), io::ErrorKind::AlreadyExists);
    }
}
