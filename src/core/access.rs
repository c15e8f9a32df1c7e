//! Caller-facing facade
//!
//! [`FileAccess`] ties one [`Backend`] to the path checks, file handles,
//! listings and trees so callers need a single entry point.

use std::ffi::OsString;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use crate::config::defaults::DEFAULT_READ_LENGTH;
use crate::config::{ListOptions, TreeOptions};
use crate::core::diagnostic::Diagnostic;
use crate::core::handle::FileHandle;
use crate::core::hydrator::FileTreeHydrator;
use crate::core::lister::{DeleteOutcome, DirectoryLister};
use crate::core::mode::OpenMode;
use crate::core::tree::{self, FileInfoNode, FileTree, NodeIdAllocator, TraversalOrder};
use crate::error::{AccessError, UsageError};
use crate::infra::backend::{self, Backend};
use crate::infra::checks::{self, Check};

/// Filesystem access over a single backend
#[derive(Clone)]
pub struct FileAccess {
    backend: Arc<dyn Backend>,
}

impl FileAccess {
    /// Access to the local filesystem
    pub fn new() -> Self {
        Self::with_backend(backend::real())
    }

    pub fn with_backend(backend: Arc<dyn Backend>) -> Self {
        Self { backend }
    }

    pub fn entry_exists(&self, path: &Path) -> Check {
        checks::entry_exists(path)
    }

    pub fn file_exists(&self, path: &Path) -> Check {
        checks::file_exists(path)
    }

    pub fn directory_exists(&self, path: &Path) -> Check {
        checks::directory_exists(path)
    }

    pub fn file_is_readable(&self, path: &Path) -> Check {
        checks::file_is_readable(path)
    }

    pub fn file_is_writeable(&self, path: &Path) -> Check {
        checks::file_is_writeable(path)
    }

    pub fn directory_is_readable(&self, path: &Path) -> Check {
        checks::directory_is_readable(path)
    }

    pub fn directory_is_writeable(&self, path: &Path) -> Check {
        checks::directory_is_writeable(path)
    }

    pub fn file_prospective_is_writeable(&self, path: &Path) -> Check {
        checks::file_prospective_is_writeable(path)
    }

    /// Empty handle sharing this backend
    pub fn handle(&self) -> FileHandle {
        FileHandle::with_backend(Arc::clone(&self.backend))
    }

    /// Open `path` in `mode` on a new handle
    pub fn open(&self, path: &Path, mode: OpenMode) -> Result<FileHandle, AccessError> {
        let mut handle = self.handle();
        handle.open(path, mode)?;
        Ok(handle)
    }

    /// Whole contents of a file
    pub fn get_contents(&self, path: &Path) -> Result<Vec<u8>, AccessError> {
        let mut handle = self.open(path, OpenMode::Read)?;
        let mut contents = Vec::new();
        loop {
            let chunk = handle.read(DEFAULT_READ_LENGTH)?;
            if chunk.is_empty() {
                break;
            }
            contents.extend_from_slice(&chunk);
        }
        handle.close()?;
        Ok(contents)
    }

    /// Replace the contents of a file, creating it when missing
    pub fn put_contents(&self, path: &Path, data: &[u8]) -> Result<usize, AccessError> {
        let mut handle = self.open(path, OpenMode::WriteTruncate)?;
        let written = handle.write(data)?;
        handle.close()?;
        Ok(written)
    }

    pub fn lister(&self) -> DirectoryLister {
        DirectoryLister::with_backend(Arc::clone(&self.backend))
    }

    pub fn list_immediate(&self, dir: &Path, options: &ListOptions) -> Result<Vec<OsString>, Diagnostic> {
        self.lister().list_immediate(dir, options)
    }

    pub fn list_recursive<F>(&self, dir: &Path, options: &ListOptions, filter: F) -> Result<Vec<PathBuf>, Diagnostic>
    where
        F: Fn(&Path) -> bool,
    {
        self.lister().list_recursive(dir, options, filter)
    }

    pub fn delete_matching<F>(&self, dir: &Path, filter: F) -> Result<DeleteOutcome, Diagnostic>
    where
        F: Fn(&Path) -> bool,
    {
        self.lister().delete_matching(dir, filter)
    }

    /// Every node under `dir`, discovered live in `order`
    pub fn find_nodes(&self, dir: &Path, order: TraversalOrder) -> Result<Vec<FileInfoNode>, AccessError> {
        if !dir.is_dir() {
            return Err(UsageError::DirectoryDoesNotExist {
                path: dir.to_path_buf(),
            }
            .into());
        }
        let mut ids = NodeIdAllocator::new();
        let start = FileInfoNode::root(&mut ids, dir);
        Ok(tree::search(start, order, &mut ids, self.backend.as_ref())?)
    }

    /// Materialize the tree under `dir`
    pub fn hydrate(&self, dir: &Path, options: &TreeOptions) -> Result<FileTree, AccessError> {
        FileTreeHydrator::with_backend(Arc::clone(&self.backend), options).hydrate(dir)
    }
}

impl Default for FileAccess {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for FileAccess {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FileAccess").finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::diagnostic::MessageId;
    use tempfile::TempDir;

    #[test]
    fn test_put_then_get_contents() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("notes.txt");
        let access = FileAccess::new();

        assert_eq!(access.put_contents(&path, b"hello").unwrap(), 5);
        assert_eq!(access.get_contents(&path).unwrap(), b"hello");
    }

    #[test]
    fn test_get_contents_spans_several_reads() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("big.bin");
        let data = vec![7u8; DEFAULT_READ_LENGTH * 2 + 11];
        std::fs::write(&path, &data).unwrap();

        assert_eq!(FileAccess::new().get_contents(&path).unwrap(), data);
    }

    #[test]
    fn test_get_contents_of_missing_file() {
        let dir = TempDir::new().unwrap();
        let err = FileAccess::new().get_contents(&dir.path().join("gone")).unwrap_err();
        assert_eq!(
            err.usage(),
            Some(&UsageError::InsufficientFileMode {
                path: dir.path().join("gone"),
                mode: "r".to_string()
            })
        );
    }

    #[test]
    fn test_find_nodes_requires_directory() {
        let dir = TempDir::new().unwrap();
        let file = dir.path().join("f");
        std::fs::write(&file, "").unwrap();
        let err = FileAccess::new().find_nodes(&file, TraversalOrder::BreadthFirst).unwrap_err();
        assert!(!err.is_recoverable());
    }

    #[test]
    fn test_checks_delegate() {
        let dir = TempDir::new().unwrap();
        let access = FileAccess::new();
        assert!(access.directory_exists(dir.path()).is_ok());
        assert_eq!(
            access.file_exists(dir.path()).unwrap_err().message_id(),
            MessageId::EntryMustBeFile
        );
    }
}
