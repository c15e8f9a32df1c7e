//! Common test utilities and helpers
//!
//! This module provides shared utilities for integration tests.

#![allow(dead_code)]

use std::ffi::OsString;
use std::io::{self, Read, Seek, SeekFrom, Write};
use std::path::{Path, PathBuf};
use std::sync::Arc;

use fsprobe::core::mode::OpenMode;
use fsprobe::core::lister::SortOrder;
use fsprobe::infra::backend::{Backend, Descriptor, RealBackend, WalkEntry, WalkError};
use tempfile::TempDir;

/// Test project context
///
/// Creates a temporary directory for test fixtures and provides
/// utilities for setting up test scenarios.
pub struct TestProject {
    /// Temporary directory for the test project
    pub dir: TempDir,
}

impl TestProject {
    /// Create a new test project in a temporary directory
    pub fn new() -> Self {
        Self {
            dir: TempDir::new().expect("Failed to create temp directory"),
        }
    }

    /// Get the path to the test project directory
    pub fn path(&self) -> PathBuf {
        self.dir.path().to_path_buf()
    }

    /// Absolute path of an entry in the test project
    pub fn join(&self, name: &str) -> PathBuf {
        self.dir.path().join(name)
    }

    /// Create a file in the test project
    pub fn create_file(&self, name: &str, content: &str) -> PathBuf {
        let path = self.join(name);
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).expect("Failed to create parent directories");
        }
        std::fs::write(&path, content).expect("Failed to write file");
        path
    }

    /// Create a directory in the test project
    pub fn create_dir(&self, name: &str) -> PathBuf {
        let path = self.join(name);
        std::fs::create_dir_all(&path).expect("Failed to create directory");
        path
    }

    /// Check if an entry exists in the test project
    pub fn file_exists(&self, name: &str) -> bool {
        self.join(name).exists()
    }

    /// Read a file from the test project
    pub fn read_file(&self, name: &str) -> String {
        std::fs::read_to_string(self.join(name)).expect("Failed to read file")
    }

    /// The layout `a.txt`, `b.txt`, `S/c.txt`
    pub fn with_sample_layout() -> Self {
        let project = Self::new();
        project.create_file("a.txt", "alpha");
        project.create_file("b.txt", "beta");
        project.create_file("S/c.txt", "gamma");
        project
    }
}

impl Default for TestProject {
    fn default() -> Self {
        Self::new()
    }
}

fn injected(what: &str) -> io::Error {
    io::Error::other(format!("injected {what} failure"))
}

/// Which descriptor calls fail
#[derive(Debug, Clone, Copy, Default)]
pub struct DescriptorFaults {
    pub read: bool,
    pub write: bool,
    pub seek: bool,
    pub close: bool,
}

/// Real descriptor with injected failures
pub struct FaultyDescriptor {
    inner: Box<dyn Descriptor>,
    faults: DescriptorFaults,
}

impl Read for FaultyDescriptor {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        if self.faults.read {
            return Err(injected("read"));
        }
        self.inner.read(buf)
    }
}

impl Write for FaultyDescriptor {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        if self.faults.write {
            return Err(injected("write"));
        }
        self.inner.write(buf)
    }

    fn flush(&mut self) -> io::Result<()> {
        self.inner.flush()
    }
}

impl Seek for FaultyDescriptor {
    fn seek(&mut self, pos: SeekFrom) -> io::Result<u64> {
        if self.faults.seek {
            return Err(injected("seek"));
        }
        self.inner.seek(pos)
    }
}

impl Descriptor for FaultyDescriptor {
    fn size(&self) -> io::Result<u64> {
        self.inner.size()
    }

    fn close(self: Box<Self>) -> io::Result<()> {
        if self.faults.close {
            return Err(injected("close"));
        }
        self.inner.close()
    }
}

/// Backend whose native calls fail after the pre-checks passed
#[derive(Debug, Clone, Default)]
pub struct FaultyBackend {
    pub fail_open: bool,
    /// Fails both `read_dir` and `walk`
    pub fail_read_dir: bool,
    /// Paths whose removal fails
    pub fail_remove: Vec<PathBuf>,
    pub descriptor: DescriptorFaults,
}

impl FaultyBackend {
    pub fn shared(self) -> Arc<dyn Backend> {
        Arc::new(self)
    }
}

impl Backend for FaultyBackend {
    fn open(&self, path: &Path, mode: OpenMode) -> io::Result<Box<dyn Descriptor>> {
        if self.fail_open {
            return Err(injected("open"));
        }
        let inner = RealBackend.open(path, mode)?;
        Ok(Box::new(FaultyDescriptor {
            inner,
            faults: self.descriptor,
        }))
    }

    fn read_dir(&self, path: &Path) -> io::Result<Vec<OsString>> {
        if self.fail_read_dir {
            return Err(injected("read_dir"));
        }
        RealBackend.read_dir(path)
    }

    fn remove_file(&self, path: &Path) -> io::Result<()> {
        if self.fail_remove.iter().any(|p| p == path) {
            return Err(injected("remove"));
        }
        RealBackend.remove_file(path)
    }

    fn walk(&self, dir: &Path, recurse: bool, sort_order: SortOrder) -> Result<Vec<WalkEntry>, WalkError> {
        if self.fail_read_dir {
            return Err(WalkError {
                path: dir.to_path_buf(),
                source: injected("read_dir"),
            });
        }
        RealBackend.walk(dir, recurse, sort_order)
    }
}

/// Set the permission bits of `path`
#[cfg(unix)]
pub fn set_mode(path: &Path, mode: u32) {
    use std::os::unix::fs::PermissionsExt;
    std::fs::set_permissions(path, std::fs::Permissions::from_mode(mode))
        .expect("Failed to set permissions");
}

/// Whether permission bits stop this process (false when running as root)
#[cfg(unix)]
pub fn permissions_enforced() -> bool {
    let project = TestProject::new();
    let locked = project.create_file("locked", "x");
    set_mode(&locked, 0o000);
    let enforced = std::fs::File::open(&locked).is_err();
    set_mode(&locked, 0o644);
    enforced
}
