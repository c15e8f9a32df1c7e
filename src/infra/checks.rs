//! Path checks
//!
//! Existence, entry-type and permission predicates. Each returns `Ok(())`
//! when the predicate holds and a [`Diagnostic`] saying why it does not
//! otherwise. Permission checks run only after the existence check passed,
//! so "missing" and "forbidden" are never conflated.

use std::fs::{self, File, OpenOptions};
use std::path::{Path, PathBuf};

use crate::config::defaults::SCRATCH_FILE_PREFIX;
use crate::core::diagnostic::{Diagnostic, MessageId};

/// Outcome of a path check
pub type Check = Result<(), Diagnostic>;

/// A file or a directory exists at `path`
pub fn entry_exists(path: &Path) -> Check {
    fs::metadata(path)
        .map(drop)
        .map_err(|e| Diagnostic::for_file(MessageId::EntryNotExist, path).with_os_error(&e))
}

/// `path` exists and is not a directory
pub fn file_exists(path: &Path) -> Check {
    match fs::metadata(path) {
        Err(e) => Err(Diagnostic::for_file(MessageId::FileNotExist, path).with_os_error(&e)),
        Ok(metadata) if metadata.is_dir() => {
            Err(Diagnostic::for_file(MessageId::EntryMustBeFile, path))
        }
        Ok(_) => Ok(()),
    }
}

/// `path` exists and is a directory
pub fn directory_exists(path: &Path) -> Check {
    match fs::metadata(path) {
        Err(e) => Err(Diagnostic::for_dir(MessageId::DirectoryNotExist, path).with_os_error(&e)),
        Ok(metadata) if !metadata.is_dir() => {
            Err(Diagnostic::for_dir(MessageId::EntryMustBeDirectory, path))
        }
        Ok(_) => Ok(()),
    }
}

/// `path` is an existing file the process can open for reading
pub fn file_is_readable(path: &Path) -> Check {
    file_exists(path)?;
    File::open(path).map(drop).map_err(|e| {
        tracing::trace!("File {} is not readable: {}", path.display(), e);
        Diagnostic::for_file(MessageId::FileNotReadable, path).with_os_error(&e)
    })
}

/// `path` is an existing file the process can open for writing
pub fn file_is_writeable(path: &Path) -> Check {
    file_exists(path)?;
    OpenOptions::new()
        .write(true)
        .open(path)
        .map(drop)
        .map_err(|e| {
            tracing::trace!("File {} is not writeable: {}", path.display(), e);
            Diagnostic::for_file(MessageId::FileNotWriteable, path).with_os_error(&e)
        })
}

/// `path` is an existing directory the process can list
pub fn directory_is_readable(path: &Path) -> Check {
    directory_exists(path)?;
    fs::read_dir(path).map(drop).map_err(|e| {
        tracing::trace!("Directory {} is not readable: {}", path.display(), e);
        Diagnostic::for_dir(MessageId::DirectoryNotReadable, path).with_os_error(&e)
    })
}

/// `path` is an existing directory the process can create entries in
///
/// Creates and removes a temporary entry.
pub fn directory_is_writeable(path: &Path) -> Check {
    directory_exists(path)?;
    tempfile::Builder::new()
        .prefix(SCRATCH_FILE_PREFIX)
        .tempfile_in(path)
        .map(drop)
        .map_err(|e| {
            tracing::trace!("Directory {} is not writeable: {}", path.display(), e);
            Diagnostic::for_dir(MessageId::DirectoryNotWriteable, path).with_os_error(&e)
        })
}

/// `path` is a writeable file, or missing with a writeable parent directory
pub fn file_prospective_is_writeable(path: &Path) -> Check {
    if fs::metadata(path).is_ok() {
        file_is_writeable(path)
    } else {
        directory_is_writeable(&containing_dir(path))
    }
}

/// Directory an entry at `path` would be created in
pub fn containing_dir(path: &Path) -> PathBuf {
    match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
        _ => PathBuf::from("."),
    }
}
