//! Single-descriptor file handle
//!
//! A [`FileHandle`] holds at most one open descriptor. Misuse (reading
//! before opening, opening twice, a zero read length) is a [`UsageError`];
//! environmental failures are returned as a [`Diagnostic`]. A handle that
//! is dropped while open releases its descriptor.

use std::io::{Read, Seek, Write};
use std::path::{Path, PathBuf};
use std::sync::Arc;

use crate::config::defaults::DEFAULT_READ_LENGTH;
use crate::core::diagnostic::{Diagnostic, MessageId};
use crate::core::mode::OpenMode;
use crate::error::{AccessError, UsageError};
use crate::infra::backend::{self, Backend, Descriptor};
use crate::infra::checks;

struct OpenFile {
    path: PathBuf,
    mode: OpenMode,
    descriptor: Box<dyn Descriptor>,
}

impl OpenFile {
    fn io_error(&self, operation: &str, error: &std::io::Error) -> Diagnostic {
        Diagnostic::for_file(MessageId::FileIoError, &self.path)
            .with_var("operation", operation)
            .with_os_error(error)
    }

    fn mode_error(&self, message_id: MessageId) -> Diagnostic {
        Diagnostic::for_file(message_id, &self.path).with_var("mode", self.mode.as_str())
    }
}

/// Handle owning at most one open file descriptor
pub struct FileHandle {
    backend: Arc<dyn Backend>,
    open: Option<OpenFile>,
}

impl FileHandle {
    /// Empty handle over the local filesystem
    pub fn new() -> Self {
        Self::with_backend(backend::real())
    }

    /// Empty handle over a specific backend
    pub fn with_backend(backend: Arc<dyn Backend>) -> Self {
        Self {
            backend,
            open: None,
        }
    }

    pub fn is_open(&self) -> bool {
        self.open.is_some()
    }

    /// Path of the open file
    pub fn path(&self) -> Option<&Path> {
        self.open.as_ref().map(|open| open.path.as_path())
    }

    /// Mode the open file was opened in
    pub fn mode(&self) -> Option<OpenMode> {
        self.open.as_ref().map(|open| open.mode)
    }

    fn opened(&mut self, operation: &'static str) -> Result<&mut OpenFile, UsageError> {
        self.open
            .as_mut()
            .ok_or(UsageError::FileNotOpen { operation })
    }

    /// Open `path` in `mode`
    ///
    /// Fails with a usage error when the handle is already open or when the
    /// file is missing and `mode` cannot create it. Permission problems and
    /// native open failures are diagnostics.
    pub fn open(&mut self, path: impl AsRef<Path>, mode: OpenMode) -> Result<(), AccessError> {
        let path = path.as_ref();

        if let Some(open) = &self.open {
            return Err(UsageError::FileAlreadyOpen {
                path: open.path.clone(),
            }
            .into());
        }

        let exists = std::fs::metadata(path).is_ok();
        if !exists && !mode.can_create_missing_file() {
            return Err(UsageError::InsufficientFileMode {
                path: path.to_path_buf(),
                mode: mode.to_string(),
            }
            .into());
        }

        if exists {
            checks::file_exists(path)?;
            if mode.requires_read_access() {
                checks::file_is_readable(path)?;
            }
            if mode.requires_write_access() {
                checks::file_is_writeable(path)?;
            }
        } else {
            checks::directory_is_writeable(&checks::containing_dir(path))?;
        }

        let descriptor = self.backend.open(path, mode).map_err(|e| {
            Diagnostic::for_file(MessageId::FileNotOpened, path)
                .with_var("mode", mode.as_str())
                .with_os_error(&e)
        })?;

        tracing::debug!("Opened {} in mode '{}'", path.display(), mode);
        self.open = Some(OpenFile {
            path: path.to_path_buf(),
            mode,
            descriptor,
        });
        Ok(())
    }

    /// Open with an fopen-style mode string
    pub fn open_str(&mut self, path: impl AsRef<Path>, mode: &str) -> Result<(), AccessError> {
        let mode = mode.parse::<OpenMode>()?;
        self.open(path, mode)
    }

    /// Release the descriptor
    ///
    /// The handle is empty afterwards even when releasing reports an error.
    pub fn close(&mut self) -> Result<(), AccessError> {
        let open = self
            .open
            .take()
            .ok_or(UsageError::FileNotOpen { operation: "close" })?;
        let path = open.path;

        open.descriptor.close().map_err(|e| {
            Diagnostic::for_file(MessageId::FileNotClosed, &path).with_os_error(&e)
        })?;

        tracing::debug!("Closed {}", path.display());
        Ok(())
    }

    /// Read up to `max_length` bytes; an empty result means end of file
    pub fn read(&mut self, max_length: usize) -> Result<Vec<u8>, AccessError> {
        let open = self.opened("read")?;
        if max_length == 0 {
            return Err(UsageError::InvalidReadLength.into());
        }
        if !open.mode.requires_read_access() {
            return Err(open.mode_error(MessageId::ModeForbidsRead).into());
        }

        // Grows as bytes arrive; `max_length` may far exceed the file
        let mut buffer = Vec::with_capacity(max_length.min(DEFAULT_READ_LENGTH));
        let limit = u64::try_from(max_length).unwrap_or(u64::MAX);
        let result = (&mut open.descriptor).take(limit).read_to_end(&mut buffer);
        match result {
            Ok(_) => Ok(buffer),
            Err(e) => Err(open.io_error("read", &e).into()),
        }
    }

    /// Read the next line including its terminator, `None` at end of file
    pub fn read_line(&mut self) -> Result<Option<String>, AccessError> {
        let open = self.opened("read_line")?;
        if !open.mode.requires_read_access() {
            return Err(open.mode_error(MessageId::ModeForbidsRead).into());
        }

        // Byte at a time so the descriptor position stays exact
        let mut line = Vec::new();
        let mut byte = [0u8; 1];
        loop {
            match open.descriptor.read(&mut byte) {
                Ok(0) => break,
                Ok(_) => {
                    line.push(byte[0]);
                    if byte[0] == b'\n' {
                        break;
                    }
                }
                Err(e) if e.kind() == std::io::ErrorKind::Interrupted => {}
                Err(e) => return Err(open.io_error("read_line", &e).into()),
            }
        }

        if line.is_empty() {
            Ok(None)
        } else {
            Ok(Some(String::from_utf8_lossy(&line).into_owned()))
        }
    }

    /// Write `data`, returning the number of bytes written
    ///
    /// Writability of the path is checked again right before writing.
    pub fn write(&mut self, data: &[u8]) -> Result<usize, AccessError> {
        let open = self.opened("write")?;
        if !open.mode.requires_write_access() {
            return Err(open.mode_error(MessageId::ModeForbidsWrite).into());
        }
        checks::file_is_writeable(&open.path)?;

        match open.descriptor.write_all(data) {
            Ok(()) => Ok(data.len()),
            Err(e) => Err(open.io_error("write", &e).into()),
        }
    }

    /// Write `line` and a terminating newline unless it already ends in one
    pub fn write_line(&mut self, line: &str) -> Result<usize, AccessError> {
        self.opened("write_line")?;
        let mut data = line.as_bytes().to_vec();
        if !line.ends_with('\n') {
            data.push(b'\n');
        }
        self.write(&data)
    }

    /// Whether the position is at or past the end of the file
    pub fn eof(&mut self) -> Result<bool, AccessError> {
        let open = self.opened("eof")?;
        let position = match open.descriptor.stream_position() {
            Ok(position) => position,
            Err(e) => return Err(open.io_error("eof", &e).into()),
        };
        match open.descriptor.size() {
            Ok(size) => Ok(position >= size),
            Err(e) => Err(open.io_error("eof", &e).into()),
        }
    }
}

impl Default for FileHandle {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for FileHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FileHandle")
            .field("path", &self.path())
            .field("mode", &self.mode())
            .finish_non_exhaustive()
    }
}

impl Drop for FileHandle {
    fn drop(&mut self) {
        if let Some(open) = self.open.take() {
            tracing::debug!("Releasing {} left open", open.path.display());
            if let Err(e) = open.descriptor.close() {
                tracing::warn!("Failed to release {}: {}", open.path.display(), e);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_new_handle_is_empty() {
        let handle = FileHandle::new();
        assert!(!handle.is_open());
        assert!(handle.path().is_none());
        assert!(handle.mode().is_none());
    }

    #[test]
    fn test_operations_require_open_descriptor() {
        let mut handle = FileHandle::new();
        assert_eq!(
            handle.close().unwrap_err(),
            AccessError::Usage(UsageError::FileNotOpen { operation: "close" })
        );
        assert_eq!(
            handle.read(10).unwrap_err(),
            AccessError::Usage(UsageError::FileNotOpen { operation: "read" })
        );
        assert_eq!(
            handle.write(b"x").unwrap_err(),
            AccessError::Usage(UsageError::FileNotOpen { operation: "write" })
        );
        assert_eq!(
            handle.eof().unwrap_err(),
            AccessError::Usage(UsageError::FileNotOpen { operation: "eof" })
        );
    }

    #[test]
    fn test_zero_read_length_is_usage_error() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("a.txt");
        std::fs::write(&path, "abc").unwrap();

        let mut handle = FileHandle::new();
        handle.open(&path, OpenMode::Read).unwrap();
        assert_eq!(
            handle.read(0).unwrap_err(),
            AccessError::Usage(UsageError::InvalidReadLength)
        );
    }

    #[test]
    fn test_open_str_rejects_unknown_mode() {
        let dir = TempDir::new().unwrap();
        let mut handle = FileHandle::new();
        let err = handle.open_str(dir.path().join("a.txt"), "rw").unwrap_err();
        assert_eq!(
            err,
            AccessError::Usage(UsageError::InvalidFileMode {
                mode: "rw".to_string()
            })
        );
    }

    #[test]
    fn test_open_directory_is_diagnostic() {
        let dir = TempDir::new().unwrap();
        let mut handle = FileHandle::new();
        let err = handle.open(dir.path(), OpenMode::Read).unwrap_err();
        assert_eq!(
            err.diagnostic().map(Diagnostic::message_id),
            Some(MessageId::EntryMustBeFile)
        );
        assert!(!handle.is_open());
    }

    #[test]
    fn test_multiple_reads_then_eof() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("a.txt");
        std::fs::write(&path, "abcdefg").unwrap();

        let mut handle = FileHandle::new();
        handle.open(&path, OpenMode::Read).unwrap();
        assert_eq!(handle.read(3).unwrap(), b"abc");
        assert!(!handle.eof().unwrap());
        assert_eq!(handle.read(3).unwrap(), b"def");
        assert_eq!(handle.read(3).unwrap(), b"g");
        assert!(handle.eof().unwrap());
        assert!(handle.read(3).unwrap().is_empty());
        handle.close().unwrap();
    }

    #[test]
    fn test_read_line() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("lines.txt");
        std::fs::write(&path, "first\nsecond\nlast").unwrap();

        let mut handle = FileHandle::new();
        handle.open(&path, OpenMode::Read).unwrap();
        assert_eq!(handle.read_line().unwrap().as_deref(), Some("first\n"));
        assert_eq!(handle.read_line().unwrap().as_deref(), Some("second\n"));
        assert_eq!(handle.read_line().unwrap().as_deref(), Some("last"));
        assert_eq!(handle.read_line().unwrap(), None);
    }

    #[test]
    fn test_read_with_huge_length_returns_whole_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("small.txt");
        std::fs::write(&path, "tiny").unwrap();

        let mut handle = FileHandle::new();
        handle.open(&path, OpenMode::Read).unwrap();
        assert_eq!(handle.read(usize::MAX).unwrap(), b"tiny");
        assert!(handle.eof().unwrap());
    }

    #[test]
    fn test_write_line_then_read_line() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("lines.txt");

        let mut handle = FileHandle::new();
        assert_eq!(
            handle.write_line("x").unwrap_err(),
            AccessError::Usage(UsageError::FileNotOpen { operation: "write_line" })
        );
        handle.open(&path, OpenMode::WriteTruncateRead).unwrap();
        assert_eq!(handle.write_line("first").unwrap(), 6);
        assert_eq!(handle.write_line("second\n").unwrap(), 7);
        handle.close().unwrap();

        handle.open(&path, OpenMode::Read).unwrap();
        assert_eq!(handle.read_line().unwrap().as_deref(), Some("first\n"));
        assert_eq!(handle.read_line().unwrap().as_deref(), Some("second\n"));
        assert_eq!(handle.read_line().unwrap(), None);
    }

    #[test]
    fn test_append_mode_appends() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("log.txt");
        std::fs::write(&path, "one\n").unwrap();

        let mut handle = FileHandle::new();
        handle.open(&path, OpenMode::Append).unwrap();
        assert_eq!(handle.write(b"two\n").unwrap(), 4);
        handle.close().unwrap();

        assert_eq!(std::fs::read_to_string(&path).unwrap(), "one\ntwo\n");
    }

    #[test]
    fn test_read_in_write_only_mode_is_diagnostic() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("out.txt");

        let mut handle = FileHandle::new();
        handle.open(&path, OpenMode::WriteTruncate).unwrap();
        let err = handle.read(4).unwrap_err();
        assert_eq!(
            err.diagnostic().map(Diagnostic::message_id),
            Some(MessageId::ModeForbidsRead)
        );
        assert_eq!(err.diagnostic().and_then(|d| d.variable("mode")), Some("w"));
    }

    #[test]
    fn test_exclusive_create_on_existing_file_is_diagnostic() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("taken.txt");
        std::fs::write(&path, "x").unwrap();

        let mut handle = FileHandle::new();
        let err = handle.open(&path, OpenMode::CreateExclusive).unwrap_err();
        assert!(err.is_recoverable());
        assert_eq!(
            err.diagnostic().map(Diagnostic::message_id),
            Some(MessageId::FileNotOpened)
        );
    }

    #[test]
    fn test_close_clears_state_and_allows_reopen() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("a.txt");
        std::fs::write(&path, "abc").unwrap();

        let mut handle = FileHandle::new();
        handle.open(&path, OpenMode::Read).unwrap();
        handle.close().unwrap();
        assert!(!handle.is_open());
        handle.open(&path, OpenMode::ReadWrite).unwrap();
        assert_eq!(handle.mode(), Some(OpenMode::ReadWrite));
    }
}
