//! Structured diagnostics
//!
//! A [`Diagnostic`] says *why* a recoverable filesystem operation failed:
//! a message domain, a message id and the variables a renderer substitutes
//! into the message text. Rendering is left to the caller; the crate ships
//! a default English catalog in [`crate::core::messages`].

use std::collections::BTreeMap;
use std::fmt;
use std::path::Path;

use serde::{Serialize, Serializer};

use crate::config::defaults::MESSAGE_DOMAIN;

/// Message identifiers for every recoverable failure
///
/// Serializes as its dotted identifier, see [`MessageId::as_str`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum MessageId {
    /// Neither a file nor a directory exists at the path
    EntryNotExist,
    /// File does not exist
    FileNotExist,
    /// Path exists but is a directory, a file was required
    EntryMustBeFile,
    /// File exists but cannot be read
    FileNotReadable,
    /// File exists but cannot be written
    FileNotWriteable,
    /// Directory does not exist
    DirectoryNotExist,
    /// Path exists but is a file, a directory was required
    EntryMustBeDirectory,
    /// Directory exists but cannot be listed
    DirectoryNotReadable,
    /// Directory exists but entries cannot be created in it
    DirectoryNotWriteable,
    /// Directory passed its checks but the native listing failed
    DirectoryNotListable,
    /// File passed its checks but the native open failed
    FileNotOpened,
    /// Releasing the descriptor failed
    FileNotClosed,
    /// Native read, write or seek failed
    FileIoError,
    /// Handle was opened in a mode without read access
    ModeForbidsRead,
    /// Handle was opened in a mode without write access
    ModeForbidsWrite,
}

impl MessageId {
    /// Every message id, in declaration order
    pub const ALL: [Self; 15] = [
        Self::EntryNotExist,
        Self::FileNotExist,
        Self::EntryMustBeFile,
        Self::FileNotReadable,
        Self::FileNotWriteable,
        Self::DirectoryNotExist,
        Self::EntryMustBeDirectory,
        Self::DirectoryNotReadable,
        Self::DirectoryNotWriteable,
        Self::DirectoryNotListable,
        Self::FileNotOpened,
        Self::FileNotClosed,
        Self::FileIoError,
        Self::ModeForbidsRead,
        Self::ModeForbidsWrite,
    ];

    /// Dotted identifier used by message catalogs
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::EntryNotExist => "entry.not.exist",
            Self::FileNotExist => "file.not.exist",
            Self::EntryMustBeFile => "entry.must.be.file",
            Self::FileNotReadable => "file.not.readable",
            Self::FileNotWriteable => "file.not.writeable",
            Self::DirectoryNotExist => "directory.not.exist",
            Self::EntryMustBeDirectory => "entry.must.be.directory",
            Self::DirectoryNotReadable => "directory.not.readable",
            Self::DirectoryNotWriteable => "directory.not.writeable",
            Self::DirectoryNotListable => "directory.not.listable",
            Self::FileNotOpened => "file.not.opened",
            Self::FileNotClosed => "file.not.closed",
            Self::FileIoError => "file.io.error",
            Self::ModeForbidsRead => "file.mode.forbids.read",
            Self::ModeForbidsWrite => "file.mode.forbids.write",
        }
    }
}

impl Serialize for MessageId {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl fmt::Display for MessageId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A structured, non-fatal failure report
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Diagnostic {
    domain: String,
    message_id: MessageId,
    variables: BTreeMap<String, String>,
}

impl Diagnostic {
    /// Create a diagnostic in the filesystem message domain
    pub fn new(message_id: MessageId) -> Self {
        Self {
            domain: MESSAGE_DOMAIN.to_string(),
            message_id,
            variables: BTreeMap::new(),
        }
    }

    /// Diagnostic about a file, sets the `filename` variable
    pub fn for_file(message_id: MessageId, path: &Path) -> Self {
        Self::new(message_id).with_var("filename", path.display().to_string())
    }

    /// Diagnostic about a directory, sets the `dirname` variable
    pub fn for_dir(message_id: MessageId, path: &Path) -> Self {
        Self::new(message_id).with_var("dirname", path.display().to_string())
    }

    /// Add a substitution variable
    #[must_use]
    pub fn with_var(mut self, name: &str, value: impl Into<String>) -> Self {
        self.variables.insert(name.to_string(), value.into());
        self
    }

    /// Attach the OS error text as the `error` variable
    #[must_use]
    pub fn with_os_error(self, error: &std::io::Error) -> Self {
        self.with_var("error", error.to_string())
    }

    pub fn domain(&self) -> &str {
        &self.domain
    }

    pub fn message_id(&self) -> MessageId {
        self.message_id
    }

    pub fn variables(&self) -> &BTreeMap<String, String> {
        &self.variables
    }

    /// Look up a single substitution variable
    pub fn variable(&self, name: &str) -> Option<&str> {
        self.variables.get(name).map(String::as_str)
    }

    /// Render with the default English catalog
    pub fn render(&self) -> String {
        crate::core::messages::render(self)
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.render())
    }
}

impl std::error::Error for Diagnostic {}
