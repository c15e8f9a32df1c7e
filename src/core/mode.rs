//! File open modes
//!
//! The ten fopen-style intents with the access facts each one implies.
//! The facts drive the permission pre-checks made before a native open.

use std::fmt;
use std::fs::OpenOptions;
use std::str::FromStr;

use crate::error::UsageError;

/// Enumerated file-open intent
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OpenMode {
    /// `r`: read only, positioned at the start
    Read,
    /// `r+`: read and write, positioned at the start
    ReadWrite,
    /// `w`: write only, truncate, create if missing
    WriteTruncate,
    /// `w+`: like `w` but also readable
    WriteTruncateRead,
    /// `a`: write only, always append, create if missing
    Append,
    /// `a+`: like `a` but also readable
    AppendRead,
    /// `x`: write only, create, fail if the file exists
    CreateExclusive,
    /// `x+`: like `x` but also readable
    CreateExclusiveRead,
    /// `c`: write only, create if missing, never truncate
    CreateNoTruncate,
    /// `c+`: like `c` but also readable
    CreateNoTruncateRead,
}

impl OpenMode {
    /// Every mode, in canonical order
    pub const ALL: [OpenMode; 10] = [
        Self::Read,
        Self::ReadWrite,
        Self::WriteTruncate,
        Self::WriteTruncateRead,
        Self::Append,
        Self::AppendRead,
        Self::CreateExclusive,
        Self::CreateExclusiveRead,
        Self::CreateNoTruncate,
        Self::CreateNoTruncateRead,
    ];

    /// fopen-style mode string
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Read => "r",
            Self::ReadWrite => "r+",
            Self::WriteTruncate => "w",
            Self::WriteTruncateRead => "w+",
            Self::Append => "a",
            Self::AppendRead => "a+",
            Self::CreateExclusive => "x",
            Self::CreateExclusiveRead => "x+",
            Self::CreateNoTruncate => "c",
            Self::CreateNoTruncateRead => "c+",
        }
    }

    pub fn requires_read_access(&self) -> bool {
        matches!(
            self,
            Self::Read
                | Self::ReadWrite
                | Self::WriteTruncateRead
                | Self::AppendRead
                | Self::CreateExclusiveRead
                | Self::CreateNoTruncateRead
        )
    }

    pub fn requires_write_access(&self) -> bool {
        !matches!(self, Self::Read)
    }

    pub fn can_create_missing_file(&self) -> bool {
        !matches!(self, Self::Read | Self::ReadWrite)
    }

    /// Native open options for this mode
    pub fn open_options(&self) -> OpenOptions {
        let mut options = OpenOptions::new();
        options.read(self.requires_read_access());
        match self {
            Self::Read => {}
            Self::ReadWrite => {
                options.write(true);
            }
            Self::WriteTruncate | Self::WriteTruncateRead => {
                options.write(true).create(true).truncate(true);
            }
            Self::Append | Self::AppendRead => {
                options.append(true).create(true);
            }
            Self::CreateExclusive | Self::CreateExclusiveRead => {
                options.write(true).create_new(true);
            }
            Self::CreateNoTruncate | Self::CreateNoTruncateRead => {
                options.write(true).create(true).truncate(false);
            }
        }
        options
    }
}

impl fmt::Display for OpenMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for OpenMode {
    type Err = UsageError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|mode| mode.as_str() == s)
            .ok_or_else(|| UsageError::InvalidFileMode {
                mode: s.to_string(),
            })
    }
}
