//! CLI command implementations
//!
//! Each command is implemented in its own submodule.

pub mod cat;
pub mod check;
pub mod find;
pub mod ls;
pub mod rm;
pub mod tree;

use std::path::PathBuf;

use anyhow::Result;
use clap::{Subcommand, ValueEnum};

use crate::config::defaults::DEFAULT_READ_LENGTH;
use crate::core::lister::SortOrder;
use crate::core::tree::TraversalOrder;

/// Which predicate `check` evaluates
#[derive(ValueEnum, Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum AccessKind {
    /// The entry exists with the expected type
    #[default]
    Exists,
    /// The entry can be read
    Readable,
    /// The entry can be written
    Writeable,
}

/// Available CLI commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Check that a path exists and is accessible
    Check {
        /// Path to check
        path: PathBuf,

        /// Expect a directory instead of a file
        #[arg(short, long)]
        dir: bool,

        /// Access to verify
        #[arg(short, long, value_enum, default_value_t = AccessKind::Exists)]
        access: AccessKind,
    },

    /// List the entries directly inside a directory
    Ls {
        /// Directory to list
        dir: PathBuf,

        /// Sort order: asc, desc or none
        #[arg(short, long, default_value = "asc")]
        sort: SortOrder,

        /// Include . and ..
        #[arg(short, long)]
        all: bool,
    },

    /// List files under a directory recursively
    Find {
        /// Directory to search
        dir: PathBuf,

        /// Only report files whose name matches this regex
        #[arg(short, long)]
        pattern: Option<String>,

        /// Do not descend into subdirectories
        #[arg(long)]
        no_recurse: bool,

        /// Sort order: asc, desc or none
        #[arg(short, long, default_value = "asc")]
        sort: SortOrder,
    },

    /// Delete files under a directory whose name matches a regex
    Rm {
        /// Directory to clean
        dir: PathBuf,

        /// File name regex
        #[arg(short, long)]
        pattern: String,
    },

    /// Show the file tree under a directory
    Tree {
        /// Root directory
        dir: PathBuf,

        /// Traversal order: bfs or dfs
        #[arg(short, long, default_value = "bfs")]
        order: TraversalOrder,
    },

    /// Print a file's contents
    Cat {
        /// File to print
        file: PathBuf,

        /// Read buffer size in bytes
        #[arg(short, long, default_value_t = DEFAULT_READ_LENGTH)]
        buffer: usize,
    },
}

impl Commands {
    /// Execute the command
    pub fn run(self) -> Result<()> {
        match self {
            Self::Check { path, dir, access } => check::execute(&path, dir, access),
            Self::Ls { dir, sort, all } => ls::execute(&dir, sort, all),
            Self::Find {
                dir,
                pattern,
                no_recurse,
                sort,
            } => find::execute(&dir, pattern.as_deref(), !no_recurse, sort),
            Self::Rm { dir, pattern } => rm::execute(&dir, &pattern),
            Self::Tree { dir, order } => tree::execute(&dir, order),
            Self::Cat { file, buffer } => cat::execute(&file, buffer),
        }
    }
}

/// Compile a file-name filter
pub(crate) fn name_filter(pattern: Option<&str>) -> Result<Option<regex::Regex>> {
    pattern
        .map(|p| regex::Regex::new(p).map_err(|e| anyhow::anyhow!("Invalid pattern '{p}': {e}")))
        .transpose()
}

/// Whether the last component of `path` matches `filter`
pub(crate) fn name_matches(filter: Option<&regex::Regex>, path: &std::path::Path) -> bool {
    filter.map_or(true, |re| {
        path.file_name()
            .is_some_and(|name| re.is_match(&name.to_string_lossy()))
    })
}
