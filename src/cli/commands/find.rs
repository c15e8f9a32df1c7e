//! Find command implementation
//!
//! Implements `fsprobe find`: a recursive listing filtered by file name.
//! Directories are always listed when descending.

use std::path::Path;

use anyhow::Result;

use super::{name_filter, name_matches};
use crate::cli::output::{self, OutputConfig};
use crate::config::ListOptions;
use crate::core::access::FileAccess;
use crate::core::lister::SortOrder;

/// Execute the find command
pub fn execute(dir: &Path, pattern: Option<&str>, recurse: bool, sort: SortOrder) -> Result<()> {
    let filter = name_filter(pattern)?;
    let options = ListOptions::default().sort_order(sort).recurse(recurse);

    let paths = FileAccess::new().list_recursive(dir, &options, |path| name_matches(filter.as_ref(), path))?;
    tracing::info!("Found {} entries under {}", paths.len(), dir.display());

    if OutputConfig::current().json {
        output::print_json(&paths)?;
    } else {
        for path in &paths {
            println!("{}", path.display());
        }
    }
    Ok(())
}
