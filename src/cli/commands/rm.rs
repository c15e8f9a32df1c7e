//! Remove command implementation
//!
//! Implements `fsprobe rm`. Only files are removed; directories are left in
//! place even when they end up empty.

use std::path::Path;

use anyhow::Result;

use super::{name_filter, name_matches};
use crate::cli::output::{self, status, OutputConfig, Reported};
use crate::core::access::FileAccess;
use crate::core::lister::DeleteOutcome;

/// Execute the rm command
pub fn execute(dir: &Path, pattern: &str) -> Result<()> {
    let filter = name_filter(Some(pattern))?;
    let outcome = FileAccess::new().delete_matching(dir, |path| name_matches(filter.as_ref(), path))?;

    if OutputConfig::current().json {
        output::print_json(&outcome)?;
    } else {
        match &outcome {
            DeleteOutcome::Deleted(paths) => {
                output::success(&format!("Deleted {} file(s)", paths.len()));
            }
            DeleteOutcome::NoMatches => {
                output::warning(&format!("No files under {} match '{pattern}'", dir.display()));
            }
            DeleteOutcome::PartialFailure(undeleted) => {
                for path in undeleted {
                    eprintln!("  {} {}", status::ERROR, path.display());
                }
            }
        }
    }

    if let DeleteOutcome::PartialFailure(undeleted) = outcome {
        return Err(Reported(format!("{} matching file(s) could not be deleted", undeleted.len())).into());
    }
    Ok(())
}
