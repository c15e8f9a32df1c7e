//! Check command implementation
//!
//! Implements `fsprobe check` to probe a path without touching it.

use std::path::Path;

use anyhow::Result;
use serde::Serialize;

use super::AccessKind;
use crate::cli::output::{self, OutputConfig};
use crate::core::access::FileAccess;

#[derive(Serialize)]
struct CheckReport<'a> {
    path: &'a Path,
    kind: &'static str,
    access: &'static str,
    ok: bool,
}

/// Execute the check command
pub fn execute(path: &Path, dir: bool, access: AccessKind) -> Result<()> {
    let fs = FileAccess::new();

    let (kind, result) = match (dir, access) {
        (false, AccessKind::Exists) => ("file", fs.file_exists(path)),
        (false, AccessKind::Readable) => ("file", fs.file_is_readable(path)),
        (false, AccessKind::Writeable) => ("file", fs.file_is_writeable(path)),
        (true, AccessKind::Exists) => ("directory", fs.directory_exists(path)),
        (true, AccessKind::Readable) => ("directory", fs.directory_is_readable(path)),
        (true, AccessKind::Writeable) => ("directory", fs.directory_is_writeable(path)),
    };
    let access_name = match access {
        AccessKind::Exists => "exists",
        AccessKind::Readable => "readable",
        AccessKind::Writeable => "writeable",
    };

    tracing::info!("Checking {} ({kind}, {access_name})", path.display());
    result?;

    if OutputConfig::current().json {
        output::print_json(&CheckReport {
            path,
            kind,
            access: access_name,
            ok: true,
        })?;
    } else {
        let description = match access {
            AccessKind::Exists => format!("{} is a {kind}", path.display()),
            AccessKind::Readable | AccessKind::Writeable => {
                format!("{} is a {access_name} {kind}", path.display())
            }
        };
        output::success(&description);
    }
    Ok(())
}
