//! Implements `fsprobe cat`.

use std::io::Write;
use std::path::Path;

use anyhow::{Context, Result};

use crate::core::access::FileAccess;
use crate::core::mode::OpenMode;

/// Execute the cat command
pub fn execute(file: &Path, buffer: usize) -> Result<()> {
    let mut handle = FileAccess::new().open(file, OpenMode::Read)?;
    let stdout = std::io::stdout();
    let mut out = stdout.lock();

    while !handle.eof()? {
        let chunk = handle.read(buffer)?;
        if chunk.is_empty() {
            break;
        }
        out.write_all(&chunk).context("Failed to write to stdout")?;
    }
    out.flush().context("Failed to write to stdout")?;

    handle.close()?;
    Ok(())
}
