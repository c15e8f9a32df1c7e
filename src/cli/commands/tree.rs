//! CLI command for displaying a file tree
//!
//! Implements the `fsprobe tree` command.

use std::path::Path;

use anyhow::Result;

use crate::cli::output::{self, OutputConfig};
use crate::config::TreeOptions;
use crate::core::access::FileAccess;
use crate::core::tree::TraversalOrder;

/// Execute the tree command
pub fn execute(dir: &Path, order: TraversalOrder) -> Result<()> {
    let tree = FileAccess::new().hydrate(dir, &TreeOptions::default().order(order))?;

    if OutputConfig::current().json {
        output::print_json(&tree.traverse(order))?;
    } else {
        print!("{}", tree.format_tree());
    }
    Ok(())
}
