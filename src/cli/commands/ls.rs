//! Implements `fsprobe ls`.

use std::path::Path;

use anyhow::Result;

use crate::cli::output::{self, OutputConfig};
use crate::config::ListOptions;
use crate::core::access::FileAccess;
use crate::core::lister::SortOrder;

/// Execute the ls command
pub fn execute(dir: &Path, sort: SortOrder, all: bool) -> Result<()> {
    let options = ListOptions::default().sort_order(sort).include_dots(all);
    let names: Vec<String> = FileAccess::new()
        .list_immediate(dir, &options)?
        .into_iter()
        .map(|name| name.to_string_lossy().into_owned())
        .collect();

    if OutputConfig::current().json {
        output::print_json(&names)?;
    } else {
        for name in &names {
            println!("{name}");
        }
    }
    Ok(())
}
