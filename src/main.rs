//! fsprobe CLI - Filesystem inspection with structured diagnostics
//!
//! Entry point for the fsprobe command-line application.

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::EnvFilter;

use fsprobe::cli::output::{display_error, exit_code, OutputConfig};
use fsprobe::cli::Cli;
use fsprobe::config::defaults::LOG_ENV_VAR;

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Apply output configuration globally
    let output_config = OutputConfig::new(cli.quiet, cli.json, cli.verbose);
    output_config.apply_global();

    // Initialize tracing subscriber, FSPROBE_LOG overrides the flags
    let filter = EnvFilter::try_from_env(LOG_ENV_VAR)
        .unwrap_or_else(|_| EnvFilter::new(output_config.log_level()));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    // Run the command and handle errors
    match cli.run() {
        Ok(()) => Ok(()),
        Err(e) => {
            display_error(&e);
            std::process::exit(exit_code(&e));
        }
    }
}
