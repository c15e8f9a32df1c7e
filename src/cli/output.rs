//! Output formatting
//!
//! Status-prefixed messages for humans, JSON documents for scripts, and the
//! mapping from errors to exit codes.

use std::sync::OnceLock;

use serde::Serialize;

use crate::core::diagnostic::Diagnostic;
use crate::error::AccessError;

/// Status message prefixes
pub mod status {
    /// Success prefix (green checkmark)
    pub const SUCCESS: &str = "✓";

    /// Error prefix (red X)
    pub const ERROR: &str = "✗";

    /// Warning prefix (yellow triangle)
    pub const WARNING: &str = "⚠";

    /// Info prefix (blue circle)
    pub const INFO: &str = "ℹ";
}

/// Exit status for a reported diagnostic
pub const EXIT_DIAGNOSTIC: i32 = 1;

/// Exit status for usage errors and internal faults
pub const EXIT_INTERNAL: i32 = 2;

static OUTPUT_CONFIG: OnceLock<OutputConfig> = OnceLock::new();

/// Process-wide output settings from the global flags
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct OutputConfig {
    pub quiet: bool,
    pub json: bool,
    pub verbose: u8,
}

impl OutputConfig {
    pub fn new(quiet: bool, json: bool, verbose: u8) -> Self {
        Self { quiet, json, verbose }
    }

    /// Make this the configuration returned by [`OutputConfig::current`]
    ///
    /// Only the first call has an effect.
    pub fn apply_global(self) {
        let _ = OUTPUT_CONFIG.set(self);
    }

    /// The applied configuration, or the default
    pub fn current() -> Self {
        OUTPUT_CONFIG.get().copied().unwrap_or_default()
    }

    /// Default log filter directive for these flags
    pub fn log_level(&self) -> &'static str {
        if self.quiet {
            return "error";
        }
        match self.verbose {
            0 => "warn",
            1 => "info",
            _ => "debug",
        }
    }
}

/// A failure already described to the user
#[derive(Debug, thiserror::Error)]
#[error("{0}")]
pub struct Reported(pub String);

/// Print a success line unless quiet
pub fn success(message: &str) {
    if !OutputConfig::current().quiet {
        println!("{} {message}", status::SUCCESS);
    }
}

/// Print a warning line unless quiet
pub fn warning(message: &str) {
    if !OutputConfig::current().quiet {
        println!("{} {message}", status::WARNING);
    }
}

/// Print a value as pretty JSON on stdout
pub fn print_json<T: Serialize>(value: &T) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

fn diagnostic_of(error: &anyhow::Error) -> Option<&Diagnostic> {
    error
        .downcast_ref::<Diagnostic>()
        .or_else(|| error.downcast_ref::<AccessError>().and_then(AccessError::diagnostic))
}

/// Exit status for an error returned by a command
pub fn exit_code(error: &anyhow::Error) -> i32 {
    if diagnostic_of(error).is_some() || error.is::<Reported>() {
        EXIT_DIAGNOSTIC
    } else {
        EXIT_INTERNAL
    }
}

#[derive(Serialize)]
struct ErrorDocument<'a> {
    status: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    diagnostic: Option<&'a Diagnostic>,
    message: String,
}

/// Report an error returned by a command
///
/// Diagnostics are user-facing messages; anything else is shown as an
/// internal error with its cause chain.
pub fn display_error(error: &anyhow::Error) {
    let diagnostic = diagnostic_of(error);

    if OutputConfig::current().json {
        let document = ErrorDocument {
            status: "error",
            diagnostic,
            message: error.to_string(),
        };
        match serde_json::to_string_pretty(&document) {
            Ok(json) => println!("{json}"),
            Err(e) => eprintln!("{} {error} ({e})", status::ERROR),
        }
        return;
    }

    match diagnostic {
        Some(diagnostic) => eprintln!("{} {}", status::ERROR, diagnostic.render()),
        None if error.is::<Reported>() => eprintln!("{} {error}", status::ERROR),
        None => {
            eprintln!("{} Internal error: {error}", status::ERROR);
            for cause in error.chain().skip(1) {
                eprintln!("  caused by: {cause}");
            }
        }
    }
}
