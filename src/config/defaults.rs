//! Default configuration values

/// Message domain attached to every diagnostic
pub const MESSAGE_DOMAIN: &str = "filesys";

/// Default read buffer size in bytes
pub const DEFAULT_READ_LENGTH: usize = 8096;

/// Prefix of the temporary entry used to test directory writability
pub const SCRATCH_FILE_PREFIX: &str = ".fsprobe-probe-";

/// Environment variable holding the log filter for the binary
pub const LOG_ENV_VAR: &str = "FSPROBE_LOG";

/// Minimum proptest iterations
pub const MIN_PROPTEST_ITERATIONS: u32 = 64;
