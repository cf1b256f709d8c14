//! Constants used throughout the CLI.

/// Exit codes for the CLI.
///
/// These follow common Unix conventions:
/// - 0: Success
/// - 1: General error (used by anyhow for unhandled errors)
/// - 2: Misuse of shell command (reserved by shells, and by clap)
/// - 3+: Application-specific errors
pub mod exit_codes {
    pub const GENERAL: i32 = 1;

    /// Password ID not found, or an ID prefix matched nothing.
    pub const NOT_FOUND: i32 = 3;

    /// Invalid user input or arguments.
    pub const INVALID_INPUT: i32 = 4;

    /// Stored vault or key file could not be decoded.
    pub const DECODE_FAILED: i32 = 6;

    /// The cloud backend was unreachable or rejected the change.
    pub const REMOTE_FAILED: i32 = 7;
}

/// Characters of a password ID shown in tables.
pub const SHORT_ID_LEN: usize = 8;

/// Placeholder printed instead of a secret.
pub const SECRET_MASK: &str = "********";
