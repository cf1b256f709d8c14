//! CLI error types for structured error handling.
//!
//! Command handlers return `anyhow::Error`. Before exiting, the error chain
//! is searched for a [`CliError`] or a core [`PassoError`] to pick the exit
//! code and a hint.

use std::fmt;

use passo_core::PassoError;

use crate::constants::exit_codes;

/// CLI-specific errors with associated exit codes.
#[derive(Debug)]
pub enum CliError {
    /// Resource not found (password ID, config)
    NotFound { message: String, hint: String },

    /// Invalid user input
    InvalidInput(String),
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CliError::NotFound { message, .. } => write!(f, "{}", message),
            CliError::InvalidInput(message) => write!(f, "{}", message),
        }
    }
}

impl std::error::Error for CliError {}

impl CliError {
    pub fn not_found(message: impl Into<String>, hint: impl Into<String>) -> Self {
        CliError::NotFound {
            message: message.into(),
            hint: hint.into(),
        }
    }

    pub fn invalid_input(message: impl Into<String>) -> Self {
        CliError::InvalidInput(message.into())
    }

    pub fn exit_code(&self) -> i32 {
        match self {
            CliError::NotFound { .. } => exit_codes::NOT_FOUND,
            CliError::InvalidInput(_) => exit_codes::INVALID_INPUT,
        }
    }
}

/// Exit code for a core error.
pub fn passo_exit_code(err: &PassoError) -> i32 {
    match err {
        PassoError::NotFound(_) => exit_codes::NOT_FOUND,
        PassoError::InvalidInput(_) => exit_codes::INVALID_INPUT,
        PassoError::Decode(_) | PassoError::Crypto(_) => exit_codes::DECODE_FAILED,
        PassoError::BackendUnavailable(_) | PassoError::RemoteOperation(_) => {
            exit_codes::REMOTE_FAILED
        }
        PassoError::WriteFailure(_) | PassoError::Storage(_) => exit_codes::GENERAL,
    }
}

/// Exit code for any error returned by a command handler.
pub fn exit_code_for(err: &anyhow::Error) -> i32 {
    for cause in err.chain() {
        if let Some(cli) = cause.downcast_ref::<CliError>() {
            return cli.exit_code();
        }
        if let Some(core) = cause.downcast_ref::<PassoError>() {
            return passo_exit_code(core);
        }
    }
    exit_codes::GENERAL
}

/// A hint to print under the error message, if one applies.
pub fn hint_for(err: &anyhow::Error) -> Option<String> {
    for cause in err.chain() {
        if let Some(CliError::NotFound { hint, .. }) = cause.downcast_ref::<CliError>() {
            return Some(hint.clone());
        }
        match cause.downcast_ref::<PassoError>() {
            Some(PassoError::NotFound(_)) => {
                return Some("Run `passo list` to see stored password IDs.".to_string())
            }
            Some(PassoError::Decode(_)) => {
                return Some(
                    "The stored vault was left untouched. Check that the device key file matches the one it was written with."
                        .to_string(),
                )
            }
            Some(PassoError::BackendUnavailable(_)) => {
                return Some(
                    "Switch to local storage with `passo mode local` to keep working offline."
                        .to_string(),
                )
            }
            _ => {}
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_core_errors_map_to_exit_codes() {
        let err = anyhow::Error::new(PassoError::Decode("bad".to_string()));
        assert_eq!(exit_code_for(&err), exit_codes::DECODE_FAILED);

        let err = anyhow::Error::new(PassoError::RemoteOperation("no".to_string()));
        assert_eq!(exit_code_for(&err), exit_codes::REMOTE_FAILED);

        let err = anyhow::Error::new(PassoError::NotFound("x".to_string()));
        assert_eq!(exit_code_for(&err), exit_codes::NOT_FOUND);
    }

    #[test]
    fn test_context_does_not_hide_exit_code() {
        let err = anyhow::Error::new(PassoError::InvalidInput("length".to_string()))
            .context("Failed to generate password");
        assert_eq!(exit_code_for(&err), exit_codes::INVALID_INPUT);
    }

    #[test]
    fn test_cli_errors_carry_hints() {
        let err = anyhow::Error::new(CliError::not_found("No password abc", "Try again"));
        assert_eq!(exit_code_for(&err), exit_codes::NOT_FOUND);
        assert_eq!(hint_for(&err).as_deref(), Some("Try again"));
    }

    #[test]
    fn test_plain_errors_are_general() {
        let err = anyhow::anyhow!("something else");
        assert_eq!(exit_code_for(&err), exit_codes::GENERAL);
        assert!(hint_for(&err).is_none());
    }
}
