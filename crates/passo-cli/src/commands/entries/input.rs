//! Reading field values from flags, prompts and stdin.

use std::io::{self, IsTerminal, Read};

use dialoguer::Password;

use crate::errors::CliError;

/// Trimmed, non-empty value for a required text field.
pub fn required_field(name: &str, value: &str) -> anyhow::Result<String> {
    let value = value.trim();
    if value.is_empty() {
        return Err(CliError::invalid_input(format!("{} must not be empty", name)).into());
    }
    Ok(value.to_string())
}

/// Read a secret: prompt on a TTY, otherwise take the first line of stdin.
pub fn read_secret(no_input: bool) -> anyhow::Result<String> {
    let stdin = io::stdin();
    if stdin.is_terminal() {
        if no_input {
            return Err(CliError::invalid_input(
                "No secret given. Pass --secret or --generate, or pipe the secret on stdin.",
            )
            .into());
        }
        return Password::new()
            .with_prompt("Password")
            .with_confirmation("Confirm password", "Passwords do not match")
            .interact()
            .map_err(|e| anyhow::anyhow!("Failed to read password: {}", e));
    }

    let mut buffer = String::new();
    stdin
        .lock()
        .read_to_string(&mut buffer)
        .map_err(|e| anyhow::anyhow!("Failed to read stdin: {}", e))?;
    let secret = buffer.lines().next().unwrap_or_default().to_string();
    if secret.is_empty() {
        return Err(CliError::invalid_input("No secret provided on stdin").into());
    }
    Ok(secret)
}
