//! Path and ID resolution.

use std::path::PathBuf;

use passo_core::{CredentialRecord, Vault};

use crate::cli::Cli;
use crate::config::{default_config_path, read_config, PassoConfig};
use crate::errors::CliError;

/// Resolve the config file path: `--config` / `PASSO_CONFIG`, then XDG.
pub fn resolve_config_path(cli: &Cli) -> anyhow::Result<PathBuf> {
    match &cli.config {
        Some(path) if !path.as_os_str().is_empty() => Ok(path.clone()),
        _ => default_config_path(),
    }
}

/// Read the config file, or fall back to defaults when there is none.
pub fn load_config(cli: &Cli) -> anyhow::Result<PassoConfig> {
    let path = resolve_config_path(cli)?;
    if !path.exists() {
        tracing::debug!(path = %path.display(), "no config file, using defaults");
        return Ok(PassoConfig::default());
    }
    read_config(&path)
}

/// Find a record by full ID or unique ID prefix.
pub fn resolve_record<'v>(vault: &'v Vault, id: &str) -> anyhow::Result<&'v CredentialRecord> {
    let id = id.trim();
    if id.is_empty() {
        return Err(CliError::invalid_input("Password ID must not be empty").into());
    }
    if let Some(record) = vault.get(id) {
        return Ok(record);
    }

    let matches: Vec<&CredentialRecord> =
        vault.iter().filter(|record| record.id.starts_with(id)).collect();
    match matches.as_slice() {
        [record] => Ok(record),
        [] => Err(CliError::not_found(
            format!("No password with ID {}", id),
            "Run `passo list` to see stored password IDs.",
        )
        .into()),
        _ => Err(CliError::invalid_input(format!(
            "ID prefix {} matches {} passwords; use more characters",
            id,
            matches.len()
        ))
        .into()),
    }
}
