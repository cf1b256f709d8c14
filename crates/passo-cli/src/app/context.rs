//! Application context for the Passo CLI.
//!
//! Bundles the parsed arguments with the loaded config and wires the core
//! collaborators (device store, key, optional remote) into a [`Session`].

use std::sync::Arc;

use tracing::warn;

use passo_core::notify::{Notice, NoticeKind, NoticeReceiver, Notifier};
use passo_core::preferences::read_theme;
use passo_core::remote::SqliteRemoteStore;
use passo_core::storage::{DeviceStore, FileDeviceStore};
use passo_core::{
    DeviceKey, Identity, PersistenceGateway, SessionContext, StorageMode, Theme, Vault, VaultCodec,
};

use crate::cli::Cli;
use crate::config::PassoConfig;
use crate::output::{print_notices, Badge, UiContext};

use super::resolver::load_config;

pub struct AppContext<'a> {
    cli: &'a Cli,
    config: PassoConfig,
}

impl<'a> AppContext<'a> {
    pub fn new(cli: &'a Cli) -> anyhow::Result<Self> {
        Ok(Self {
            cli,
            config: load_config(cli)?,
        })
    }

    pub fn cli(&self) -> &Cli {
        self.cli
    }

    pub fn quiet(&self) -> bool {
        self.cli.quiet
    }

    /// Current remote account: `--user` / `PASSO_USER`, then `cloud.user_id`.
    pub fn user_id(&self) -> Option<String> {
        self.cli
            .user
            .as_deref()
            .map(str::trim)
            .filter(|user| !user.is_empty())
            .or_else(|| self.config.user_id())
            .map(String::from)
    }

    /// Device storage without the key or cloud backend.
    pub fn device_store(&self) -> anyhow::Result<FileDeviceStore> {
        Ok(FileDeviceStore::new(self.config.storage_dir()?))
    }

    /// Open device storage and the device key, and connect the cloud backend
    /// if one is configured.
    pub fn open_session(&self, json: bool) -> anyhow::Result<Session> {
        let device: Arc<dyn DeviceStore> = Arc::new(self.device_store()?);
        let key = DeviceKey::load_or_create(&self.config.keyfile_path()?)?;
        let (notifier, notices) = Notifier::channel();

        let mut gateway = PersistenceGateway::new(device.clone(), VaultCodec::new(key), notifier);
        if let Some(path) = self.config.cloud_database() {
            match SqliteRemoteStore::open(&path) {
                Ok(store) => gateway = gateway.with_remote(Arc::new(store)),
                Err(e) => warn!(error = %e, "cloud backend unavailable, using local storage"),
            }
        }

        let theme = match read_theme(device.as_ref()) {
            Ok(theme) => theme.unwrap_or_default(),
            Err(e) => {
                warn!(error = %e, "failed to read theme preference");
                Theme::default()
            }
        };
        let ui = UiContext::from_env(json, self.quiet(), theme);

        let mode = gateway.stored_mode();
        let identity = self.user_id().map(Identity::new);
        if mode == StorageMode::Cloud && identity.is_none() && !self.quiet() {
            eprintln!(
                "{}",
                crate::output::badge(
                    ui.color_stderr,
                    Badge::Info,
                    "Cloud mode needs a user (--user or PASSO_USER); using local storage"
                )
            );
        }

        Ok(Session {
            gateway,
            ctx: SessionContext::new(mode, identity),
            notices,
            ui,
        })
    }
}

/// Everything a command needs to read and change the vault.
pub struct Session {
    pub gateway: PersistenceGateway,
    pub ctx: SessionContext,
    pub ui: UiContext,
    notices: NoticeReceiver,
}

impl Session {
    /// Load the vault for the current mode and user.
    pub async fn load(&mut self) -> anyhow::Result<Vault> {
        let result = self.gateway.load(&self.ctx).await;
        let notices = without_errors_if(self.notices.drain(), result.is_err());
        print_notices(&self.ui, notices);
        Ok(result?)
    }

    /// Print every notice queued so far.
    pub fn flush_notices(&mut self) {
        print_notices(&self.ui, self.notices.drain());
    }
}

/// A failed load is reported once, by the caller's error path.
fn without_errors_if(notices: Vec<Notice>, failed: bool) -> Vec<Notice> {
    if !failed {
        return notices;
    }
    notices
        .into_iter()
        .filter(|notice| notice.kind != NoticeKind::Error)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_failed_load_keeps_only_non_error_notices() {
        let (notifier, mut receiver) = Notifier::channel();
        notifier.info("Cloud storage unreachable; showing the local backup");
        notifier.error("Failed to load passwords: Decode error: bad");

        let shown = without_errors_if(receiver.drain(), true);
        assert_eq!(shown.len(), 1);
        assert_eq!(shown[0].kind, NoticeKind::Info);

        notifier.error("Failed to save password to cloud");
        assert_eq!(without_errors_if(receiver.drain(), false).len(), 1);
    }
}
