//! Persistence gateway: routes vault loads and saves to the right store.
//!
//! The gateway holds no session state of its own. Every operation receives a
//! [`SessionContext`] (storage mode + current identity) and resolves the
//! target for that call:
//!
//! | mode    | identity | remote configured | target | backup slot     |
//! |---------|----------|-------------------|--------|-----------------|
//! | `cloud` | yes      | yes               | remote | `vault-backup`  |
//! | other   |          |                   | local  | `vault-primary` |
//!
//! Mutations are applied to the authoritative store first (the remote store,
//! or the caller's in-memory vault in local mode). Only when that succeeds is
//! the whole vault re-encoded and written to the backup slot. A failed backup
//! write is reported as a notice and never rolls the mutation back.

use std::sync::Arc;

use chrono::Utc;
use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::codec::VaultCodec;
use crate::error::{PassoError, Result};
use crate::model::{CredentialRecord, Identity, NewCredential, Vault};
use crate::notify::Notifier;
use crate::preferences::{read_storage_mode, write_storage_mode, StorageMode};
use crate::remote::{RemoteCredential, RemoteStore};
use crate::storage::{keys, DeviceStore};

/// Per-call inputs that used to be ambient globals.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SessionContext {
    pub mode: StorageMode,
    pub identity: Option<Identity>,
}

impl SessionContext {
    pub fn new(mode: StorageMode, identity: Option<Identity>) -> Self {
        Self { mode, identity }
    }

    pub fn local() -> Self {
        Self::default()
    }
}

/// Where an operation goes, as resolved from a [`SessionContext`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StorageTarget {
    Local,
    Remote,
}

impl StorageTarget {
    /// Device-storage key the encrypted vault is written to for this target.
    pub fn backup_key(&self) -> &'static str {
        match self {
            StorageTarget::Local => keys::VAULT_PRIMARY,
            StorageTarget::Remote => keys::VAULT_BACKUP,
        }
    }
}

enum Route<'a> {
    Local,
    Remote {
        store: &'a dyn RemoteStore,
        owner_id: &'a str,
    },
}

impl Route<'_> {
    fn target(&self) -> StorageTarget {
        match self {
            Route::Local => StorageTarget::Local,
            Route::Remote { .. } => StorageTarget::Remote,
        }
    }
}

/// Loads and saves vaults for the front end.
pub struct PersistenceGateway {
    device: Arc<dyn DeviceStore>,
    remote: Option<Arc<dyn RemoteStore>>,
    codec: VaultCodec,
    notifier: Notifier,
}

impl PersistenceGateway {
    /// Gateway with device storage only; every call resolves to local.
    pub fn new(device: Arc<dyn DeviceStore>, codec: VaultCodec, notifier: Notifier) -> Self {
        Self {
            device,
            remote: None,
            codec,
            notifier,
        }
    }

    /// Configure a remote backend.
    pub fn with_remote(mut self, remote: Arc<dyn RemoteStore>) -> Self {
        self.remote = Some(remote);
        self
    }

    pub fn remote_configured(&self) -> bool {
        self.remote.is_some()
    }

    pub fn codec(&self) -> &VaultCodec {
        &self.codec
    }

    pub fn device(&self) -> &dyn DeviceStore {
        self.device.as_ref()
    }

    /// Resolve which store `ctx` targets.
    pub fn target(&self, ctx: &SessionContext) -> StorageTarget {
        self.route(ctx).target()
    }

    fn route<'a>(&'a self, ctx: &'a SessionContext) -> Route<'a> {
        match (ctx.mode, &ctx.identity, &self.remote) {
            (StorageMode::Cloud, Some(identity), Some(remote)) => Route::Remote {
                store: remote.as_ref(),
                owner_id: identity.id.as_str(),
            },
            _ => Route::Local,
        }
    }

    // --- Storage mode ---

    /// The mode to start in.
    ///
    /// Absent or unreadable preferences mean `local`, and so does a stored
    /// `cloud` when no remote backend is configured.
    pub fn stored_mode(&self) -> StorageMode {
        match read_storage_mode(self.device.as_ref()) {
            Ok(Some(StorageMode::Cloud)) if !self.remote_configured() => {
                debug!("stored cloud mode ignored: no remote backend configured");
                StorageMode::Local
            }
            Ok(Some(mode)) => mode,
            Ok(None) => StorageMode::Local,
            Err(e) => {
                warn!(error = %e, "failed to read storage mode preference");
                StorageMode::Local
            }
        }
    }

    /// Switch storage mode and persist the choice.
    ///
    /// `cloud` without a configured remote backend is forced to `local`.
    /// No records are migrated or merged: only future operations change
    /// target. Returns the mode now in effect.
    pub fn select_mode(&self, requested: StorageMode) -> StorageMode {
        let mode = if requested == StorageMode::Cloud && !self.remote_configured() {
            self.notifier
                .info("Cloud storage is not configured; staying in local mode");
            StorageMode::Local
        } else {
            requested
        };

        if let Err(e) = write_storage_mode(self.device.as_ref(), mode) {
            self.notifier
                .error(format!("Failed to remember storage mode: {}", e));
        }
        info!(%mode, "storage mode selected");
        mode
    }

    // --- Load ---

    /// Load the vault for `ctx`.
    ///
    /// - Remote target: list the owner's records and decode each secret. If
    ///   the remote store is unreachable, the backup slot is read instead.
    /// - Local target: read the primary slot. A missing blob is an empty
    ///   vault.
    ///
    /// # Errors
    ///
    /// Returns `PassoError::Decode` when stored data cannot be decoded. The
    /// caller must keep its current state rather than treat this as empty.
    pub async fn load(&self, ctx: &SessionContext) -> Result<Vault> {
        let result = match self.route(ctx) {
            Route::Remote { store, owner_id } => match self.load_remote(store, owner_id).await {
                Err(PassoError::BackendUnavailable(reason)) => {
                    warn!(%reason, "remote store unreachable, loading local backup");
                    self.notifier
                        .info("Cloud storage unreachable; showing the local backup");
                    self.load_slot(keys::VAULT_BACKUP)
                }
                other => other,
            },
            Route::Local => self.load_slot(keys::VAULT_PRIMARY),
        };

        if let Err(e) = &result {
            self.notifier.error(format!("Failed to load passwords: {}", e));
        }
        result
    }

    async fn load_remote(&self, store: &dyn RemoteStore, owner_id: &str) -> Result<Vault> {
        let rows = store.list(owner_id).await?;
        let records = rows
            .into_iter()
            .map(|row| row.open(&self.codec))
            .collect::<Result<Vec<_>>>()?;
        debug!(count = records.len(), "loaded vault from remote store");
        Ok(Vault::from_records(records))
    }

    fn load_slot(&self, key: &str) -> Result<Vault> {
        match self.device.get(key)? {
            Some(blob) => {
                let vault = self.codec.decode(&blob)?;
                debug!(key, count = vault.len(), "loaded vault from device storage");
                Ok(vault)
            }
            None => {
                debug!(key, "no stored vault yet");
                Ok(Vault::new())
            }
        }
    }

    // --- Save ---

    /// Encode the whole vault and write it to the slot for `ctx`'s target.
    ///
    /// Mutation methods call this themselves; it is public for callers that
    /// replace the vault wholesale.
    pub fn save(&self, ctx: &SessionContext, vault: &Vault) -> Result<()> {
        self.write_slot(self.target(ctx), vault)
    }

    fn write_slot(&self, target: StorageTarget, vault: &Vault) -> Result<()> {
        let key = target.backup_key();
        let blob = self.codec.encode(vault)?;
        self.device.set(key, blob.as_str())?;
        debug!(key, count = vault.len(), "vault written");
        Ok(())
    }

    /// Write the backup after a mutation; failures become notices.
    fn persist_after_mutation(&self, target: StorageTarget, vault: &Vault) {
        if let Err(e) = self.write_slot(target, vault) {
            warn!(error = %e, key = target.backup_key(), "vault backup failed");
            self.notifier
                .error(format!("Saved, but the local copy could not be written: {}", e));
        }
    }

    // --- Mutations ---

    /// Create a record from `draft` and add it.
    ///
    /// # Errors
    ///
    /// When the remote store refuses the insert the vault is left untouched
    /// and the remote error is returned.
    pub async fn add(
        &self,
        ctx: &SessionContext,
        vault: &mut Vault,
        draft: NewCredential,
    ) -> Result<CredentialRecord> {
        let mut id = Uuid::new_v4().to_string();
        while vault.contains(&id) {
            id = Uuid::new_v4().to_string();
        }
        let owner_id = ctx.identity.as_ref().map(|identity| identity.id.clone());
        let record = draft.into_record(id, Utc::now(), owner_id);

        let route = self.route(ctx);
        if let Route::Remote { store, owner_id } = &route {
            let remote = RemoteCredential::seal(&record, owner_id, &self.codec)?;
            if let Err(e) = store.insert(&remote).await {
                self.notifier.error("Failed to save password to cloud");
                return Err(e);
            }
        }

        vault.push(record.clone());
        self.persist_after_mutation(route.target(), vault);
        self.notifier.success("Password added successfully!");
        Ok(record)
    }

    /// Replace the record with `record.id`, stamping `updated_at`.
    ///
    /// # Errors
    ///
    /// Returns `PassoError::NotFound` for an unknown id and the remote error
    /// when the remote store refuses the update; in both cases nothing
    /// changes.
    pub async fn update(
        &self,
        ctx: &SessionContext,
        vault: &mut Vault,
        record: CredentialRecord,
    ) -> Result<CredentialRecord> {
        if !vault.contains(&record.id) {
            return Err(PassoError::NotFound(format!("Password {}", record.id)));
        }
        let mut record = record;
        record.updated_at = Utc::now();

        let route = self.route(ctx);
        if let Route::Remote { store, owner_id } = &route {
            let remote = RemoteCredential::seal(&record, owner_id, &self.codec)?;
            if let Err(e) = store.update(&remote).await {
                self.notifier.error("Failed to update password in cloud");
                return Err(e);
            }
        }

        vault.replace(record.clone());
        self.persist_after_mutation(route.target(), vault);
        self.notifier.success("Password updated successfully!");
        Ok(record)
    }

    /// Remove the record with `id` and return it.
    ///
    /// An emptied vault is still written, so the stored blob never lags
    /// behind a delete.
    pub async fn delete(
        &self,
        ctx: &SessionContext,
        vault: &mut Vault,
        id: &str,
    ) -> Result<CredentialRecord> {
        if !vault.contains(id) {
            return Err(PassoError::NotFound(format!("Password {}", id)));
        }

        let route = self.route(ctx);
        if let Route::Remote { store, owner_id } = &route {
            if let Err(e) = store.delete(owner_id, id).await {
                self.notifier.error("Failed to delete password from cloud");
                return Err(e);
            }
        }

        let removed = vault
            .remove(id)
            .ok_or_else(|| PassoError::NotFound(format!("Password {}", id)))?;
        self.persist_after_mutation(route.target(), vault);
        self.notifier.success("Password deleted successfully");
        Ok(removed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::codec::DeviceKey;
    use crate::notify::{NoticeKind, NoticeReceiver};
    use crate::remote::SqliteRemoteStore;
    use crate::storage::MemoryDeviceStore;

    fn gateway() -> (PersistenceGateway, Arc<MemoryDeviceStore>, NoticeReceiver) {
        let device = Arc::new(MemoryDeviceStore::new());
        let (notifier, receiver) = Notifier::channel();
        let gateway = PersistenceGateway::new(
            device.clone(),
            VaultCodec::new(DeviceKey::generate()),
            notifier,
        );
        (gateway, device, receiver)
    }

    fn cloud_ctx() -> SessionContext {
        SessionContext::new(StorageMode::Cloud, Some(Identity::new("user-1")))
    }

    #[test]
    fn test_target_resolution() {
        let (gateway, _, _) = gateway();
        assert_eq!(gateway.target(&cloud_ctx()), StorageTarget::Local);

        let gateway = gateway.with_remote(Arc::new(SqliteRemoteStore::open_in_memory().unwrap()));
        assert_eq!(gateway.target(&cloud_ctx()), StorageTarget::Remote);
        assert_eq!(
            gateway.target(&SessionContext::new(StorageMode::Cloud, None)),
            StorageTarget::Local
        );
        assert_eq!(
            gateway.target(&SessionContext::new(
                StorageMode::Local,
                Some(Identity::new("user-1"))
            )),
            StorageTarget::Local
        );
    }

    #[test]
    fn test_select_cloud_without_remote_forces_local() {
        let (gateway, device, mut receiver) = gateway();

        assert_eq!(gateway.select_mode(StorageMode::Cloud), StorageMode::Local);
        assert_eq!(
            device.get(keys::STORAGE_MODE_PREFERENCE).unwrap().as_deref(),
            Some("local")
        );
        assert_eq!(receiver.drain()[0].kind, NoticeKind::Info);
    }

    #[test]
    fn test_stored_cloud_mode_needs_remote() {
        let (gateway, device, _) = gateway();
        device.set(keys::STORAGE_MODE_PREFERENCE, "cloud").unwrap();
        assert_eq!(gateway.stored_mode(), StorageMode::Local);

        let gateway = gateway.with_remote(Arc::new(SqliteRemoteStore::open_in_memory().unwrap()));
        assert_eq!(gateway.stored_mode(), StorageMode::Cloud);
    }

    #[tokio::test]
    async fn test_local_add_writes_primary_slot() {
        let (gateway, device, mut receiver) = gateway();
        let ctx = SessionContext::local();
        let mut vault = Vault::new();

        let record = gateway
            .add(&ctx, &mut vault, NewCredential::new("a.test", "me", "pw"))
            .await
            .unwrap();

        assert_eq!(record.created_at, record.updated_at);
        assert_eq!(record.owner_id, None);
        let blob = device.get(keys::VAULT_PRIMARY).unwrap().unwrap();
        assert_eq!(gateway.codec().decode(&blob).unwrap(), vault);
        assert!(device.get(keys::VAULT_BACKUP).unwrap().is_none());
        assert_eq!(receiver.drain()[0].kind, NoticeKind::Success);
    }

    #[tokio::test]
    async fn test_update_unknown_id_changes_nothing() {
        let (gateway, device, _) = gateway();
        let ctx = SessionContext::local();
        let mut vault = Vault::new();
        let mut record = gateway
            .add(&ctx, &mut vault, NewCredential::new("a.test", "me", "pw"))
            .await
            .unwrap();
        let before = device.get(keys::VAULT_PRIMARY).unwrap();

        record.id = "missing".to_string();
        let result = gateway.update(&ctx, &mut vault, record).await;

        assert!(matches!(result, Err(PassoError::NotFound(_))));
        assert_eq!(device.get(keys::VAULT_PRIMARY).unwrap(), before);
    }

    #[tokio::test]
    async fn test_delete_last_record_saves_empty_vault() {
        let (gateway, device, _) = gateway();
        let ctx = SessionContext::local();
        let mut vault = Vault::new();
        let record = gateway
            .add(&ctx, &mut vault, NewCredential::new("a.test", "me", "pw"))
            .await
            .unwrap();

        gateway.delete(&ctx, &mut vault, &record.id).await.unwrap();

        let blob = device.get(keys::VAULT_PRIMARY).unwrap().unwrap();
        assert!(gateway.codec().decode(&blob).unwrap().is_empty());
    }
}
