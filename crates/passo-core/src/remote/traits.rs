//! Remote store trait definition.

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::codec::VaultCodec;
use crate::error::Result;
use crate::model::CredentialRecord;

/// A credential as the remote store holds it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RemoteCredential {
    pub id: String,
    pub owner_id: String,
    pub website: String,
    pub login: String,
    /// Output of [`VaultCodec::encode_secret`]
    pub encrypted_secret: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl RemoteCredential {
    /// Prepare `record` for upload under `owner_id`, encrypting its secret.
    pub fn seal(record: &CredentialRecord, owner_id: &str, codec: &VaultCodec) -> Result<Self> {
        Ok(Self {
            id: record.id.clone(),
            owner_id: owner_id.to_string(),
            website: record.website.clone(),
            login: record.login.clone(),
            encrypted_secret: codec.encode_secret(&record.secret)?.into_string(),
            created_at: record.created_at,
            updated_at: record.updated_at,
        })
    }

    /// Turn a downloaded row back into a record.
    ///
    /// # Errors
    ///
    /// Returns `PassoError::Decode` if the secret cannot be decoded.
    pub fn open(self, codec: &VaultCodec) -> Result<CredentialRecord> {
        let secret = codec.decode_secret(&self.encrypted_secret)?;
        Ok(CredentialRecord {
            id: self.id,
            website: self.website,
            login: self.login,
            secret,
            created_at: self.created_at,
            updated_at: self.updated_at,
            owner_id: Some(self.owner_id),
        })
    }
}

/// Record-oriented remote store addressed by owner and record id.
///
/// Errors:
/// - `PassoError::BackendUnavailable` when the store cannot be reached
/// - `PassoError::RemoteOperation` when the store rejects the request
#[async_trait]
pub trait RemoteStore: Send + Sync {
    /// Insert a new record.
    async fn insert(&self, record: &RemoteCredential) -> Result<()>;

    /// Update `website`, `login`, `encrypted_secret` and `updated_at` of the
    /// record matching both `record.id` and `record.owner_id`.
    ///
    /// Rejected when no such record exists.
    async fn update(&self, record: &RemoteCredential) -> Result<()>;

    /// Delete the record matching `id` and `owner_id`. Deleting a record that
    /// is already gone succeeds.
    async fn delete(&self, owner_id: &str, id: &str) -> Result<()>;

    /// All records of `owner_id`, newest `created_at` first.
    async fn list(&self, owner_id: &str) -> Result<Vec<RemoteCredential>>;
}
