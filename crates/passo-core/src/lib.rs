//! # Passo Core
//!
//! Core library for Passo - a password manager with encrypted local storage
//! and optional cloud sync.
//!
//! This crate provides the domain model, the vault codec, storage
//! abstractions and the persistence gateway, independent of any front end.
//!
//! ## Architecture
//!
//! - **model**: credential records and the vault
//! - **codec**: vault encryption-at-rest (age + device key)
//! - **storage**: device key-value storage
//! - **remote**: record-oriented remote store
//! - **gateway**: routes loads and saves, keeps the encrypted backup
//! - **notify**: user-visible notices
//! - **preferences**: storage mode and theme
//! - **generator**: random passwords
//!
//! ## Security
//!
//! Local encryption obscures secrets from casual inspection of the stored
//! bytes. It does not protect against an attacker with code execution or
//! storage access on the same device, since the key lives there too.

pub mod codec;
pub mod error;
pub mod fs;
pub mod gateway;
pub mod generator;
pub mod model;
pub mod notify;
pub mod preferences;
pub mod remote;
pub mod storage;

pub use codec::{DeviceKey, EncryptedBlob, VaultCodec};
pub use error::{PassoError, Result};
pub use gateway::{PersistenceGateway, SessionContext, StorageTarget};
pub use model::{CredentialRecord, Identity, NewCredential, Vault};
pub use preferences::{StorageMode, Theme};

/// Core version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version() {
        assert!(!VERSION.is_empty());
    }
}
