//! Device storage abstraction for Passo.
//!
//! Device storage is a small key-value store of text values addressed by
//! fixed keys. Vault keys hold [`EncryptedBlob`](crate::codec::EncryptedBlob)
//! text; the preference keys hold short lowercase words.
//!
//! ## Backends
//!
//! - [`FileDeviceStore`]: one file per key in a data directory, written
//!   atomically with owner-only permissions
//! - [`MemoryDeviceStore`]: in-process map for tests and embedders
//!
//! There is no cross-process locking: one writer per data directory.

pub mod file;
pub mod memory;
pub mod traits;

pub use file::FileDeviceStore;
pub use memory::MemoryDeviceStore;
pub use traits::DeviceStore;

/// Fixed device-storage keys.
pub mod keys {
    /// Encrypted vault while running in local mode
    pub const VAULT_PRIMARY: &str = "vault-primary";

    /// Encrypted copy of the vault kept while the remote store is authoritative
    pub const VAULT_BACKUP: &str = "vault-backup";

    /// `light` or `dark`
    pub const THEME_PREFERENCE: &str = "theme-preference";

    /// `local` or `cloud`
    pub const STORAGE_MODE_PREFERENCE: &str = "storage-mode-preference";
}
