//! Vault encryption-at-rest.
//!
//! The codec turns a [`Vault`](crate::model::Vault) into an opaque text blob
//! and back. It uses well-audited primitives:
//! - **Age** with an X25519 recipient for the payload
//! - **Base64** to make the ciphertext safe to store as text
//!
//! ## Key Model
//!
//! The key is a device-scoped age identity kept in a key file next to the
//! configuration (see [`DeviceKey`]). Nothing is collected from the user.
//! A blob can only be decoded where a copy of that key file exists; losing
//! the key file makes existing blobs undecodable.
//!
//! ## Threat Model
//!
//! We defend against:
//! - Casual inspection of persisted bytes (file browsers, storage viewers)
//! - Silent corruption: any modified blob fails to decode
//!
//! We do NOT defend against:
//! - Anyone who can read the key file (it lives on the same device)
//! - Code execution on the device / access to process memory

mod encryption;
mod key;
mod vault;

pub use key::DeviceKey;
pub use vault::{EncryptedBlob, VaultCodec};
