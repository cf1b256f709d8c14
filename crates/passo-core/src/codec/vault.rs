//! Vault <-> blob conversion.

use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use zeroize::Zeroizing;

use super::encryption::{decrypt, encrypt};
use super::key::DeviceKey;
use crate::error::{PassoError, Result};
use crate::model::{CredentialRecord, Vault};

/// Opaque, versionless text produced by [`VaultCodec`].
///
/// The storage layer treats it as an uninterpreted string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EncryptedBlob(String);

impl EncryptedBlob {
    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

impl From<String> for EncryptedBlob {
    fn from(value: String) -> Self {
        Self(value)
    }
}

impl AsRef<str> for EncryptedBlob {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// Encodes whole vaults (and single remote secrets) with the device key.
///
/// Pure and synchronous: no I/O happens here.
#[derive(Debug, Clone)]
pub struct VaultCodec {
    key: DeviceKey,
}

impl VaultCodec {
    pub fn new(key: DeviceKey) -> Self {
        Self { key }
    }

    /// Public half of the key in use.
    pub fn public_key(&self) -> String {
        self.key.public_key()
    }

    /// Encode the whole vault as one blob.
    ///
    /// The records are serialized to a JSON array, encrypted, and base64
    /// encoded. An empty vault yields a valid blob that decodes to an empty
    /// vault. Ciphertext is randomized: encoding the same vault twice gives
    /// different blobs that decode to the same records.
    pub fn encode(&self, vault: &Vault) -> Result<EncryptedBlob> {
        let plaintext = Zeroizing::new(
            serde_json::to_vec(vault)
                .map_err(|e| PassoError::Crypto(format!("Failed to serialize vault: {}", e)))?,
        );
        self.seal(&plaintext)
    }

    /// Decode a blob produced by [`VaultCodec::encode`].
    ///
    /// # Errors
    ///
    /// Returns `PassoError::Decode` for anything that is not an intact blob
    /// for this key, or whose payload is not exactly a list of credential
    /// records. Never returns a partial vault.
    pub fn decode(&self, blob: &str) -> Result<Vault> {
        let plaintext = self.open(blob)?;
        let records: Vec<CredentialRecord> = serde_json::from_slice(&plaintext)
            .map_err(|e| PassoError::Decode(format!("Vault payload has unexpected shape: {}", e)))?;
        Ok(Vault::from_records(records))
    }

    /// Encode a single secret for the remote store.
    pub fn encode_secret(&self, secret: &str) -> Result<EncryptedBlob> {
        self.seal(secret.as_bytes())
    }

    /// Decode a single secret produced by [`VaultCodec::encode_secret`].
    pub fn decode_secret(&self, blob: &str) -> Result<String> {
        let plaintext = self.open(blob)?;
        String::from_utf8(plaintext.to_vec())
            .map_err(|_| PassoError::Decode("Secret is not valid UTF-8".to_string()))
    }

    fn seal(&self, plaintext: &[u8]) -> Result<EncryptedBlob> {
        let encrypted = encrypt(plaintext, &self.key)?;
        Ok(EncryptedBlob(STANDARD.encode(encrypted)))
    }

    fn open(&self, blob: &str) -> Result<Zeroizing<Vec<u8>>> {
        let encrypted = STANDARD
            .decode(blob)
            .map_err(|e| PassoError::Decode(format!("Blob is not valid base64: {}", e)))?;
        decrypt(&encrypted, &self.key)
    }
}
