//! Device-scoped key material for the vault codec.
//!
//! The key is an age X25519 identity stored in a standard age identity file:
//!
//! ```text
//! # created: 2024-01-01T00:00:00+00:00
//! # public key: age1...
//! AGE-SECRET-KEY-1...
//! ```

use std::path::Path;
use std::str::FromStr;

use age::x25519;
use chrono::Utc;
use secrecy::{ExposeSecret, SecretString};
use tracing::info;

use crate::error::{PassoError, Result};
use crate::fs::write_private;

/// The device key used by [`VaultCodec`](super::VaultCodec).
///
/// Key material stays inside the age identity, which zeroizes itself on
/// drop. `Debug` never prints it.
#[derive(Clone)]
pub struct DeviceKey {
    identity: x25519::Identity,
    recipient: x25519::Recipient,
}

impl DeviceKey {
    /// Generate a fresh random key.
    pub fn generate() -> Self {
        Self::from_identity(x25519::Identity::generate())
    }

    fn from_identity(identity: x25519::Identity) -> Self {
        let recipient = identity.to_public();
        Self {
            identity,
            recipient,
        }
    }

    /// Parse the contents of an identity file.
    ///
    /// Blank lines and `#` comments are skipped; the first remaining line must
    /// be an `AGE-SECRET-KEY-1...` string.
    pub fn parse(contents: &str) -> Result<Self> {
        let line = contents
            .lines()
            .map(str::trim)
            .find(|line| !line.is_empty() && !line.starts_with('#'))
            .ok_or_else(|| PassoError::Crypto("Key file contains no key".to_string()))?;

        let identity = x25519::Identity::from_str(line)
            .map_err(|e| PassoError::Crypto(format!("Invalid device key: {}", e)))?;
        Ok(Self::from_identity(identity))
    }

    /// Public half of the key, as an `age1...` string.
    pub fn public_key(&self) -> String {
        self.recipient.to_string()
    }

    /// Render the identity file written by [`DeviceKey::save`].
    pub fn to_file_contents(&self) -> SecretString {
        let secret = self.identity.to_string();
        SecretString::from(format!(
            "# created: {}\n# public key: {}\n{}\n",
            Utc::now().to_rfc3339(),
            self.public_key(),
            secret.expose_secret()
        ))
    }

    /// Read a key file.
    ///
    /// # Errors
    ///
    /// Returns `PassoError::NotFound` if the file does not exist and
    /// `PassoError::Crypto` if it does not hold a valid key.
    pub fn load(path: &Path) -> Result<Self> {
        let contents = match std::fs::read_to_string(path) {
            Ok(contents) => SecretString::from(contents),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                return Err(PassoError::NotFound(format!(
                    "Key file {}",
                    path.display()
                )))
            }
            Err(e) => {
                return Err(PassoError::Storage(format!(
                    "Failed to read key file {}: {}",
                    path.display(),
                    e
                )))
            }
        };
        Self::parse(contents.expose_secret())
    }

    /// Write the key file with owner-only permissions.
    pub fn save(&self, path: &Path) -> Result<()> {
        write_private(path, self.to_file_contents().expose_secret().as_bytes())
            .map_err(|e| PassoError::WriteFailure(format!("Key file {}: {}", path.display(), e)))
    }

    /// Load the key at `path`, creating one on first use.
    pub fn load_or_create(path: &Path) -> Result<Self> {
        match Self::load(path) {
            Ok(key) => Ok(key),
            Err(PassoError::NotFound(_)) => {
                let key = Self::generate();
                key.save(path)?;
                info!(path = %path.display(), "created device key");
                Ok(key)
            }
            Err(e) => Err(e),
        }
    }

    pub(super) fn identity(&self) -> &x25519::Identity {
        &self.identity
    }

    pub(super) fn recipient(&self) -> &x25519::Recipient {
        &self.recipient
    }
}

impl std::fmt::Debug for DeviceKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DeviceKey")
            .field("public_key", &self.public_key())
            .field("identity", &"[REDACTED]")
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_save_then_load_same_key() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("keys").join("device.key");

        let key = DeviceKey::generate();
        key.save(&path).unwrap();
        let loaded = DeviceKey::load(&path).unwrap();

        assert_eq!(key.public_key(), loaded.public_key());
    }

    #[test]
    fn test_load_or_create_is_stable() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("device.key");

        let first = DeviceKey::load_or_create(&path).unwrap();
        let second = DeviceKey::load_or_create(&path).unwrap();

        assert!(path.exists());
        assert_eq!(first.public_key(), second.public_key());
    }

    #[test]
    fn test_load_missing_is_not_found() {
        let dir = tempdir().unwrap();
        let result = DeviceKey::load(&dir.path().join("missing.key"));
        assert!(matches!(result, Err(PassoError::NotFound(_))));
    }

    #[test]
    fn test_parse_rejects_garbage() {
        assert!(matches!(
            DeviceKey::parse("# only a comment\n"),
            Err(PassoError::Crypto(_))
        ));
        assert!(matches!(
            DeviceKey::parse("AGE-SECRET-KEY-1NOTAKEY"),
            Err(PassoError::Crypto(_))
        ));
    }

    #[test]
    fn test_debug_redacts_identity() {
        let key = DeviceKey::generate();
        let debug_output = format!("{:?}", key);
        assert!(debug_output.contains("REDACTED"));
        assert!(!debug_output.contains("AGE-SECRET-KEY"));
    }

    #[cfg(unix)]
    #[test]
    fn test_key_file_is_owner_only() {
        use std::os::unix::fs::PermissionsExt;

        let dir = tempdir().unwrap();
        let path = dir.path().join("device.key");
        DeviceKey::generate().save(&path).unwrap();

        let mode = std::fs::metadata(&path).unwrap().permissions().mode();
        assert_eq!(mode & 0o777, 0o600);
    }
}
