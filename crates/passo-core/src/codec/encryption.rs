//! Age encryption/decryption for the device key.
//!
//! Thin wrappers around the Age library using an X25519 recipient. Every
//! call to [`encrypt`] uses a fresh file key, so the same plaintext encrypts
//! to different bytes each time.

use std::io::{Read, Write};
use std::iter;

use zeroize::Zeroizing;

use super::key::DeviceKey;
use crate::error::{PassoError, Result};

/// Encrypt `data` to the device key.
///
/// Writing into an in-memory buffer cannot fail, so in practice the only
/// error source is the age encryptor itself.
pub(super) fn encrypt(data: &[u8], key: &DeviceKey) -> Result<Vec<u8>> {
    let encryptor = age::Encryptor::with_recipients(iter::once(
        key.recipient() as &dyn age::Recipient
    ))
    .map_err(|e| PassoError::Crypto(format!("Failed to create encryptor: {}", e)))?;

    let mut encrypted = Vec::new();
    let mut writer = encryptor
        .wrap_output(&mut encrypted)
        .map_err(|e| PassoError::Crypto(format!("Failed to create encryptor: {}", e)))?;

    writer
        .write_all(data)
        .map_err(|e| PassoError::Crypto(format!("Encryption write failed: {}", e)))?;

    writer
        .finish()
        .map_err(|e| PassoError::Crypto(format!("Encryption finish failed: {}", e)))?;

    Ok(encrypted)
}

/// Decrypt age ciphertext with the device key.
///
/// # Errors
///
/// Returns `PassoError::Decode` if:
/// - The input is not an age file
/// - It was encrypted to a different key
/// - Any byte of the header or payload was modified
pub(super) fn decrypt(encrypted_data: &[u8], key: &DeviceKey) -> Result<Zeroizing<Vec<u8>>> {
    let decryptor = age::Decryptor::new(encrypted_data)
        .map_err(|e| PassoError::Decode(format!("Not a vault payload: {}", e)))?;

    let mut reader = decryptor
        .decrypt(iter::once(key.identity() as &dyn age::Identity))
        .map_err(|e| match e {
            age::DecryptError::NoMatchingKeys => {
                PassoError::Decode("Payload was encrypted with a different device key".to_string())
            }
            _ => PassoError::Decode(format!("Decryption failed: {}", e)),
        })?;

    let mut decrypted = Zeroizing::new(Vec::new());
    reader
        .read_to_end(&mut decrypted)
        .map_err(|e| PassoError::Decode(format!("Failed to read decrypted data: {}", e)))?;

    Ok(decrypted)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_encrypt_decrypt_round_trip() {
        let key = DeviceKey::generate();
        let plaintext = b"Hello, World! This is secret data.";

        let encrypted = encrypt(plaintext, &key).unwrap();
        let decrypted = decrypt(&encrypted, &key).unwrap();

        assert_eq!(decrypted.as_slice(), plaintext);
    }

    #[test]
    fn test_encryption_is_randomized() {
        let key = DeviceKey::generate();
        let plaintext = b"same plaintext";

        let first = encrypt(plaintext, &key).unwrap();
        let second = encrypt(plaintext, &key).unwrap();

        assert_ne!(first, second);
        assert_ne!(first.as_slice(), plaintext);
    }

    #[test]
    fn test_wrong_key_fails_decryption() {
        let key = DeviceKey::generate();
        let other = DeviceKey::generate();

        let encrypted = encrypt(b"secret data", &key).unwrap();
        let result = decrypt(&encrypted, &other);

        assert!(matches!(result, Err(PassoError::Decode(_))));
    }

    #[test]
    fn test_corrupted_data_fails_decryption() {
        let key = DeviceKey::generate();
        let mut encrypted = encrypt(b"secret data", &key).unwrap();

        let len = encrypted.len();
        encrypted[len / 2] ^= 0xFF;

        assert!(matches!(
            decrypt(&encrypted, &key),
            Err(PassoError::Decode(_))
        ));
    }

    #[test]
    fn test_empty_data_encryption() {
        let key = DeviceKey::generate();

        let encrypted = encrypt(b"", &key).unwrap();
        let decrypted = decrypt(&encrypted, &key).unwrap();

        assert!(decrypted.is_empty());
    }
}
