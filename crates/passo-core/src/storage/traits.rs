//! Device storage trait definition.

use crate::error::Result;

/// Key-value text store on the user's device.
///
/// Implementations must ensure:
/// - `set` replaces the whole value atomically (no torn writes)
/// - write errors surface as `PassoError::WriteFailure`
/// - a missing key reads as `Ok(None)`, never as an error
pub trait DeviceStore: Send + Sync {
    /// Read the value stored under `key`.
    fn get(&self, key: &str) -> Result<Option<String>>;

    /// Store `value` under `key`, replacing any previous value.
    ///
    /// # Errors
    ///
    /// Returns `PassoError::WriteFailure` on quota, permission or I/O errors.
    fn set(&self, key: &str, value: &str) -> Result<()>;

    /// Remove `key`. Removing a missing key is not an error.
    fn remove(&self, key: &str) -> Result<()>;
}
