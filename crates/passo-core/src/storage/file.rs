//! File-backed device storage.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use tracing::debug;

use super::traits::DeviceStore;
use crate::error::{PassoError, Result};
use crate::fs::write_private;

/// Stores each key as a file named after the key inside `dir`.
#[derive(Debug, Clone)]
pub struct FileDeviceStore {
    dir: PathBuf,
}

impl FileDeviceStore {
    /// Use `dir` as the data directory. It is created on first write.
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn path_for(&self, key: &str) -> Result<PathBuf> {
        let valid = !key.is_empty()
            && key
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_');
        if !valid {
            return Err(PassoError::InvalidInput(format!(
                "Invalid storage key: {:?}",
                key
            )));
        }
        Ok(self.dir.join(key))
    }
}

impl DeviceStore for FileDeviceStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        let path = self.path_for(key)?;
        match fs::read(&path) {
            Ok(bytes) => String::from_utf8(bytes).map(Some).map_err(|e| {
                PassoError::Decode(format!("{} is not valid text: {}", path.display(), e))
            }),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(PassoError::Storage(format!(
                "Failed to read {}: {}",
                path.display(),
                e
            ))),
        }
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        let path = self.path_for(key)?;
        write_private(&path, value.as_bytes()).map_err(|e| {
            PassoError::WriteFailure(format!("Failed to write {}: {}", path.display(), e))
        })?;
        debug!(key, bytes = value.len(), "device store write");
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<()> {
        let path = self.path_for(key)?;
        match fs::remove_file(&path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(PassoError::WriteFailure(format!(
                "Failed to remove {}: {}",
                path.display(),
                e
            ))),
        }
    }
}
