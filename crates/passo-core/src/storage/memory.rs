//! In-memory device storage.

use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard};

use super::traits::DeviceStore;
use crate::error::{PassoError, Result};

/// A `HashMap` behind a mutex. Values live as long as the store.
#[derive(Debug, Default)]
pub struct MemoryDeviceStore {
    values: Mutex<HashMap<String, String>>,
}

impl MemoryDeviceStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn values(&self) -> Result<MutexGuard<'_, HashMap<String, String>>> {
        self.values
            .lock()
            .map_err(|_| PassoError::Storage("Memory store lock poisoned".to_string()))
    }
}

impl DeviceStore for MemoryDeviceStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        Ok(self.values()?.get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        self.values()?.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<()> {
        self.values()?.remove(key);
        Ok(())
    }
}
