//! Persisted user preferences: storage mode and theme.
//!
//! Preferences live in device storage next to the vault but outside it,
//! as single lowercase words.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::error::{PassoError, Result};
use crate::storage::{keys, DeviceStore};

/// Which backend is authoritative for the vault.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StorageMode {
    #[default]
    Local,
    Cloud,
}

impl StorageMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            StorageMode::Local => "local",
            StorageMode::Cloud => "cloud",
        }
    }
}

impl fmt::Display for StorageMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for StorageMode {
    type Err = PassoError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim() {
            "local" => Ok(StorageMode::Local),
            "cloud" => Ok(StorageMode::Cloud),
            other => Err(PassoError::InvalidInput(format!(
                "Unknown storage mode: {:?} (expected \"local\" or \"cloud\")",
                other
            ))),
        }
    }
}

/// Color theme preference.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    #[default]
    Light,
    Dark,
}

impl Theme {
    pub fn as_str(&self) -> &'static str {
        match self {
            Theme::Light => "light",
            Theme::Dark => "dark",
        }
    }
}

impl fmt::Display for Theme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Theme {
    type Err = PassoError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim() {
            "light" => Ok(Theme::Light),
            "dark" => Ok(Theme::Dark),
            other => Err(PassoError::InvalidInput(format!(
                "Unknown theme: {:?} (expected \"light\" or \"dark\")",
                other
            ))),
        }
    }
}

/// Read the stored storage mode, if a valid one is stored.
///
/// An unrecognized stored value is logged and treated as absent.
pub fn read_storage_mode(store: &dyn DeviceStore) -> Result<Option<StorageMode>> {
    read_word(store, keys::STORAGE_MODE_PREFERENCE)
}

pub fn write_storage_mode(store: &dyn DeviceStore, mode: StorageMode) -> Result<()> {
    store.set(keys::STORAGE_MODE_PREFERENCE, mode.as_str())
}

/// Read the stored theme, if a valid one is stored.
pub fn read_theme(store: &dyn DeviceStore) -> Result<Option<Theme>> {
    read_word(store, keys::THEME_PREFERENCE)
}

pub fn write_theme(store: &dyn DeviceStore, theme: Theme) -> Result<()> {
    store.set(keys::THEME_PREFERENCE, theme.as_str())
}

fn read_word<T>(store: &dyn DeviceStore, key: &str) -> Result<Option<T>>
where
    T: FromStr<Err = PassoError>,
{
    let Some(raw) = store.get(key)? else {
        return Ok(None);
    };
    match raw.parse() {
        Ok(value) => Ok(Some(value)),
        Err(e) => {
            warn!(key, error = %e, "ignoring unrecognized preference");
            Ok(None)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MemoryDeviceStore;

    #[test]
    fn test_storage_mode_round_trip() {
        let store = MemoryDeviceStore::new();
        assert_eq!(read_storage_mode(&store).unwrap(), None);

        write_storage_mode(&store, StorageMode::Cloud).unwrap();
        assert_eq!(
            store.get(keys::STORAGE_MODE_PREFERENCE).unwrap().as_deref(),
            Some("cloud")
        );
        assert_eq!(read_storage_mode(&store).unwrap(), Some(StorageMode::Cloud));
    }

    #[test]
    fn test_unknown_values_read_as_absent() {
        let store = MemoryDeviceStore::new();
        store.set(keys::STORAGE_MODE_PREFERENCE, "satellite").unwrap();
        store.set(keys::THEME_PREFERENCE, "sepia").unwrap();

        assert_eq!(read_storage_mode(&store).unwrap(), None);
        assert_eq!(read_theme(&store).unwrap(), None);
    }

    #[test]
    fn test_theme_round_trip() {
        let store = MemoryDeviceStore::new();
        write_theme(&store, Theme::Dark).unwrap();
        assert_eq!(read_theme(&store).unwrap(), Some(Theme::Dark));
    }

    #[test]
    fn test_parse_errors_are_invalid_input() {
        assert!(matches!(
            "Cloud!".parse::<StorageMode>(),
            Err(PassoError::InvalidInput(_))
        ));
        assert_eq!(" dark ".parse::<Theme>().unwrap(), Theme::Dark);
    }
}
