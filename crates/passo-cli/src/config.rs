use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

/// Contents of `config.toml`. Every section is optional.
#[derive(Debug, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct PassoConfig {
    #[serde(default)]
    pub storage: StorageSection,
    #[serde(default)]
    pub keyfile: KeyfileSection,
    #[serde(default)]
    pub cloud: CloudSection,
}

#[derive(Debug, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct StorageSection {
    /// Directory holding the device-storage files
    pub dir: Option<String>,
}

#[derive(Debug, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct KeyfileSection {
    pub path: Option<String>,
}

#[derive(Debug, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct CloudSection {
    /// SQLite database acting as the sync backend
    pub database: Option<String>,
    pub user_id: Option<String>,
}

impl PassoConfig {
    pub fn new(
        storage_dir: PathBuf,
        keyfile_path: PathBuf,
        cloud_database: Option<PathBuf>,
        user_id: Option<String>,
    ) -> Self {
        Self {
            storage: StorageSection {
                dir: Some(storage_dir.to_string_lossy().to_string()),
            },
            keyfile: KeyfileSection {
                path: Some(keyfile_path.to_string_lossy().to_string()),
            },
            cloud: CloudSection {
                database: cloud_database.map(|path| path.to_string_lossy().to_string()),
                user_id,
            },
        }
    }

    pub fn storage_dir(&self) -> anyhow::Result<PathBuf> {
        match non_empty(&self.storage.dir) {
            Some(dir) => Ok(PathBuf::from(dir)),
            None => default_storage_dir(),
        }
    }

    pub fn keyfile_path(&self) -> anyhow::Result<PathBuf> {
        match non_empty(&self.keyfile.path) {
            Some(path) => Ok(PathBuf::from(path)),
            None => default_keyfile_path(),
        }
    }

    pub fn cloud_database(&self) -> Option<PathBuf> {
        non_empty(&self.cloud.database).map(PathBuf::from)
    }

    pub fn user_id(&self) -> Option<&str> {
        non_empty(&self.cloud.user_id)
    }
}

fn non_empty(value: &Option<String>) -> Option<&str> {
    value.as_deref().map(str::trim).filter(|v| !v.is_empty())
}

pub fn default_config_path() -> anyhow::Result<PathBuf> {
    Ok(xdg_config_dir()?.join("config.toml"))
}

pub fn default_storage_dir() -> anyhow::Result<PathBuf> {
    Ok(xdg_data_dir()?.join("store"))
}

pub fn default_keyfile_path() -> anyhow::Result<PathBuf> {
    Ok(xdg_config_dir()?.join("device.key"))
}

pub fn read_config(path: &Path) -> anyhow::Result<PassoConfig> {
    let contents = std::fs::read_to_string(path)
        .map_err(|e| anyhow::anyhow!("Failed to read config {}: {}", path.display(), e))?;
    toml::from_str(&contents)
        .map_err(|e| anyhow::anyhow!("Failed to parse config {}: {}", path.display(), e))
}

pub fn write_config(path: &Path, config: &PassoConfig) -> anyhow::Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).map_err(|e| {
            anyhow::anyhow!(
                "Failed to create config directory {}: {}",
                parent.display(),
                e
            )
        })?;
    }
    let contents =
        toml::to_string_pretty(config).map_err(|e| anyhow::anyhow!("TOML error: {}", e))?;
    std::fs::write(path, contents)
        .map_err(|e| anyhow::anyhow!("Failed to write config {}: {}", path.display(), e))?;
    Ok(())
}

pub fn xdg_config_dir() -> anyhow::Result<PathBuf> {
    if let Ok(value) = std::env::var("XDG_CONFIG_HOME") {
        if !value.trim().is_empty() {
            return Ok(PathBuf::from(value).join("passo"));
        }
    }
    Ok(home_dir()?.join(".config").join("passo"))
}

pub fn xdg_data_dir() -> anyhow::Result<PathBuf> {
    if let Ok(value) = std::env::var("XDG_DATA_HOME") {
        if !value.trim().is_empty() {
            return Ok(PathBuf::from(value).join("passo"));
        }
    }
    Ok(home_dir()?.join(".local").join("share").join("passo"))
}

fn home_dir() -> anyhow::Result<PathBuf> {
    let home = std::env::var("HOME")
        .map_err(|_| anyhow::anyhow!("HOME is not set; cannot resolve default paths"))?;
    Ok(PathBuf::from(home))
}
