//! ConfigStore - Local Configuration Storage

use std::fs;
use std::path::PathBuf;

use anyhow::Result;
use directories::ProjectDirs;
use serde::{de::DeserializeOwned, Serialize};

/// Get the application data directory
pub fn app_data_dir() -> Result<PathBuf> {
    let dirs = ProjectDirs::from("org", "asogan", "ganaderos-portal")
        .ok_or_else(|| anyhow::anyhow!("Could not find local data directory"))?;
    let dir = dirs.data_local_dir().to_path_buf();

    if !dir.exists() {
        fs::create_dir_all(&dir)?;
    }

    Ok(dir)
}

/// Load a TOML config file, defaults when the file does not exist
pub fn load_config<T: DeserializeOwned + Default>(filename: &str) -> Result<T> {
    let path = app_data_dir()?.join(filename);

    if !path.exists() {
        return Ok(T::default());
    }

    let content = fs::read_to_string(&path)?;
    let config: T = toml::from_str(&content)?;
    Ok(config)
}

/// Save a TOML config file
pub fn save_config<T: Serialize>(filename: &str, config: &T) -> Result<()> {
    let path = app_data_dir()?.join(filename);
    let content = toml::to_string_pretty(config)?;
    fs::write(&path, content)?;
    Ok(())
}

/// Delete a config file
pub fn delete_config(filename: &str) -> Result<()> {
    let path = app_data_dir()?.join(filename);
    if path.exists() {
        fs::remove_file(&path)?;
    }
    Ok(())
}
