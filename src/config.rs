//! Saver configuration loaded from YAML

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Node configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SaverConfig {
    /// Root directory every save must stay inside.
    pub output_root: PathBuf,
    /// Default save path relative to the output root.
    #[serde(default)]
    pub save_path: String,
    /// Default filename template.
    #[serde(default = "default_filename")]
    pub filename: String,
}

fn default_filename() -> String {
    "ComfyUI".to_string()
}

pub fn load_config(path: &Path) -> Result<SaverConfig> {
    let config_str = fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file: {}", path.display()))?;

    let config: SaverConfig =
        serde_yaml::from_str(&config_str).with_context(|| "Failed to parse YAML config")?;

    Ok(config)
}
