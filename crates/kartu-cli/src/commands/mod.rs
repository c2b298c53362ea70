//! CLI subcommands.

pub mod batch;
pub mod config;
pub mod list;
pub mod process;

use std::path::{Path, PathBuf};

use tracing::debug;

use kartu_core::models::config::KartuConfig;

/// Default location of the configuration file.
pub fn default_config_path() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("kartu")
        .join("config.json")
}

/// Load the configuration from `--config`, the default location, or defaults.
pub fn load_config(config_path: Option<&str>) -> anyhow::Result<KartuConfig> {
    if let Some(path) = config_path {
        debug!("Loading configuration from {}", path);
        return Ok(KartuConfig::from_file(Path::new(path))?);
    }

    let default_path = default_config_path();
    if default_path.exists() {
        debug!("Loading configuration from {}", default_path.display());
        Ok(KartuConfig::from_file(&default_path)?)
    } else {
        Ok(KartuConfig::default())
    }
}
