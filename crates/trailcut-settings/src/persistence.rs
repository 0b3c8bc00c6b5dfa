//! Settings Persistence
//!
//! Loads the configuration from its file on startup and writes it back
//! after a generation run changes it.

use crate::config::Config;
use crate::error::{SettingsError, SettingsResult};
use std::path::{Path, PathBuf};

const APP_DIR: &str = "trailcut";
const SETTINGS_FILE: &str = "settings.toml";

/// `<platform config dir>/trailcut/settings.toml`
pub fn default_config_path() -> SettingsResult<PathBuf> {
    let base = dirs::config_dir().ok_or_else(|| {
        SettingsError::ConfigDirectory("no configuration directory on this platform".to_string())
    })?;
    Ok(base.join(APP_DIR).join(SETTINGS_FILE))
}

/// A configuration bound to the file it is stored in.
#[derive(Debug, Clone)]
pub struct SettingsPersistence {
    config: Config,
    path: PathBuf,
}

impl SettingsPersistence {
    /// Default configuration that will be saved to `path`.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            config: Config::default(),
            path: path.into(),
        }
    }

    /// Load `path`, falling back to defaults when the file does not exist
    /// yet. A file that exists but cannot be read or parsed is an error.
    pub fn load_or_default(path: impl Into<PathBuf>) -> SettingsResult<Self> {
        let path = path.into();
        if !path.exists() {
            tracing::info!(path = %path.display(), "no settings file, using defaults");
            return Ok(Self::new(path));
        }
        let config = Config::load_from_file(&path)?;
        tracing::debug!(path = %path.display(), "settings loaded");
        Ok(Self { config, path })
    }

    /// Write the configuration, creating its directory if needed.
    pub fn save(&self) -> SettingsResult<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent).map_err(|e| {
                    SettingsError::ConfigDirectory(format!("{}: {}", parent.display(), e))
                })?;
            }
        }
        self.config.save_to_file(&self.path)?;
        tracing::debug!(path = %self.path.display(), "settings saved");
        Ok(())
    }

    /// Restore defaults, keeping the file location.
    pub fn reset(&mut self) {
        self.config = Config::default();
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn config_mut(&mut self) -> &mut Config {
        &mut self.config
    }
}
