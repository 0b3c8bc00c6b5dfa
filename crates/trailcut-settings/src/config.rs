//! Configuration for trailcut
//!
//! Holds the generation parameters last used plus file history. Supports
//! JSON and TOML files; the format follows the file extension.

use crate::error::{ConfigError, ConfigResult, SettingsError, SettingsResult};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use trailcut_camtools::GcodeParameters;

/// Upper bound on the remembered input files.
pub const MAX_RECENT_FILES: usize = 100;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileSettings {
    /// Directory the last program was written to
    #[serde(skip_serializing_if = "Option::is_none")]
    pub output_directory: Option<PathBuf>,
    /// Most recent input first
    pub recent_files: Vec<PathBuf>,
    pub recent_files_count: usize,
}

impl Default for FileSettings {
    fn default() -> Self {
        Self {
            output_directory: None,
            recent_files: Vec::new(),
            recent_files_count: 10,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub generation: GcodeParameters,
    pub files: FileSettings,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Format {
    Json,
    Toml,
}

fn format_of(path: &Path) -> SettingsResult<Format> {
    match path.extension().and_then(|ext| ext.to_str()) {
        Some("json") => Ok(Format::Json),
        Some("toml") => Ok(Format::Toml),
        _ => Err(ConfigError::UnsupportedFormat(path.display().to_string()).into()),
    }
}

impl Config {
    pub fn new() -> Self {
        Self::default()
    }

    /// Load configuration from a `.json` or `.toml` file.
    pub fn load_from_file(path: &Path) -> SettingsResult<Self> {
        let format = format_of(path)?;
        let content = std::fs::read_to_string(path)
            .map_err(|e| SettingsError::LoadError(format!("{}: {}", path.display(), e)))?;

        let config: Self = match format {
            Format::Json => serde_json::from_str(&content)?,
            Format::Toml => toml::from_str(&content)?,
        };

        config.validate()?;
        Ok(config)
    }

    /// Save configuration to a `.json` or `.toml` file.
    pub fn save_to_file(&self, path: &Path) -> SettingsResult<()> {
        self.validate()?;

        let content = match format_of(path)? {
            Format::Json => serde_json::to_string_pretty(self)?,
            Format::Toml => self.to_toml_string()?,
        };

        std::fs::write(path, content)
            .map_err(|e| SettingsError::SaveError(format!("{}: {}", path.display(), e)))?;

        Ok(())
    }

    /// The configuration in the layout of a `.toml` settings file.
    pub fn to_toml_string(&self) -> SettingsResult<String> {
        Ok(toml::to_string_pretty(self)?)
    }

    pub fn validate(&self) -> ConfigResult<()> {
        self.generation.validate()?;

        if self.files.recent_files_count > MAX_RECENT_FILES {
            return Err(ConfigError::ValueOutOfRange {
                key: "files.recent_files_count".to_string(),
                value: self.files.recent_files_count.to_string(),
            });
        }

        Ok(())
    }

    /// Move `path` to the front of the recent files list.
    pub fn add_recent_file(&mut self, path: PathBuf) {
        self.files.recent_files.retain(|f| f != &path);
        self.files.recent_files.insert(0, path);
        self.files
            .recent_files
            .truncate(self.files.recent_files_count);
    }
}
