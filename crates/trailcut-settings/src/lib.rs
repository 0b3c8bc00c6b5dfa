//! trailcut Settings Crate
//!
//! Persists the last used generation parameters and file history between
//! runs.

pub mod config;
pub mod error;
pub mod persistence;

pub use config::{Config, FileSettings};
pub use error::{ConfigError, ConfigResult, SettingsError, SettingsResult};
pub use persistence::{default_config_path, SettingsPersistence};
