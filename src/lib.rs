//! # trailcut
//!
//! Converts 2-D drawings into G-code for two-axis machines with a lifting
//! tool: pen plotters, drag knives, lasers on a Z stage.
//!
//! ## Architecture
//!
//! trailcut is organized as a workspace with multiple crates:
//!
//! 1. **trailcut-core** - Geometry values, drawing entities, core errors
//! 2. **trailcut-camtools** - Tessellation, connectivity graph, path
//!    planning, G-code emission, DXF and JSON entity sources
//! 3. **trailcut-settings** - Persisted generation parameters and file
//!    history
//! 4. **trailcut** - Command line binary that ties the crates together

pub mod cli;

pub use trailcut_camtools::{
    open_entity_source, CamToolError, EntitySource, GcodeGenerator, GcodeParameters,
    GcodeProgram, ProgramStats,
};
pub use trailcut_core::{Entity, Point, Segment};
pub use trailcut_settings::{default_config_path, Config, SettingsPersistence};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Build date (set at compile time)
pub const BUILD_DATE: &str = env!("BUILD_DATE");

/// Log line layout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum LogFormat {
    /// Human readable lines
    #[default]
    Text,
    /// One JSON object per line
    Json,
}

/// Initialize logging
///
/// Sets up structured logging with:
/// - Output on stderr, so a program written to stdout stays clean
/// - RUST_LOG environment variable support, INFO by default
pub fn init_logging(format: LogFormat) -> anyhow::Result<()> {
    use tracing_subscriber::fmt;
    use tracing_subscriber::prelude::*;
    use tracing_subscriber::EnvFilter;

    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(tracing::Level::INFO.as_str()));

    match format {
        LogFormat::Text => {
            let fmt_layer = fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(false)
                .with_level(true);
            tracing_subscriber::registry()
                .with(env_filter)
                .with(fmt_layer)
                .try_init()?;
        }
        LogFormat::Json => {
            let fmt_layer = fmt::layer()
                .json()
                .with_writer(std::io::stderr)
                .with_target(true)
                .with_line_number(true);
            tracing_subscriber::registry()
                .with(env_filter)
                .with(fmt_layer)
                .try_init()?;
        }
    }

    Ok(())
}
