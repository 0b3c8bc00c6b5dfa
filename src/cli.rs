//! Command line interface.

use crate::LogFormat;
use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use std::io::Write;
use std::path::{Path, PathBuf};
use trailcut_camtools::{open_entity_source, GcodeGenerator, GcodeParameters};
use trailcut_settings::{default_config_path, SettingsPersistence};

/// Output path that writes the program to stdout.
const STDOUT_PATH: &str = "-";

#[derive(Debug, Parser)]
#[command(name = "trailcut", version)]
#[command(about = "Convert 2-D drawings into G-code with as few tool lifts as possible")]
pub struct Cli {
    /// Settings file to use instead of the platform default
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    #[arg(long, value_enum, default_value_t = LogFormat::Text, global = true)]
    pub log_format: LogFormat,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Generate G-code from a DXF or JSON drawing
    Generate(GenerateArgs),
    /// Inspect or reset the stored settings
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(Debug, Subcommand)]
pub enum ConfigAction {
    /// Print the stored settings as TOML
    Show,
    /// Restore and save the default settings
    Reset,
    /// Print the settings file location
    Path,
}

#[derive(Debug, Args)]
pub struct GenerateArgs {
    /// Drawing to convert (.dxf or .json)
    pub input: PathBuf,

    /// Output file; `-` writes to stdout. Defaults to the input with a
    /// `.gcode` extension
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Cutting feed rate
    #[arg(long)]
    pub feedrate: Option<f64>,

    /// Feed rate for raising and lowering the tool
    #[arg(long)]
    pub lift_feedrate: Option<f64>,

    /// Feed rate for moves with the tool raised
    #[arg(long)]
    pub travel_feedrate: Option<f64>,

    /// Height the tool is raised to between trails
    #[arg(long, allow_hyphen_values = true)]
    pub lift_height: Option<f64>,

    /// Maximum curve approximation error, also the endpoint merge distance
    #[arg(long)]
    pub max_error: Option<f64>,

    /// Number of passes over the drawing
    #[arg(long)]
    pub repetitions: Option<u32>,

    /// File whose text is emitted before the first move
    #[arg(long)]
    pub prologue_file: Option<PathBuf>,

    /// File whose text is emitted after the last move
    #[arg(long)]
    pub epilogue_file: Option<PathBuf>,

    /// Do not store the parameters used for the next run
    #[arg(long)]
    pub no_save: bool,
}

impl GenerateArgs {
    /// Overlay the command line values on `params`.
    pub fn apply_to(&self, params: &mut GcodeParameters) -> Result<()> {
        if let Some(v) = self.feedrate {
            params.feedrate = v;
        }
        if let Some(v) = self.lift_feedrate {
            params.lift_feedrate = v;
        }
        if let Some(v) = self.travel_feedrate {
            params.travel_feedrate = v;
        }
        if let Some(v) = self.lift_height {
            params.lift_height = v;
        }
        if let Some(v) = self.max_error {
            params.max_error = v;
        }
        if let Some(v) = self.repetitions {
            params.repetitions = v;
        }
        if let Some(path) = &self.prologue_file {
            params.prologue = std::fs::read_to_string(path)
                .with_context(|| format!("Failed to read prologue file {}", path.display()))?;
        }
        if let Some(path) = &self.epilogue_file {
            params.epilogue = std::fs::read_to_string(path)
                .with_context(|| format!("Failed to read epilogue file {}", path.display()))?;
        }
        Ok(())
    }

    /// Where the program goes; `None` means stdout.
    pub fn output_path(&self) -> Option<PathBuf> {
        match &self.output {
            Some(path) if path.as_os_str() == STDOUT_PATH => None,
            Some(path) => Some(path.clone()),
            None => Some(self.input.with_extension("gcode")),
        }
    }
}

pub fn run(cli: Cli) -> Result<()> {
    let settings_path = match cli.config {
        Some(path) => path,
        None => default_config_path()?,
    };

    match cli.command {
        Command::Generate(args) => generate(&args, &settings_path),
        Command::Config { action } => config(action, &settings_path),
    }
}

fn generate(args: &GenerateArgs, settings_path: &Path) -> Result<()> {
    let mut settings = SettingsPersistence::load_or_default(settings_path)
        .with_context(|| format!("Failed to load settings from {}", settings_path.display()))?;

    let mut params = settings.config().generation.clone();
    args.apply_to(&mut params)?;
    let generator = GcodeGenerator::new(params.clone()).context("Invalid generation parameters")?;

    let output = args.output_path();
    if !args.no_save {
        let config = settings.config_mut();
        config.generation = params;
        config.add_recent_file(args.input.clone());
        if let Some(dir) = output.as_deref().and_then(Path::parent) {
            if !dir.as_os_str().is_empty() {
                config.files.output_directory = Some(dir.to_path_buf());
            }
        }
        settings
            .save()
            .with_context(|| format!("Failed to save settings to {}", settings_path.display()))?;
    }

    let source = open_entity_source(&args.input)?;
    let program = generator
        .generate_from_source(source.as_ref())
        .with_context(|| format!("Failed to convert {}", args.input.display()))?;

    match &output {
        Some(path) => {
            std::fs::write(path, &program.gcode)
                .with_context(|| format!("Failed to write {}", path.display()))?;
            tracing::info!(
                output = %path.display(),
                cut_mm = program.stats.emit.cut_distance,
                travel_mm = program.stats.emit.travel_distance,
                "program written"
            );
        }
        None => {
            let mut stdout = std::io::stdout().lock();
            stdout
                .write_all(program.gcode.as_bytes())
                .context("Failed to write program to stdout")?;
            stdout.flush()?;
        }
    }
    Ok(())
}

fn config(action: ConfigAction, settings_path: &Path) -> Result<()> {
    match action {
        ConfigAction::Path => println!("{}", settings_path.display()),
        ConfigAction::Show => {
            let settings = SettingsPersistence::load_or_default(settings_path)?;
            print!("{}", settings.config().to_toml_string()?);
        }
        ConfigAction::Reset => {
            let mut settings = SettingsPersistence::load_or_default(settings_path)
                .unwrap_or_else(|e| {
                    tracing::warn!("discarding unreadable settings: {}", e);
                    SettingsPersistence::new(settings_path)
                });
            settings.reset();
            settings.save()?;
            tracing::info!(path = %settings_path.display(), "settings reset");
        }
    }
    Ok(())
}
