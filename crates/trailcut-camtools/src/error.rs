//! Error types for the CAM tools crate.
//!
//! This module provides structured error types for toolpath generation,
//! parameter validation, and drawing file processing.

use std::io;
use thiserror::Error;
use trailcut_core::GeometryError;

/// Errors that can occur during toolpath generation.
#[derive(Error, Debug)]
pub enum CamToolError {
    /// The entity type has no cutting representation.
    #[error("Unsupported entity: {0}")]
    UnsupportedEntity(String),

    /// A curve could not be tessellated.
    #[error("Geometry error: {0}")]
    Geometry(#[from] GeometryError),

    /// A parameter validation error occurred.
    #[error("Parameter error: {0}")]
    Parameter(#[from] ParameterError),

    /// A file format error occurred.
    #[error("File format error: {0}")]
    FileFormat(#[from] FileFormatError),
}

/// Errors related to generation parameter validation.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ParameterError {
    /// A parameter that must be strictly positive was not.
    #[error("Parameter '{name}' must be positive: {value}")]
    NotPositive { name: String, value: f64 },

    /// A parameter value is NaN or infinite.
    #[error("Parameter '{name}' must be finite")]
    NotFinite { name: String },

    /// A parameter value is out of the valid range.
    #[error("Parameter '{name}' out of range: {value} (valid: {min}..{max})")]
    OutOfRange {
        name: String,
        value: f64,
        min: f64,
        max: f64,
    },
}

/// Errors related to drawing file parsing.
#[derive(Error, Debug)]
pub enum FileFormatError {
    /// The DXF file could not be parsed.
    #[error("DXF parse error: {0}")]
    DxfParseError(String),

    /// The JSON entity list could not be parsed.
    #[error("JSON parse error: {0}")]
    JsonParseError(#[from] serde_json::Error),

    /// The file extension is not recognized.
    #[error("Unknown file extension: {0}")]
    UnknownExtension(String),

    /// I/O error during file reading.
    #[error("I/O error: {0}")]
    IoError(#[from] io::Error),
}

/// Result type alias for CAM tool operations.
pub type CamToolResult<T> = Result<T, CamToolError>;

/// Result type alias for parameter validation.
pub type ParameterResult<T> = Result<T, ParameterError>;

/// Result type alias for file format operations.
pub type FileFormatResult<T> = Result<T, FileFormatError>;
