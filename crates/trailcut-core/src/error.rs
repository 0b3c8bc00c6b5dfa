//! Error handling for trailcut geometry
//!
//! Degenerate or non-finite curve parameters are reported as
//! [`GeometryError`]; the pipeline crates wrap it in their own error types.

use thiserror::Error;

/// Geometry error type
///
/// Raised when a curve cannot be approximated because one of its
/// parameters would make the chord-count formula undefined.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum GeometryError {
    /// A length that must be strictly positive was zero or negative
    #[error("{name} must be positive, got {value}")]
    NonPositive {
        /// The parameter name.
        name: &'static str,
        /// The offending value.
        value: f64,
    },

    /// A coordinate or length was NaN or infinite
    #[error("{name} must be finite")]
    NonFinite {
        /// The parameter name.
        name: &'static str,
    },
}

impl GeometryError {
    /// Check that `value` is finite and strictly positive.
    pub fn require_positive(name: &'static str, value: f64) -> Result<f64, Self> {
        if !value.is_finite() {
            return Err(Self::NonFinite { name });
        }
        if value <= 0.0 {
            return Err(Self::NonPositive { name, value });
        }
        Ok(value)
    }

    /// Check that `value` is finite.
    pub fn require_finite(name: &'static str, value: f64) -> Result<f64, Self> {
        if value.is_finite() {
            Ok(value)
        } else {
            Err(Self::NonFinite { name })
        }
    }
}
