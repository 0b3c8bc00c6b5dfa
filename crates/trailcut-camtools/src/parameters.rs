use crate::error::{ParameterError, ParameterResult};
use serde::{Deserialize, Serialize};

/// Default text emitted before the first move.
pub const DEFAULT_PROLOGUE: &str = "G28 ;Home\nG90 ;Absolute positioning\n";

/// Default text emitted after the last move.
pub const DEFAULT_EPILOGUE: &str =
    "G91 ;Relative positioning\nG0 Z10 ;Raise Z\nG90 ;Absolute positioning\n";

/// Upper bound on passes over the drawing.
pub const MAX_REPETITIONS: u32 = 1_000_000_000;

/// Parameters for turning a drawing into G-code
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GcodeParameters {
    /// Feed rate for cutting moves
    pub feedrate: f64,
    /// Feed rate for raising and lowering the tool
    pub lift_feedrate: f64,
    /// Feed rate for travel moves with the tool raised
    pub travel_feedrate: f64,
    /// Z height the tool is raised to between trails; may be negative
    pub lift_height: f64,
    /// Maximum chord error of curve tessellation, also the endpoint merge
    /// tolerance (mm)
    pub max_error: f64,
    /// Number of passes over the whole drawing
    pub repetitions: u32,
    /// Text emitted before the first move
    pub prologue: String,
    /// Text emitted after the last move
    pub epilogue: String,
}

impl Default for GcodeParameters {
    fn default() -> Self {
        Self {
            feedrate: 600.0,
            lift_feedrate: 1800.0,
            travel_feedrate: 3000.0,
            lift_height: 50.0,
            max_error: 0.01,
            repetitions: 1,
            prologue: DEFAULT_PROLOGUE.to_string(),
            epilogue: DEFAULT_EPILOGUE.to_string(),
        }
    }
}

impl GcodeParameters {
    /// Reject values that would make tessellation or emission meaningless.
    pub fn validate(&self) -> ParameterResult<()> {
        require_positive("feedrate", self.feedrate)?;
        require_positive("lift_feedrate", self.lift_feedrate)?;
        require_positive("travel_feedrate", self.travel_feedrate)?;
        require_positive("max_error", self.max_error)?;

        if !self.lift_height.is_finite() {
            return Err(ParameterError::NotFinite {
                name: "lift_height".to_string(),
            });
        }

        if self.repetitions == 0 || self.repetitions > MAX_REPETITIONS {
            return Err(ParameterError::OutOfRange {
                name: "repetitions".to_string(),
                value: f64::from(self.repetitions),
                min: 1.0,
                max: f64::from(MAX_REPETITIONS),
            });
        }

        Ok(())
    }
}

fn require_positive(name: &str, value: f64) -> ParameterResult<()> {
    if !value.is_finite() {
        return Err(ParameterError::NotFinite {
            name: name.to_string(),
        });
    }
    if value <= 0.0 {
        return Err(ParameterError::NotPositive {
            name: name.to_string(),
            value,
        });
    }
    Ok(())
}
