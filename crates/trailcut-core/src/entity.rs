//! Drawing entities as delivered by an entity source.
//!
//! Sources decode their native records into these variants once, so the
//! pipeline never looks at loosely typed attributes. Angles are radians.

use crate::error::GeometryError;
use crate::geometry::Point;
use serde::{Deserialize, Serialize};

/// A planar drawing entity.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum Entity {
    /// Straight line between two points
    Line { start: Point, end: Point },

    /// Full circle
    Circle { center: Point, radius: f64 },

    /// Circular arc swept counter-clockwise from `start_angle` to
    /// `end_angle`, or from `end_angle` to `start_angle` when `reversed`
    Arc {
        center: Point,
        radius: f64,
        start_angle: f64,
        end_angle: f64,
        #[serde(default)]
        reversed: bool,
    },

    /// Full ellipse. `major_axis` is the vector from the center to the end
    /// of the major axis; the minor axis is that vector turned a quarter
    /// turn counter-clockwise and scaled by `ratio`.
    Ellipse {
        center: Point,
        major_axis: Point,
        ratio: f64,
    },

    /// A record of a type the pipeline cannot cut
    Unsupported { kind: String },
}

impl Entity {
    /// Serialized `type` tags, one per variant.
    pub const TAGS: [&'static str; 5] = ["line", "circle", "arc", "ellipse", "unsupported"];

    /// Short type name used in diagnostics.
    pub fn kind(&self) -> &str {
        match self {
            Entity::Line { .. } => "line",
            Entity::Circle { .. } => "circle",
            Entity::Arc { .. } => "arc",
            Entity::Ellipse { .. } => "ellipse",
            Entity::Unsupported { kind } => kind,
        }
    }

    /// Check that the geometry can be tessellated.
    ///
    /// Unsupported entities carry no geometry and always pass.
    pub fn validate(&self) -> Result<(), GeometryError> {
        match self {
            Entity::Line { start, end } => {
                require_point("start", start)?;
                require_point("end", end)?;
            }
            Entity::Circle { center, radius } => {
                require_point("center", center)?;
                GeometryError::require_positive("radius", *radius)?;
            }
            Entity::Arc {
                center,
                radius,
                start_angle,
                end_angle,
                ..
            } => {
                require_point("center", center)?;
                GeometryError::require_positive("radius", *radius)?;
                GeometryError::require_finite("start_angle", *start_angle)?;
                GeometryError::require_finite("end_angle", *end_angle)?;
            }
            Entity::Ellipse {
                center,
                major_axis,
                ratio,
            } => {
                require_point("center", center)?;
                require_point("major_axis", major_axis)?;
                GeometryError::require_positive(
                    "major_axis length",
                    major_axis.distance_to(&Point::ORIGIN),
                )?;
                GeometryError::require_positive("ratio", *ratio)?;
            }
            Entity::Unsupported { .. } => {}
        }
        Ok(())
    }
}

fn require_point(name: &'static str, p: &Point) -> Result<(), GeometryError> {
    if p.is_finite() {
        Ok(())
    } else {
        Err(GeometryError::NonFinite { name })
    }
}
