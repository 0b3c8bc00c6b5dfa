//! DXF entity source
//!
//! Reads LINE, CIRCLE, ARC and ELLIPSE records from a DXF drawing. Arc
//! angles are stored in degrees in DXF and converted to radians here.
//! Circles and arcs drawn with a downward extrusion (mirrored in the CAD
//! program) are flipped back into world coordinates.

use crate::error::{CamToolResult, FileFormatError};
use crate::source::EntitySource;
use dxf::entities::EntityType;
use dxf::Drawing;
use std::f64::consts::{PI, TAU};
use std::fs::File;
use std::path::{Path, PathBuf};
use trailcut_core::{Entity, Point};

/// A DXF file on disk.
#[derive(Debug, Clone)]
pub struct DxfEntitySource {
    path: PathBuf,
}

impl DxfEntitySource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl EntitySource for DxfEntitySource {
    fn load_entities(&self) -> CamToolResult<Vec<Entity>> {
        let mut file = File::open(&self.path).map_err(FileFormatError::IoError)?;
        let drawing = Drawing::load(&mut file)
            .map_err(|e| FileFormatError::DxfParseError(e.to_string()))?;
        let entities = entities_from_drawing(&drawing);
        tracing::debug!(
            path = %self.path.display(),
            entities = entities.len(),
            "DXF entities loaded"
        );
        Ok(entities)
    }
}

/// Decode every entity of `drawing`, in file order.
pub fn entities_from_drawing(drawing: &Drawing) -> Vec<Entity> {
    drawing
        .entities()
        .map(|entity| decode(&entity.specific))
        .collect()
}

fn decode(specific: &EntityType) -> Entity {
    match specific {
        EntityType::Line(line) => Entity::Line {
            start: Point::new(line.p1.x, line.p1.y),
            end: Point::new(line.p2.x, line.p2.y),
        },
        EntityType::Circle(circle) => {
            let mirrored = circle.normal.z < 0.0;
            Entity::Circle {
                center: world_point(circle.center.x, circle.center.y, mirrored),
                radius: circle.radius,
            }
        }
        EntityType::Arc(arc) => {
            let start = arc.start_angle.to_radians();
            let end = arc.end_angle.to_radians();
            if arc.normal.z < 0.0 {
                // Mirrored about the Y axis, so the sweep runs the other way
                Entity::Arc {
                    center: world_point(arc.center.x, arc.center.y, true),
                    radius: arc.radius,
                    start_angle: PI - start,
                    end_angle: PI - end,
                    reversed: true,
                }
            } else {
                Entity::Arc {
                    center: Point::new(arc.center.x, arc.center.y),
                    radius: arc.radius,
                    start_angle: start,
                    end_angle: end,
                    reversed: false,
                }
            }
        }
        EntityType::Ellipse(ellipse) => {
            let span = (ellipse.end_parameter - ellipse.start_parameter).abs();
            if span > 1e-9 && (span - TAU).abs() > 1e-9 {
                tracing::warn!(
                    start = ellipse.start_parameter,
                    end = ellipse.end_parameter,
                    "partial ellipse will be cut as a full ellipse"
                );
            }
            let mirrored = ellipse.normal.z < 0.0;
            Entity::Ellipse {
                center: world_point(ellipse.center.x, ellipse.center.y, mirrored),
                major_axis: world_point(ellipse.major_axis.x, ellipse.major_axis.y, mirrored),
                ratio: ellipse.minor_axis_ratio,
            }
        }
        other => Entity::Unsupported {
            kind: type_name(other),
        },
    }
}

fn world_point(x: f64, y: f64, mirrored: bool) -> Point {
    if mirrored {
        Point::new(-x, y)
    } else {
        Point::new(x, y)
    }
}

/// DXF record name of an entity the pipeline does not cut.
fn type_name(specific: &EntityType) -> String {
    let name = match specific {
        EntityType::LwPolyline(_) => "lwpolyline",
        EntityType::Polyline(_) => "polyline",
        EntityType::Spline(_) => "spline",
        EntityType::ModelPoint(_) => "point",
        EntityType::Text(_) => "text",
        EntityType::MText(_) => "mtext",
        EntityType::Insert(_) => "insert",
        EntityType::Solid(_) => "solid",
        EntityType::Face3D(_) => "3dface",
        EntityType::Image(_) => "image",
        EntityType::Leader(_) => "leader",
        EntityType::Ray(_) => "ray",
        EntityType::XLine(_) => "xline",
        _ => "unknown",
    };
    name.to_string()
}
