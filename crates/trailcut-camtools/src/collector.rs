//! Segment Collector
//!
//! Flattens drawing entities into one unordered collection of straight
//! segments. Lines pass through unchanged; curves are tessellated. Entities
//! that cannot be cut are skipped with a warning instead of failing the run.

use crate::error::{CamToolError, CamToolResult};
use crate::tessellation::{tessellate_arc, tessellate_ellipse};
use std::f64::consts::TAU;
use trailcut_core::{Entity, Segment};

/// Segments gathered from a batch of entities.
#[derive(Debug, Clone, Default)]
pub struct CollectedSegments {
    pub segments: Vec<Segment>,
    /// Entities that produced segments
    pub converted: usize,
    /// Entities skipped as unsupported or malformed
    pub skipped: usize,
}

/// Converts entities to straight segments within a chord error.
#[derive(Debug, Clone, Copy)]
pub struct SegmentCollector {
    max_error: f64,
}

impl SegmentCollector {
    pub fn new(max_error: f64) -> Self {
        Self { max_error }
    }

    /// Segments for a single entity.
    pub fn entity_segments(&self, entity: &Entity) -> CamToolResult<Vec<Segment>> {
        entity.validate()?;
        let segments = match entity {
            Entity::Line { start, end } => vec![Segment::new(*start, *end)],
            Entity::Circle { center, radius } => {
                tessellate_arc(*center, *radius, self.max_error, 0.0, TAU, false)?
            }
            Entity::Arc {
                center,
                radius,
                start_angle,
                end_angle,
                reversed,
            } => tessellate_arc(
                *center,
                *radius,
                self.max_error,
                *start_angle,
                *end_angle,
                *reversed,
            )?,
            Entity::Ellipse {
                center,
                major_axis,
                ratio,
            } => tessellate_ellipse(*center, *major_axis, *ratio, self.max_error)?,
            Entity::Unsupported { kind } => {
                return Err(CamToolError::UnsupportedEntity(kind.clone()));
            }
        };
        Ok(segments)
    }

    /// Segments for every entity, skipping the ones that cannot be cut.
    pub fn collect(&self, entities: &[Entity]) -> CollectedSegments {
        let mut collected = CollectedSegments::default();
        for (index, entity) in entities.iter().enumerate() {
            match self.entity_segments(entity) {
                Ok(segments) => {
                    tracing::debug!(
                        index,
                        kind = entity.kind(),
                        segments = segments.len(),
                        "entity converted"
                    );
                    collected.segments.extend(segments);
                    collected.converted += 1;
                }
                Err(e) => {
                    tracing::warn!(index, kind = entity.kind(), "skipping entity: {}", e);
                    collected.skipped += 1;
                }
            }
        }
        collected
    }
}
