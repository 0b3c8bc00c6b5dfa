//! Motion Emitter
//!
//! Turns an ordered segment list into G-code. The tool is lifted, moved and
//! plunged only when the next segment does not start where the tool already
//! is; otherwise cutting continues straight on.

use crate::parameters::GcodeParameters;
use trailcut_core::{Point, Segment};

/// Counts gathered while emitting a program.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct EmitStats {
    /// Lift/travel/plunge groups emitted
    pub lifts: usize,
    /// `G1` cutting moves emitted
    pub cuts: usize,
    pub cut_distance: f64,
    /// Distance covered by travel moves with the tool raised, not counting
    /// the first move from the unknown start position
    pub travel_distance: f64,
}

pub struct MotionEmitter<'a> {
    params: &'a GcodeParameters,
}

impl<'a> MotionEmitter<'a> {
    pub fn new(params: &'a GcodeParameters) -> Self {
        Self { params }
    }

    /// Emit the program for `segments`, repeated `params.repetitions` times.
    pub fn emit(&self, segments: &[Segment]) -> (String, EmitStats) {
        let mut gcode = String::new();
        let mut stats = EmitStats::default();

        gcode.push_str(&self.params.prologue);
        if !self.params.prologue.ends_with('\n') {
            gcode.push('\n');
        }

        let mut position: Option<Point> = None;
        for pass in 0..self.params.repetitions {
            tracing::trace!(pass = pass + 1, "emitting pass");
            for segment in segments {
                let mut segment = *segment;
                if position == Some(segment.end) && position != Some(segment.start) {
                    segment = segment.reversed();
                }

                if position != Some(segment.start) {
                    self.push_lift_and_travel(&mut gcode, segment.start);
                    stats.lifts += 1;
                    if let Some(from) = position {
                        stats.travel_distance += from.distance_to(&segment.start);
                    }
                }

                gcode.push_str(&format!(
                    "G1 X{} Y{} F{}\n",
                    segment.end.x, segment.end.y, self.params.feedrate
                ));
                stats.cuts += 1;
                stats.cut_distance += segment.length();
                position = Some(segment.end);
            }
        }

        gcode.push_str(&self.params.epilogue);
        (gcode, stats)
    }

    fn push_lift_and_travel(&self, gcode: &mut String, to: Point) {
        let p = self.params;
        gcode.push_str(&format!("G0 Z{} F{}\n", p.lift_height, p.lift_feedrate));
        gcode.push_str(&format!("G0 X{} Y{} F{}\n", to.x, to.y, p.travel_feedrate));
        gcode.push_str(&format!("G0 Z0 F{}\n", p.lift_feedrate));
    }
}
