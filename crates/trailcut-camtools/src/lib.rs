//! # trailcut CAM tools
//!
//! Turns 2-D drawing entities into a G-code program for a two-axis machine
//! with a lifting tool (pen plotter, drag knife, laser with Z).
//!
//! ## Pipeline
//!
//! - **Tessellation**: circles, arcs and ellipses become chords within a
//!   maximum error
//! - **Collector**: all entities flattened into one segment collection
//! - **Graph**: segment endpoints merged under the same error into an
//!   undirected multigraph
//! - **Planner**: greedy edge-disjoint trails that keep the tool down
//! - **Emitter**: lift/travel/plunge and cutting moves wrapped in the
//!   prologue and epilogue
//!
//! [`GcodeGenerator`] runs the whole pipeline; entity sources load DXF or
//! JSON drawings.

pub mod collector;
pub mod dxf_source;
pub mod emitter;
pub mod error;
pub mod generator;
pub mod graph;
pub mod parameters;
pub mod planner;
pub mod source;
pub mod tessellation;

pub use collector::{CollectedSegments, SegmentCollector};
pub use dxf_source::{entities_from_drawing, DxfEntitySource};
pub use emitter::{EmitStats, MotionEmitter};
pub use error::{
    CamToolError, CamToolResult, FileFormatError, FileFormatResult, ParameterError,
    ParameterResult,
};
pub use generator::{GcodeGenerator, GcodeProgram, ProgramStats};
pub use graph::{ConnectivityGraph, GraphNode};
pub use parameters::{GcodeParameters, DEFAULT_EPILOGUE, DEFAULT_PROLOGUE};
pub use planner::{
    flatten_trails, select_start, FirstAvailable, NeighborPolicy, PathPlanner, Trail,
};
pub use source::{open_entity_source, EntitySource, JsonEntitySource};
pub use tessellation::{
    polygon_sides, tessellate_arc, tessellate_ellipse, FULL_TURN_TOLERANCE, MAX_POLYGON_SIDES,
};

pub use trailcut_core::{Entity, Point, Segment};
