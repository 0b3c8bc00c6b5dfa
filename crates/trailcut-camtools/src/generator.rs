//! Drawing-to-G-code pipeline.
//!
//! Runs the collector, graph builder, planner and emitter in order. Each
//! run owns its graph and trails; nothing is shared between runs.

use crate::collector::SegmentCollector;
use crate::emitter::{EmitStats, MotionEmitter};
use crate::error::CamToolResult;
use crate::graph::ConnectivityGraph;
use crate::parameters::GcodeParameters;
use crate::planner::{flatten_trails, FirstAvailable, NeighborPolicy, PathPlanner};
use crate::source::EntitySource;
use trailcut_core::Entity;

/// Summary of one generation run.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct ProgramStats {
    pub entities_converted: usize,
    pub entities_skipped: usize,
    pub segments: usize,
    pub nodes: usize,
    pub trails: usize,
    pub emit: EmitStats,
}

/// A generated program and how it was produced.
#[derive(Debug, Clone, PartialEq)]
pub struct GcodeProgram {
    pub gcode: String,
    pub stats: ProgramStats,
}

/// Converts drawing entities into a G-code program.
#[derive(Debug, Clone)]
pub struct GcodeGenerator<P = FirstAvailable> {
    params: GcodeParameters,
    planner: PathPlanner<P>,
}

impl GcodeGenerator<FirstAvailable> {
    /// Create a generator, rejecting invalid parameters up front.
    pub fn new(params: GcodeParameters) -> CamToolResult<Self> {
        Self::with_policy(params, FirstAvailable)
    }
}

impl<P: NeighborPolicy> GcodeGenerator<P> {
    /// Create a generator whose planner follows `policy`.
    pub fn with_policy(params: GcodeParameters, policy: P) -> CamToolResult<Self> {
        params.validate()?;
        Ok(Self {
            params,
            planner: PathPlanner::with_policy(policy),
        })
    }

    pub fn params(&self) -> &GcodeParameters {
        &self.params
    }

    /// Generate the program for `entities`.
    pub fn generate(&self, entities: &[Entity]) -> CamToolResult<GcodeProgram> {
        let collected = SegmentCollector::new(self.params.max_error).collect(entities);
        let graph = ConnectivityGraph::from_segments(&collected.segments, self.params.max_error)?;
        let nodes = graph.node_count();

        let trails = self.planner.plan(graph);
        let ordered = flatten_trails(&trails);
        let (gcode, emit) = MotionEmitter::new(&self.params).emit(&ordered);

        let stats = ProgramStats {
            entities_converted: collected.converted,
            entities_skipped: collected.skipped,
            segments: collected.segments.len(),
            nodes,
            trails: trails.len(),
            emit,
        };
        tracing::info!(
            entities = stats.entities_converted,
            skipped = stats.entities_skipped,
            segments = stats.segments,
            trails = stats.trails,
            lifts = stats.emit.lifts,
            "G-code generated"
        );
        Ok(GcodeProgram { gcode, stats })
    }

    /// Load every entity from `source`, then generate.
    ///
    /// A failing source aborts the run before anything is generated.
    pub fn generate_from_source<S: EntitySource + ?Sized>(
        &self,
        source: &S,
    ) -> CamToolResult<GcodeProgram> {
        let entities = source.load_entities()?;
        self.generate(&entities)
    }
}
