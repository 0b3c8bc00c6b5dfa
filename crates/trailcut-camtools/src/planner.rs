//! Path Planner
//!
//! Decomposes the connectivity graph into edge-disjoint trails so the tool
//! can cut as many consecutive segments as possible without lifting.
//!
//! Each trail starts at the dangling endpoint (degree-1 node) closest to
//! the origin; when only closed loops remain it starts at the loop node
//! closest to the origin. The walk then follows edges chosen by a
//! [`NeighborPolicy`] until it reaches a node with no unconsumed edges.
//! This is a greedy heuristic, not a minimum-retract tour.

use crate::graph::ConnectivityGraph;
use trailcut_core::{Point, Segment};

/// Chooses which unconsumed edge the walk follows next.
pub trait NeighborPolicy {
    /// Neighbor node of `current` to move to, or `None` to end the walk.
    ///
    /// Must return a node present in `current`'s adjacency list.
    fn next_node(&self, graph: &ConnectivityGraph, current: usize) -> Option<usize>;
}

/// Follows the oldest remaining edge of the current node.
#[derive(Debug, Clone, Copy, Default)]
pub struct FirstAvailable;

impl NeighborPolicy for FirstAvailable {
    fn next_node(&self, graph: &ConnectivityGraph, current: usize) -> Option<usize> {
        graph.node(current).neighbors.first().copied()
    }
}

/// A continuous walk of directed segments.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Trail {
    pub segments: Vec<Segment>,
}

impl Trail {
    pub fn len(&self) -> usize {
        self.segments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    pub fn start(&self) -> Option<Point> {
        self.segments.first().map(|s| s.start)
    }

    pub fn end(&self) -> Option<Point> {
        self.segments.last().map(|s| s.end)
    }

    /// True when the walk returns to its starting point.
    pub fn is_closed(&self) -> bool {
        !self.is_empty() && self.start() == self.end()
    }

    pub fn length(&self) -> f64 {
        self.segments.iter().map(Segment::length).sum()
    }
}

/// Concatenate trails into the segment order the emitter consumes.
pub fn flatten_trails(trails: &[Trail]) -> Vec<Segment> {
    trails
        .iter()
        .flat_map(|t| t.segments.iter().copied())
        .collect()
}

/// Greedy trail planner.
#[derive(Debug, Clone, Default)]
pub struct PathPlanner<P = FirstAvailable> {
    policy: P,
}

impl PathPlanner<FirstAvailable> {
    pub fn new() -> Self {
        Self {
            policy: FirstAvailable,
        }
    }
}

impl<P: NeighborPolicy> PathPlanner<P> {
    pub fn with_policy(policy: P) -> Self {
        Self { policy }
    }

    /// Consume every edge of `graph`, returning the trails in cutting order.
    pub fn plan(&self, mut graph: ConnectivityGraph) -> Vec<Trail> {
        let mut trails = Vec::new();
        while let Some(start) = select_start(&graph) {
            let trail = self.walk(&mut graph, start);
            tracing::debug!(
                start = %graph.node(start).point,
                segments = trail.len(),
                closed = trail.is_closed(),
                "trail planned"
            );
            if trail.is_empty() {
                // A policy that refuses to move would otherwise spin forever
                tracing::warn!(start, "neighbor policy ended a walk without moving");
                break;
            }
            trails.push(trail);
        }
        tracing::debug!(
            trails = trails.len(),
            remaining_edges = graph.edge_count(),
            "planning finished"
        );
        trails
    }

    fn walk(&self, graph: &mut ConnectivityGraph, start: usize) -> Trail {
        let mut trail = Trail::default();
        let mut current = start;
        while let Some(next) = self.policy.next_node(graph, current) {
            if !graph.remove_edge(current, next) {
                tracing::warn!(current, next, "neighbor policy chose a consumed edge");
                break;
            }
            trail.segments.push(Segment::new(
                graph.node(current).point,
                graph.node(next).point,
            ));
            current = next;
        }
        trail
    }
}

/// Leaf closest to the origin, else the connected node closest to the
/// origin, else `None` once every edge is consumed.
pub fn select_start(graph: &ConnectivityGraph) -> Option<usize> {
    let mut best_leaf: Option<(usize, f64)> = None;
    let mut best_other: Option<(usize, f64)> = None;

    for (index, node) in graph.nodes().iter().enumerate() {
        let slot = match node.degree() {
            0 => continue,
            1 => &mut best_leaf,
            _ => &mut best_other,
        };
        let distance = node.point.distance_to(&Point::ORIGIN);
        if slot.map_or(true, |(_, best)| distance < best) {
            *slot = Some((index, distance));
        }
    }

    best_leaf.or(best_other).map(|(index, _)| index)
}
