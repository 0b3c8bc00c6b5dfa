//! Connectivity graph of segment endpoints.
//!
//! Endpoints closer than the tolerance (Manhattan distance) collapse into a
//! single node; each segment becomes an undirected edge recorded in both
//! endpoint adjacency lists. Adjacency lists are multisets kept in insertion
//! order, so parallel edges survive and the planner sees the first-added
//! edge first.

use std::collections::HashMap;
use trailcut_core::{GeometryError, Point, Segment};

/// A deduplicated endpoint and the nodes reachable over unconsumed edges.
#[derive(Debug, Clone, PartialEq)]
pub struct GraphNode {
    pub point: Point,
    pub neighbors: Vec<usize>,
}

impl GraphNode {
    /// Number of unconsumed edges touching this node.
    pub fn degree(&self) -> usize {
        self.neighbors.len()
    }

    pub fn is_leaf(&self) -> bool {
        self.neighbors.len() == 1
    }
}

/// Undirected multigraph built from a segment collection.
#[derive(Debug, Clone)]
pub struct ConnectivityGraph {
    nodes: Vec<GraphNode>,
    tolerance: f64,
    cell_size: f64,
    grid: HashMap<(i64, i64), Vec<usize>>,
    edge_count: usize,
}

impl ConnectivityGraph {
    /// Create an empty graph merging endpoints closer than `tolerance`.
    pub fn new(tolerance: f64) -> Result<Self, GeometryError> {
        let tolerance = GeometryError::require_positive("tolerance", tolerance)?;
        Ok(Self {
            nodes: Vec::new(),
            tolerance,
            // Any two points within tolerance land in neighboring cells
            cell_size: tolerance * 2.0,
            grid: HashMap::new(),
            edge_count: 0,
        })
    }

    /// Build a graph from every segment in `segments`.
    pub fn from_segments(segments: &[Segment], tolerance: f64) -> Result<Self, GeometryError> {
        let mut graph = Self::new(tolerance)?;
        let mut degenerate = 0usize;
        for segment in segments {
            if !graph.add_segment(segment) {
                degenerate += 1;
            }
        }
        tracing::debug!(
            segments = segments.len(),
            nodes = graph.node_count(),
            edges = graph.edge_count(),
            degenerate,
            "connectivity graph built"
        );
        Ok(graph)
    }

    pub fn tolerance(&self) -> f64 {
        self.tolerance
    }

    pub fn nodes(&self) -> &[GraphNode] {
        &self.nodes
    }

    pub fn node(&self, index: usize) -> &GraphNode {
        &self.nodes[index]
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Number of edges not yet consumed.
    pub fn edge_count(&self) -> usize {
        self.edge_count
    }

    pub fn is_exhausted(&self) -> bool {
        self.edge_count == 0
    }

    fn cell_of(&self, point: &Point) -> (i64, i64) {
        (
            (point.x / self.cell_size).floor() as i64,
            (point.y / self.cell_size).floor() as i64,
        )
    }

    fn within_tolerance(&self, index: usize, point: &Point) -> bool {
        self.nodes[index].point.manhattan_distance_to(point) < self.tolerance
    }

    /// Lowest-index node within tolerance of `point`, if any.
    pub fn find_node(&self, point: &Point) -> Option<usize> {
        let (cx, cy) = self.cell_of(point);
        let mut best: Option<usize> = None;
        for dx in -1..=1 {
            for dy in -1..=1 {
                let Some(candidates) = self.grid.get(&(cx + dx, cy + dy)) else {
                    continue;
                };
                // Cell lists are in ascending index order
                if let Some(&index) = candidates
                    .iter()
                    .find(|&&index| self.within_tolerance(index, point))
                {
                    best = Some(best.map_or(index, |b| b.min(index)));
                }
            }
        }
        best
    }

    /// Reference lookup scanning every node in insertion order.
    pub fn find_node_linear(&self, point: &Point) -> Option<usize> {
        (0..self.nodes.len()).find(|&index| self.within_tolerance(index, point))
    }

    /// Index of the node at `point`, creating it when none is within
    /// tolerance.
    pub fn node_for(&mut self, point: Point) -> usize {
        if let Some(index) = self.find_node(&point) {
            return index;
        }
        let index = self.nodes.len();
        self.nodes.push(GraphNode {
            point,
            neighbors: Vec::new(),
        });
        let cell = self.cell_of(&point);
        self.grid.entry(cell).or_default().push(index);
        index
    }

    /// Record `segment` as an edge.
    ///
    /// Returns false when both endpoints collapse into the same node; such a
    /// segment contributes no edge.
    pub fn add_segment(&mut self, segment: &Segment) -> bool {
        let a = self.node_for(segment.start);
        let b = self.node_for(segment.end);
        if a == b {
            return false;
        }
        self.nodes[a].neighbors.push(b);
        self.nodes[b].neighbors.push(a);
        self.edge_count += 1;
        true
    }

    /// Consume one `a`–`b` edge from both adjacency lists.
    ///
    /// Returns false when no such edge remains.
    pub fn remove_edge(&mut self, a: usize, b: usize) -> bool {
        let Some(pos) = self.nodes[a].neighbors.iter().position(|&n| n == b) else {
            return false;
        };
        self.nodes[a].neighbors.remove(pos);
        if let Some(pos) = self.nodes[b].neighbors.iter().position(|&n| n == a) {
            self.nodes[b].neighbors.remove(pos);
        }
        self.edge_count -= 1;
        true
    }
}
