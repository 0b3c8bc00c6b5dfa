use proptest::prelude::*;
use std::collections::HashSet;
use trailcut_camtools::{
    flatten_trails, ConnectivityGraph, GcodeParameters, MotionEmitter, PathPlanner, Point,
    Segment,
};

const TOLERANCE: f64 = 0.01;

/// Segments between integer grid points, so endpoints either coincide
/// exactly or lie far outside the merge tolerance.
fn grid_segments() -> impl Strategy<Value = Vec<Segment>> {
    prop::collection::vec((0i32..6, 0i32..6, 0i32..6, 0i32..6), 0..40).prop_map(|coords| {
        coords
            .into_iter()
            .map(|(x1, y1, x2, y2)| {
                Segment::new(
                    Point::new(f64::from(x1), f64::from(y1)),
                    Point::new(f64::from(x2), f64::from(y2)),
                )
            })
            .collect()
    })
}

fn undirected_edges(graph: &ConnectivityGraph, segments: &[Segment]) -> Vec<(usize, usize)> {
    let mut edges: Vec<(usize, usize)> = segments
        .iter()
        .filter_map(|s| {
            let a = graph.find_node(&s.start)?;
            let b = graph.find_node(&s.end)?;
            (a != b).then(|| (a.min(b), a.max(b)))
        })
        .collect();
    edges.sort_unstable();
    edges
}

proptest! {
    #[test]
    fn planner_preserves_segment_multiset(segments in grid_segments()) {
        let graph = ConnectivityGraph::from_segments(&segments, TOLERANCE).unwrap();
        let reference = graph.clone();
        let expected = undirected_edges(&reference, &segments);

        let trails = PathPlanner::new().plan(graph);
        let planned = flatten_trails(&trails);
        prop_assert_eq!(undirected_edges(&reference, &planned), expected);
    }

    #[test]
    fn planner_never_repeats_an_edge(segments in grid_segments()) {
        // Drop duplicates so every input edge is distinct
        let mut seen = HashSet::new();
        let unique: Vec<Segment> = segments
            .into_iter()
            .filter(|s| {
                let a = (s.start.x as i64, s.start.y as i64);
                let b = (s.end.x as i64, s.end.y as i64);
                seen.insert((a.min(b), a.max(b)))
            })
            .collect();

        let graph = ConnectivityGraph::from_segments(&unique, TOLERANCE).unwrap();
        let planned = flatten_trails(&PathPlanner::new().plan(graph));
        for (i, a) in planned.iter().enumerate() {
            for b in &planned[i + 1..] {
                prop_assert!(!a.same_undirected(b), "edge {:?} planned twice", a);
            }
        }
    }

    #[test]
    fn trails_are_continuous_and_exhaust_the_graph(segments in grid_segments()) {
        let graph = ConnectivityGraph::from_segments(&segments, TOLERANCE).unwrap();
        let edges = graph.edge_count();
        let trails = PathPlanner::new().plan(graph);
        let total: usize = trails.iter().map(|t| t.len()).sum();
        prop_assert_eq!(total, edges);
        for trail in &trails {
            for pair in trail.segments.windows(2) {
                prop_assert_eq!(pair[0].end, pair[1].start);
            }
        }
    }

    #[test]
    fn emitter_lifts_at_most_once_per_trail(segments in grid_segments()) {
        let graph = ConnectivityGraph::from_segments(&segments, TOLERANCE).unwrap();
        let trails = PathPlanner::new().plan(graph);
        let params = GcodeParameters::default();
        let (_, stats) = MotionEmitter::new(&params).emit(&flatten_trails(&trails));
        prop_assert!(stats.lifts <= trails.len());
        prop_assert_eq!(stats.lifts == 0, trails.is_empty());
    }

    #[test]
    fn grid_lookup_matches_linear_scan(
        points in prop::collection::vec((-3.0f64..3.0, -3.0f64..3.0), 1..60),
        queries in prop::collection::vec((-3.5f64..3.5, -3.5f64..3.5), 1..30),
        tolerance in 0.05f64..1.5,
    ) {
        let mut graph = ConnectivityGraph::new(tolerance).unwrap();
        for (x, y) in points {
            let point = Point::new(x, y);
            let expected = graph.find_node_linear(&point);
            prop_assert_eq!(graph.find_node(&point), expected);
            graph.node_for(point);
        }
        for (x, y) in queries {
            let point = Point::new(x, y);
            prop_assert_eq!(graph.find_node(&point), graph.find_node_linear(&point));
        }
    }
}
