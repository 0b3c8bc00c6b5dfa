use std::f64::consts::FRAC_PI_2;
use trailcut_camtools::{
    polygon_sides, ConnectivityGraph, Entity, GcodeGenerator, GcodeParameters, NeighborPolicy,
    PathPlanner, Point, DEFAULT_EPILOGUE, DEFAULT_PROLOGUE,
};

fn line(x1: f64, y1: f64, x2: f64, y2: f64) -> Entity {
    Entity::Line {
        start: Point::new(x1, y1),
        end: Point::new(x2, y2),
    }
}

fn lift_count(gcode: &str) -> usize {
    gcode.lines().filter(|l| l.starts_with("G0 Z50 ")).count()
}

fn cut_count(gcode: &str) -> usize {
    gcode.lines().filter(|l| l.starts_with("G1 ")).count()
}

#[test]
fn test_two_connected_lines() {
    let generator = GcodeGenerator::new(GcodeParameters::default()).unwrap();
    let program = generator
        .generate(&[line(0.0, 0.0, 10.0, 0.0), line(10.0, 0.0, 10.0, 10.0)])
        .unwrap();

    let expected = format!(
        "{}G0 Z50 F1800\nG0 X0 Y0 F3000\nG0 Z0 F1800\nG1 X10 Y0 F600\nG1 X10 Y10 F600\n{}",
        DEFAULT_PROLOGUE, DEFAULT_EPILOGUE
    );
    assert_eq!(program.gcode, expected);
    assert_eq!(program.stats.nodes, 3);
    assert_eq!(program.stats.trails, 1);
    assert_eq!(program.stats.emit.lifts, 1);
    assert_eq!(program.stats.emit.cuts, 2);
}

#[test]
fn test_lines_given_out_of_order_are_chained() {
    let generator = GcodeGenerator::new(GcodeParameters::default()).unwrap();
    let program = generator
        .generate(&[line(10.0, 10.0, 10.0, 0.0), line(10.0, 0.0, 0.0, 0.0)])
        .unwrap();
    assert_eq!(lift_count(&program.gcode), 1);
    assert!(program.gcode.contains("G0 X0 Y0 F3000\n"));
}

#[test]
fn test_single_circle() {
    let generator = GcodeGenerator::new(GcodeParameters::default()).unwrap();
    let program = generator
        .generate(&[Entity::Circle {
            center: Point::ORIGIN,
            radius: 5.0,
        }])
        .unwrap();

    let n = polygon_sides(5.0, 0.01);
    assert_eq!(n, ((5.0f64 / 5.01).acos().recip() * std::f64::consts::PI).ceil() as usize);
    assert_eq!(program.stats.segments, n);
    assert_eq!(program.stats.nodes, n);
    assert_eq!(program.stats.trails, 1);
    assert_eq!(program.stats.emit.lifts, 1);
    assert_eq!(cut_count(&program.gcode), n);
}

#[test]
fn test_repetitions() {
    let params = GcodeParameters {
        repetitions: 3,
        ..Default::default()
    };
    let generator = GcodeGenerator::new(params).unwrap();
    let program = generator.generate(&[line(1.0, 1.0, 2.0, 1.0)]).unwrap();
    assert_eq!(cut_count(&program.gcode), 3);
    // The tool ends at (2,1) after each pass, so the segment is cut back
    // and forth without lifting again
    assert_eq!(lift_count(&program.gcode), 1);
    assert!(program.gcode.contains("G1 X2 Y1 F600\nG1 X1 Y1 F600\nG1 X2 Y1 F600\n"));
}

#[test]
fn test_pipeline_is_idempotent() {
    let entities = vec![
        line(0.0, 0.0, 4.0, 0.0),
        Entity::Arc {
            center: Point::new(4.0, 2.0),
            radius: 2.0,
            start_angle: -FRAC_PI_2,
            end_angle: FRAC_PI_2,
            reversed: false,
        },
        Entity::Ellipse {
            center: Point::new(20.0, 20.0),
            major_axis: Point::new(5.0, 5.0),
            ratio: 0.3,
        },
        Entity::Circle {
            center: Point::new(-7.0, 3.0),
            radius: 1.5,
        },
    ];
    let generator = GcodeGenerator::new(GcodeParameters::default()).unwrap();
    let first = generator.generate(&entities).unwrap();
    let second = generator.generate(&entities).unwrap();
    assert_eq!(first.gcode, second.gcode);
    assert_eq!(first.stats, second.stats);
}

#[test]
fn test_line_meets_arc_without_lift() {
    // The arc starts where the line ends, within the merge tolerance
    let entities = vec![
        line(0.0, 0.0, 4.0, 0.0),
        Entity::Arc {
            center: Point::new(4.0, 2.0),
            radius: 2.0,
            start_angle: -FRAC_PI_2,
            end_angle: FRAC_PI_2,
            reversed: false,
        },
    ];
    let generator = GcodeGenerator::new(GcodeParameters::default()).unwrap();
    let program = generator.generate(&entities).unwrap();
    assert_eq!(program.stats.trails, 1);
    assert_eq!(lift_count(&program.gcode), 1);
}

#[test]
fn test_unsupported_entities_do_not_abort() {
    let generator = GcodeGenerator::new(GcodeParameters::default()).unwrap();
    let program = generator
        .generate(&[
            Entity::Unsupported {
                kind: "spline".to_string(),
            },
            line(0.0, 0.0, 1.0, 1.0),
        ])
        .unwrap();
    assert_eq!(program.stats.entities_skipped, 1);
    assert_eq!(cut_count(&program.gcode), 1);
}

struct LastAvailable;

impl NeighborPolicy for LastAvailable {
    fn next_node(&self, graph: &ConnectivityGraph, current: usize) -> Option<usize> {
        graph.node(current).neighbors.last().copied()
    }
}

struct NeverMove;

impl NeighborPolicy for NeverMove {
    fn next_node(&self, _graph: &ConnectivityGraph, _current: usize) -> Option<usize> {
        None
    }
}

#[test]
fn test_custom_policy_changes_walk_order() {
    // Star with three arms around (1,0); leaf (0,0) is closest to the origin
    let entities = vec![
        line(0.0, 0.0, 1.0, 0.0),
        line(1.0, 0.0, 2.0, 0.0),
        line(1.0, 0.0, 1.0, 1.0),
    ];
    let first = GcodeGenerator::new(GcodeParameters::default())
        .unwrap()
        .generate(&entities)
        .unwrap();
    let last = GcodeGenerator::with_policy(GcodeParameters::default(), LastAvailable)
        .unwrap()
        .generate(&entities)
        .unwrap();

    assert!(first.gcode.contains("G1 X1 Y0 F600\nG1 X2 Y0 F600\n"));
    assert!(last.gcode.contains("G1 X1 Y0 F600\nG1 X1 Y1 F600\n"));
    assert_eq!(first.stats.emit.cuts, 3);
    assert_eq!(last.stats.emit.cuts, 3);
}

#[test]
fn test_policy_that_never_moves_terminates() {
    let graph = ConnectivityGraph::from_segments(
        &[trailcut_camtools::Segment::new(
            Point::new(0.0, 0.0),
            Point::new(1.0, 0.0),
        )],
        0.01,
    )
    .unwrap();
    let trails = PathPlanner::with_policy(NeverMove).plan(graph);
    assert!(trails.is_empty());
}
