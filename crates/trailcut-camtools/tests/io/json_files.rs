use std::fs;
use trailcut_camtools::{
    open_entity_source, CamToolError, Entity, EntitySource, FileFormatError, GcodeGenerator,
    GcodeParameters, JsonEntitySource, Point,
};

const SHAPES: &str = r#"[
    {"type": "line", "start": {"x": 0, "y": 0}, "end": {"x": 10, "y": 0}},
    {"type": "arc", "center": {"x": 10, "y": 5}, "radius": 5,
     "start_angle": -1.5707963267948966, "end_angle": 1.5707963267948966},
    {"type": "ellipse", "center": {"x": 30, "y": 0}, "major_axis": {"x": 4, "y": 0}, "ratio": 0.5},
    {"type": "polyline", "kind": "ignored"}
]"#;

#[test]
fn test_json_source_loads_entities() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("shapes.json");
    let known = r#"[{"type": "line", "start": {"x": 0, "y": 0}, "end": {"x": 10, "y": 0}},
                    {"type": "circle", "center": {"x": 1, "y": 2}, "radius": 3}]"#;
    fs::write(&path, known).unwrap();

    let entities = JsonEntitySource::new(&path).load_entities().unwrap();
    assert_eq!(
        entities,
        vec![
            Entity::Line {
                start: Point::new(0.0, 0.0),
                end: Point::new(10.0, 0.0),
            },
            Entity::Circle {
                center: Point::new(1.0, 2.0),
                radius: 3.0,
            },
        ]
    );
}

#[test]
fn test_unknown_entity_type_is_skipped() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("shapes.json");
    fs::write(&path, SHAPES).unwrap();

    let entities = JsonEntitySource::new(&path).load_entities().unwrap();
    assert_eq!(entities.len(), 4);
    assert_eq!(entities[3].kind(), "polyline");

    let generator = GcodeGenerator::new(GcodeParameters::default()).unwrap();
    let program = generator
        .generate_from_source(&JsonEntitySource::new(&path))
        .unwrap();
    assert_eq!(program.stats.entities_converted, 3);
    assert_eq!(program.stats.entities_skipped, 1);
    assert!(program.gcode.contains("G1 X10 Y0 F600\n"));
}

#[test]
fn test_line_survives_unknown_neighbour() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("line.json");
    let content = r#"[{"type": "line", "start": {"x": 0, "y": 0}, "end": {"x": 1, "y": 0}},
                      {"type": "spline"}]"#;
    fs::write(&path, content).unwrap();

    let entities = JsonEntitySource::new(&path).load_entities().unwrap();
    assert_eq!(
        entities[0],
        Entity::Line {
            start: Point::new(0.0, 0.0),
            end: Point::new(1.0, 0.0),
        }
    );
    assert_eq!(entities[1].kind(), "spline");
}

#[test]
fn test_malformed_known_entity_is_a_format_error() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("broken.json");
    fs::write(&path, r#"[{"type": "circle", "center": {"x": 0, "y": 0}}]"#).unwrap();

    let err = JsonEntitySource::new(&path).load_entities().unwrap_err();
    assert!(matches!(
        err,
        CamToolError::FileFormat(FileFormatError::JsonParseError(_))
    ));
}

#[test]
fn test_json_drawing_generates_gcode() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("drawing.json");
    let entities = vec![
        Entity::Line {
            start: Point::new(0.0, 0.0),
            end: Point::new(10.0, 0.0),
        },
        Entity::Arc {
            center: Point::new(10.0, 5.0),
            radius: 5.0,
            start_angle: -std::f64::consts::FRAC_PI_2,
            end_angle: std::f64::consts::FRAC_PI_2,
            reversed: false,
        },
    ];
    fs::write(&path, serde_json::to_string_pretty(&entities).unwrap()).unwrap();

    let source = open_entity_source(&path).unwrap();
    let generator = GcodeGenerator::new(GcodeParameters::default()).unwrap();
    let program = generator.generate_from_source(source.as_ref()).unwrap();

    // The arc continues from the end of the line, so one lift suffices
    assert_eq!(program.stats.trails, 1);
    assert_eq!(program.stats.emit.lifts, 1);
    assert_eq!(program.gcode, generator.generate(&entities).unwrap().gcode);
}
