use dxf::entities::{Circle, Entity as DxfEntity, EntityType, Line, Spline};
use dxf::{Drawing, Point as DxfPoint};
use std::fs::File;
use std::io::Write;
use trailcut_camtools::{
    open_entity_source, CamToolError, DxfEntitySource, Entity, EntitySource, FileFormatError,
    GcodeGenerator, GcodeParameters, Point,
};

fn write_drawing(
    dir: &tempfile::TempDir,
    name: &str,
    types: Vec<EntityType>,
) -> std::path::PathBuf {
    let mut drawing = Drawing::new();
    for specific in types {
        drawing.add_entity(DxfEntity::new(specific));
    }
    let path = dir.path().join(name);
    let mut file = File::create(&path).unwrap();
    drawing.save(&mut file).unwrap();
    path
}

#[test]
fn test_dxf_file_round_trip() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_drawing(
        &dir,
        "square.dxf",
        vec![
            EntityType::Line(Line::new(
                DxfPoint::new(0.0, 0.0, 0.0),
                DxfPoint::new(10.0, 0.0, 0.0),
            )),
            EntityType::Circle(Circle::new(DxfPoint::new(20.0, 20.0, 0.0), 3.0)),
        ],
    );

    let entities = DxfEntitySource::new(&path).load_entities().unwrap();
    assert_eq!(
        entities,
        vec![
            Entity::Line {
                start: Point::new(0.0, 0.0),
                end: Point::new(10.0, 0.0),
            },
            Entity::Circle {
                center: Point::new(20.0, 20.0),
                radius: 3.0,
            },
        ]
    );
}

#[test]
fn test_dxf_unsupported_entities_are_skipped_in_generation() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_drawing(
        &dir,
        "mixed.dxf",
        vec![
            EntityType::Line(Line::new(
                DxfPoint::new(1.0, 1.0, 0.0),
                DxfPoint::new(2.0, 1.0, 0.0),
            )),
            EntityType::Spline(Spline::default()),
        ],
    );

    let source = open_entity_source(&path).unwrap();
    let generator = GcodeGenerator::new(GcodeParameters::default()).unwrap();
    let program = generator.generate_from_source(source.as_ref()).unwrap();
    assert_eq!(program.stats.entities_converted, 1);
    assert_eq!(program.stats.entities_skipped, 1);
    assert!(program.gcode.contains("G1 X2 Y1 F600\n"));
}

#[test]
fn test_missing_dxf_file() {
    let dir = tempfile::tempdir().unwrap();
    let source = DxfEntitySource::new(dir.path().join("missing.dxf"));
    assert!(matches!(
        source.load_entities(),
        Err(CamToolError::FileFormat(FileFormatError::IoError(_)))
    ));
}

#[test]
fn test_corrupt_dxf_file_aborts_generation() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("broken.dxf");
    let mut file = File::create(&path).unwrap();
    writeln!(file, "this is not a drawing").unwrap();
    drop(file);

    let generator = GcodeGenerator::new(GcodeParameters::default()).unwrap();
    let result = generator.generate_from_source(&DxfEntitySource::new(&path));
    assert!(matches!(
        result,
        Err(CamToolError::FileFormat(FileFormatError::DxfParseError(_)))
    ));
}
