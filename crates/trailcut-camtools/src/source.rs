//! Entity sources
//!
//! A source delivers the complete entity list for one run. Loading happens
//! before the pipeline starts; a failing source aborts the run.

use crate::dxf_source::DxfEntitySource;
use crate::error::{CamToolResult, FileFormatError};
use serde_json::Value;
use std::fs;
use std::path::{Path, PathBuf};
use trailcut_core::Entity;

/// Provides the entities to cut.
pub trait EntitySource {
    fn load_entities(&self) -> CamToolResult<Vec<Entity>>;
}

impl EntitySource for [Entity] {
    fn load_entities(&self) -> CamToolResult<Vec<Entity>> {
        Ok(self.to_vec())
    }
}

impl EntitySource for Vec<Entity> {
    fn load_entities(&self) -> CamToolResult<Vec<Entity>> {
        Ok(self.clone())
    }
}

/// A JSON array of tagged entities, e.g.
/// `[{"type": "line", "start": {"x": 0, "y": 0}, "end": {"x": 1, "y": 0}}]`.
///
/// Records with an unknown `type` load as [`Entity::Unsupported`] and are
/// skipped later; a record of a known type with bad fields fails the load.
#[derive(Debug, Clone)]
pub struct JsonEntitySource {
    path: PathBuf,
}

impl JsonEntitySource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl EntitySource for JsonEntitySource {
    fn load_entities(&self) -> CamToolResult<Vec<Entity>> {
        let content = fs::read_to_string(&self.path).map_err(FileFormatError::IoError)?;
        let records: Vec<Value> =
            serde_json::from_str(&content).map_err(FileFormatError::JsonParseError)?;
        let entities = records
            .into_iter()
            .map(decode_entity)
            .collect::<Result<Vec<_>, _>>()
            .map_err(FileFormatError::JsonParseError)?;
        tracing::debug!(
            path = %self.path.display(),
            entities = entities.len(),
            "JSON entities loaded"
        );
        Ok(entities)
    }
}

fn decode_entity(record: Value) -> Result<Entity, serde_json::Error> {
    match record.get("type").and_then(Value::as_str) {
        Some(tag) if !Entity::TAGS.contains(&tag) => Ok(Entity::Unsupported {
            kind: tag.to_string(),
        }),
        _ => serde_json::from_value(record),
    }
}

/// Pick a source for `path` by its extension (`dxf` or `json`, any case).
pub fn open_entity_source(path: &Path) -> CamToolResult<Box<dyn EntitySource>> {
    let extension = path
        .extension()
        .and_then(|e| e.to_str())
        .map(str::to_ascii_lowercase)
        .unwrap_or_default();
    match extension.as_str() {
        "dxf" => Ok(Box::new(DxfEntitySource::new(path))),
        "json" => Ok(Box::new(JsonEntitySource::new(path))),
        _ => Err(FileFormatError::UnknownExtension(path.display().to_string()).into()),
    }
}
