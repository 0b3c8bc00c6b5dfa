//! # trailcut Core
//!
//! Core types shared by every trailcut crate:
//! - 2-D geometry values ([`Point`], [`Segment`])
//! - Drawing entities decoded at the input boundary ([`Entity`])
//! - Geometry validation errors ([`GeometryError`])

pub mod entity;
pub mod error;
pub mod geometry;

pub use entity::Entity;
pub use error::GeometryError;
pub use geometry::{Point, Segment};
