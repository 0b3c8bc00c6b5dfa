//! Curve tessellation
//!
//! Approximates circles, arcs and ellipses with chords whose perpendicular
//! distance from the true curve never exceeds a maximum error.
//!
//! The chord count comes from the regular polygon circumscribing the curve:
//! the smallest `n >= 3` whose circumscribed vertices stay within the error
//! of the true radius. Vertices are then pulled halfway back toward the
//! curve so chord midpoints and vertices share the error evenly.

use nalgebra::Vector2;
use std::f64::consts::{PI, TAU};
use trailcut_core::{GeometryError, Point, Segment};

/// Upper bound on polygon sides; reached only when the error is vanishingly
/// small relative to the radius.
pub const MAX_POLYGON_SIDES: usize = 1_000_000;

/// Number of sides of the polygon approximating a full circle of `radius`
/// within `max_error`.
///
/// Both arguments must be positive; callers validate them first.
pub fn polygon_sides(radius: f64, max_error: f64) -> usize {
    let half_angle = (radius / (max_error + radius)).acos();
    let sides = (PI / half_angle).ceil();
    if !sides.is_finite() || sides >= MAX_POLYGON_SIDES as f64 {
        tracing::warn!(
            radius,
            max_error,
            sides = MAX_POLYGON_SIDES,
            "polygon side count clamped; chord error exceeds max_error"
        );
        return MAX_POLYGON_SIDES;
    }
    (sides as usize).max(3)
}

/// Vertex radius of an `sides`-gon whose chords straddle the circle of
/// `radius`.
fn centered_radius(radius: f64, sides: usize) -> f64 {
    let outer = radius / (PI / sides as f64).cos();
    outer - (outer - radius) / 2.0
}

/// Sweeps within this many radians of zero or a whole turn are full turns.
pub const FULL_TURN_TOLERANCE: f64 = 1e-9;

/// Counter-clockwise sweep from `start` to `end`, in (0, 2π].
///
/// Equal angles describe a full turn, as do angles a whole turn apart up to
/// rounding. Angles more than a turn apart wrap.
pub fn normalized_sweep(start: f64, end: f64) -> f64 {
    let mut sweep = end - start;
    if sweep < 0.0 {
        sweep += TAU;
    }
    if sweep < 0.0 || sweep > TAU + FULL_TURN_TOLERANCE {
        sweep = sweep.rem_euclid(TAU);
    }
    if sweep <= FULL_TURN_TOLERANCE || sweep >= TAU - FULL_TURN_TOLERANCE {
        TAU
    } else {
        sweep
    }
}

/// Tessellate a circular arc into consecutive chords.
///
/// The arc runs counter-clockwise from `start_angle` to `end_angle`
/// (radians); `reversed` swaps the two before the sweep is normalized.
/// A full turn returns a closed polyline whose last point is exactly its
/// first.
pub fn tessellate_arc(
    center: Point,
    radius: f64,
    max_error: f64,
    start_angle: f64,
    end_angle: f64,
    reversed: bool,
) -> Result<Vec<Segment>, GeometryError> {
    GeometryError::require_finite("center.x", center.x)?;
    GeometryError::require_finite("center.y", center.y)?;
    GeometryError::require_positive("radius", radius)?;
    GeometryError::require_positive("max_error", max_error)?;
    GeometryError::require_finite("start_angle", start_angle)?;
    GeometryError::require_finite("end_angle", end_angle)?;

    let (start, end) = if reversed {
        (end_angle, start_angle)
    } else {
        (start_angle, end_angle)
    };
    let sweep = normalized_sweep(start, end);
    let full_turn = sweep >= TAU;

    let sides = polygon_sides(radius, max_error);
    let vertex_radius = centered_radius(radius, sides);
    let chords = if full_turn {
        sides
    } else {
        ((sides as f64 * sweep / TAU).ceil() as usize).max(3)
    };

    let point_at = |angle: f64| {
        Point::new(
            center.x + vertex_radius * angle.cos(),
            center.y + vertex_radius * angle.sin(),
        )
    };

    let first = point_at(start);
    let step = sweep / chords as f64;
    let mut segments = Vec::with_capacity(chords);
    let mut prev = first;
    for i in 1..=chords {
        let p = if full_turn && i == chords {
            first
        } else {
            point_at(start + i as f64 * step)
        };
        segments.push(Segment::new(prev, p));
        prev = p;
    }
    Ok(segments)
}

/// Tessellate a full ellipse into a closed polyline.
///
/// `major_axis` is the vector from the center to the end of the major axis;
/// the minor axis is that vector turned a quarter turn counter-clockwise and
/// scaled by `ratio`. The side count is taken from the larger semi-axis.
pub fn tessellate_ellipse(
    center: Point,
    major_axis: Point,
    ratio: f64,
    max_error: f64,
) -> Result<Vec<Segment>, GeometryError> {
    GeometryError::require_finite("center.x", center.x)?;
    GeometryError::require_finite("center.y", center.y)?;
    GeometryError::require_finite("major_axis.x", major_axis.x)?;
    GeometryError::require_finite("major_axis.y", major_axis.y)?;
    GeometryError::require_positive("ratio", ratio)?;
    GeometryError::require_positive("max_error", max_error)?;

    let a = Vector2::new(major_axis.x, major_axis.y);
    let b = Vector2::new(-a.y, a.x) * ratio;
    let rad_a = GeometryError::require_positive("major_axis length", a.norm())?;
    let rad_b = GeometryError::require_positive("minor_axis length", b.norm())?;

    let sides = polygon_sides(rad_a.max(rad_b), max_error);
    let a = a * (centered_radius(rad_a, sides) / rad_a);
    let b = b * (centered_radius(rad_b, sides) / rad_b);
    let c = Vector2::new(center.x, center.y);

    let point_at = |angle: f64| {
        let v = c + a * angle.cos() + b * angle.sin();
        Point::new(v.x, v.y)
    };

    let first = point_at(0.0);
    let mut segments = Vec::with_capacity(sides);
    let mut prev = first;
    for i in 1..=sides {
        let p = if i == sides {
            first
        } else {
            point_at(i as f64 * TAU / sides as f64)
        };
        segments.push(Segment::new(prev, p));
        prev = p;
    }
    Ok(segments)
}
