//! Chord/offset arc math.
//!
//! Curved boundaries are stored as a chord (two shape vertices) plus a
//! scalar describing how far the arc rises above it: either the sagitta
//! (absolute height in millimeters) or the bulge (the dimensionless ratio
//! `2 * sagitta / chord`). These functions convert between the two forms
//! and recover full circle parameters from them.

use super::Point;
use crate::error::GeometryError;

/// Coordinates closer than this are treated as coincident.
pub const EPSILON: f64 = 1e-9;

/// Midpoint of the chord from `p1` to `p2`.
pub fn chord_midpoint(p1: Point, p2: Point) -> Point {
    p1.midpoint(&p2)
}

/// Left-hand perpendicular unit normal of the direction `p1 -> p2`,
/// as `(-dy, dx) / len`. `None` for a degenerate chord.
pub fn perpendicular(p1: Point, p2: Point) -> Option<(f64, f64)> {
    let dx = p2.x - p1.x;
    let dy = p2.y - p1.y;
    let len = (dx * dx + dy * dy).sqrt();
    if len < EPSILON {
        return None;
    }
    Some((-dy / len, dx / len))
}

/// Point at `offset` along the left-hand perpendicular normal from the
/// chord midpoint. A degenerate chord returns the midpoint unchanged.
pub fn arc_center_from_chord_and_offset(p1: Point, p2: Point, offset: f64) -> Point {
    let mid = chord_midpoint(p1, p2);
    match perpendicular(p1, p2) {
        Some((nx, ny)) => Point::new(mid.x + offset * nx, mid.y + offset * ny),
        None => mid,
    }
}

/// Height of a minor arc of the given radius above a chord of the given
/// length. Fails when the chord is longer than the diameter.
pub fn sagitta_from_radius_and_chord(radius: f64, chord: f64) -> Result<f64, GeometryError> {
    let half = chord / 2.0;
    if radius < half {
        return Err(GeometryError::RadiusBelowChord {
            radius,
            chord,
            min_radius: half,
        });
    }
    Ok(radius - (radius * radius - half * half).sqrt())
}

/// Sagitta of an arc described by a bulge over a chord of the given length.
pub fn bulge_to_sagitta(bulge: f64, chord: f64) -> f64 {
    bulge * chord / 2.0
}

/// Bulge of an arc with the given sagitta over a chord of the given length.
/// Exact inverse of [`bulge_to_sagitta`]; a degenerate chord yields zero.
pub fn sagitta_to_bulge(sagitta: f64, chord: f64) -> f64 {
    if chord < EPSILON {
        return 0.0;
    }
    2.0 * sagitta / chord
}

/// Radius of the circle whose arc over a chord of length `chord` rises by
/// `sagitta`. The sign of the sagitta is irrelevant; the magnitude is
/// floored at [`EPSILON`] so a flat arc cannot divide by zero.
pub fn radius_from_sagitta_and_chord(sagitta: f64, chord: f64) -> f64 {
    let s = sagitta.abs().max(EPSILON);
    let half = chord / 2.0;
    (half * half + s * s) / (2.0 * s)
}

/// One intersection point of two circles, selected by the sign of the
/// perpendicular offset from the `c1 -> c2` center line.
///
/// Returns `None` when the circles are disjoint, nested, or concentric.
/// Only one of the two intersections is produced; callers that need the
/// other one call again with the offset sign negated.
pub fn circle_circle_intersection(
    c1: Point,
    r1: f64,
    c2: Point,
    r2: f64,
    offset_sign: f64,
) -> Option<Point> {
    let dx = c2.x - c1.x;
    let dy = c2.y - c1.y;
    let d = (dx * dx + dy * dy).sqrt();
    if d < EPSILON || d > r1 + r2 || d < (r1 - r2).abs() {
        return None;
    }
    let a = (d * d + r1 * r1 - r2 * r2) / (2.0 * d);
    let h = (r1 * r1 - a * a).max(0.0).sqrt();
    let bx = c1.x + a * dx / d;
    let by = c1.y + a * dy / d;
    let sign = if offset_sign < 0.0 { -1.0 } else { 1.0 };
    Some(Point::new(
        bx + sign * h * (-dy / d),
        by + sign * h * (dx / d),
    ))
}

/// Center and radius of the circle through three points.
/// Fails when the points are collinear (or coincident).
pub fn circle_through_three_points(
    p1: Point,
    p2: Point,
    p3: Point,
) -> Result<(Point, f64), GeometryError> {
    let d = 2.0
        * (p1.x * (p2.y - p3.y) + p2.x * (p3.y - p1.y) + p3.x * (p1.y - p2.y));
    if d.abs() < EPSILON {
        return Err(GeometryError::CollinearPoints);
    }
    let sq1 = p1.x * p1.x + p1.y * p1.y;
    let sq2 = p2.x * p2.x + p2.y * p2.y;
    let sq3 = p3.x * p3.x + p3.y * p3.y;
    let ux = (sq1 * (p2.y - p3.y) + sq2 * (p3.y - p1.y) + sq3 * (p1.y - p2.y)) / d;
    let uy = (sq1 * (p3.x - p2.x) + sq2 * (p1.x - p3.x) + sq3 * (p2.x - p1.x)) / d;
    let center = Point::new(ux, uy);
    Ok((center, center.distance_to(&p1)))
}

/// Normalizes an angle into `[0, 2π)`.
pub fn normalize_angle(angle: f64) -> f64 {
    let a = angle % std::f64::consts::TAU;
    if a < 0.0 {
        a + std::f64::consts::TAU
    } else {
        a
    }
}

/// Whether `angle` lies within the sweep from `start` to `end`, walking
/// counter-clockwise or clockwise. All three angles are normalized first;
/// sweeps that wrap through zero are handled by the branch on ordering.
pub fn angle_in_sweep(angle: f64, start: f64, end: f64, counter_clockwise: bool) -> bool {
    let a = normalize_angle(angle);
    let s = normalize_angle(start);
    let e = normalize_angle(end);
    if counter_clockwise {
        if s <= e {
            a >= s && a <= e
        } else {
            a >= s || a <= e
        }
    } else if e <= s {
        a <= s && a >= e
    } else {
        a <= s || a >= e
    }
}

/// Axis-aligned bounding box of a circular arc: its endpoints plus every
/// cardinal compass point of the circle the sweep passes through.
pub fn arc_bounds(
    center: Point,
    radius: f64,
    start_angle: f64,
    end_angle: f64,
    counter_clockwise: bool,
) -> (f64, f64, f64, f64) {
    let point_at = |angle: f64| {
        Point::new(
            center.x + radius * angle.cos(),
            center.y + radius * angle.sin(),
        )
    };

    let mut min_x = f64::INFINITY;
    let mut min_y = f64::INFINITY;
    let mut max_x = f64::NEG_INFINITY;
    let mut max_y = f64::NEG_INFINITY;
    let mut include = |p: Point| {
        min_x = min_x.min(p.x);
        min_y = min_y.min(p.y);
        max_x = max_x.max(p.x);
        max_y = max_y.max(p.y);
    };

    include(point_at(start_angle));
    include(point_at(end_angle));
    for quarter in 0..4 {
        let cardinal = std::f64::consts::FRAC_PI_2 * quarter as f64;
        if angle_in_sweep(cardinal, start_angle, end_angle, counter_clockwise) {
            include(point_at(cardinal));
        }
    }
    (min_x, min_y, max_x, max_y)
}
