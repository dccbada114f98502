//! Point classification primitives for hit-testing.

use super::arc::angle_in_sweep;
use super::Point;

/// Ray-casting point-in-polygon test (edge-crossing parity).
///
/// Points exactly on the boundary are classified by whichever side the
/// parity lands on; callers must not rely on a particular boundary answer,
/// only on it being consistent.
pub fn point_in_polygon(point: Point, polygon: &[Point]) -> bool {
    if polygon.len() < 3 {
        return false;
    }
    let mut inside = false;
    let mut j = polygon.len() - 1;
    for i in 0..polygon.len() {
        let pi = polygon[i];
        let pj = polygon[j];
        if (pi.y > point.y) != (pj.y > point.y) {
            let x_cross = pi.x + (point.y - pi.y) * (pj.x - pi.x) / (pj.y - pi.y);
            if point.x < x_cross {
                inside = !inside;
            }
        }
        j = i;
    }
    inside
}

/// Distance from a point to the segment `a -> b`, via the projection
/// parameter clamped into `[0, 1]`.
pub fn point_segment_distance(point: Point, a: Point, b: Point) -> f64 {
    let dx = b.x - a.x;
    let dy = b.y - a.y;
    let len_sq = dx * dx + dy * dy;
    if len_sq == 0.0 {
        return point.distance_to(&a);
    }
    let t = (((point.x - a.x) * dx + (point.y - a.y) * dy) / len_sq).clamp(0.0, 1.0);
    point.distance_to(&Point::new(a.x + t * dx, a.y + t * dy))
}

/// Inclusive containment test against a circle (`distance <= radius`).
pub fn point_in_circle(point: Point, center: Point, radius: f64) -> bool {
    point.distance_to(&center) <= radius
}

/// Whether a point lies on an arc: within `tolerance` of the arc's radius
/// AND inside its angular sweep.
pub fn point_on_arc(
    point: Point,
    center: Point,
    radius: f64,
    start_angle: f64,
    end_angle: f64,
    counter_clockwise: bool,
    tolerance: f64,
) -> bool {
    let distance = point.distance_to(&center);
    if (distance - radius).abs() > tolerance {
        return false;
    }
    let angle = (point.y - center.y).atan2(point.x - center.x);
    angle_in_sweep(angle, start_angle, end_angle, counter_clockwise)
}

/// Axis-aligned bounding box of a point set as `(min_x, min_y, max_x, max_y)`.
/// An empty slice yields an inverted infinite box that unions as identity.
pub fn bounds_of_points(points: &[Point]) -> (f64, f64, f64, f64) {
    let mut min_x = f64::INFINITY;
    let mut min_y = f64::INFINITY;
    let mut max_x = f64::NEG_INFINITY;
    let mut max_y = f64::NEG_INFINITY;
    for p in points {
        min_x = min_x.min(p.x);
        min_y = min_y.min(p.y);
        max_x = max_x.max(p.x);
        max_y = max_y.max(p.y);
    }
    (min_x, min_y, max_x, max_y)
}

/// Union of two bounding boxes.
pub fn merge_bounds(
    a: (f64, f64, f64, f64),
    b: (f64, f64, f64, f64),
) -> (f64, f64, f64, f64) {
    (a.0.min(b.0), a.1.min(b.1), a.2.max(b.2), a.3.max(b.3))
}
