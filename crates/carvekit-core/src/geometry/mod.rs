//! Pure 2D geometry for the shape model and hit-testing.
//!
//! Everything here is stateless: functions over [`Point`] values in world
//! millimeters. The arc module covers the chord/offset (bulge)
//! parametrization of curved boundaries; the hit module covers point
//! classification.

pub mod arc;
pub mod hit;

use serde::{Deserialize, Serialize};

/// A 2D point in world millimeters.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    /// Creates a new point with the given X and Y coordinates.
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Calculates the distance to another point.
    pub fn distance_to(&self, other: &Point) -> f64 {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        (dx * dx + dy * dy).sqrt()
    }

    /// Midpoint between this point and another.
    pub fn midpoint(&self, other: &Point) -> Point {
        Point::new((self.x + other.x) / 2.0, (self.y + other.y) / 2.0)
    }

    /// Whether both coordinates are finite numbers.
    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }
}

/// Axis of a mirror reflection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MirrorAxis {
    /// Reflect across the horizontal line through the mirror center
    /// (y coordinates flip).
    Horizontal,
    /// Reflect across the vertical line through the mirror center
    /// (x coordinates flip).
    Vertical,
}

/// Rotates a point about a center by an angle in radians.
pub fn rotate_point(p: Point, center: Point, angle_rad: f64) -> Point {
    if angle_rad.abs() < 1e-12 {
        return p;
    }
    let cos_a = angle_rad.cos();
    let sin_a = angle_rad.sin();
    let dx = p.x - center.x;
    let dy = p.y - center.y;
    Point {
        x: center.x + dx * cos_a - dy * sin_a,
        y: center.y + dx * sin_a + dy * cos_a,
    }
}

/// Reflects a point across the horizontal or vertical line through `center`.
pub fn mirror_point(p: Point, axis: MirrorAxis, center: Point) -> Point {
    match axis {
        MirrorAxis::Horizontal => Point::new(p.x, 2.0 * center.y - p.y),
        MirrorAxis::Vertical => Point::new(2.0 * center.x - p.x, p.y),
    }
}
