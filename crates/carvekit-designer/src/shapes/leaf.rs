//! The leaf (vesica) shape: two equal-radius arcs through two foci.

use carvekit_core::constants::{
    ARC_HANDLE_RADIUS_PX, LEAF_RADIUS_FACTOR, VERTEX_HANDLE_RADIUS_PX,
};
use carvekit_core::error::GeometryError;
use carvekit_core::geometry::arc::{
    arc_bounds, arc_center_from_chord_and_offset, chord_midpoint, perpendicular, EPSILON,
};
use carvekit_core::geometry::hit::{bounds_of_points, merge_bounds, point_in_circle};
use carvekit_core::geometry::{mirror_point, rotate_point, MirrorAxis, Point};

use super::HitResult;

/// Shallowest lens the arc handle can drag to, in millimeters of sagitta.
const MIN_SAGITTA: f64 = 0.01;

/// A symmetric lens bounded by two circular arcs of equal radius through
/// two focus vertices. The radius may never drop below half the focus
/// distance (the arcs could not reach); edits clamp it there.
#[derive(Debug, Clone, PartialEq)]
pub struct Leaf {
    /// The two foci.
    pub vertices: [Point; 2],
    /// Shared radius of both boundary arcs.
    pub radius: f64,
}

impl Leaf {
    /// Creates a leaf between two placement points using the default
    /// radius rule (0.65 x the focus distance).
    pub fn from_placement(p1: Point, p2: Point) -> Self {
        Self {
            vertices: [p1, p2],
            radius: p1.distance_to(&p2) * LEAF_RADIUS_FACTOR,
        }
    }

    /// Creates a leaf with an explicit radius. Fails when the radius
    /// cannot span the focus distance; a caller bug, not user input.
    pub fn new(p1: Point, p2: Point, radius: f64) -> Result<Self, GeometryError> {
        let chord = p1.distance_to(&p2);
        if radius < chord / 2.0 {
            return Err(GeometryError::RadiusBelowChord {
                radius,
                chord,
                min_radius: chord / 2.0,
            });
        }
        Ok(Self {
            vertices: [p1, p2],
            radius,
        })
    }

    pub fn center(&self) -> Point {
        chord_midpoint(self.vertices[0], self.vertices[1])
    }

    fn focus_distance(&self) -> f64 {
        self.vertices[0].distance_to(&self.vertices[1])
    }

    /// Perpendicular distance from the chord to each arc's circle center.
    fn center_offset(&self) -> f64 {
        let half = self.focus_distance() / 2.0;
        (self.radius * self.radius - half * half).max(0.0).sqrt()
    }

    /// Height of each arc above the focus chord: half the lens width.
    pub fn sagitta(&self) -> f64 {
        self.radius - self.center_offset()
    }

    /// Circle centers of the two boundary arcs. Arc 0 bulges toward the
    /// left-hand side of `vertices[0] -> vertices[1]`, arc 1 the other way.
    pub fn arc_centers(&self) -> [Point; 2] {
        let h = self.center_offset();
        [
            arc_center_from_chord_and_offset(self.vertices[0], self.vertices[1], -h),
            arc_center_from_chord_and_offset(self.vertices[0], self.vertices[1], h),
        ]
    }

    /// Midpoint of each boundary arc; the arc drag handles.
    pub fn arc_midpoints(&self) -> [Point; 2] {
        let s = self.sagitta();
        [
            arc_center_from_chord_and_offset(self.vertices[0], self.vertices[1], s),
            arc_center_from_chord_and_offset(self.vertices[0], self.vertices[1], -s),
        ]
    }

    pub fn bounds(&self) -> (f64, f64, f64, f64) {
        if self.focus_distance() < EPSILON {
            return bounds_of_points(&self.vertices);
        }
        let centers = self.arc_centers();
        let midpoints = self.arc_midpoints();
        let mut total = (f64::INFINITY, f64::INFINITY, f64::NEG_INFINITY, f64::NEG_INFINITY);
        for (center, arc_mid) in centers.into_iter().zip(midpoints) {
            let a0 = angle_from(center, self.vertices[0]);
            let a1 = angle_from(center, self.vertices[1]);
            let mid_angle = angle_from(center, arc_mid);
            let ccw = carvekit_core::geometry::arc::angle_in_sweep(mid_angle, a0, a1, true);
            total = merge_bounds(total, arc_bounds(center, self.radius, a0, a1, ccw));
        }
        total
    }

    /// Body containment: inside both arc circles.
    pub fn contains(&self, point: Point) -> bool {
        let [c0, c1] = self.arc_centers();
        point_in_circle(point, c0, self.radius) && point_in_circle(point, c1, self.radius)
    }

    pub fn hit_test(&self, point: Point, scale: f64) -> Option<HitResult> {
        let vertex_tolerance = VERTEX_HANDLE_RADIUS_PX / scale;
        for (i, v) in self.vertices.iter().enumerate() {
            if point_in_circle(point, *v, vertex_tolerance) {
                return Some(HitResult::vertex(i));
            }
        }
        let arc_tolerance = ARC_HANDLE_RADIUS_PX / scale;
        for (i, m) in self.arc_midpoints().into_iter().enumerate() {
            if point_in_circle(point, m, arc_tolerance) {
                return Some(HitResult::arc(i));
            }
        }
        if self.contains(point) {
            return Some(HitResult::body());
        }
        None
    }

    /// Replaces a focus. The radius is kept, clamped up to the new
    /// minimum when the foci moved apart beyond the arcs' reach.
    pub fn move_vertex(&mut self, index: usize, position: Point) {
        if index >= 2 {
            return;
        }
        self.vertices[index] = position;
        let min_radius = self.focus_distance() / 2.0;
        if self.radius < min_radius {
            self.radius = min_radius;
        }
    }

    /// Re-derives the radius so the lens half-width equals `offset`.
    /// Both arcs share the one radius, so the arc index is irrelevant.
    /// The sagitta is clamped into `(0, focus_distance / 2]`, keeping the
    /// arcs at most semicircles.
    pub fn move_arc(&mut self, _arc_index: usize, offset: f64) {
        let half = self.focus_distance() / 2.0;
        if half <= MIN_SAGITTA {
            return;
        }
        let s = offset.clamp(MIN_SAGITTA, half);
        self.radius = (half * half + s * s) / (2.0 * s);
    }

    /// Sagitta implied by a pointer position dragging arc `arc_index`:
    /// the offset from the focus chord projected onto that arc's bulge
    /// direction.
    pub fn arc_drag_offset(&self, arc_index: usize, point: Point) -> f64 {
        let mid = self.center();
        let Some((nx, ny)) = perpendicular(self.vertices[0], self.vertices[1]) else {
            return 0.0;
        };
        // Arc 0 bulges along the left normal, arc 1 against it.
        let sign = if arc_index == 0 { 1.0 } else { -1.0 };
        (point.x - mid.x) * nx * sign + (point.y - mid.y) * ny * sign
    }

    pub fn translate(&mut self, dx: f64, dy: f64) {
        for v in &mut self.vertices {
            v.x += dx;
            v.y += dy;
        }
    }

    pub fn rotate(&mut self, angle: f64, center: Point) {
        for v in &mut self.vertices {
            *v = rotate_point(*v, center, angle);
        }
    }

    pub fn mirror(&mut self, axis: MirrorAxis, center: Point) {
        for v in &mut self.vertices {
            *v = mirror_point(*v, axis, center);
        }
    }

    /// Scales the radius by `factor`, clamped to the minimum the focus
    /// distance allows. Used by jiggle.
    pub(crate) fn scale_radius(&mut self, factor: f64) {
        self.radius = (self.radius * factor).max(self.focus_distance() / 2.0);
    }
}

fn angle_from(center: Point, p: Point) -> f64 {
    (p.y - center.y).atan2(p.x - center.x)
}
