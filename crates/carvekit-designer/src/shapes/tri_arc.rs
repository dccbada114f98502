//! The tri-arc shape: a triangle whose edges are concave circular arcs.
//!
//! Edge `i` joins `vertices[i]` to `vertices[(i + 1) % 3]`; `curvatures[i]`
//! is that edge's signed bulge, `2 * sagitta / chord`. Only negative
//! (concave) bulges are representable: every arc dips toward the centroid,
//! matching the physical carving metaphor of material cut away from a
//! triangular blank. A zero or convex bulge would degenerate the carving,
//! so edits clamp into the valid range rather than ever reaching it.

use carvekit_core::constants::{
    ARC_HANDLE_RADIUS_PX, TRI_ARC_BULGE_MAX, TRI_ARC_BULGE_MIN, TRI_ARC_DEFAULT_BULGE,
    VERTEX_HANDLE_RADIUS_PX,
};
use carvekit_core::geometry::arc::{
    bulge_to_sagitta, chord_midpoint, perpendicular, radius_from_sagitta_and_chord,
    sagitta_to_bulge, EPSILON,
};
use carvekit_core::geometry::hit::{bounds_of_points, point_in_circle, point_in_polygon};
use carvekit_core::geometry::{mirror_point, rotate_point, MirrorAxis, Point};

use super::HitResult;

/// Clamp margin keeping bulges strictly inside the open concave limit.
const BULGE_EPS: f64 = 1e-6;

fn clamp_bulge(bulge: f64) -> f64 {
    bulge.clamp(TRI_ARC_BULGE_MIN + BULGE_EPS, TRI_ARC_BULGE_MAX)
}

/// A concave-edged triangle.
#[derive(Debug, Clone, PartialEq)]
pub struct TriArc {
    /// The three corner vertices.
    pub vertices: [Point; 3],
    /// Per-edge bulge factors, one for each edge `(i, i + 1 mod 3)`.
    pub curvatures: [f64; 3],
}

impl TriArc {
    /// Creates a tri-arc with the default bulge on every edge.
    pub fn new(vertices: [Point; 3]) -> Self {
        Self {
            vertices,
            curvatures: [TRI_ARC_DEFAULT_BULGE; 3],
        }
    }

    /// Creates a tri-arc with explicit bulges, clamped into the valid
    /// concave range.
    pub fn with_curvatures(vertices: [Point; 3], curvatures: [f64; 3]) -> Self {
        Self {
            vertices,
            curvatures: curvatures.map(clamp_bulge),
        }
    }

    /// Centroid of the three vertices.
    pub fn center(&self) -> Point {
        Point::new(
            (self.vertices[0].x + self.vertices[1].x + self.vertices[2].x) / 3.0,
            (self.vertices[0].y + self.vertices[1].y + self.vertices[2].y) / 3.0,
        )
    }

    fn edge(&self, index: usize) -> (Point, Point) {
        (self.vertices[index], self.vertices[(index + 1) % 3])
    }

    fn chord_length(&self, index: usize) -> f64 {
        let (a, b) = self.edge(index);
        a.distance_to(&b)
    }

    /// Unit normal of edge `index` pointing away from the centroid. The
    /// raw left-hand normal is flipped when it faces inward, so the sign
    /// convention survives any vertex order, mirror, or rotation.
    fn outward_normal(&self, index: usize) -> Option<(f64, f64)> {
        let (a, b) = self.edge(index);
        let (mut nx, mut ny) = perpendicular(a, b)?;
        let mid = chord_midpoint(a, b);
        let centroid = self.center();
        if nx * (centroid.x - mid.x) + ny * (centroid.y - mid.y) > 0.0 {
            nx = -nx;
            ny = -ny;
        }
        Some((nx, ny))
    }

    /// Signed sagitta of edge `index`'s arc. Negative: the arc dips from
    /// the chord toward the centroid.
    pub fn sagitta(&self, index: usize) -> f64 {
        bulge_to_sagitta(self.curvatures[index], self.chord_length(index))
    }

    /// Midpoint of edge `index`'s arc; the arc drag handle.
    pub fn arc_midpoint(&self, index: usize) -> Point {
        let (a, b) = self.edge(index);
        let mid = chord_midpoint(a, b);
        match self.outward_normal(index) {
            Some((nx, ny)) => {
                let s = self.sagitta(index);
                Point::new(mid.x + s * nx, mid.y + s * ny)
            }
            None => mid,
        }
    }

    /// Full circle of edge `index`'s arc as `(center, radius)`, or `None`
    /// when the edge is degenerate or the arc is flat.
    pub fn arc_circle(&self, index: usize) -> Option<(Point, f64)> {
        let (a, b) = self.edge(index);
        let chord = a.distance_to(&b);
        let s = self.sagitta(index);
        if chord < EPSILON || s.abs() < EPSILON {
            return None;
        }
        let (nx, ny) = self.outward_normal(index)?;
        let radius = radius_from_sagitta_and_chord(s, chord);
        // The center sits on the outward side: radius + s with s negative.
        let mid = chord_midpoint(a, b);
        let k = radius + s;
        Some((Point::new(mid.x + k * nx, mid.y + k * ny), radius))
    }

    /// Concave arcs never leave the vertex triangle, so the bounds are the
    /// vertex bounds.
    pub fn bounds(&self) -> (f64, f64, f64, f64) {
        bounds_of_points(&self.vertices)
    }

    /// Body containment: inside the vertex triangle and outside every
    /// edge arc's circle (the circular segment between chord and arc is
    /// the carved-away bite).
    pub fn contains(&self, point: Point) -> bool {
        if !point_in_polygon(point, &self.vertices) {
            return false;
        }
        for index in 0..3 {
            if let Some((center, radius)) = self.arc_circle(index) {
                if point.distance_to(&center) < radius {
                    return false;
                }
            }
        }
        true
    }

    pub fn hit_test(&self, point: Point, scale: f64) -> Option<HitResult> {
        let vertex_tolerance = VERTEX_HANDLE_RADIUS_PX / scale;
        for (i, v) in self.vertices.iter().enumerate() {
            if point_in_circle(point, *v, vertex_tolerance) {
                return Some(HitResult::vertex(i));
            }
        }
        let arc_tolerance = ARC_HANDLE_RADIUS_PX / scale;
        for i in 0..3 {
            if point_in_circle(point, self.arc_midpoint(i), arc_tolerance) {
                return Some(HitResult::arc(i));
            }
        }
        if self.contains(point) {
            return Some(HitResult::body());
        }
        None
    }

    /// Replaces vertex `index`. Both adjacent edge bulges are re-derived
    /// to preserve each arc's sagitta (absolute curvature height) across
    /// the chord-length change, then re-clamped into the concave range.
    /// Out-of-range indices are ignored.
    pub fn move_vertex(&mut self, index: usize, position: Point) {
        if index >= 3 {
            return;
        }
        let adjacent = [(index + 2) % 3, index];
        let kept_sagittas = adjacent.map(|edge| self.sagitta(edge));
        self.vertices[index] = position;
        for (edge, sagitta) in adjacent.into_iter().zip(kept_sagittas) {
            let chord = self.chord_length(edge);
            self.curvatures[edge] = clamp_bulge(sagitta_to_bulge(sagitta, chord));
        }
    }

    /// Re-derives edge `index`'s bulge so its arc dips `offset`
    /// millimeters from the chord. Larger offsets mean deeper concavity
    /// (more negative bulge); the result is clamped into the valid range.
    /// A degenerate chord mid-drag is ignored rather than erroring.
    pub fn move_arc(&mut self, index: usize, offset: f64) {
        if index >= 3 {
            return;
        }
        let chord = self.chord_length(index);
        if chord < EPSILON {
            return;
        }
        let bulge = sagitta_to_bulge(-offset.max(0.0), chord);
        self.curvatures[index] = clamp_bulge(bulge);
    }

    /// Depth implied by a pointer position dragging arc `index`: the
    /// offset from the chord midpoint projected onto the direction the
    /// arc dips toward (inward, since every arc is concave).
    pub fn arc_drag_offset(&self, index: usize, point: Point) -> f64 {
        let (a, b) = self.edge(index);
        let mid = chord_midpoint(a, b);
        match self.outward_normal(index) {
            Some((nx, ny)) => -((point.x - mid.x) * nx + (point.y - mid.y) * ny),
            None => 0.0,
        }
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

    /// Reflects the vertices. Mirroring reverses the winding order, but
    /// the bulge-to-edge pairing needs no fixup: outward normals are
    /// re-derived from the live centroid on every query, so each edge's
    /// arc keeps dipping inward with its original depth.
    pub fn mirror(&mut self, axis: MirrorAxis, center: Point) {
        for v in &mut self.vertices {
            *v = mirror_point(*v, axis, center);
        }
    }

    /// Scales every bulge by `factor`, clamped. Used by jiggle.
    pub(crate) fn scale_curvatures(&mut self, factor: f64) {
        for c in &mut self.curvatures {
            *c = clamp_bulge(*c * factor);
        }
    }
}
