//! Parametric carving shapes.
//!
//! Both shapes describe curved boundaries through chord/offset (bulge)
//! arcs over a small fixed vertex set, instead of storing explicit curve
//! points. Vertex counts are fixed per variant: vertices are replaced in
//! place by index, never added or removed. Derived quantities (center,
//! bounds, arc parameters) are recomputed from the stored vertices and
//! curvature on every query so they can never drift.

mod leaf;
mod tri_arc;

pub use leaf::Leaf;
pub use tri_arc::TriArc;

use carvekit_core::constants::{
    CANVAS_SAFETY_BOUND_MM, JIGGLE_MAX_POSITION_MM, JIGGLE_MAX_RADIUS_PCT,
    JIGGLE_MAX_ROTATION_DEG,
};
use carvekit_core::geometry::{MirrorAxis, Point};
use rand::Rng;
use serde::{Deserialize, Serialize};

/// Types of shapes the editor can place.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShapeType {
    Leaf,
    TriArc,
}

/// Interactive region classes on a shape.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum HitRegion {
    /// Inside the shape's filled boundary.
    Body,
    /// Within a vertex drag handle.
    Vertex,
    /// Within an arc curvature drag handle.
    Arc,
    /// Within the selection's rotation handle (never produced by a
    /// per-shape hit test; set by the selection layer).
    RotationHandle,
}

/// Result of a hit test: the region hit plus which vertex or arc it was.
///
/// A transient classification; a miss is `None` at the `hit_test` call
/// site, so this struct always describes an actual hit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HitResult {
    pub region: HitRegion,
    pub vertex_index: Option<usize>,
    pub arc_index: Option<usize>,
}

impl HitResult {
    pub fn body() -> Self {
        Self {
            region: HitRegion::Body,
            vertex_index: None,
            arc_index: None,
        }
    }

    pub fn vertex(index: usize) -> Self {
        Self {
            region: HitRegion::Vertex,
            vertex_index: Some(index),
            arc_index: None,
        }
    }

    pub fn arc(index: usize) -> Self {
        Self {
            region: HitRegion::Arc,
            vertex_index: None,
            arc_index: Some(index),
        }
    }
}

/// Random perturbation amounts for [`Shape::jiggle`].
///
/// Every field is a half-range: the actual perturbation is drawn uniformly
/// from `[-value, value]`. Values are capped before use so a jiggle can
/// never fling a shape far off-canvas or degenerate it.
#[derive(Debug, Clone, Copy)]
pub struct JiggleParams {
    /// Per-axis translation half-range in millimeters. Capped at 50 mm.
    pub position_mm: f64,
    /// Rotation half-range in degrees. Capped at 180 degrees.
    pub rotation_deg: f64,
    /// Curvature/radius variation half-range in percent. Capped at 90%.
    pub radius_pct: f64,
}

impl Default for JiggleParams {
    fn default() -> Self {
        Self {
            position_mm: 1.0,
            rotation_deg: 5.0,
            radius_pct: 5.0,
        }
    }
}

impl JiggleParams {
    fn capped(&self) -> Self {
        Self {
            position_mm: self.position_mm.clamp(0.0, JIGGLE_MAX_POSITION_MM),
            rotation_deg: self.rotation_deg.clamp(0.0, JIGGLE_MAX_ROTATION_DEG),
            radius_pct: self.radius_pct.clamp(0.0, JIGGLE_MAX_RADIUS_PCT),
        }
    }
}

/// Enum wrapper for all carving shapes.
#[derive(Debug, Clone, PartialEq)]
pub enum Shape {
    Leaf(Leaf),
    TriArc(TriArc),
}

impl Shape {
    pub fn shape_type(&self) -> ShapeType {
        match self {
            Shape::Leaf(_) => ShapeType::Leaf,
            Shape::TriArc(_) => ShapeType::TriArc,
        }
    }

    /// Ordered vertex list. Two entries for a leaf, three for a tri-arc.
    pub fn vertices(&self) -> &[Point] {
        match self {
            Shape::Leaf(s) => &s.vertices,
            Shape::TriArc(s) => &s.vertices,
        }
    }

    /// Number of edge-arcs carrying a curvature value.
    pub fn arc_count(&self) -> usize {
        match self {
            Shape::Leaf(_) => 2,
            Shape::TriArc(_) => 3,
        }
    }

    /// Centroid of the shape's vertices.
    pub fn center(&self) -> Point {
        match self {
            Shape::Leaf(s) => s.center(),
            Shape::TriArc(s) => s.center(),
        }
    }

    /// Axis-aligned bounding box as `(min_x, min_y, max_x, max_y)`.
    pub fn bounds(&self) -> (f64, f64, f64, f64) {
        match self {
            Shape::Leaf(s) => s.bounds(),
            Shape::TriArc(s) => s.bounds(),
        }
    }

    /// Classifies a world-space point against this shape's interactive
    /// regions. Handle tolerances are fixed screen-pixel radii divided by
    /// `scale`. Priority inside one shape: vertex handles, then arc
    /// handles, then body containment.
    pub fn hit_test(&self, point: Point, scale: f64) -> Option<HitResult> {
        match self {
            Shape::Leaf(s) => s.hit_test(point, scale),
            Shape::TriArc(s) => s.hit_test(point, scale),
        }
    }

    /// Whether the point is inside the shape's filled boundary.
    pub fn contains(&self, point: Point) -> bool {
        match self {
            Shape::Leaf(s) => s.contains(point),
            Shape::TriArc(s) => s.contains(point),
        }
    }

    /// Replaces vertex `index` with a new position, keeping curvature
    /// consistent (see the variant implementations). Out-of-range indices
    /// are ignored.
    pub fn move_vertex(&mut self, index: usize, position: Point) {
        match self {
            Shape::Leaf(s) => s.move_vertex(index, position),
            Shape::TriArc(s) => s.move_vertex(index, position),
        }
    }

    /// Sets the sagitta of arc `arc_index` to `offset` millimeters,
    /// clamped into the variant's valid range. Larger offsets always mean
    /// a more pronounced arc.
    pub fn move_arc(&mut self, arc_index: usize, offset: f64) {
        match self {
            Shape::Leaf(s) => s.move_arc(arc_index, offset),
            Shape::TriArc(s) => s.move_arc(arc_index, offset),
        }
    }

    /// World position of each arc's drag handle (the arc midpoint).
    pub fn arc_handles(&self) -> Vec<Point> {
        match self {
            Shape::Leaf(s) => s.arc_midpoints().to_vec(),
            Shape::TriArc(s) => (0..3).map(|i| s.arc_midpoint(i)).collect(),
        }
    }

    /// Sagitta a pointer position implies for arc `arc_index`: the drag
    /// projected onto the direction the arc bulges toward, so dragging
    /// outward along the bulge always deepens it regardless of which side
    /// the chord normal happens to point.
    pub fn arc_drag_offset(&self, arc_index: usize, point: Point) -> f64 {
        match self {
            Shape::Leaf(s) => s.arc_drag_offset(arc_index, point),
            Shape::TriArc(s) => s.arc_drag_offset(arc_index, point),
        }
    }

    /// Translates every vertex; curvature is untouched.
    pub fn translate(&mut self, dx: f64, dy: f64) {
        match self {
            Shape::Leaf(s) => s.translate(dx, dy),
            Shape::TriArc(s) => s.translate(dx, dy),
        }
    }

    /// Rotates every vertex by `angle` radians about `center` (the
    /// shape's own centroid when `None`). Curvature values are ratios,
    /// invariant under rotation, and stay untouched.
    pub fn rotate(&mut self, angle: f64, center: Option<Point>) {
        let center = center.unwrap_or_else(|| self.center());
        match self {
            Shape::Leaf(s) => s.rotate(angle, center),
            Shape::TriArc(s) => s.rotate(angle, center),
        }
    }

    /// Reflects every vertex across the horizontal or vertical line
    /// through `center`. Arc normals are re-derived from the centroid on
    /// every query, so curvature keeps bulging the right way afterwards.
    pub fn mirror(&mut self, axis: MirrorAxis, center: Point) {
        match self {
            Shape::Leaf(s) => s.mirror(axis, center),
            Shape::TriArc(s) => s.mirror(axis, center),
        }
    }

    /// Applies independent random perturbations: optional translation
    /// (skipped when it would carry the center past the canvas safety
    /// bound), then rotation about the shape's centroid, then a
    /// variant-specific curvature jiggle. Each amount is capped; see
    /// [`JiggleParams`].
    pub fn jiggle<R: Rng + ?Sized>(&mut self, params: &JiggleParams, rng: &mut R) {
        let params = params.capped();

        if params.position_mm > 0.0 {
            let dx = rng.gen_range(-params.position_mm..=params.position_mm);
            let dy = rng.gen_range(-params.position_mm..=params.position_mm);
            let center = self.center();
            let within_bound = (center.x + dx).abs() <= CANVAS_SAFETY_BOUND_MM
                && (center.y + dy).abs() <= CANVAS_SAFETY_BOUND_MM;
            if within_bound {
                self.translate(dx, dy);
            }
        }

        if params.rotation_deg > 0.0 {
            let angle = rng
                .gen_range(-params.rotation_deg..=params.rotation_deg)
                .to_radians();
            self.rotate(angle, None);
        }

        if params.radius_pct > 0.0 {
            let factor = 1.0 + rng.gen_range(-params.radius_pct..=params.radius_pct) / 100.0;
            match self {
                Shape::Leaf(s) => s.scale_radius(factor),
                Shape::TriArc(s) => s.scale_curvatures(factor),
            }
        }
    }
}
