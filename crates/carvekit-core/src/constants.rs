//! Editor-wide constants.
//!
//! Handle sizes are given in screen pixels and converted to world
//! millimeters at the call site by dividing by the current zoom scale, so
//! interactive targets keep a constant visual size at any zoom.

/// Hit radius for vertex drag handles, in screen pixels.
pub const VERTEX_HANDLE_RADIUS_PX: f64 = 8.0;

/// Hit radius for arc curvature drag handles, in screen pixels.
pub const ARC_HANDLE_RADIUS_PX: f64 = 8.0;

/// Hit radius for the group rotation handle, in screen pixels.
pub const ROTATION_HANDLE_RADIUS_PX: f64 = 10.0;

/// Distance from the selection centroid to the rotation handle, in screen
/// pixels, measured toward negative y (screen up).
pub const ROTATION_HANDLE_OFFSET_PX: f64 = 36.0;

/// Pointer travel below this many screen pixels is a click, not a drag.
pub const DRAG_THRESHOLD_PX: f64 = 3.0;

/// Default leaf radius as a fraction of the distance between its foci.
pub const LEAF_RADIUS_FACTOR: f64 = 0.65;

/// Default bulge assigned to every edge of a newly placed tri-arc.
pub const TRI_ARC_DEFAULT_BULGE: f64 = -0.25;

/// Concave limit of the tri-arc bulge range. The range is open at this end;
/// edits clamp to just inside it.
pub const TRI_ARC_BULGE_MIN: f64 = -0.99;

/// Shallow limit of the tri-arc bulge range (inclusive). A bulge may never
/// reach zero or go convex.
pub const TRI_ARC_BULGE_MAX: f64 = -0.01;

/// Per-axis half-range cap for jiggle translation, in millimeters.
pub const JIGGLE_MAX_POSITION_MM: f64 = 50.0;

/// Cap for jiggle rotation, in degrees.
pub const JIGGLE_MAX_ROTATION_DEG: f64 = 180.0;

/// Cap for jiggle curvature/radius variation, in percent.
pub const JIGGLE_MAX_RADIUS_PCT: f64 = 90.0;

/// Jiggle never translates a shape center past this distance from the
/// origin on either axis. A safety bound, not a canvas limit.
pub const CANVAS_SAFETY_BOUND_MM: f64 = 1000.0;
