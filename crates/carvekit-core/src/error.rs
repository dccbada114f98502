//! Error handling for CarveKit.
//!
//! Two failure families exist in the editor core:
//! - Construction-time geometry errors, which indicate a caller bug and
//!   fail loudly.
//! - Design file errors, which reject a whole load rather than salvaging a
//!   partial document.
//!
//! Interactive-edit degeneracies (a chord collapsing mid-drag, a bulge
//! driven to its limit) are deliberately NOT errors; the shape model clamps
//! them so a live gesture never aborts.
//!
//! All error types use `thiserror` for ergonomic error handling.

use thiserror::Error;

/// Geometry construction error type.
///
/// Raised when a shape or arc is built from parameters that cannot produce
/// valid geometry.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum GeometryError {
    /// Radius is too small for the arc to span its chord.
    #[error("radius {radius} cannot span a chord of length {chord} (minimum {min_radius})")]
    RadiusBelowChord {
        /// The requested arc radius.
        radius: f64,
        /// The chord length the arc must span.
        chord: f64,
        /// Half the chord length, the smallest workable radius.
        min_radius: f64,
    },

    /// Chord endpoints coincide, so the arc has no direction.
    #[error("degenerate chord: both endpoints at ({x}, {y})")]
    DegenerateChord {
        /// Shared x coordinate of the coincident endpoints.
        x: f64,
        /// Shared y coordinate of the coincident endpoints.
        y: f64,
    },

    /// No circle passes through three collinear points.
    #[error("points are collinear, no circle passes through them")]
    CollinearPoints,
}

/// Design file error type.
///
/// Any of these rejects the entire load; there is no best-effort recovery
/// of a partially valid document.
#[derive(Error, Debug)]
pub enum DesignFileError {
    /// The document declares a schema version this build does not read.
    #[error("unsupported design file version {found:?}, expected {expected:?}")]
    UnsupportedVersion {
        /// Version string found in the document.
        found: String,
        /// The only version this build accepts.
        expected: String,
    },

    /// A shape record failed validation.
    #[error("invalid shape data: {reason}")]
    InvalidShape {
        /// What was wrong with the record.
        reason: String,
    },

    /// The document is not structurally valid JSON for the schema.
    #[error("malformed design document: {0}")]
    Malformed(#[from] serde_json::Error),
}
