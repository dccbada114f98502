//! # CarveKit Core
//!
//! Foundation crate for the CarveKit carving-design editor. Contains the
//! pieces every other crate builds on:
//!
//! - **Geometry**: pure functions for chord/offset arc parametrization and
//!   point classification (hit-testing primitives). No state.
//! - **Errors**: typed error taxonomy for geometry construction and design
//!   file loading.
//! - **Event bus**: the synchronous notification channel the editor core
//!   publishes on (`SelectionChanged`, `TransformModeChanged`,
//!   `ShapesModified`). Hosts subscribe; the core never does.
//! - **Constants**: screen-pixel handle sizes and editing clamps shared by
//!   the shape model and the interaction layer.

pub mod constants;
pub mod error;
pub mod event_bus;
pub mod geometry;

pub use error::{DesignFileError, GeometryError};
pub use event_bus::{EditorEvent, EventBus, EventCategory, EventFilter, SubscriptionId, TransformMode};
pub use geometry::{MirrorAxis, Point};
