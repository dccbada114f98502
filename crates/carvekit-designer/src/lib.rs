//! # CarveKit Designer
//!
//! The editing core of the CarveKit carving-design tool: parametric shapes
//! on an infinite canvas, mouse-driven selection and reshaping, and a
//! strict JSON document format for saved designs.
//!
//! ## Architecture
//!
//! ```text
//! Editor (composition root, pointer protocol)
//!   ├── ShapeStore (z-ordered shapes, mutation hooks)
//!   ├── SelectionManager (ordered id set, group centroid, rotation handle)
//!   └── TransformManager (MOVE/ROTATE state machine, one-shot mirror/jiggle)
//!
//! Shapes (Leaf, TriArc)
//!   └── chord/offset arc parametrization (carvekit-core geometry)
//!
//! Serialization (versioned design documents)
//! ```
//!
//! Hosts feed the [`Editor`] world-space pointer coordinates plus the
//! current zoom scale, and subscribe to its event bus for selection,
//! mode, and modification notifications. Rendering, pan/zoom gesture
//! handling, and storage live outside this crate.

pub mod editor;
pub mod selection_manager;
pub mod serialization;
pub mod shape_store;
pub mod shapes;
pub mod transform_manager;

pub use editor::Editor;
pub use selection_manager::SelectionManager;
pub use serialization::{DesignDocument, DesignMetadata, ShapeData, DESIGN_SCHEMA_VERSION};
pub use shape_store::{DrawingShape, ShapeStore, StoreChange};
pub use shapes::{HitRegion, HitResult, JiggleParams, Leaf, Shape, ShapeType, TriArc};
pub use transform_manager::TransformManager;

// Re-export the core types that appear throughout the public API.
pub use carvekit_core::event_bus::{EditorEvent, EventBus, TransformMode};
pub use carvekit_core::geometry::{MirrorAxis, Point};
