//! Editor composition root.
//!
//! Owns the shape store, selection manager, and transform manager, and
//! speaks the pointer protocol (see the `interaction` submodule). Hosts
//! construct one [`Editor`], feed it world-space pointer events plus the
//! current zoom scale, and subscribe to its event bus.

mod interaction;

pub use interaction::PressTarget;

use std::sync::Arc;

use carvekit_core::error::DesignFileError;
use carvekit_core::event_bus::{EditorEvent, EventBus, TransformMode};
use carvekit_core::geometry::{MirrorAxis, Point};
use rand::Rng;

use crate::selection_manager::SelectionManager;
use crate::serialization::DesignDocument;
use crate::shape_store::ShapeStore;
use crate::shapes::{JiggleParams, Leaf, Shape, TriArc};
use crate::transform_manager::TransformManager;

/// The carving design editor core.
pub struct Editor {
    pub store: ShapeStore,
    pub selection: SelectionManager,
    pub transform: TransformManager,
    gesture: interaction::GestureState,
    events: Arc<EventBus>,
}

impl Editor {
    /// Creates an editor with its own event bus.
    pub fn new() -> Self {
        Self::with_events(Arc::new(EventBus::new()))
    }

    /// Creates an editor publishing on a shared event bus.
    pub fn with_events(events: Arc<EventBus>) -> Self {
        Self {
            store: ShapeStore::new(),
            selection: SelectionManager::new(Arc::clone(&events)),
            transform: TransformManager::new(Arc::clone(&events)),
            gesture: interaction::GestureState::default(),
            events,
        }
    }

    /// The event bus this editor publishes on.
    pub fn events(&self) -> &Arc<EventBus> {
        &self.events
    }

    /// Places a leaf between two points using the default radius rule.
    pub fn add_leaf(&mut self, p1: Point, p2: Point) -> u64 {
        self.add_shape(Shape::Leaf(Leaf::from_placement(p1, p2)))
    }

    /// Places a tri-arc over three corner points with default bulges.
    pub fn add_tri_arc(&mut self, v1: Point, v2: Point, v3: Point) -> u64 {
        self.add_shape(Shape::TriArc(TriArc::new([v1, v2, v3])))
    }

    /// Adds an arbitrary shape on top of the draw order.
    pub fn add_shape(&mut self, shape: Shape) -> u64 {
        let id = self.store.add(shape);
        self.events.publish(&EditorEvent::ShapesModified);
        id
    }

    /// Removes every selected shape. Returns how many were removed.
    pub fn remove_selected(&mut self) -> usize {
        let ids: Vec<u64> = self.selection.ids().collect();
        let mut removed = 0;
        for id in &ids {
            if self.store.remove(*id).is_some() {
                removed += 1;
            }
        }
        if removed > 0 {
            self.selection.retain_existing(&mut self.store);
            self.events.publish(&EditorEvent::ShapesModified);
        }
        removed
    }

    /// Number of shapes on the canvas.
    pub fn shape_count(&self) -> usize {
        self.store.len()
    }

    /// Enters or toggles a transform mode (see
    /// [`TransformManager::set_mode`]).
    pub fn set_mode(&mut self, mode: TransformMode) {
        self.transform.set_mode(mode);
    }

    /// Current transform mode.
    pub fn mode(&self) -> TransformMode {
        self.transform.mode()
    }

    /// One-shot mirror of the selection as a rigid group.
    pub fn mirror_selected(&mut self, axis: MirrorAxis) {
        let ids: Vec<u64> = self.selection.ids().collect();
        self.transform.mirror_shapes(&mut self.store, &ids, axis);
    }

    /// One-shot jiggle of each selected shape.
    pub fn jiggle_selected<R: Rng + ?Sized>(&mut self, params: &JiggleParams, rng: &mut R) {
        let ids: Vec<u64> = self.selection.ids().collect();
        self.transform
            .jiggle_shapes(&mut self.store, &ids, params, rng);
    }

    /// Snapshots the canvas into a versioned design document.
    pub fn to_document(&self, name: impl Into<String>) -> DesignDocument {
        DesignDocument::from_shapes(
            name,
            self.store.iter().map(|obj| obj.shape.clone()).collect(),
        )
    }

    /// Replaces the canvas content with a document's shapes, clearing the
    /// selection. A document that fails validation is rejected whole; the
    /// canvas is left untouched.
    pub fn load_document(&mut self, document: &DesignDocument) -> Result<(), DesignFileError> {
        document.validate()?;
        let shapes = document
            .shapes
            .iter()
            .map(|data| data.to_shape())
            .collect::<Result<Vec<Shape>, _>>()?;
        self.store.set_shapes(shapes);
        self.selection.clear(&mut self.store);
        self.events.publish(&EditorEvent::ShapesModified);
        Ok(())
    }
}

impl Default for Editor {
    fn default() -> Self {
        Self::new()
    }
}
