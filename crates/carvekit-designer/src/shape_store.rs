//! Insertion-ordered shape storage.
//!
//! Draw order is the storage order: index 0 renders first (bottom), the
//! last entry renders last and wins body hit-tests. Collaborators that
//! need to react to content changes (autosave, spatial caches) register
//! explicit post-mutation hooks; the store calls them after every add,
//! remove, and wholesale replace.

use crate::shapes::{HitRegion, Shape, ShapeType};

/// A shape on the canvas with its presentation state.
#[derive(Debug, Clone)]
pub struct DrawingShape {
    pub id: u64,
    pub shape: Shape,
    /// Mirror of the selection manager's membership, for rendering only.
    /// The authoritative set lives in the selection manager.
    pub selected: bool,
    /// Transient hover/drag highlight. Never persisted.
    pub active_hit: Option<HitRegion>,
}

impl DrawingShape {
    /// Creates a new drawing shape.
    pub fn new(id: u64, shape: Shape) -> Self {
        Self {
            id,
            shape,
            selected: false,
            active_hit: None,
        }
    }

    /// Display name for property panels and logs.
    pub fn name(&self) -> &'static str {
        match self.shape.shape_type() {
            ShapeType::Leaf => "Leaf",
            ShapeType::TriArc => "TriArc",
        }
    }
}

/// Content change notice passed to post-mutation hooks.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreChange {
    /// A shape was added with this id.
    Added(u64),
    /// The shape with this id was removed.
    Removed(u64),
    /// The whole content was replaced (document load or clear).
    Replaced,
}

/// Type alias for post-mutation hook functions.
type MutationHook = Box<dyn Fn(StoreChange) + Send + Sync>;

/// Z-ordered shape collection with id generation and mutation hooks.
#[derive(Default)]
pub struct ShapeStore {
    shapes: Vec<DrawingShape>,
    next_id: u64,
    hooks: Vec<MutationHook>,
}

impl ShapeStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Generates a new unique id.
    pub fn generate_id(&mut self) -> u64 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    /// Returns the number of shapes in the store.
    pub fn len(&self) -> usize {
        self.shapes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.shapes.is_empty()
    }

    /// Gets a shape by id.
    pub fn get(&self, id: u64) -> Option<&DrawingShape> {
        self.shapes.iter().find(|s| s.id == id)
    }

    /// Gets a mutable shape by id.
    pub fn get_mut(&mut self, id: u64) -> Option<&mut DrawingShape> {
        self.shapes.iter_mut().find(|s| s.id == id)
    }

    /// Iterates shapes in draw order (bottom to top).
    pub fn iter(&self) -> impl DoubleEndedIterator<Item = &DrawingShape> {
        self.shapes.iter()
    }

    /// Iterates shapes mutably in draw order.
    pub fn iter_mut(&mut self) -> impl DoubleEndedIterator<Item = &mut DrawingShape> {
        self.shapes.iter_mut()
    }

    /// Adds a shape on top of the draw order and returns its id.
    pub fn add(&mut self, shape: Shape) -> u64 {
        let id = self.generate_id();
        self.shapes.push(DrawingShape::new(id, shape));
        self.run_hooks(StoreChange::Added(id));
        id
    }

    /// Removes a shape by id, returning it if present.
    pub fn remove(&mut self, id: u64) -> Option<DrawingShape> {
        let index = self.shapes.iter().position(|s| s.id == id)?;
        let removed = self.shapes.remove(index);
        self.run_hooks(StoreChange::Removed(id));
        Some(removed)
    }

    /// Replaces the entire content, reassigning fresh ids in the given
    /// draw order. Used by document loads.
    pub fn set_shapes(&mut self, shapes: Vec<Shape>) {
        self.shapes = shapes
            .into_iter()
            .map(|shape| {
                let id = self.next_id;
                self.next_id += 1;
                DrawingShape::new(id, shape)
            })
            .collect();
        self.run_hooks(StoreChange::Replaced);
    }

    /// Removes everything.
    pub fn clear(&mut self) {
        self.shapes.clear();
        self.run_hooks(StoreChange::Replaced);
    }

    /// Registers a post-mutation hook.
    pub fn on_mutation<F>(&mut self, hook: F)
    where
        F: Fn(StoreChange) + Send + Sync + 'static,
    {
        self.hooks.push(Box::new(hook));
    }

    fn run_hooks(&self, change: StoreChange) {
        for hook in &self.hooks {
            hook(change);
        }
    }

    /// Clears the hover/drag highlight on every shape.
    pub fn clear_active_hits(&mut self) {
        for s in &mut self.shapes {
            s.active_hit = None;
        }
    }
}

impl std::fmt::Debug for ShapeStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ShapeStore")
            .field("shapes", &self.shapes)
            .field("next_id", &self.next_id)
            .field("hooks", &self.hooks.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shapes::Leaf;
    use carvekit_core::geometry::Point;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    fn leaf() -> Shape {
        Shape::Leaf(Leaf::from_placement(Point::new(0.0, 0.0), Point::new(10.0, 0.0)))
    }

    #[test]
    fn add_assigns_increasing_ids_on_top() {
        let mut store = ShapeStore::new();
        let a = store.add(leaf());
        let b = store.add(leaf());
        assert!(b > a);
        let order: Vec<u64> = store.iter().map(|s| s.id).collect();
        assert_eq!(order, vec![a, b]);
    }

    #[test]
    fn hooks_fire_after_each_mutation() {
        let mut store = ShapeStore::new();
        let count = Arc::new(AtomicUsize::new(0));
        {
            let count = Arc::clone(&count);
            store.on_mutation(move |_| {
                count.fetch_add(1, Ordering::SeqCst);
            });
        }
        let id = store.add(leaf());
        store.remove(id);
        store.set_shapes(vec![leaf(), leaf()]);
        assert_eq!(count.load(Ordering::SeqCst), 3);
        assert_eq!(store.len(), 2);
    }

    #[test]
    fn remove_missing_id_is_silent() {
        let mut store = ShapeStore::new();
        assert!(store.remove(42).is_none());
    }

    #[test]
    fn set_shapes_reassigns_fresh_ids() {
        let mut store = ShapeStore::new();
        let old = store.add(leaf());
        store.set_shapes(vec![leaf()]);
        assert_eq!(store.len(), 1);
        assert!(store.iter().all(|s| s.id != old));
    }
}
