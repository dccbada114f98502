//! Shape selection state and the geometry derived from it.
//!
//! The selection is an ordered, duplicate-free set of shape ids. Every
//! mutating operation is idempotent and notifies observers exactly once,
//! even when nothing actually changed (a `clear()` of an empty selection
//! still publishes); observers must tolerate no-op notifications.
//!
//! The manager also derives the group centroid and the rotation handle:
//! a point a fixed screen distance above the centroid that group rotation
//! is dragged from.

use std::sync::Arc;

use carvekit_core::constants::{ROTATION_HANDLE_OFFSET_PX, ROTATION_HANDLE_RADIUS_PX};
use carvekit_core::event_bus::{EditorEvent, EventBus};
use carvekit_core::geometry::hit::point_in_circle;
use carvekit_core::geometry::Point;
use indexmap::IndexSet;

use crate::shape_store::ShapeStore;

/// Manages which shapes are selected.
///
/// Shapes are referenced by id; the selection owns nothing. The
/// `selected` flag on [`crate::shape_store::DrawingShape`] is kept in sync
/// as a rendering convenience, but membership here is authoritative.
///
/// # Examples
///
/// ```
/// use std::sync::Arc;
/// use carvekit_core::event_bus::EventBus;
/// use carvekit_designer::selection_manager::SelectionManager;
///
/// let manager = SelectionManager::new(Arc::new(EventBus::new()));
/// assert!(manager.is_empty());
/// ```
#[derive(Debug)]
pub struct SelectionManager {
    selected: IndexSet<u64>,
    events: Arc<EventBus>,
}

impl SelectionManager {
    /// Creates a manager with no selection, publishing on `events`.
    pub fn new(events: Arc<EventBus>) -> Self {
        Self {
            selected: IndexSet::new(),
            events,
        }
    }

    /// Ids of the selected shapes, in selection order.
    pub fn ids(&self) -> impl Iterator<Item = u64> + '_ {
        self.selected.iter().copied()
    }

    /// Number of selected shapes.
    pub fn len(&self) -> usize {
        self.selected.len()
    }

    pub fn is_empty(&self) -> bool {
        self.selected.is_empty()
    }

    /// Whether the shape with this id is selected.
    pub fn contains(&self, id: u64) -> bool {
        self.selected.contains(&id)
    }

    /// Adds a shape to the selection. Ids not present in the store are
    /// ignored, but observers are notified either way.
    pub fn add(&mut self, store: &mut ShapeStore, id: u64) {
        if store.get(id).is_some() {
            self.selected.insert(id);
        }
        self.sync_flags(store);
        self.notify();
    }

    /// Removes a shape from the selection.
    pub fn remove(&mut self, store: &mut ShapeStore, id: u64) {
        self.selected.shift_remove(&id);
        self.sync_flags(store);
        self.notify();
    }

    /// Toggles a shape's membership without touching the rest of the
    /// selection (modifier-click behavior).
    pub fn toggle(&mut self, store: &mut ShapeStore, id: u64) {
        if self.selected.contains(&id) {
            self.selected.shift_remove(&id);
        } else if store.get(id).is_some() {
            self.selected.insert(id);
        }
        self.sync_flags(store);
        self.notify();
    }

    /// Replaces the selection with just this shape (plain-click behavior).
    pub fn set_only(&mut self, store: &mut ShapeStore, id: u64) {
        self.selected.clear();
        if store.get(id).is_some() {
            self.selected.insert(id);
        }
        self.sync_flags(store);
        self.notify();
    }

    /// Clears the selection. Clearing an already empty selection still
    /// notifies.
    pub fn clear(&mut self, store: &mut ShapeStore) {
        self.selected.clear();
        self.sync_flags(store);
        self.notify();
    }

    /// Drops ids that no longer exist in the store (after removals).
    pub fn retain_existing(&mut self, store: &mut ShapeStore) {
        self.selected.retain(|id| store.get(*id).is_some());
        self.sync_flags(store);
        self.notify();
    }

    /// Arithmetic mean of the selected shapes' centroids, or `None` when
    /// the selection is empty.
    pub fn center(&self, store: &ShapeStore) -> Option<Point> {
        if self.selected.is_empty() {
            return None;
        }
        let mut sum_x = 0.0;
        let mut sum_y = 0.0;
        let mut count = 0usize;
        for id in &self.selected {
            if let Some(obj) = store.get(*id) {
                let c = obj.shape.center();
                sum_x += c.x;
                sum_y += c.y;
                count += 1;
            }
        }
        if count == 0 {
            return None;
        }
        Some(Point::new(sum_x / count as f64, sum_y / count as f64))
    }

    /// World position of the rotation handle: a fixed screen distance
    /// above the group centroid, converted to world units by the zoom
    /// scale. `None` when the selection is empty.
    pub fn rotation_handle_position(&self, store: &ShapeStore, scale: f64) -> Option<Point> {
        let center = self.center(store)?;
        Some(Point::new(
            center.x,
            center.y - ROTATION_HANDLE_OFFSET_PX / scale,
        ))
    }

    /// Distance-based hit test against the rotation handle.
    pub fn hit_test_rotation_handle(&self, store: &ShapeStore, point: Point, scale: f64) -> bool {
        match self.rotation_handle_position(store, scale) {
            Some(handle) => point_in_circle(point, handle, ROTATION_HANDLE_RADIUS_PX / scale),
            None => false,
        }
    }

    fn sync_flags(&self, store: &mut ShapeStore) {
        for obj in store.iter_mut() {
            obj.selected = self.selected.contains(&obj.id);
        }
    }

    fn notify(&self) {
        self.events.publish(&EditorEvent::SelectionChanged {
            selected: self.selected.iter().copied().collect(),
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shapes::{Leaf, Shape};
    use std::sync::atomic::{AtomicUsize, Ordering};

    fn setup() -> (ShapeStore, SelectionManager, Arc<AtomicUsize>) {
        let events = Arc::new(EventBus::new());
        let count = Arc::new(AtomicUsize::new(0));
        {
            let count = Arc::clone(&count);
            events.subscribe(move |_| {
                count.fetch_add(1, Ordering::SeqCst);
            });
        }
        let mut store = ShapeStore::new();
        store.add(Shape::Leaf(Leaf::from_placement(
            Point::new(0.0, 0.0),
            Point::new(10.0, 0.0),
        )));
        store.add(Shape::Leaf(Leaf::from_placement(
            Point::new(20.0, 0.0),
            Point::new(30.0, 0.0),
        )));
        (store, SelectionManager::new(events), count)
    }

    #[test]
    fn add_is_idempotent_but_always_notifies() {
        let (mut store, mut sel, notifications) = setup();
        sel.add(&mut store, 0);
        sel.add(&mut store, 0);
        assert_eq!(sel.len(), 1);
        assert_eq!(notifications.load(Ordering::SeqCst), 2);
        assert!(store.get(0).unwrap().selected);
    }

    #[test]
    fn clear_of_empty_selection_notifies() {
        let (mut store, mut sel, notifications) = setup();
        sel.clear(&mut store);
        assert_eq!(notifications.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn unknown_ids_are_not_selected() {
        let (mut store, mut sel, _) = setup();
        sel.add(&mut store, 999);
        assert!(sel.is_empty());
    }

    #[test]
    fn center_is_mean_of_member_centroids() {
        let (mut store, mut sel, _) = setup();
        sel.add(&mut store, 0);
        sel.add(&mut store, 1);
        let c = sel.center(&store).unwrap();
        // Shape centers are (5, 0) and (25, 0).
        assert!((c.x - 15.0).abs() < 1e-12);
        assert!((c.y - 0.0).abs() < 1e-12);
    }

    #[test]
    fn rotation_handle_sits_above_centroid_in_screen_units() {
        let (mut store, mut sel, _) = setup();
        assert!(sel.rotation_handle_position(&store, 1.0).is_none());
        sel.add(&mut store, 0);
        let handle = sel.rotation_handle_position(&store, 2.0).unwrap();
        assert!((handle.x - 5.0).abs() < 1e-12);
        assert!((handle.y - (0.0 - ROTATION_HANDLE_OFFSET_PX / 2.0)).abs() < 1e-12);
        assert!(sel.hit_test_rotation_handle(&store, handle, 2.0));
    }

    #[test]
    fn toggle_flips_membership() {
        let (mut store, mut sel, _) = setup();
        sel.toggle(&mut store, 1);
        assert!(sel.contains(1));
        sel.toggle(&mut store, 1);
        assert!(!sel.contains(1));
        assert!(!store.get(1).unwrap().selected);
    }
}
