//! Pointer protocol for edit mode.
//!
//! State lives only for the duration of one press-drag-release gesture.
//! A press classifies what was hit but mutates nothing; the first
//! movement past the drag threshold decides the operation exactly once;
//! subsequent movements feed it; release commits. Classification always
//! completes on a consistent snapshot of shape positions before any
//! mutation of the same gesture begins.
//!
//! Press priority: the rotation handle (when armed), then vertex/arc
//! handles on any currently selected shape, then a body hit on the
//! top-most shape under the pointer (draw order, last wins), else empty
//! space.

use carvekit_core::constants::DRAG_THRESHOLD_PX;
use carvekit_core::event_bus::{EditorEvent, TransformMode};
use carvekit_core::geometry::Point;

use super::Editor;
use crate::shapes::{HitRegion, HitResult};

/// What a press landed on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PressTarget {
    /// The selection's rotation handle, only recognized in rotate mode.
    RotationHandle,
    /// A vertex or arc handle on a selected shape.
    ShapeHandle { id: u64, hit: HitResult },
    /// The body of a shape (selected or not).
    Body { id: u64 },
    /// Empty canvas.
    Empty,
}

/// The operation a drag settled into, decided once at drag-start.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum DragOperation {
    /// Forwarded to the transform manager's session.
    GroupTransform,
    /// Direct manipulation of one vertex.
    DragVertex { id: u64, index: usize },
    /// Direct manipulation of one arc's curvature.
    DragArc { id: u64, index: usize },
}

#[derive(Debug, Clone, Copy)]
struct Gesture {
    press_point: Point,
    last_point: Point,
    target: PressTarget,
    toggle_modifier: bool,
    dragging: bool,
    operation: Option<DragOperation>,
}

/// Per-gesture state held by the editor.
#[derive(Debug, Default)]
pub(super) struct GestureState {
    active: Option<Gesture>,
}

impl Editor {
    /// Pointer press. Records the hit classification; nothing mutates
    /// until the pointer actually moves or releases.
    pub fn pointer_down(&mut self, point: Point, scale: f64, toggle_modifier: bool) {
        let target = self.classify(point, scale);
        self.apply_highlight(target);
        self.gesture.active = Some(Gesture {
            press_point: point,
            last_point: point,
            target,
            toggle_modifier,
            dragging: false,
            operation: None,
        });
    }

    /// Pointer movement with the button held.
    pub fn pointer_move(&mut self, point: Point, scale: f64) {
        let Some(mut gesture) = self.gesture.active else {
            return;
        };

        if !gesture.dragging {
            if point.distance_to(&gesture.press_point) < DRAG_THRESHOLD_PX / scale {
                return;
            }
            gesture.dragging = true;
            gesture.operation = self.decide_operation(gesture.target);
        }

        match gesture.operation {
            Some(DragOperation::GroupTransform) => {
                let delta = (point.x - gesture.last_point.x, point.y - gesture.last_point.y);
                self.transform.transform(&mut self.store, delta, point);
            }
            Some(DragOperation::DragVertex { id, index }) => {
                if let Some(obj) = self.store.get_mut(id) {
                    obj.shape.move_vertex(index, point);
                }
            }
            Some(DragOperation::DragArc { id, index }) => {
                if let Some(obj) = self.store.get_mut(id) {
                    let offset = obj.shape.arc_drag_offset(index, point);
                    obj.shape.move_arc(index, offset);
                }
            }
            None => {}
        }

        gesture.last_point = point;
        self.gesture.active = Some(gesture);
    }

    /// Pointer release. A release without a drag is a click and toggles
    /// selection; a release after a drag commits the operation.
    pub fn pointer_up(&mut self, _point: Point, _scale: f64) {
        let Some(gesture) = self.gesture.active.take() else {
            return;
        };
        self.store.clear_active_hits();

        if !gesture.dragging {
            self.handle_click(gesture.target, gesture.toggle_modifier);
            return;
        }

        match gesture.operation {
            // The transform manager's own end() is the authority for
            // group transforms; no extra modification signal here.
            Some(DragOperation::GroupTransform) => self.transform.end(),
            Some(DragOperation::DragVertex { .. }) | Some(DragOperation::DragArc { .. }) => {
                self.events.publish(&EditorEvent::ShapesModified);
            }
            None => {}
        }
    }

    /// Hover movement with no button held: re-runs the press
    /// classification purely to refresh highlights. No mutation.
    pub fn pointer_hover(&mut self, point: Point, scale: f64) {
        let target = self.classify(point, scale);
        self.apply_highlight(target);
    }

    /// Escape: abandon the gesture and exit any transform mode.
    pub fn cancel(&mut self) {
        self.gesture.active = None;
        self.store.clear_active_hits();
        self.transform.exit_current_mode();
    }

    /// Press classification over a consistent snapshot.
    fn classify(&self, point: Point, scale: f64) -> PressTarget {
        if self.transform.mode() == TransformMode::Rotate
            && self
                .selection
                .hit_test_rotation_handle(&self.store, point, scale)
        {
            return PressTarget::RotationHandle;
        }

        // Handle hits on selected shapes, top-most first. Body hits are
        // deferred: a deeper selected shape's handle still outranks them.
        for obj in self.store.iter().rev() {
            if !self.selection.contains(obj.id) {
                continue;
            }
            if let Some(hit) = obj.shape.hit_test(point, scale) {
                match hit.region {
                    HitRegion::Vertex | HitRegion::Arc => {
                        return PressTarget::ShapeHandle { id: obj.id, hit };
                    }
                    _ => {}
                }
            }
        }

        // Body hit on the top-most shape at the point.
        for obj in self.store.iter().rev() {
            if obj.shape.contains(point) {
                return PressTarget::Body { id: obj.id };
            }
        }

        PressTarget::Empty
    }

    /// Decides the drag operation exactly once, from the recorded press
    /// target and the current transform mode.
    fn decide_operation(&mut self, target: PressTarget) -> Option<DragOperation> {
        match target {
            PressTarget::RotationHandle => {
                // The session rotates about the group centroid; the press
                // point seeds the incremental-angle accumulation.
                let center = self.selection.center(&self.store)?;
                let anchor = self.gesture.active.map(|g| g.press_point)?;
                let ids: Vec<u64> = self.selection.ids().collect();
                self.transform.start(ids, anchor, Some(center));
                self.transform
                    .is_transforming()
                    .then_some(DragOperation::GroupTransform)
            }
            PressTarget::Body { id }
                if self.transform.mode() == TransformMode::Move
                    && self.selection.contains(id) =>
            {
                let ids: Vec<u64> = self.selection.ids().collect();
                let anchor = self.gesture.active.map(|g| g.press_point)?;
                self.transform.start(ids, anchor, None);
                self.transform
                    .is_transforming()
                    .then_some(DragOperation::GroupTransform)
            }
            PressTarget::ShapeHandle { id, hit } => match hit.region {
                HitRegion::Vertex => Some(DragOperation::DragVertex {
                    id,
                    index: hit.vertex_index?,
                }),
                HitRegion::Arc => Some(DragOperation::DragArc {
                    id,
                    index: hit.arc_index?,
                }),
                _ => None,
            },
            _ => None,
        }
    }

    /// Click (release without drag): selection toggling.
    fn handle_click(&mut self, target: PressTarget, toggle_modifier: bool) {
        match target {
            PressTarget::Body { id } | PressTarget::ShapeHandle { id, .. } => {
                if toggle_modifier {
                    self.selection.toggle(&mut self.store, id);
                } else {
                    self.selection.set_only(&mut self.store, id);
                }
            }
            PressTarget::Empty => self.selection.clear(&mut self.store),
            PressTarget::RotationHandle => {}
        }
    }

    /// Sets the hover/drag highlight matching a classification.
    fn apply_highlight(&mut self, target: PressTarget) {
        self.store.clear_active_hits();
        match target {
            PressTarget::ShapeHandle { id, hit } => {
                if let Some(obj) = self.store.get_mut(id) {
                    obj.active_hit = Some(hit.region);
                }
            }
            PressTarget::Body { id } => {
                if let Some(obj) = self.store.get_mut(id) {
                    obj.active_hit = Some(HitRegion::Body);
                }
            }
            PressTarget::RotationHandle | PressTarget::Empty => {}
        }
    }
}
