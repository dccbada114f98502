//! Group transformation state machine.
//!
//! `Move` and `Rotate` are sticky modes: entering the active mode again
//! toggles back to `Idle`, entering the other switches directly, and only
//! one is ever current. Mirror and jiggle are NOT modes; they are one-shot
//! actions that apply immediately and leave whatever mode is active
//! untouched.
//!
//! A transform session exists only between `start` and `end` (or a mode
//! exit) and is discarded entirely afterwards; there is no persisted undo
//! state.

use std::sync::Arc;

use carvekit_core::event_bus::{EditorEvent, EventBus, TransformMode};
use carvekit_core::geometry::{MirrorAxis, Point};
use rand::Rng;
use tracing::{debug, warn};

use crate::shape_store::ShapeStore;
use crate::shapes::JiggleParams;

/// Live transform session between `start` and `end`.
#[derive(Debug, Clone)]
struct TransformSession {
    shape_ids: Vec<u64>,
    rotation_center: Option<Point>,
    /// Previous pointer position; rotation accumulates incremental angles
    /// between consecutive pointer vectors so wraparound never causes a
    /// jump.
    last_point: Point,
}

/// Applies group transforms to the active selection.
#[derive(Debug)]
pub struct TransformManager {
    mode: TransformMode,
    session: Option<TransformSession>,
    events: Arc<EventBus>,
}

impl TransformManager {
    /// Creates a manager in `Idle`, publishing on `events`.
    pub fn new(events: Arc<EventBus>) -> Self {
        Self {
            mode: TransformMode::Idle,
            session: None,
            events,
        }
    }

    /// Current mode.
    pub fn mode(&self) -> TransformMode {
        self.mode
    }

    /// Whether a transform session is in progress.
    pub fn is_transforming(&self) -> bool {
        self.session.is_some()
    }

    /// Enters a mode, with toggle semantics: requesting the mode that is
    /// already active returns to `Idle`; requesting the other transform
    /// mode switches directly. Any live session is discarded.
    pub fn set_mode(&mut self, mode: TransformMode) {
        let next = if self.mode == mode {
            TransformMode::Idle
        } else {
            mode
        };
        self.session = None;
        if next != self.mode {
            self.mode = next;
            debug!(mode = %self.mode, "transform mode changed");
            self.events
                .publish(&EditorEvent::TransformModeChanged { mode: self.mode });
        }
    }

    /// Forces the mode back to `Idle` and discards any session.
    pub fn exit_current_mode(&mut self) {
        self.session = None;
        if self.mode != TransformMode::Idle {
            self.mode = TransformMode::Idle;
            self.events
                .publish(&EditorEvent::TransformModeChanged { mode: self.mode });
        }
    }

    /// Begins a transform session over a snapshot of the selection.
    ///
    /// A no-op while `Idle`. In `Rotate`, a missing `rotation_center` is a
    /// recoverable caller error: it is logged and the session simply never
    /// starts, so subsequent `transform` calls have no effect.
    pub fn start(&mut self, shape_ids: Vec<u64>, anchor: Point, rotation_center: Option<Point>) {
        match self.mode {
            TransformMode::Idle => {}
            TransformMode::Move => {
                self.session = Some(TransformSession {
                    shape_ids,
                    rotation_center: None,
                    last_point: anchor,
                });
            }
            TransformMode::Rotate => {
                if rotation_center.is_none() {
                    warn!("rotate transform started without a rotation center; ignoring");
                    return;
                }
                self.session = Some(TransformSession {
                    shape_ids,
                    rotation_center,
                    last_point: anchor,
                });
            }
        }
    }

    /// Applies one pointer step to the active session.
    ///
    /// In `Move`, translates every active shape by `delta`. In `Rotate`,
    /// rotates them about the session's center by the incremental angle
    /// between the previous and current pointer vectors.
    pub fn transform(&mut self, store: &mut ShapeStore, delta: (f64, f64), current: Point) {
        let Some(session) = self.session.as_mut() else {
            return;
        };
        match self.mode {
            TransformMode::Idle => {}
            TransformMode::Move => {
                for id in &session.shape_ids {
                    if let Some(obj) = store.get_mut(*id) {
                        obj.shape.translate(delta.0, delta.1);
                    }
                }
            }
            TransformMode::Rotate => {
                // Checked in start(); a session in Rotate always has one.
                let Some(center) = session.rotation_center else {
                    return;
                };
                let previous = session.last_point;
                let from = (previous.y - center.y).atan2(previous.x - center.x);
                let to = (current.y - center.y).atan2(current.x - center.x);
                let mut increment = to - from;
                while increment > std::f64::consts::PI {
                    increment -= std::f64::consts::TAU;
                }
                while increment < -std::f64::consts::PI {
                    increment += std::f64::consts::TAU;
                }
                for id in &session.shape_ids {
                    if let Some(obj) = store.get_mut(*id) {
                        obj.shape.rotate(increment, Some(center));
                    }
                }
            }
        }
        session.last_point = current;
    }

    /// Ends the session, clearing the active-shape snapshot. The mode
    /// itself stays as it was until explicitly exited.
    pub fn end(&mut self) {
        self.session = None;
    }

    /// One-shot mirror of the given shapes as a rigid group, about the
    /// mean of their centroids. Leaves the mode untouched.
    pub fn mirror_shapes(&mut self, store: &mut ShapeStore, ids: &[u64], axis: MirrorAxis) {
        let Some(center) = group_center(store, ids) else {
            return;
        };
        for id in ids {
            if let Some(obj) = store.get_mut(*id) {
                obj.shape.mirror(axis, center);
            }
        }
        self.events.publish(&EditorEvent::ShapesModified);
    }

    /// One-shot jiggle of each given shape independently. Leaves the mode
    /// untouched.
    pub fn jiggle_shapes<R: Rng + ?Sized>(
        &mut self,
        store: &mut ShapeStore,
        ids: &[u64],
        params: &JiggleParams,
        rng: &mut R,
    ) {
        let mut touched = false;
        for id in ids {
            if let Some(obj) = store.get_mut(*id) {
                obj.shape.jiggle(params, rng);
                touched = true;
            }
        }
        if touched {
            self.events.publish(&EditorEvent::ShapesModified);
        }
    }
}

fn group_center(store: &ShapeStore, ids: &[u64]) -> Option<Point> {
    let mut sum_x = 0.0;
    let mut sum_y = 0.0;
    let mut count = 0usize;
    for id in ids {
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

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shapes::{Leaf, Shape, TriArc};
    use approx::assert_relative_eq;

    fn setup() -> (ShapeStore, TransformManager) {
        let mut store = ShapeStore::new();
        store.add(Shape::Leaf(Leaf::from_placement(
            Point::new(0.0, 0.0),
            Point::new(10.0, 0.0),
        )));
        store.add(Shape::TriArc(TriArc::new([
            Point::new(20.0, 0.0),
            Point::new(30.0, 0.0),
            Point::new(25.0, 10.0),
        ])));
        let events = Arc::new(EventBus::new());
        (store, TransformManager::new(events))
    }

    #[test]
    fn mode_toggles_and_switches() {
        let (_, mut tm) = setup();
        tm.set_mode(TransformMode::Move);
        assert_eq!(tm.mode(), TransformMode::Move);
        // Entering the active mode exits to Idle.
        tm.set_mode(TransformMode::Move);
        assert_eq!(tm.mode(), TransformMode::Idle);
        // Switching between transform modes needs no intermediate Idle.
        tm.set_mode(TransformMode::Move);
        tm.set_mode(TransformMode::Rotate);
        assert_eq!(tm.mode(), TransformMode::Rotate);
    }

    #[test]
    fn start_is_noop_while_idle() {
        let (_, mut tm) = setup();
        tm.start(vec![0], Point::new(0.0, 0.0), None);
        assert!(!tm.is_transforming());
    }

    #[test]
    fn rotate_without_center_is_recoverable() {
        let (mut store, mut tm) = setup();
        tm.set_mode(TransformMode::Rotate);
        tm.start(vec![0], Point::new(0.0, 0.0), None);
        assert!(!tm.is_transforming());
        // Transform calls are inert.
        let before = store.get(0).unwrap().shape.center();
        tm.transform(&mut store, (5.0, 5.0), Point::new(5.0, 5.0));
        let after = store.get(0).unwrap().shape.center();
        assert_relative_eq!(before.x, after.x);
        assert_relative_eq!(before.y, after.y);
    }

    #[test]
    fn move_session_translates_active_shapes() {
        let (mut store, mut tm) = setup();
        tm.set_mode(TransformMode::Move);
        tm.start(vec![0, 1], Point::new(0.0, 0.0), None);
        tm.transform(&mut store, (3.0, -2.0), Point::new(3.0, -2.0));
        let c = store.get(0).unwrap().shape.center();
        assert_relative_eq!(c.x, 8.0);
        assert_relative_eq!(c.y, -2.0);
    }

    #[test]
    fn rotation_accumulates_incremental_angles() {
        let (mut store, mut tm) = setup();
        let center = Point::new(0.0, 0.0);
        tm.set_mode(TransformMode::Rotate);
        tm.start(vec![0], Point::new(10.0, 0.0), Some(center));
        // Walk the pointer around the center in quarter turns; crossing
        // the angle wrap must not unwind the accumulated rotation.
        tm.transform(&mut store, (0.0, 0.0), Point::new(0.0, 10.0));
        tm.transform(&mut store, (0.0, 0.0), Point::new(-10.0, 0.0));
        tm.transform(&mut store, (0.0, 0.0), Point::new(0.0, -10.0));
        let c = store.get(0).unwrap().shape.center();
        // Shape center (5, 0) rotated 270 degrees about origin is (0, -5).
        assert_relative_eq!(c.x, 0.0, epsilon = 1e-9);
        assert_relative_eq!(c.y, -5.0, epsilon = 1e-9);
    }

    #[test]
    fn end_clears_session_but_keeps_mode() {
        let (_, mut tm) = setup();
        tm.set_mode(TransformMode::Move);
        tm.start(vec![0], Point::new(0.0, 0.0), None);
        assert!(tm.is_transforming());
        tm.end();
        assert!(!tm.is_transforming());
        assert_eq!(tm.mode(), TransformMode::Move);
    }

    #[test]
    fn mirror_is_one_shot_and_mode_neutral() {
        let (mut store, mut tm) = setup();
        tm.set_mode(TransformMode::Move);
        let before = store.get(0).unwrap().shape.center();
        tm.mirror_shapes(&mut store, &[0, 1], MirrorAxis::Vertical);
        tm.mirror_shapes(&mut store, &[0, 1], MirrorAxis::Vertical);
        let after = store.get(0).unwrap().shape.center();
        // Mirroring twice about the same group center restores positions.
        assert_relative_eq!(before.x, after.x, epsilon = 1e-9);
        assert_relative_eq!(before.y, after.y, epsilon = 1e-9);
        assert_eq!(tm.mode(), TransformMode::Move);
    }
}
