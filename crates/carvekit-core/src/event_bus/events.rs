//! Event type definitions for the editor event bus.
//!
//! Events are cloneable and serializable for logging/replay.

use serde::{Deserialize, Serialize};

/// Group transformation mode of the editor.
///
/// `Move` and `Rotate` are sticky, mutually exclusive modes; mirror and
/// jiggle are one-shot actions and never appear here.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum TransformMode {
    /// No group transform is armed; drags manipulate vertices and arcs.
    #[default]
    Idle,
    /// Dragging a selected shape body moves the whole selection.
    Move,
    /// Dragging the rotation handle rotates the selection as a group.
    Rotate,
}

impl std::fmt::Display for TransformMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TransformMode::Idle => write!(f, "Idle"),
            TransformMode::Move => write!(f, "Move"),
            TransformMode::Rotate => write!(f, "Rotate"),
        }
    }
}

/// Root event enum for everything the editor core publishes.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum EditorEvent {
    /// The selection set changed (possibly to the same value).
    SelectionChanged {
        /// Ids of the selected shapes, in selection order.
        selected: Vec<u64>,
    },
    /// The transformation mode changed.
    TransformModeChanged {
        /// The mode now in effect.
        mode: TransformMode,
    },
    /// Shape geometry was modified by a committed edit. The autosave
    /// collaborator keys off this.
    ShapesModified,
}

impl EditorEvent {
    /// Get the category of this event.
    pub fn category(&self) -> EventCategory {
        match self {
            EditorEvent::SelectionChanged { .. } => EventCategory::Selection,
            EditorEvent::TransformModeChanged { .. } => EventCategory::Transform,
            EditorEvent::ShapesModified => EventCategory::Document,
        }
    }

    /// Short description for logging.
    pub fn description(&self) -> String {
        match self {
            EditorEvent::SelectionChanged { selected } => {
                format!("selection changed ({} shapes)", selected.len())
            }
            EditorEvent::TransformModeChanged { mode } => {
                format!("transform mode changed to {mode}")
            }
            EditorEvent::ShapesModified => "shapes modified".to_string(),
        }
    }
}

/// Event category for filtering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EventCategory {
    /// Selection membership events.
    Selection,
    /// Transformation mode events.
    Transform,
    /// Document content events.
    Document,
}

impl std::fmt::Display for EventCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            EventCategory::Selection => write!(f, "Selection"),
            EventCategory::Transform => write!(f, "Transform"),
            EventCategory::Document => write!(f, "Document"),
        }
    }
}
