//! Notification channel between the editor core and its host.
//!
//! The core publishes events; the host (renderer, autosave, toolbar state)
//! subscribes. The bus is an explicit object shared at construction time,
//! so the core carries no dependency on any global dispatch mechanism.
//!
//! Delivery is synchronous: handlers run to completion inside the
//! publishing call, matching the single-threaded callback model of the
//! editor. Handlers must tolerate no-op notifications (an event reporting
//! a state that did not actually change).

mod bus;
mod events;

pub use bus::{EventBus, EventFilter, SubscriptionId};
pub use events::{EditorEvent, EventCategory, TransformMode};
