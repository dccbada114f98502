//! Event bus implementation.

use parking_lot::RwLock;
use std::collections::HashMap;
use uuid::Uuid;

use super::events::{EditorEvent, EventCategory};

/// Subscription handle for unsubscribing from events.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(Uuid);

impl SubscriptionId {
    fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl std::fmt::Display for SubscriptionId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Sub({})", &self.0.to_string()[..8])
    }
}

/// Filter to receive only specific event types.
#[derive(Debug, Clone, Default)]
pub enum EventFilter {
    /// Receive all events.
    #[default]
    All,
    /// Receive events matching any of these categories.
    Categories(Vec<EventCategory>),
}

impl EventFilter {
    /// Check if an event matches this filter.
    pub fn matches(&self, event: &EditorEvent) -> bool {
        match self {
            EventFilter::All => true,
            EventFilter::Categories(categories) => categories.contains(&event.category()),
        }
    }
}

/// Type alias for event handler functions.
type EventHandler = Box<dyn Fn(&EditorEvent) + Send + Sync>;

/// Central event bus for editor notifications.
///
/// Handlers are invoked synchronously, in registration-map order, inside
/// the publishing call. Interior mutability lets the bus be shared as
/// `Arc<EventBus>` between the editor core and its host.
#[derive(Default)]
pub struct EventBus {
    handlers: RwLock<HashMap<SubscriptionId, (EventFilter, EventHandler)>>,
}

impl EventBus {
    /// Create a new event bus with no subscribers.
    pub fn new() -> Self {
        Self::default()
    }

    /// Subscribe to all events.
    pub fn subscribe<F>(&self, handler: F) -> SubscriptionId
    where
        F: Fn(&EditorEvent) + Send + Sync + 'static,
    {
        self.subscribe_filtered(EventFilter::All, handler)
    }

    /// Subscribe to events matching a filter.
    pub fn subscribe_filtered<F>(&self, filter: EventFilter, handler: F) -> SubscriptionId
    where
        F: Fn(&EditorEvent) + Send + Sync + 'static,
    {
        let id = SubscriptionId::new();
        self.handlers
            .write()
            .insert(id, (filter, Box::new(handler)));
        id
    }

    /// Remove a subscription. Returns whether it existed.
    pub fn unsubscribe(&self, id: SubscriptionId) -> bool {
        self.handlers.write().remove(&id).is_some()
    }

    /// Publish an event to all matching subscribers.
    ///
    /// Returns the number of handlers that received the event. Publishing
    /// with no subscribers is not an error; the editor core fires
    /// notifications unconditionally.
    pub fn publish(&self, event: &EditorEvent) -> usize {
        tracing::trace!(event = %event.description(), "publishing editor event");
        let handlers = self.handlers.read();
        let mut delivered = 0;
        for (filter, handler) in handlers.values() {
            if filter.matches(event) {
                handler(event);
                delivered += 1;
            }
        }
        delivered
    }

    /// Number of registered subscriptions.
    pub fn subscriber_count(&self) -> usize {
        self.handlers.read().len()
    }
}

impl std::fmt::Debug for EventBus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EventBus")
            .field("subscribers", &self.subscriber_count())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    #[test]
    fn publish_reaches_all_subscribers() {
        let bus = EventBus::new();
        let count = Arc::new(AtomicUsize::new(0));
        for _ in 0..3 {
            let count = Arc::clone(&count);
            bus.subscribe(move |_| {
                count.fetch_add(1, Ordering::SeqCst);
            });
        }
        let delivered = bus.publish(&EditorEvent::ShapesModified);
        assert_eq!(delivered, 3);
        assert_eq!(count.load(Ordering::SeqCst), 3);
    }

    #[test]
    fn filtered_subscription_skips_other_categories() {
        let bus = EventBus::new();
        let count = Arc::new(AtomicUsize::new(0));
        {
            let count = Arc::clone(&count);
            bus.subscribe_filtered(
                EventFilter::Categories(vec![EventCategory::Selection]),
                move |_| {
                    count.fetch_add(1, Ordering::SeqCst);
                },
            );
        }
        bus.publish(&EditorEvent::ShapesModified);
        assert_eq!(count.load(Ordering::SeqCst), 0);
        bus.publish(&EditorEvent::SelectionChanged { selected: vec![1] });
        assert_eq!(count.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn unsubscribe_stops_delivery() {
        let bus = EventBus::new();
        let count = Arc::new(AtomicUsize::new(0));
        let id = {
            let count = Arc::clone(&count);
            bus.subscribe(move |_| {
                count.fetch_add(1, Ordering::SeqCst);
            })
        };
        assert!(bus.unsubscribe(id));
        assert!(!bus.unsubscribe(id));
        assert_eq!(bus.publish(&EditorEvent::ShapesModified), 0);
        assert_eq!(count.load(Ordering::SeqCst), 0);
    }
}
