//! The publishing side of the event bus.

use crate::message::EventMessage;
use crate::subscription::{Handler, Registrations, Subscription};
use parking_lot::RwLock;
use serde_json::Value;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use tracing::debug;

/// Topic-keyed synchronous publish/subscribe channel.
///
/// One instance is shared (via `Arc`) between the host and every guest it
/// composes; it is the only communication path that crosses the host/guest
/// boundary.
pub struct EventBus {
    /// Live handler registrations, keyed by topic.
    registrations: Arc<RwLock<Registrations>>,

    /// Total events published (including drops with zero listeners).
    events_published: AtomicU64,
}

impl EventBus {
    /// Create a new, empty bus.
    #[must_use]
    pub fn new() -> Self {
        Self {
            registrations: Arc::new(RwLock::new(Registrations::default())),
            events_published: AtomicU64::new(0),
        }
    }

    /// Subscribe a handler to a topic.
    ///
    /// The handler runs synchronously, on the publisher's stack, for every
    /// publish to `topic` until the returned [`Subscription`] is dropped.
    /// Handlers may publish or subscribe reentrantly.
    #[must_use]
    pub fn subscribe<F>(&self, topic: &str, handler: F) -> Subscription
    where
        F: Fn(&EventMessage) + Send + Sync + 'static,
    {
        let id = self
            .registrations
            .write()
            .insert(topic, Arc::new(handler) as Handler);

        debug!(topic, "New subscription created");

        Subscription::new(Arc::clone(&self.registrations), topic.to_string(), id)
    }

    /// Publish an event to all listeners currently subscribed to `topic`.
    ///
    /// Returns the number of listeners that received the event. Zero is not
    /// an error: delivery is fire-and-forget and nothing is buffered for
    /// listeners that attach later.
    pub fn publish(&self, topic: &str, payload: Value) -> usize {
        self.events_published.fetch_add(1, Ordering::Relaxed);

        // Snapshot the handler list before invoking anything so handlers can
        // reentrantly subscribe/publish without holding the lock.
        let handlers = self.registrations.read().handlers_for(topic);

        if handlers.is_empty() {
            debug!(topic, "Event dropped (no listeners)");
            return 0;
        }

        let message = EventMessage::new(topic, payload);
        for handler in &handlers {
            handler(&message);
        }

        debug!(topic, listeners = handlers.len(), "Event published");
        handlers.len()
    }

    /// Publish a payload-less signal, the request half of the
    /// request/response pattern.
    pub fn publish_signal(&self, topic: &str) -> usize {
        self.publish(topic, Value::Null)
    }

    /// Number of listeners currently subscribed to `topic`.
    #[must_use]
    pub fn listener_count(&self, topic: &str) -> usize {
        self.registrations.read().handlers_for(topic).len()
    }

    /// Total number of events published so far.
    #[must_use]
    pub fn events_published(&self) -> u64 {
        self.events_published.load(Ordering::Relaxed)
    }
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new()
    }
}
