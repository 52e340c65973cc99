//! Scoped subscription handles and the registration table behind them.

use crate::message::EventMessage;
use parking_lot::RwLock;
use std::collections::HashMap;
use std::sync::Arc;
use tracing::debug;

/// A registered topic handler.
pub(crate) type Handler = Arc<dyn Fn(&EventMessage) + Send + Sync>;

/// Live handler registrations, keyed by topic.
#[derive(Default)]
pub(crate) struct Registrations {
    handlers: HashMap<String, Vec<(u64, Handler)>>,
    next_id: u64,
}

impl Registrations {
    /// Register a handler under a topic, returning its registration id.
    pub(crate) fn insert(&mut self, topic: &str, handler: Handler) -> u64 {
        let id = self.next_id;
        self.next_id += 1;
        self.handlers
            .entry(topic.to_string())
            .or_default()
            .push((id, handler));
        id
    }

    /// Snapshot the handlers currently registered under a topic.
    pub(crate) fn handlers_for(&self, topic: &str) -> Vec<Handler> {
        self.handlers
            .get(topic)
            .map(|list| list.iter().map(|(_, h)| Arc::clone(h)).collect())
            .unwrap_or_default()
    }

    fn remove(&mut self, topic: &str, id: u64) {
        if let Some(list) = self.handlers.get_mut(topic) {
            list.retain(|(handler_id, _)| *handler_id != id);
            if list.is_empty() {
                self.handlers.remove(topic);
            }
        }
    }
}

/// A handle for one topic registration.
///
/// Dropping the handle releases the registration, so subscriptions follow
/// the lifetime of the component that took them out on every exit path,
/// including unwinds. A torn-down subscriber can never act on a topic again.
pub struct Subscription {
    registrations: Arc<RwLock<Registrations>>,
    topic: String,
    id: u64,
}

impl Subscription {
    pub(crate) fn new(
        registrations: Arc<RwLock<Registrations>>,
        topic: String,
        id: u64,
    ) -> Self {
        Self {
            registrations,
            topic,
            id,
        }
    }

    /// Topic this subscription is registered under.
    #[must_use]
    pub fn topic(&self) -> &str {
        &self.topic
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        self.registrations.write().remove(&self.topic, self.id);
        debug!(topic = %self.topic, "Subscription released");
    }
}
