//! Cross-app state synchronization over the bus.
//!
//! Two patterns, both taken from the host/guest counter protocol:
//!
//! - **Push/broadcast**: the state owner publishes the new value on its
//!   "changed" topic every time the value changes, and once immediately upon
//!   initialization.
//! - **Request/response**: a late consumer subscribes to the "changed" topic
//!   and then publishes a payload-less request; the owner answers with the
//!   current value. The subscribe must happen strictly before the request is
//!   published, because delivery is unbuffered; [`RemoteValue::attach`]
//!   encapsulates that ordering so callers cannot get it wrong.

use crate::bus::EventBus;
use crate::subscription::Subscription;
use parking_lot::RwLock;
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::sync::Arc;
use tracing::debug;

/// Topic pair for one synchronized state key.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StateTopics {
    /// Broadcast topic carrying the current value as payload.
    pub changed: String,
    /// Payload-less request topic asking the owner to re-broadcast.
    pub request: String,
}

impl StateTopics {
    /// Derive the conventional topic pair for a state key.
    pub fn for_key(key: &str) -> Self {
        Self {
            changed: format!("{key}.changed"),
            request: format!("{key}.request"),
        }
    }

    /// Explicit topic names, for protocols agreed out of band.
    pub fn new(changed: impl Into<String>, request: impl Into<String>) -> Self {
        Self {
            changed: changed.into(),
            request: request.into(),
        }
    }
}

/// The owning side of one synchronized value.
///
/// Holds the value, answers requests for it over its whole lifetime, and
/// broadcasts every change. Dropping the owner releases the responder
/// subscription; requests published afterwards go unanswered.
pub struct SharedValue<T> {
    bus: Arc<EventBus>,
    value: Arc<RwLock<T>>,
    changed_topic: String,
    _responder: Subscription,
}

impl<T> SharedValue<T>
where
    T: Serialize + Clone + Send + Sync + 'static,
{
    /// Take ownership of a value and announce it on the bus.
    ///
    /// The responder is registered before the initial broadcast, so a
    /// requester racing with initialization is still answered.
    pub fn announce(bus: Arc<EventBus>, topics: &StateTopics, initial: T) -> Self {
        let value = Arc::new(RwLock::new(initial));

        let responder = {
            let value = Arc::clone(&value);
            let changed_topic = topics.changed.clone();
            let bus_for_handler = Arc::clone(&bus);
            bus.subscribe(&topics.request, move |_| {
                let snapshot = value.read().clone();
                publish_value(&bus_for_handler, &changed_topic, &snapshot);
            })
        };

        let owner = Self {
            bus,
            value,
            changed_topic: topics.changed.clone(),
            _responder: responder,
        };
        owner.broadcast();
        owner
    }

    /// Current value.
    #[must_use]
    pub fn get(&self) -> T {
        self.value.read().clone()
    }

    /// Replace the value and broadcast the change.
    pub fn set(&self, next: T) {
        *self.value.write() = next;
        self.broadcast();
    }

    /// Derive the next value from the current one and broadcast it.
    pub fn update(&self, f: impl FnOnce(&T) -> T) -> T {
        let next = {
            let mut guard = self.value.write();
            let next = f(&guard);
            *guard = next.clone();
            next
        };
        self.broadcast();
        next
    }

    fn broadcast(&self) {
        let snapshot = self.value.read().clone();
        publish_value(&self.bus, &self.changed_topic, &snapshot);
    }
}

fn publish_value<T: Serialize>(bus: &EventBus, topic: &str, value: &T) {
    match serde_json::to_value(value) {
        Ok(payload) => {
            bus.publish(topic, payload);
        }
        Err(error) => {
            debug!(%error, topic, "Value not serializable; broadcast skipped");
        }
    }
}

/// The consuming side of one synchronized value.
///
/// Mirrors the owner's latest broadcast. Starts at `None`; stays `None` when
/// no owner exists (the request is simply dropped) and whenever a payload
/// does not match the expected shape.
pub struct RemoteValue<T> {
    latest: Arc<RwLock<Option<T>>>,
    _listener: Subscription,
}

impl<T> RemoteValue<T>
where
    T: DeserializeOwned + Clone + Send + Sync + 'static,
{
    /// Attach to a synchronized value: subscribe to the changed topic, then
    /// ask the owner (if any) to re-broadcast.
    pub fn attach(bus: &Arc<EventBus>, topics: &StateTopics) -> Self {
        let latest = Arc::new(RwLock::new(None));

        let listener = {
            let latest = Arc::clone(&latest);
            let topic = topics.changed.clone();
            bus.subscribe(&topics.changed, move |message| {
                match serde_json::from_value::<T>(message.payload.clone()) {
                    Ok(value) => {
                        *latest.write() = Some(value);
                    }
                    Err(error) => {
                        debug!(%error, topic = %topic, "Payload shape mismatch; update ignored");
                    }
                }
            })
        };

        // Response listener is live; now it is safe to ask.
        bus.publish_signal(&topics.request);

        Self {
            latest,
            _listener: listener,
        }
    }

    /// Latest mirrored value, if any broadcast has been observed.
    #[must_use]
    pub fn get(&self) -> Option<T> {
        self.latest.read().clone()
    }
}
