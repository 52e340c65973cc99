//! The unit of delivery on the bus.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// One published event: a topic name and an opaque payload.
///
/// There is no identity beyond the topic name and no schema enforcement on
/// the payload; consumers deserialize what they expect and ignore the rest.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EventMessage {
    /// Topic the event was published under.
    pub topic: String,
    /// Payload as agreed by convention between publisher and subscribers.
    /// `Value::Null` for payload-less signal topics.
    pub payload: Value,
}

impl EventMessage {
    /// Create a message.
    pub fn new(topic: impl Into<String>, payload: Value) -> Self {
        Self {
            topic: topic.into(),
            payload,
        }
    }

    /// Create a payload-less signal message.
    pub fn signal(topic: impl Into<String>) -> Self {
        Self::new(topic, Value::Null)
    }
}
