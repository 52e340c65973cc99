//! Bus delivery semantics and the state-synchronization protocol.

#![cfg(test)]

use parking_lot::Mutex;
use serde_json::json;
use shared_bus::{EventBus, RemoteValue, SharedValue, StateTopics};
use std::sync::Arc;

fn observer(bus: &Arc<EventBus>, topic: &str) -> (Arc<Mutex<Vec<i64>>>, shared_bus::Subscription) {
    let seen = Arc::new(Mutex::new(Vec::new()));
    let sink = Arc::clone(&seen);
    let subscription = bus.subscribe(topic, move |message| {
        if let Some(value) = message.payload.as_i64() {
            sink.lock().push(value);
        }
    });
    (seen, subscription)
}

#[test]
fn push_broadcast_ordering() {
    let bus = Arc::new(EventBus::new());
    let topics = StateTopics::for_key("counter");

    // Attached before the owner initializes: sees the initial broadcast and
    // every change.
    let (early, _early_sub) = observer(&bus, &topics.changed);

    let owner = SharedValue::announce(Arc::clone(&bus), &topics, 0i64);
    owner.update(|value| value + 1);

    // Attached after the first increment: sees only what comes next.
    let (late, _late_sub) = observer(&bus, &topics.changed);

    owner.update(|value| value + 1);

    assert_eq!(*early.lock(), vec![0, 1, 2]);
    assert_eq!(*late.lock(), vec![2]);
}

#[test]
fn request_with_no_responder_is_harmless() {
    let bus = Arc::new(EventBus::new());
    let topics = StateTopics::for_key("counter");

    // Nothing owns the value; the request is simply dropped.
    let requester = RemoteValue::<i64>::attach(&bus, &topics);
    assert_eq!(requester.get(), None);
    assert_eq!(bus.publish_signal(&topics.request), 0);
}

#[test]
fn late_consumer_is_served_by_request_response() {
    let bus = Arc::new(EventBus::new());
    let topics = StateTopics::for_key("counter");

    let owner = SharedValue::announce(Arc::clone(&bus), &topics, 5i64);

    // The consumer attaches long after the initial broadcast; the request
    // round-trip catches it up synchronously.
    let consumer = RemoteValue::<i64>::attach(&bus, &topics);
    assert_eq!(consumer.get(), Some(5));

    owner.set(6);
    assert_eq!(consumer.get(), Some(6));
}

#[test]
fn dropped_subscription_stops_receiving() {
    let bus = Arc::new(EventBus::new());
    let (seen, subscription) = observer(&bus, "increment");

    bus.publish("increment", json!(1));
    drop(subscription);
    bus.publish("increment", json!(2));

    assert_eq!(*seen.lock(), vec![1]);
}

#[test]
fn topics_are_independent() {
    let bus = Arc::new(EventBus::new());
    let counter = StateTopics::for_key("counter");
    let theme = StateTopics::for_key("theme");

    let _counter_owner = SharedValue::announce(Arc::clone(&bus), &counter, 1i64);
    let _theme_owner = SharedValue::announce(Arc::clone(&bus), &theme, 2i64);

    let counter_consumer = RemoteValue::<i64>::attach(&bus, &counter);
    let theme_consumer = RemoteValue::<i64>::attach(&bus, &theme);

    assert_eq!(counter_consumer.get(), Some(1));
    assert_eq!(theme_consumer.get(), Some(2));
}
