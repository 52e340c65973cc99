//! Demo host page.
//!
//! Composes two simulated guests: a counter badge that mirrors the host's
//! counter over the bus, and a guest whose resource is unreachable (to show
//! per-guest failure isolation). The guests live behind the resolver, the
//! way real guests live behind the network; the host only ever sees the
//! descriptor, the registry and the bus.

use anyhow::Result;
use async_trait::async_trait;
use host_runtime::{HostConfig, HostContext, Placeholder};
use mf_injector::ResourceResolver;
use mf_registry::{CapabilityRegistry, LifecycleCapability};
use parking_lot::Mutex;
use shared_bus::{EventBus, RemoteValue, SharedValue, StateTopics};
use shared_types::{ContainerId, GuestDescriptor, GuestId, Locator, ResolveError};
use std::sync::Arc;
use std::time::Duration;
use tokio::time::sleep;
use tracing::info;

/// State key of the host-owned counter.
const COUNTER_KEY: &str = "page.counter";

/// A guest that mirrors the host's counter.
struct CounterBadge {
    bus: Arc<EventBus>,
    mirror: Mutex<Option<RemoteValue<i64>>>,
}

impl LifecycleCapability for CounterBadge {
    fn mount(&self, container: &ContainerId) {
        let mirror = RemoteValue::attach(&self.bus, &StateTopics::for_key(COUNTER_KEY));
        info!(%container, value = ?mirror.get(), "Counter badge mounted");
        *self.mirror.lock() = Some(mirror);
    }

    fn unmount(&self) {
        if let Some(mirror) = self.mirror.lock().take() {
            info!(value = ?mirror.get(), "Counter badge unmounted");
        }
    }
}

/// Simulated network plus evaluation: the known locator "loads" a guest
/// whose initialization registers its capability; everything else is
/// unreachable.
struct DemoResolver {
    bus: Arc<EventBus>,
    registry: Arc<CapabilityRegistry>,
}

#[async_trait]
impl ResourceResolver for DemoResolver {
    async fn fetch(&self, locator: &Locator) -> Result<(), ResolveError> {
        sleep(Duration::from_millis(25)).await;
        if locator.as_str().ends_with("counter_badge/main.js") {
            self.registry.register(
                GuestId::new("counter_badge"),
                Arc::new(CounterBadge {
                    bus: Arc::clone(&self.bus),
                    mirror: Mutex::new(None),
                }),
            );
            Ok(())
        } else {
            Err(ResolveError::Unreachable(locator.clone()))
        }
    }
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    let config = HostConfig::from_env();
    config.init_tracing();
    info!("Host page starting");

    let host = HostContext::compose(|bus, registry| {
        Arc::new(DemoResolver {
            bus: Arc::clone(bus),
            registry: Arc::clone(registry),
        }) as Arc<dyn ResourceResolver>
    });

    // The host owns the counter; the badge guest mirrors it over the bus.
    let counter = SharedValue::announce(host.bus(), &StateTopics::for_key(COUNTER_KEY), 0i64);

    let badge = Placeholder::mount(
        &host,
        &GuestDescriptor::new("counter_badge", "https://guests.internal/counter_badge/main.js"),
    );
    let broken = Placeholder::mount(
        &host,
        &GuestDescriptor::new("broken_guest", "https://guests.internal/broken_guest/main.js"),
    );

    sleep(Duration::from_millis(100)).await;
    info!(badge = %badge.state(), broken = %broken.state(), "Guest states after load");

    counter.update(|value| value + 1);
    counter.update(|value| value + 1);
    info!(value = counter.get(), "Counter incremented");

    drop(badge);
    drop(broken);
    info!("Host page shutting down");
    Ok(())
}
