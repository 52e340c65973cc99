//! Wiring of the shared services a composed page runs on.

use mf_injector::{Page, ResourceResolver};
use mf_loader::MicroFrontendLoader;
use mf_registry::CapabilityRegistry;
use shared_bus::EventBus;
use std::sync::Arc;

/// The host page's shared services: one bus, one registry, one page model
/// and one loader, all `Arc`-shared with every guest the page composes.
pub struct HostContext {
    bus: Arc<EventBus>,
    registry: Arc<CapabilityRegistry>,
    page: Arc<Page>,
    loader: Arc<MicroFrontendLoader>,
}

impl HostContext {
    /// Wire a context, handing the ambient services to the resolver factory.
    ///
    /// The factory sees the bus and registry because resolving a guest
    /// resource evaluates guest code, and that code registers capabilities
    /// and subscribes to topics in the very services the host uses.
    pub fn compose<F>(make_resolver: F) -> Self
    where
        F: FnOnce(&Arc<EventBus>, &Arc<CapabilityRegistry>) -> Arc<dyn ResourceResolver>,
    {
        let bus = Arc::new(EventBus::new());
        let registry = Arc::new(CapabilityRegistry::new());
        let resolver = make_resolver(&bus, &registry);
        Self::from_parts(bus, registry, resolver)
    }

    /// Wire a context from pre-built services.
    pub fn from_parts(
        bus: Arc<EventBus>,
        registry: Arc<CapabilityRegistry>,
        resolver: Arc<dyn ResourceResolver>,
    ) -> Self {
        let page = Arc::new(Page::new());
        let loader =
            MicroFrontendLoader::new(Arc::clone(&page), Arc::clone(&registry), resolver);
        Self {
            bus,
            registry,
            page,
            loader,
        }
    }

    /// The ambient event bus.
    #[must_use]
    pub fn bus(&self) -> Arc<EventBus> {
        Arc::clone(&self.bus)
    }

    /// The capability registry.
    #[must_use]
    pub fn registry(&self) -> Arc<CapabilityRegistry> {
        Arc::clone(&self.registry)
    }

    /// The page document model.
    #[must_use]
    pub fn page(&self) -> Arc<Page> {
        Arc::clone(&self.page)
    }

    /// The loader/orchestrator.
    #[must_use]
    pub fn loader(&self) -> Arc<MicroFrontendLoader> {
        Arc::clone(&self.loader)
    }
}
