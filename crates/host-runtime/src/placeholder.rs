//! The host-side slot one guest is composed into.

use crate::context::HostContext;
use mf_injector::Page;
use mf_loader::{MicroFrontendLoader, MountHandle};
use shared_types::{ContainerId, GuestDescriptor, GuestId, LoadState};
use std::sync::Arc;

/// One guest slot on the host page.
///
/// Creating the placeholder exposes the guest's root container
/// (`<id>_root`) and requests the mount; dropping it requests unmount and
/// removes the container, cancelling any completion still in flight for
/// this attempt.
pub struct Placeholder {
    loader: Arc<MicroFrontendLoader>,
    page: Arc<Page>,
    id: GuestId,
    container: ContainerId,
    handle: MountHandle,
}

impl Placeholder {
    /// Mount a guest into a fresh slot on the page.
    pub fn mount(host: &HostContext, descriptor: &GuestDescriptor) -> Self {
        let loader = host.loader();
        let page = host.page();

        let container = ContainerId::root_for(&descriptor.id);
        page.add_container(container.clone());
        let handle = loader.request_mount(descriptor, container.clone());

        Self {
            loader,
            page,
            id: descriptor.id.clone(),
            container,
            handle,
        }
    }

    /// The guest occupying this slot.
    #[must_use]
    pub fn id(&self) -> &GuestId {
        &self.id
    }

    /// The slot's container on the page.
    #[must_use]
    pub fn container(&self) -> &ContainerId {
        &self.container
    }

    /// The guest's load state, for loading/error indicators.
    #[must_use]
    pub fn state(&self) -> LoadState {
        self.loader.load_state(&self.id)
    }

    /// Whether the guest is still loading.
    #[must_use]
    pub fn is_loading(&self) -> bool {
        self.state() == LoadState::Pending
    }
}

impl Drop for Placeholder {
    fn drop(&mut self) {
        self.loader.request_unmount(&self.handle);
        self.page.remove_container(&self.container);
    }
}
