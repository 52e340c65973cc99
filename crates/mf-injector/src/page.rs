//! The host page as an in-process document model.

use parking_lot::RwLock;
use shared_types::{ContainerId, Locator, ResourceKey};
use std::collections::{HashMap, HashSet};
use tracing::{debug, warn};

/// One injected resource reference.
///
/// Handles persist for the life of the page; they are never removed, only
/// reused by later mounts of the same guest.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResourceHandle {
    /// Deterministic page-wide key.
    pub key: ResourceKey,
    /// Where the resource was fetched from.
    pub locator: Locator,
}

/// Global page state: injected resources and live mount containers.
pub struct Page {
    resources: RwLock<HashMap<ResourceKey, ResourceHandle>>,
    containers: RwLock<HashSet<ContainerId>>,
}

impl Page {
    /// Create an empty page.
    #[must_use]
    pub fn new() -> Self {
        Self {
            resources: RwLock::new(HashMap::new()),
            containers: RwLock::new(HashSet::new()),
        }
    }

    /// Append a resource reference to the page.
    ///
    /// A duplicate key is a caller bug (keys are the dedup domain); it is
    /// logged and the handle replaced, mirroring last-write-wins elsewhere.
    pub fn append_resource(&self, handle: ResourceHandle) {
        let key = handle.key.clone();
        let previous = self.resources.write().insert(key.clone(), handle);
        if previous.is_some() {
            warn!(%key, "Duplicate resource key appended; handle replaced");
        } else {
            debug!(%key, "Resource appended to page");
        }
    }

    /// Look up an injected resource by key.
    #[must_use]
    pub fn resource(&self, key: &ResourceKey) -> Option<ResourceHandle> {
        self.resources.read().get(key).cloned()
    }

    /// Whether a resource with the given key has been injected.
    #[must_use]
    pub fn has_resource(&self, key: &ResourceKey) -> bool {
        self.resources.read().contains_key(key)
    }

    /// Number of resources injected so far.
    #[must_use]
    pub fn resource_count(&self) -> usize {
        self.resources.read().len()
    }

    /// Expose a mount container on the page.
    pub fn add_container(&self, container: ContainerId) {
        self.containers.write().insert(container);
    }

    /// Remove a mount container, typically at placeholder teardown.
    pub fn remove_container(&self, container: &ContainerId) -> bool {
        self.containers.write().remove(container)
    }

    /// Whether a container is currently present on the page.
    #[must_use]
    pub fn has_container(&self, container: &ContainerId) -> bool {
        self.containers.read().contains(container)
    }
}

impl Default for Page {
    fn default() -> Self {
        Self::new()
    }
}
