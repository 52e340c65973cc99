//! # Mount/Unmount Registry
//!
//! Process-wide mapping from a guest id to the lifecycle capability the
//! guest exposed once loaded. The registry is an explicit, injectable
//! service: guests register themselves here as a side effect of their own
//! initialization instead of hanging mount functions off an ambient global
//! namespace.
//!
//! Registration is last-write-wins with no merge; correctness rests on the
//! single cooperative timeline of the host page, not on lock ordering (the
//! lock here only guards the map itself).

use parking_lot::RwLock;
use shared_types::{ContainerId, GuestId};
use std::collections::HashMap;
use std::sync::Arc;
use tracing::{debug, warn};

/// The mount/unmount contract a guest exposes once loaded.
///
/// `mount` must be idempotent-safe to call multiple times (re-mount of the
/// same guest into a fresh container); `unmount` must be safe to call even
/// if `mount` never ran.
pub trait LifecycleCapability: Send + Sync {
    /// Render the guest into the given container.
    fn mount(&self, container: &ContainerId);

    /// Tear the guest's rendered state down.
    fn unmount(&self);
}

/// Shared id -> capability mapping.
pub struct CapabilityRegistry {
    entries: RwLock<HashMap<GuestId, Arc<dyn LifecycleCapability>>>,
}

impl CapabilityRegistry {
    /// Create an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self {
            entries: RwLock::new(HashMap::new()),
        }
    }

    /// Register a capability under a guest id, replacing any prior one.
    pub fn register(&self, id: GuestId, capability: Arc<dyn LifecycleCapability>) {
        let previous = self.entries.write().insert(id.clone(), capability);
        if previous.is_some() {
            warn!(guest = %id, "Capability re-registered; previous entry replaced");
        } else {
            debug!(guest = %id, "Capability registered");
        }
    }

    /// Look up the capability registered under a guest id.
    #[must_use]
    pub fn lookup(&self, id: &GuestId) -> Option<Arc<dyn LifecycleCapability>> {
        self.entries.read().get(id).map(Arc::clone)
    }

    /// Remove a guest's capability, typically from its own `unmount`.
    ///
    /// Returns whether an entry existed.
    pub fn deregister(&self, id: &GuestId) -> bool {
        let removed = self.entries.write().remove(id).is_some();
        if removed {
            debug!(guest = %id, "Capability deregistered");
        }
        removed
    }

    /// Whether a capability is registered under a guest id.
    #[must_use]
    pub fn is_registered(&self, id: &GuestId) -> bool {
        self.entries.read().contains_key(id)
    }
}

impl Default for CapabilityRegistry {
    fn default() -> Self {
        Self::new()
    }
}
