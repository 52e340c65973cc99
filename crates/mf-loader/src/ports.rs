//! Ports for the direct-import variant.

use async_trait::async_trait;
use shared_types::{ContainerId, Locator, ResolveError};
use std::sync::Arc;

/// A directly imported guest module.
///
/// The module exposes its mount entry point itself; no separate unmount
/// export is required in this variant.
pub trait GuestModule: Send + Sync {
    /// Render the guest into the given container.
    fn mount(&self, container: &ContainerId);
}

/// Resolves a locator to a guest module, the stand-in for dynamic import.
#[async_trait]
pub trait ModuleResolver: Send + Sync {
    /// Import the module at `locator`.
    async fn import(&self, locator: &Locator) -> Result<Arc<dyn GuestModule>, ResolveError>;
}
