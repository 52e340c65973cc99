//! Core entities: guest descriptors, resource keys, load states and the
//! per-attempt cancellation token.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// Namespace prefix for every resource key injected into the page.
///
/// The page-global key namespace is the mutual-exclusion domain for resource
/// injection: key uniqueness is what prevents duplicate loads.
pub const RESOURCE_NAMESPACE: &str = "micro_frontend";

/// Stable identifier of one loadable guest.
///
/// The id is the key for load-state deduplication and registry lookup.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct GuestId(String);

impl GuestId {
    /// Create a guest id.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// The id as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for GuestId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for GuestId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

impl From<String> for GuestId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

/// Location of an externally hosted code resource (a URL in practice).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Locator(String);

impl Locator {
    /// Create a locator.
    pub fn new(locator: impl Into<String>) -> Self {
        Self(locator.into())
    }

    /// The locator as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Locator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for Locator {
    fn from(locator: &str) -> Self {
        Self::new(locator)
    }
}

impl From<String> for Locator {
    fn from(locator: String) -> Self {
        Self(locator)
    }
}

/// Identifying metadata for one loadable guest: its id plus the location of
/// its main resource and any auxiliary resources (polyfills and the like).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GuestDescriptor {
    /// Stable key for deduplication and registry lookup.
    pub id: GuestId,
    /// The resource whose completion gates mounting.
    pub main_resource: Locator,
    /// Order-independent prerequisites, injected fire-and-forget.
    pub support_resources: Vec<Locator>,
}

impl GuestDescriptor {
    /// Descriptor with no support resources.
    pub fn new(id: impl Into<GuestId>, main_resource: impl Into<Locator>) -> Self {
        Self {
            id: id.into(),
            main_resource: main_resource.into(),
            support_resources: Vec::new(),
        }
    }

    /// Add support resources to the descriptor.
    #[must_use]
    pub fn with_support(mut self, support: impl IntoIterator<Item = Locator>) -> Self {
        self.support_resources.extend(support);
        self
    }
}

/// Deterministic page-wide key of one injected resource.
///
/// At most one resource with a given key may exist in the page at any time.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ResourceKey(String);

impl ResourceKey {
    /// Key of a guest's main resource: `micro_frontend_main_<id>`.
    #[must_use]
    pub fn main(id: &GuestId) -> Self {
        Self(format!("{RESOURCE_NAMESPACE}_main_{id}"))
    }

    /// Key of the `n`-th support resource (1-indexed):
    /// `micro_frontend_support_<id>_<n>`.
    #[must_use]
    pub fn support(id: &GuestId, n: usize) -> Self {
        Self(format!("{RESOURCE_NAMESPACE}_support_{id}_{n}"))
    }

    /// The key as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ResourceKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Identifier of a mount container supplied by the host.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ContainerId(String);

impl ContainerId {
    /// Create a container id.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Conventional root container for a guest: `<id>_root`.
    #[must_use]
    pub fn root_for(id: &GuestId) -> Self {
        Self(format!("{id}_root"))
    }

    /// The container id as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ContainerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Per-id load state. Transitions are strictly forward for the life of the
/// page: `Unrequested -> Pending -> {Ready | Errored}`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LoadState {
    /// No load has been requested for this id.
    Unrequested,
    /// The main resource is in flight.
    Pending,
    /// The main resource completed and the guest may be mounted.
    Ready,
    /// The load failed; terminal for the page lifetime.
    Errored,
}

impl fmt::Display for LoadState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Unrequested => "unrequested",
            Self::Pending => "pending",
            Self::Ready => "ready",
            Self::Errored => "errored",
        };
        f.write_str(name)
    }
}

/// Cooperative cancellation flag captured per mount attempt.
///
/// Set once at teardown, never reset; must be checked at every resumption
/// point after a suspension. An in-flight load is never aborted, only its
/// effect (invoking mount) is suppressed.
#[derive(Debug, Clone, Default)]
pub struct CancelToken {
    cancelled: Arc<AtomicBool>,
}

impl CancelToken {
    /// Create a fresh, un-cancelled token.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Mark the attempt as torn down.
    pub fn cancel(&self) {
        self.cancelled.store(true, Ordering::Relaxed);
    }

    /// Whether the attempt was torn down.
    #[must_use]
    pub fn is_cancelled(&self) -> bool {
        self.cancelled.load(Ordering::Relaxed)
    }
}
