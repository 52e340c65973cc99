//! Resolver port: the seam standing in for network fetch plus script
//! evaluation.

use async_trait::async_trait;
use shared_types::{Locator, ResolveError};

/// Fetches and evaluates an externally hosted resource.
///
/// A successful `fetch` implies the resource's top-level side effects ran;
/// for a guest's main resource that means the guest registered its lifecycle
/// capability before the call returned.
#[async_trait]
pub trait ResourceResolver: Send + Sync {
    /// Fetch and evaluate the resource at `locator`.
    async fn fetch(&self, locator: &Locator) -> Result<(), ResolveError>;
}
