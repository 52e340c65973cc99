//! Builder for one injected script reference.

use crate::page::{Page, ResourceHandle};
use crate::ports::ResourceResolver;
use shared_types::{InjectError, Locator, ResolveError, ResourceKey};
use std::sync::Arc;
use tracing::{debug, warn};

/// Callback fired at most once when the resource completes successfully.
pub type ReadyCallback = Box<dyn FnOnce() + Send>;

/// Callback fired at most once when the resource fails to load.
pub type ErrorCallback = Box<dyn FnOnce(ResolveError) + Send>;

/// Builder that configures and commits one script reference to the page.
///
/// `commit` appends the handle and spawns the fetch exactly once per call;
/// avoiding duplicate commits for an existing key is the caller's job.
#[derive(Default)]
pub struct ScriptBuilder {
    key: Option<ResourceKey>,
    locator: Option<Locator>,
    on_ready: Option<ReadyCallback>,
    on_error: Option<ErrorCallback>,
}

impl ScriptBuilder {
    /// Start configuring a script reference.
    #[must_use]
    pub fn create() -> Self {
        Self::default()
    }

    /// Set the page-wide key of the script.
    #[must_use]
    pub fn with_key(mut self, key: ResourceKey) -> Self {
        self.key = Some(key);
        self
    }

    /// Set the location the script is fetched from.
    #[must_use]
    pub fn with_locator(mut self, locator: Locator) -> Self {
        self.locator = Some(locator);
        self
    }

    /// Run `callback` when the script completes successfully.
    #[must_use]
    pub fn on_ready(mut self, callback: impl FnOnce() + Send + 'static) -> Self {
        self.on_ready = Some(Box::new(callback));
        self
    }

    /// Run `callback` when the script fails to load.
    #[must_use]
    pub fn on_error(mut self, callback: impl FnOnce(ResolveError) + Send + 'static) -> Self {
        self.on_error = Some(Box::new(callback));
        self
    }

    /// Append the script reference to the page and start its fetch.
    ///
    /// Returns the committed key. Fails only on builder misuse (missing key
    /// or locator); fetch failures are reported through `on_error`.
    pub fn commit(
        self,
        page: &Page,
        resolver: &Arc<dyn ResourceResolver>,
    ) -> Result<ResourceKey, InjectError> {
        let key = self.key.ok_or(InjectError::MissingKey)?;
        let locator = self.locator.ok_or(InjectError::MissingLocator)?;

        page.append_resource(ResourceHandle {
            key: key.clone(),
            locator: locator.clone(),
        });

        let resolver = Arc::clone(resolver);
        let on_ready = self.on_ready;
        let on_error = self.on_error;
        let task_key = key.clone();

        tokio::spawn(async move {
            match resolver.fetch(&locator).await {
                Ok(()) => {
                    debug!(key = %task_key, %locator, "Resource completed");
                    if let Some(callback) = on_ready {
                        callback();
                    }
                }
                Err(error) => {
                    warn!(key = %task_key, %locator, %error, "Resource failed to load");
                    if let Some(callback) = on_error {
                        callback(error);
                    }
                }
            }
        });

        Ok(key)
    }
}
