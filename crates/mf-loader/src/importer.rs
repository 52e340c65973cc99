//! Direct-import variant: resolve the guest module asynchronously and invoke
//! its exported mount function, with an explicit error transition.

use crate::ports::ModuleResolver;
use mf_injector::Page;
use parking_lot::RwLock;
use shared_types::{CancelToken, ContainerId, LoadState, Locator};
use std::sync::Arc;
use tracing::{debug, warn};

/// Handle for one direct-import attempt.
///
/// Exposes the attempt's state so the host can render a loading or failure
/// indicator for that one guest, and the cancellation entry point for
/// placeholder teardown.
pub struct ImportHandle {
    locator: Locator,
    token: CancelToken,
    state: Arc<RwLock<LoadState>>,
}

impl ImportHandle {
    /// The locator this attempt imports from.
    #[must_use]
    pub fn locator(&self) -> &Locator {
        &self.locator
    }

    /// Current state of the attempt.
    #[must_use]
    pub fn state(&self) -> LoadState {
        *self.state.read()
    }

    /// Tear the attempt down; a completion arriving later will not mount.
    pub fn cancel(&self) {
        self.token.cancel();
    }
}

/// Loader variant performing a direct asynchronous import of the guest
/// module.
///
/// Success invokes the module's exported mount function, guarded by the
/// attempt's cancellation token; failure transitions the attempt to
/// `Errored` and logs a visible, isolated indicator. Nothing is ever thrown
/// to the host.
pub struct ModuleImporter {
    page: Arc<Page>,
    resolver: Arc<dyn ModuleResolver>,
}

impl ModuleImporter {
    /// Create an importer over the given page and resolver.
    pub fn new(page: Arc<Page>, resolver: Arc<dyn ModuleResolver>) -> Self {
        Self { page, resolver }
    }

    /// Import the module at `locator` and mount it into `container`.
    pub fn request_mount(&self, locator: Locator, container: ContainerId) -> ImportHandle {
        let token = CancelToken::new();
        let state = Arc::new(RwLock::new(LoadState::Pending));

        let page = Arc::clone(&self.page);
        let resolver = Arc::clone(&self.resolver);
        let task_token = token.clone();
        let task_state = Arc::clone(&state);
        let task_locator = locator.clone();

        tokio::spawn(async move {
            match resolver.import(&task_locator).await {
                Ok(module) => {
                    *task_state.write() = LoadState::Ready;
                    // Resumption point: teardown may have happened while the
                    // import was in flight.
                    if task_token.is_cancelled() {
                        debug!(locator = %task_locator, "Mount suppressed; attempt was torn down");
                        return;
                    }
                    if !page.has_container(&container) {
                        warn!(locator = %task_locator, %container, "Mount container missing; attempt aborted");
                        return;
                    }
                    debug!(locator = %task_locator, %container, "Mounting imported module");
                    module.mount(&container);
                }
                Err(error) => {
                    *task_state.write() = LoadState::Errored;
                    warn!(locator = %task_locator, %error, "Unable to mount micro-frontend");
                }
            }
        });

        ImportHandle {
            locator,
            token,
            state,
        }
    }
}
