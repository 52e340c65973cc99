//! Registry-based loader: inject resources, wait for the main one, mount
//! through the capability the guest registered.

use mf_injector::{Page, ResourceResolver, ScriptBuilder};
use mf_registry::CapabilityRegistry;
use parking_lot::Mutex;
use shared_types::{
    CancelToken, ContainerId, GuestDescriptor, GuestId, LoadState, ResolveError, ResourceKey,
};
use std::collections::HashMap;
use std::sync::Arc;
use tracing::{debug, error, warn};

/// Handle for one mount attempt.
///
/// Carries the attempt's cancellation token; pass it back to
/// [`MicroFrontendLoader::request_unmount`] at placeholder teardown.
#[derive(Debug)]
pub struct MountHandle {
    id: GuestId,
    token: CancelToken,
}

impl MountHandle {
    /// The guest this attempt targets.
    #[must_use]
    pub fn id(&self) -> &GuestId {
        &self.id
    }

    /// Whether this attempt was torn down.
    #[must_use]
    pub fn is_cancelled(&self) -> bool {
        self.token.is_cancelled()
    }
}

/// One requester waiting for an in-flight load to settle.
struct PendingMount {
    container: ContainerId,
    token: CancelToken,
}

/// Per-id load-state record.
struct GuestEntry {
    state: LoadState,
    waiters: Vec<PendingMount>,
}

/// What `request_mount` decided to do, resolved under the lock but executed
/// outside it.
enum MountAction {
    Inject,
    Join,
    MountNow(PendingMount),
    ObserveError,
}

/// The registry-based loader/orchestrator.
///
/// Guarantees at most one in-flight load per guest id; every concurrent
/// requester for a pending id is served on the single `Ready` transition.
pub struct MicroFrontendLoader {
    page: Arc<Page>,
    registry: Arc<CapabilityRegistry>,
    resolver: Arc<dyn ResourceResolver>,
    guests: Mutex<HashMap<GuestId, GuestEntry>>,
}

impl MicroFrontendLoader {
    /// Create a loader over the given page, registry and resolver.
    pub fn new(
        page: Arc<Page>,
        registry: Arc<CapabilityRegistry>,
        resolver: Arc<dyn ResourceResolver>,
    ) -> Arc<Self> {
        Arc::new(Self {
            page,
            registry,
            resolver,
            guests: Mutex::new(HashMap::new()),
        })
    }

    /// Request that a guest be mounted into `container`.
    ///
    /// - unseen id: the descriptor's resources are injected and the attempt
    ///   waits for the main resource;
    /// - `Pending`: the attempt joins the existing load's waiter list, with
    ///   no second injection;
    /// - `Ready`: the guest is mounted immediately through the registry;
    /// - `Errored`: the attempt observes the error; no retry is scheduled.
    pub fn request_mount(
        self: &Arc<Self>,
        descriptor: &GuestDescriptor,
        container: ContainerId,
    ) -> MountHandle {
        let id = descriptor.id.clone();
        let token = CancelToken::new();
        let attempt = PendingMount {
            container,
            token: token.clone(),
        };

        let action = {
            let mut guests = self.guests.lock();
            let entry = guests.entry(id.clone()).or_insert_with(|| GuestEntry {
                state: LoadState::Unrequested,
                waiters: Vec::new(),
            });
            match entry.state {
                LoadState::Unrequested => {
                    entry.state = LoadState::Pending;
                    entry.waiters.push(attempt);
                    MountAction::Inject
                }
                LoadState::Pending => {
                    entry.waiters.push(attempt);
                    MountAction::Join
                }
                LoadState::Ready => MountAction::MountNow(attempt),
                LoadState::Errored => MountAction::ObserveError,
            }
        };

        match action {
            MountAction::Inject => {
                debug!(guest = %id, "Load requested; injecting resources");
                self.inject(descriptor);
            }
            MountAction::Join => {
                debug!(guest = %id, "Joined in-flight load");
            }
            MountAction::MountNow(attempt) => {
                debug!(guest = %id, "Guest already ready; re-mounting");
                self.run_mount(&id, &attempt);
            }
            MountAction::ObserveError => {
                warn!(guest = %id, "Previous load failed; attempt not retried");
            }
        }

        MountHandle { id, token }
    }

    /// Tear one mount attempt down.
    ///
    /// Sets the attempt's cancellation flag first, so an outstanding
    /// completion for this attempt is suppressed, then unmounts through the
    /// registered capability if one exists. The load state is untouched:
    /// resource and capability stay reusable for a future mount.
    pub fn request_unmount(&self, handle: &MountHandle) {
        handle.token.cancel();
        match self.registry.lookup(&handle.id) {
            Some(capability) => {
                debug!(guest = %handle.id, "Unmounting guest");
                capability.unmount();
            }
            None => {
                debug!(guest = %handle.id, "No capability registered; nothing to unmount");
            }
        }
    }

    /// Observe a guest's load state (`Unrequested` for unseen ids).
    #[must_use]
    pub fn load_state(&self, id: &GuestId) -> LoadState {
        self.guests
            .lock()
            .get(id)
            .map_or(LoadState::Unrequested, |entry| entry.state)
    }

    /// Inject the descriptor's resources: support resources fire-and-forget,
    /// the main resource wired to the ready/error transitions.
    fn inject(self: &Arc<Self>, descriptor: &GuestDescriptor) {
        let id = descriptor.id.clone();

        for (index, locator) in descriptor.support_resources.iter().enumerate() {
            // Order-independent prerequisites; completion is not tracked.
            let committed = ScriptBuilder::create()
                .with_key(ResourceKey::support(&id, index + 1))
                .with_locator(locator.clone())
                .commit(&self.page, &self.resolver);
            if let Err(inject_error) = committed {
                warn!(guest = %id, %locator, error = %inject_error, "Support resource rejected");
            }
        }

        let ready_loader = Arc::clone(self);
        let ready_id = id.clone();
        let error_loader = Arc::clone(self);
        let error_id = id.clone();

        let committed = ScriptBuilder::create()
            .with_key(ResourceKey::main(&id))
            .with_locator(descriptor.main_resource.clone())
            .on_ready(move || ready_loader.on_main_ready(&ready_id))
            .on_error(move |resolve_error| error_loader.on_main_error(&error_id, &resolve_error))
            .commit(&self.page, &self.resolver);

        if let Err(inject_error) = committed {
            error!(guest = %id, error = %inject_error, "Main resource rejected");
            self.fail(&id);
        }
    }

    /// `Pending -> Ready`: drain the waiter list and serve every requester.
    fn on_main_ready(&self, id: &GuestId) {
        let waiters = {
            let mut guests = self.guests.lock();
            match guests.get_mut(id) {
                Some(entry) => {
                    entry.state = LoadState::Ready;
                    std::mem::take(&mut entry.waiters)
                }
                None => Vec::new(),
            }
        };

        debug!(guest = %id, waiters = waiters.len(), "Main resource ready");
        for attempt in &waiters {
            self.run_mount(id, attempt);
        }
    }

    /// `Pending -> Errored`: terminal for the page lifetime.
    fn on_main_error(&self, id: &GuestId, resolve_error: &ResolveError) {
        let dropped = self.fail(id);
        error!(guest = %id, error = %resolve_error, waiters = dropped, "Guest failed to load");
    }

    fn fail(&self, id: &GuestId) -> usize {
        let mut guests = self.guests.lock();
        match guests.get_mut(id) {
            Some(entry) => {
                entry.state = LoadState::Errored;
                std::mem::take(&mut entry.waiters).len()
            }
            None => 0,
        }
    }

    /// Run one mount attempt: cancellation check first (this is a resumption
    /// point), then capability lookup, then container presence.
    fn run_mount(&self, id: &GuestId, attempt: &PendingMount) {
        if attempt.token.is_cancelled() {
            debug!(guest = %id, "Mount suppressed; attempt was torn down");
            return;
        }

        let Some(capability) = self.registry.lookup(id) else {
            warn!(guest = %id, "Guest loaded but never registered a capability");
            return;
        };

        if !self.page.has_container(&attempt.container) {
            warn!(guest = %id, container = %attempt.container, "Mount container missing; attempt aborted");
            return;
        }

        debug!(guest = %id, container = %attempt.container, "Mounting guest");
        capability.mount(&attempt.container);
    }
}
