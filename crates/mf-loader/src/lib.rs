//! # Loader / Orchestrator
//!
//! The state machine that turns a guest descriptor into a mounted guest and
//! guarantees that teardown suppresses any late mount.
//!
//! Two variants share the per-attempt cancellation discipline:
//!
//! - [`MicroFrontendLoader`] — registry-based script loading. Injects the
//!   descriptor's resources through the page, waits for the main resource,
//!   then mounts through the capability the guest registered.
//! - [`ModuleImporter`] — direct asynchronous import of a guest module that
//!   exports its mount function, with an explicit `Errored` transition and a
//!   visible per-guest failure indicator.
//!
//! Per-id transitions are strictly forward:
//! `Unrequested -> Pending -> {Ready | Errored}`. At most one load is in
//! flight per id; concurrent requesters for a pending id join a
//! deterministic waiter list and are all served on the single `Ready`
//! transition.

pub mod importer;
pub mod loader;
pub mod ports;

pub use importer::{ImportHandle, ModuleImporter};
pub use loader::{MicroFrontendLoader, MountHandle};
pub use ports::{GuestModule, ModuleResolver};
