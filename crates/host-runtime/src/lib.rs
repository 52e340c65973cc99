//! # Host Runtime
//!
//! The composition root of the host page:
//!
//! - `config` - environment-derived host configuration
//! - `context` - wiring of bus, registry, page and loader
//! - `placeholder` - the host-side slot a guest is mounted into, with
//!   teardown on drop
//!
//! The binary in `main.rs` composes two simulated guests and synchronizes a
//! shared counter across the bus; guests' internals stay opaque to the host.

pub mod config;
pub mod context;
pub mod placeholder;

pub use config::HostConfig;
pub use context::HostContext;
pub use placeholder::Placeholder;
