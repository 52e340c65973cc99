//! # Shared Bus - Event Bus for Host/Guest Communication
//!
//! Topic-keyed publish/subscribe used by the host and every loaded guest to
//! exchange state without a shared module graph.
//!
//! ```text
//! ┌──────────────┐                    ┌──────────────┐
//! │     Host     │                    │    Guest     │
//! │              │    publish()       │              │
//! │              │ ──────┐            │              │
//! └──────────────┘       │            └──────────────┘
//!                        ▼                    ↑
//!                  ┌──────────────┐          │
//!                  │  Event Bus   │          │
//!                  │              │ ─────────┘
//!                  └──────────────┘  subscribe()
//! ```
//!
//! ## Delivery semantics
//!
//! - Synchronous dispatch to all currently-subscribed listeners of a topic.
//! - At-most-once per publish; no replay, no buffering, no persistence.
//! - A publish with zero listeners is dropped silently. In particular, a
//!   request published before the responder subscribed is simply missed.
//! - Topic names and payload shapes are conventions agreed out of band; a
//!   mismatch fails silently (the listener never fires, or ignores the
//!   payload it cannot read).
//!
//! Subscriptions are scoped: dropping the [`Subscription`] handle releases
//! the registration on every exit path, so a torn-down component can never
//! act on a topic again.
//!
//! The [`sync`] module builds the two cross-app state-synchronization
//! patterns (push/broadcast and request/response) on top of the raw bus.

pub mod bus;
pub mod message;
pub mod subscription;
pub mod sync;

// Re-export main types
pub use bus::EventBus;
pub use message::EventMessage;
pub use subscription::Subscription;
pub use sync::{RemoteValue, SharedValue, StateTopics};
