//! # Shared Types Crate
//!
//! Domain entities used across the micro-frontend composition workspace.
//!
//! ## Design Principles
//!
//! - **Single Source of Truth**: All cross-crate types are defined here.
//! - **Typed identifiers**: guest ids, resource keys and container ids are
//!   newtypes, not bare strings, so lookups cannot mix namespaces.
//! - **No synchronization here**: these are plain values; locking discipline
//!   belongs to the crates that hold them.

pub mod entities;
pub mod errors;

pub use entities::*;
pub use errors::*;
