//! # Resource Injector
//!
//! The leaf of the composition stack: a [`Page`] document model holding the
//! resources injected so far and the mount containers the host currently
//! exposes, plus the [`ScriptBuilder`] that appends one resource reference
//! and drives its asynchronous fetch.
//!
//! The injector performs no deduplication; the page-global resource-key
//! namespace is the caller's mutual-exclusion domain. Completion callbacks
//! fire at most once, asynchronously, on the task that resolved the fetch.

pub mod page;
pub mod ports;
pub mod script;

pub use page::{Page, ResourceHandle};
pub use ports::ResourceResolver;
pub use script::ScriptBuilder;
