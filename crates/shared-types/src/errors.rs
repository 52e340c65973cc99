//! Error taxonomy for the load/mount path.
//!
//! Nothing here ever propagates to the host unhandled; loaders degrade each
//! failure to a logged, per-guest state.

use crate::entities::Locator;
use thiserror::Error;

/// Failure to resolve an external resource or module.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ResolveError {
    /// The locator could not be fetched (network failure, bad URL).
    #[error("resource unreachable: {0}")]
    Unreachable(Locator),

    /// The resource was fetched but its evaluation failed.
    #[error("evaluation of {locator} failed: {reason}")]
    Evaluation {
        /// The resource that failed to evaluate.
        locator: Locator,
        /// Human-readable cause.
        reason: String,
    },
}

/// Misuse of the script builder by the caller.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum InjectError {
    /// `commit` was called before a key was configured.
    #[error("script committed without a key")]
    MissingKey,

    /// `commit` was called before a locator was configured.
    #[error("script committed without a locator")]
    MissingLocator,
}
