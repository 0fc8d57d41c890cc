//! Error types for Missive.
//!
//! Two distinct failure phases get two distinct types:
//!
//! - [`BuildError`] - malformed bindings detected while wiring a dispatcher;
//!   the dispatcher never becomes usable
//! - [`DispatchError`] - failures surfaced by a single `invoke` or `publish`
//!   call
//!
//! [`HandlerFailure`] is the per-handler unit a best-effort publish collects.

use thiserror::Error;

use crate::identity::TypeIdentity;

/// A boxed error type for dynamic error handling.
pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Errors raised while wiring a dispatcher from its declared bindings.
///
/// All of these are terminal: construction fails fast and no dispatcher is
/// returned.
#[derive(Error, Debug)]
pub enum BuildError {
    /// A notification handler was bound without naming a message type.
    #[error("notification handler `{handler}` declares no message type association")]
    UnassociatedNotificationHandler {
        /// The offending handler.
        handler: TypeIdentity,
    },

    /// A request handler was bound without naming a message type.
    #[error("request handler `{handler}` declares no message type association")]
    UnassociatedRequestHandler {
        /// The offending handler.
        handler: TypeIdentity,
    },

    /// Two request handlers were bound to the same command or query type.
    #[error(
        "duplicate request handler for `{message_type}`: `{second}` conflicts with already registered `{first}`"
    )]
    DuplicateRequestHandler {
        /// The contested message type.
        message_type: TypeIdentity,
        /// The handler registered first.
        first: TypeIdentity,
        /// The handler whose registration collided.
        second: TypeIdentity,
    },

    /// A middleware was bound without naming any message type.
    #[error("middleware `{middleware}` declares no message type association")]
    UnassociatedMiddleware {
        /// The offending middleware.
        middleware: TypeIdentity,
    },

    /// Bound middleware identities are missing from the execution order.
    #[error("middleware missing from the execution order: {keys}")]
    UnorderedMiddleware {
        /// Every offending identity key, joined.
        keys: String,
    },

    /// A declared ancestor chain loops back on itself.
    #[error("type hierarchy cycle through `{key}`")]
    CyclicHierarchy {
        /// The key at which the cycle closes.
        key: String,
    },
}

/// Errors surfaced by a single dispatch call.
#[derive(Error, Debug)]
pub enum DispatchError {
    /// `invoke` was called for a request type with no registered handler.
    ///
    /// Terminal and non-retryable: no partial work has occurred.
    #[error("no handler registered for request type `{key}`")]
    HandlerNotFound {
        /// The request type's key.
        key: String,
    },

    /// The resolver returned no live instance for a registered identity.
    #[error("no instance resolvable for identity `{key}`")]
    Unresolvable {
        /// The unresolvable identity's key.
        key: String,
    },

    /// A handler or middleware failure aborted the pipeline.
    #[error("dispatch pipeline failed: {0}")]
    Failed(BoxError),
}

/// A single notification handler's failure, tagged with the identity of the
/// handler that produced it.
///
/// Best-effort publishes collect these; sequential and parallel publishes
/// propagate the first one as the pipeline failure.
#[derive(Error, Debug)]
#[error("handler `{handler}` failed: {error}")]
pub struct HandlerFailure {
    /// The handler that failed.
    pub handler: TypeIdentity,
    /// The error it produced.
    pub error: BoxError,
}

// Convenience conversions
impl From<BoxError> for DispatchError {
    fn from(error: BoxError) -> Self {
        DispatchError::Failed(error)
    }
}
