//! Logging middleware for dispatch observability.

use missive_core::{BoxError, Envelope, Middleware, Next, Outcome};
use tracing::debug;

/// A [`Middleware`] that logs messages entering and leaving the pipeline.
///
/// Bind it against a base kind to observe every message of that kind, or
/// against a concrete type to watch a single flow.
///
/// # Example
///
/// ```rust,ignore
/// let catalog = catalog.register_middleware(
///     TypeIdentity::new("ops.CommandLog").services(kind::command()),
///     LoggingMiddleware::named("commands"),
/// );
/// ```
pub struct LoggingMiddleware {
    stage: &'static str,
}

impl LoggingMiddleware {
    /// Create a logging middleware with a default stage name.
    pub fn new() -> Self {
        Self { stage: "dispatch" }
    }

    /// Create a logging middleware with a custom stage name.
    ///
    /// The name identifies the pipeline stage in log output.
    pub fn named(stage: &'static str) -> Self {
        Self { stage }
    }
}

impl Default for LoggingMiddleware {
    fn default() -> Self {
        Self::new()
    }
}

impl Middleware for LoggingMiddleware {
    async fn handle(&self, message: Envelope, next: Next<'_>) -> Result<Outcome, BoxError> {
        debug!(stage = self.stage, identity = message.identity().key(), "entering pipeline");
        let outcome = next.run(message).await;
        match &outcome {
            Ok(_) => debug!(stage = self.stage, "pipeline completed"),
            Err(error) => debug!(stage = self.stage, %error, "pipeline failed"),
        }
        outcome
    }
}
