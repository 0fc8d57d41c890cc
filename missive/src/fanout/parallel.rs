use futures::future;
use missive_core::{BoxError, Envelope, HandlerFailure};

use super::traits::{FanoutStrategy, ResolvedHandler};

/// A fail-fast concurrent fan-out strategy.
///
/// Starts every handler in registration order and runs them concurrently.
/// The first failure, in completion order, propagates; failures from other
/// in-flight handlers are not collected.
#[derive(Debug, Default, Clone, Copy)]
pub struct Parallel;

impl FanoutStrategy for Parallel {
    async fn deliver(
        &self,
        notification: &Envelope,
        handlers: &[ResolvedHandler],
    ) -> Result<Vec<HandlerFailure>, BoxError> {
        future::try_join_all(handlers.iter().map(|handler| handler.call(notification))).await?;
        Ok(Vec::new())
    }
}
