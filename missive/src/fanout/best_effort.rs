use futures::future;
use missive_core::{BoxError, Envelope, HandlerFailure};

use super::traits::{FanoutStrategy, ResolvedHandler};

/// A collecting concurrent fan-out strategy, the default for `publish`.
///
/// Starts every handler in registration order and runs them concurrently.
/// Each failure is caught and collected instead of propagating, so the
/// publish itself always succeeds; the publisher receives the collected
/// failures as its result. Zero handlers yield an empty list.
#[derive(Debug, Default, Clone, Copy)]
pub struct BestEffort;

impl FanoutStrategy for BestEffort {
    async fn deliver(
        &self,
        notification: &Envelope,
        handlers: &[ResolvedHandler],
    ) -> Result<Vec<HandlerFailure>, BoxError> {
        let outcomes =
            future::join_all(handlers.iter().map(|handler| handler.call(notification))).await;
        Ok(outcomes.into_iter().filter_map(Result::err).collect())
    }
}
