use missive_core::{BoxError, Envelope, HandlerFailure};

use super::traits::{FanoutStrategy, ResolvedHandler};

/// A sequential fan-out strategy.
///
/// Invokes handlers one at a time, awaiting each before starting the next,
/// preserving registration order. The first failure aborts the remaining
/// handlers and propagates.
#[derive(Debug, Default, Clone, Copy)]
pub struct Sequential;

impl FanoutStrategy for Sequential {
    async fn deliver(
        &self,
        notification: &Envelope,
        handlers: &[ResolvedHandler],
    ) -> Result<Vec<HandlerFailure>, BoxError> {
        for handler in handlers {
            handler.call(notification).await?;
        }
        Ok(Vec::new())
    }
}
