//! The middleware seam: before/after interception via a `next` continuation.

use std::{future::Future, pin::Pin, sync::Arc};

use crate::{error::BoxError, message::Envelope, response::Outcome};

/// Future type produced by every pipeline step.
pub type StepFuture<'a> = Pin<Box<dyn Future<Output = Result<Outcome, BoxError>> + Send + 'a>>;

/// The innermost step of a pipeline.
///
/// For an `invoke` this calls the resolved request handler; for a `publish`
/// it fans out to the notification handlers under the chosen strategy.
pub type Terminal = Box<dyn Fn(Envelope) -> StepFuture<'static> + Send + Sync>;

/// A cross-cutting interceptor wrapping handler execution.
///
/// Each middleware receives the in-flight message and the [`Next`]
/// continuation for the rest of the pipeline. Code before `next.run(..)` is
/// the before-phase, code after it the after-phase; middleware nest strictly,
/// so after-phases unwind in LIFO order. A middleware may decline to call
/// `next` and supply the [`Outcome`] itself, short-circuiting everything
/// further in.
///
/// # Static vs Dynamic Dispatch
///
/// This trait uses native `async fn` for static dispatch. Pipelines, which
/// hold runtime-resolved chains, use [`DynMiddleware`].
#[diagnostic::on_unimplemented(
    message = "`{Self}` cannot act as a dispatch middleware",
    label = "missing `Middleware` implementation",
    note = "Middleware must implement `handle`, forwarding to `next` to proceed."
)]
pub trait Middleware: Send + Sync + 'static {
    /// Intercept one message on its way to the terminal step.
    fn handle(
        &self,
        message: Envelope,
        next: Next<'_>,
    ) -> impl Future<Output = Result<Outcome, BoxError>> + Send;
}

/// Dynamic object-safe version of [`Middleware`].
pub trait DynMiddleware: Send + Sync + 'static {
    /// Intercept one message (dynamic dispatch version).
    fn handle_dyn<'a>(&'a self, message: Envelope, next: Next<'a>) -> StepFuture<'a>;
}

// Blanket implementation: any Middleware is a DynMiddleware.
impl<T: Middleware> DynMiddleware for T {
    fn handle_dyn<'a>(&'a self, message: Envelope, next: Next<'a>) -> StepFuture<'a> {
        Box::pin(self.handle(message, next))
    }
}

/// The continuation handed to a middleware.
///
/// Holds the not-yet-run remainder of the chain and the terminal step.
/// Running it consumes it: a middleware proceeds at most once.
pub struct Next<'a> {
    chain: &'a [Arc<dyn DynMiddleware>],
    terminal: &'a Terminal,
}

impl<'a> Next<'a> {
    /// A continuation over `chain`, ending in `terminal`.
    pub fn new(chain: &'a [Arc<dyn DynMiddleware>], terminal: &'a Terminal) -> Self {
        Self { chain, terminal }
    }

    /// Run the rest of the pipeline with `message`.
    pub fn run(self, message: Envelope) -> StepFuture<'a> {
        match self.chain.split_first() {
            Some((head, rest)) => head.handle_dyn(
                message,
                Next {
                    chain: rest,
                    terminal: self.terminal,
                },
            ),
            None => (self.terminal)(message),
        }
    }
}
