//! The handler seam: the terminal point of a dispatch pipeline.

use std::{future::Future, pin::Pin};

use crate::{error::BoxError, message::Envelope, response::Reply};

/// A handler servicing one or more message types.
///
/// Handlers are the endpoint where business logic executes. Command and query
/// handlers return a value through [`Reply`]; notification handlers return
/// [`Reply::none`], which the publisher never sees.
///
/// Which messages a handler receives is not decided here: the registry routes
/// on the message types declared by the handler's bound
/// [`TypeIdentity`](crate::TypeIdentity).
///
/// # Static vs Dynamic Dispatch
///
/// This trait uses native `async fn` for static dispatch. Registries and
/// resolvers, which need runtime polymorphism, use [`DynHandler`].
#[diagnostic::on_unimplemented(
    message = "`{Self}` cannot act as a message handler",
    label = "missing `Handler` implementation",
    note = "Handlers must implement `handle` for the incoming `Envelope`."
)]
pub trait Handler: Send + Sync + 'static {
    /// Handle one message, returning its reply or the failure to surface.
    fn handle(&self, message: &Envelope) -> impl Future<Output = Result<Reply, BoxError>> + Send;
}

/// Dynamic object-safe version of [`Handler`].
///
/// This is what resolvers hand out and what the dispatcher invokes.
pub trait DynHandler: Send + Sync + 'static {
    /// Handle one message (dynamic dispatch version).
    fn handle_dyn<'a>(
        &'a self,
        message: &'a Envelope,
    ) -> Pin<Box<dyn Future<Output = Result<Reply, BoxError>> + Send + 'a>>;
}

// Blanket implementation: any Handler is a DynHandler.
impl<T: Handler> DynHandler for T {
    fn handle_dyn<'a>(
        &'a self,
        message: &'a Envelope,
    ) -> Pin<Box<dyn Future<Output = Result<Reply, BoxError>> + Send + 'a>> {
        Box::pin(self.handle(message))
    }
}
