use std::{future::Future, sync::Arc};

use missive_core::{BoxError, DynHandler, Envelope, HandlerFailure, TypeIdentity};

/// A notification handler resolved to its live instance, tagged with the
/// identity it was registered under so failures stay attributable.
#[derive(Clone)]
pub struct ResolvedHandler {
    /// The handler's identity.
    pub identity: TypeIdentity,
    /// The live instance.
    pub handler: Arc<dyn DynHandler>,
}

impl ResolvedHandler {
    /// Invoke the handler, tagging any failure with its identity.
    pub async fn call(&self, notification: &Envelope) -> Result<(), HandlerFailure> {
        match self.handler.handle_dyn(notification).await {
            Ok(_) => Ok(()),
            Err(error) => Err(HandlerFailure {
                handler: self.identity.clone(),
                error,
            }),
        }
    }
}

/// Strategy executing the terminal fan-out of a notification publish.
///
/// Invoked once per publish with the full resolved handler list, inside the
/// middleware pipeline. Fail-fast strategies surface the first failure as an
/// error; collecting strategies return the failures as a value.
pub trait FanoutStrategy: Send + Sync {
    /// Deliver `notification` to every resolved handler.
    fn deliver(
        &self,
        notification: &Envelope,
        handlers: &[ResolvedHandler],
    ) -> impl Future<Output = Result<Vec<HandlerFailure>, BoxError>> + Send;
}
