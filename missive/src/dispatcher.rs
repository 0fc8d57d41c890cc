//! The dispatcher: construction-time wiring and the two dispatch entry
//! points.

use std::sync::Arc;

use missive_core::{
    BindingSet, BuildError, DispatchError, DynHandler, Envelope, HandlerFailure, Outcome, Reply,
    Resolver, Terminal, TypeIdentity,
};
use tracing::{debug, warn};

use crate::fanout::{BestEffort, FanoutStrategy, ResolvedHandler};
use crate::hierarchy;
use crate::pipeline::{self, Pipeline};
use crate::registry::Registry;

/// A wired message dispatcher.
///
/// Construction consumes the declared bindings once and freezes the
/// [`Registry`]; nothing can be (un)registered afterwards. Handler and
/// middleware instances are resolved per call through the [`Resolver`]
/// collaborator.
///
/// All dispatch methods take `&self`; the dispatcher is cheap to share
/// behind an `Arc`.
pub struct Dispatcher<R> {
    registry: Registry,
    resolver: Arc<R>,
}

impl<R> std::fmt::Debug for Dispatcher<R> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Dispatcher")
            .field("registry", &self.registry)
            .finish_non_exhaustive()
    }
}

impl<R: Resolver + 'static> Dispatcher<R> {
    /// Wire a dispatcher from declared bindings, failing fast on malformed
    /// input.
    pub fn new(bindings: &dyn BindingSet, resolver: R) -> Result<Self, BuildError> {
        Ok(Self {
            registry: Registry::build(bindings)?,
            resolver: Arc::new(resolver),
        })
    }

    pub(crate) fn from_parts(registry: Registry, resolver: Arc<R>) -> Self {
        Self { registry, resolver }
    }

    /// The frozen registry this dispatcher routes with.
    pub fn registry(&self) -> &Registry {
        &self.registry
    }

    /// Dispatch a command or query to its single registered handler, through
    /// the middleware applicable to the message's type hierarchy.
    ///
    /// Fails without partial work when no handler is registered for the
    /// message's type. A handler or middleware failure anywhere in the chain
    /// propagates as [`DispatchError::Failed`].
    pub async fn invoke(&self, message: Envelope) -> Result<Reply, DispatchError> {
        let key = message.identity().key().to_owned();
        let handler_id = self
            .registry
            .request_handler(&key)
            .ok_or_else(|| DispatchError::HandlerNotFound { key: key.clone() })?;
        let handler = self.resolve_handler(handler_id)?;
        debug!(request = %key, handler = handler_id.key(), "invoking request handler");

        let terminal: Terminal = Box::new(move |message: Envelope| {
            let handler = Arc::clone(&handler);
            Box::pin(async move {
                let reply = handler.handle_dyn(&message).await?;
                Ok(Outcome::Reply(reply))
            })
        });
        let pipeline = self.assemble(message.identity(), terminal)?;

        match pipeline.run(message).await {
            Ok(outcome) => Ok(outcome.into_reply()),
            Err(error) => Err(DispatchError::Failed(error)),
        }
    }

    /// Publish a notification under the default [`BestEffort`] strategy.
    ///
    /// Every individual handler failure is caught and returned; the publish
    /// itself succeeds regardless of how many handlers failed. Zero
    /// registered handlers is a valid, silently-completed publish.
    pub async fn publish(
        &self,
        notification: Envelope,
    ) -> Result<Vec<HandlerFailure>, DispatchError> {
        self.publish_with(notification, BestEffort).await
    }

    /// Publish a notification under an explicit fan-out strategy.
    ///
    /// [`Sequential`](crate::fanout::Sequential) and
    /// [`Parallel`](crate::fanout::Parallel) return an empty list on success
    /// and surface the first handler failure as [`DispatchError::Failed`];
    /// [`BestEffort`] returns every collected failure.
    pub async fn publish_with<S>(
        &self,
        notification: Envelope,
        strategy: S,
    ) -> Result<Vec<HandlerFailure>, DispatchError>
    where
        S: FanoutStrategy + 'static,
    {
        let key = notification.identity().key().to_owned();
        let handlers = self
            .registry
            .notification_handlers(&key)
            .iter()
            .map(|identity| {
                Ok(ResolvedHandler {
                    identity: identity.clone(),
                    handler: self.resolve_handler(identity)?,
                })
            })
            .collect::<Result<Vec<_>, DispatchError>>()?;
        debug!(notification = %key, handlers = handlers.len(), "publishing notification");

        let strategy = Arc::new(strategy);
        let terminal: Terminal = Box::new(move |message: Envelope| {
            let handlers = handlers.clone();
            let strategy = Arc::clone(&strategy);
            Box::pin(async move {
                let failures = strategy.deliver(&message, &handlers).await?;
                Ok(Outcome::Failures(failures))
            })
        });
        let pipeline = self.assemble(notification.identity(), terminal)?;

        match pipeline.run(notification).await {
            Ok(outcome) => {
                let failures = outcome.into_failures();
                if !failures.is_empty() {
                    warn!(notification = %key, failed = failures.len(), "notification handlers failed");
                }
                Ok(failures)
            }
            Err(error) => Err(DispatchError::Failed(error)),
        }
    }

    fn resolve_handler(&self, identity: &TypeIdentity) -> Result<Arc<dyn DynHandler>, DispatchError> {
        self.resolver
            .handler(identity)
            .ok_or_else(|| DispatchError::Unresolvable {
                key: identity.key().to_owned(),
            })
    }

    /// Resolve the middleware applicable to `message_type`, sequence it by
    /// the global execution order, and wrap it around `terminal`.
    fn assemble(
        &self,
        message_type: &TypeIdentity,
        terminal: Terminal,
    ) -> Result<Pipeline, DispatchError> {
        let wanted = hierarchy::inherited_middleware(&self.registry, message_type);
        let steps = pipeline::execution_order(self.registry.order(), &wanted)
            .map(|identity| {
                self.resolver
                    .middleware(identity)
                    .ok_or_else(|| DispatchError::Unresolvable {
                        key: identity.key().to_owned(),
                    })
            })
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Pipeline::new(steps, terminal))
    }
}
