//! An in-memory binding and resolution collaborator.
//!
//! Production deployments typically back the [`BindingSet`] and [`Resolver`]
//! seams with a DI container; the [`Catalog`] is the batteries-included
//! alternative for tests and for applications that register everything by
//! hand.

use std::sync::Arc;

use missive_core::{
    BindingSet, BuildError, DynHandler, DynMiddleware, Handler, HandlerBinding, Middleware,
    MiddlewareBinding, Resolver, TypeIdentity,
};

use crate::dispatcher::Dispatcher;
use crate::registry::Registry;

/// A simple in-memory [`BindingSet`] and [`Resolver`].
///
/// Bindings are derived from each registered identity's associated-type
/// metadata. Middleware registration order doubles as the global execution
/// order unless [`with_order`](Catalog::with_order) overrides it.
///
/// # Example
///
/// ```rust,ignore
/// let dispatcher = Catalog::new()
///     .register_request(
///         TypeIdentity::new("billing.DeductHandler").services(deduct.clone()),
///         DeductHandler::default(),
///     )
///     .register_middleware(
///         TypeIdentity::new("billing.Audit").services(kind::command()),
///         AuditMiddleware::default(),
///     )
///     .into_dispatcher()?;
/// ```
#[derive(Default)]
pub struct Catalog {
    notification_handlers: Vec<(HandlerBinding, Arc<dyn DynHandler>)>,
    request_handlers: Vec<(HandlerBinding, Arc<dyn DynHandler>)>,
    middlewares: Vec<(MiddlewareBinding, Arc<dyn DynMiddleware>)>,
    order: Option<Vec<TypeIdentity>>,
}

impl Catalog {
    /// Create an empty catalog.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a notification handler under the message types `identity`
    /// declares it services.
    pub fn register_notification<H: Handler>(mut self, identity: TypeIdentity, handler: H) -> Self {
        self.notification_handlers
            .push((HandlerBinding::of(identity), Arc::new(handler)));
        self
    }

    /// Register a command or query handler under the message type `identity`
    /// declares it services.
    pub fn register_request<H: Handler>(mut self, identity: TypeIdentity, handler: H) -> Self {
        self.request_handlers
            .push((HandlerBinding::of(identity), Arc::new(handler)));
        self
    }

    /// Register a middleware under the message types (or base kinds)
    /// `identity` declares it services.
    pub fn register_middleware<M: Middleware>(
        mut self,
        identity: TypeIdentity,
        middleware: M,
    ) -> Self {
        self.middlewares
            .push((MiddlewareBinding::of(identity), Arc::new(middleware)));
        self
    }

    /// Replace the execution order derived from registration order.
    pub fn with_order(mut self, order: Vec<TypeIdentity>) -> Self {
        self.order = Some(order);
        self
    }

    /// Wire a dispatcher over this catalog, consuming it as the resolver.
    pub fn into_dispatcher(self) -> Result<Dispatcher<Catalog>, BuildError> {
        let registry = Registry::build(&self)?;
        Ok(Dispatcher::from_parts(registry, Arc::new(self)))
    }
}

impl BindingSet for Catalog {
    fn notification_handlers(&self) -> Vec<HandlerBinding> {
        self.notification_handlers
            .iter()
            .map(|(binding, _)| binding.clone())
            .collect()
    }

    fn request_handlers(&self) -> Vec<HandlerBinding> {
        self.request_handlers
            .iter()
            .map(|(binding, _)| binding.clone())
            .collect()
    }

    fn middlewares(&self) -> Vec<MiddlewareBinding> {
        self.middlewares
            .iter()
            .map(|(binding, _)| binding.clone())
            .collect()
    }

    fn middleware_order(&self) -> Vec<TypeIdentity> {
        match &self.order {
            Some(order) => order.clone(),
            None => self
                .middlewares
                .iter()
                .map(|(binding, _)| binding.middleware.clone())
                .collect(),
        }
    }
}

impl Resolver for Catalog {
    fn handler(&self, identity: &TypeIdentity) -> Option<Arc<dyn DynHandler>> {
        self.notification_handlers
            .iter()
            .chain(&self.request_handlers)
            .find(|(binding, _)| binding.handler == *identity)
            .map(|(_, handler)| Arc::clone(handler))
    }

    fn middleware(&self, identity: &TypeIdentity) -> Option<Arc<dyn DynMiddleware>> {
        self.middlewares
            .iter()
            .find(|(binding, _)| binding.middleware == *identity)
            .map(|(_, middleware)| Arc::clone(middleware))
    }
}
