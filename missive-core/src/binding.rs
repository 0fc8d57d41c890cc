//! Collaborator seams: declared bindings and instance resolution.
//!
//! The dispatcher never instantiates handlers or middleware. At construction
//! it enumerates declared associations through [`BindingSet`]; at call time
//! it resolves identities to live instances through [`Resolver`]. Both seams
//! are supplied by an external collaborator (a DI container, a registration
//! catalog, a test fixture).

use std::sync::Arc;

use crate::handler::DynHandler;
use crate::identity::TypeIdentity;
use crate::middleware::DynMiddleware;

/// A declared association between a handler shape and the message types it
/// services.
///
/// Notification handlers may service several types with one instance; command
/// and query handlers service exactly one.
#[derive(Clone, Debug)]
pub struct HandlerBinding {
    /// The handler's own identity.
    pub handler: TypeIdentity,
    /// The message types the handler services.
    pub message_types: Vec<TypeIdentity>,
}

impl HandlerBinding {
    /// Derive the binding from the handler identity's associated-type
    /// metadata.
    pub fn of(handler: TypeIdentity) -> Self {
        let message_types = handler.associated().to_vec();
        Self {
            handler,
            message_types,
        }
    }
}

/// A declared association between a middleware shape and the message types
/// (or base kinds) it applies to.
#[derive(Clone, Debug)]
pub struct MiddlewareBinding {
    /// The middleware's own identity.
    pub middleware: TypeIdentity,
    /// The message types or base kinds this middleware applies to.
    pub message_types: Vec<TypeIdentity>,
}

impl MiddlewareBinding {
    /// Derive the binding from the middleware identity's associated-type
    /// metadata.
    pub fn of(middleware: TypeIdentity) -> Self {
        let message_types = middleware.associated().to_vec();
        Self {
            middleware,
            message_types,
        }
    }
}

/// Construction-time enumeration of every declared binding.
///
/// Consumed exactly once while wiring a dispatcher; never queried again.
pub trait BindingSet {
    /// All notification-handler bindings, in registration order.
    fn notification_handlers(&self) -> Vec<HandlerBinding>;

    /// All request-handler bindings (commands and queries share one table).
    fn request_handlers(&self) -> Vec<HandlerBinding>;

    /// All middleware bindings.
    fn middlewares(&self) -> Vec<MiddlewareBinding>;

    /// The single global execution order over every bound middleware
    /// identity. An identity bound but absent from this sequence fails
    /// construction.
    fn middleware_order(&self) -> Vec<TypeIdentity>;
}

/// Call-time resolution of a bound identity to its live instance.
///
/// Instances are resolved per dispatch call and are otherwise opaque to the
/// dispatcher; their lifecycle belongs to the collaborator. `None` for a
/// registered identity surfaces as a dispatch error naming the key.
pub trait Resolver: Send + Sync {
    /// Resolve a handler identity to its instance.
    fn handler(&self, identity: &TypeIdentity) -> Option<Arc<dyn DynHandler>>;

    /// Resolve a middleware identity to its instance.
    fn middleware(&self, identity: &TypeIdentity) -> Option<Arc<dyn DynMiddleware>>;
}
