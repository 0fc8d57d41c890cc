//! Registry construction from declared bindings.
//!
//! The registry is built exactly once, synchronously, when a dispatcher is
//! wired, and is immutable from then on. Malformed bindings fail
//! construction; nothing is registered lazily or repaired at call time.

use std::collections::{HashMap, HashSet};

use missive_core::{BindingSet, BuildError, TypeIdentity};

use crate::hierarchy;

/// The frozen lookup tables a dispatcher routes with.
///
/// Three tables keyed by message-type key: notification handlers (ordered,
/// all invoked), the single request handler (commands and queries share it),
/// and the middleware bound directly to a type. The validated global
/// middleware execution order rides along.
///
/// Construction is pure given its inputs: identical bindings yield an equal
/// registry.
#[derive(Debug, Default, PartialEq)]
pub struct Registry {
    notification_handlers: HashMap<String, Vec<TypeIdentity>>,
    request_handlers: HashMap<String, TypeIdentity>,
    middleware: HashMap<String, Vec<TypeIdentity>>,
    order: Vec<TypeIdentity>,
}

impl Registry {
    /// Consume the declared bindings into a frozen registry, failing fast on
    /// the first malformed binding.
    pub fn build(bindings: &dyn BindingSet) -> Result<Self, BuildError> {
        let mut message_types: Vec<TypeIdentity> = Vec::new();

        let mut notification_handlers: HashMap<String, Vec<TypeIdentity>> = HashMap::new();
        for binding in bindings.notification_handlers() {
            if binding.message_types.is_empty() {
                return Err(BuildError::UnassociatedNotificationHandler {
                    handler: binding.handler,
                });
            }
            for message_type in &binding.message_types {
                notification_handlers
                    .entry(message_type.key().to_owned())
                    .or_default()
                    .push(binding.handler.clone());
            }
            message_types.extend(binding.message_types);
        }

        let mut request_handlers: HashMap<String, TypeIdentity> = HashMap::new();
        for binding in bindings.request_handlers() {
            if binding.message_types.is_empty() {
                return Err(BuildError::UnassociatedRequestHandler {
                    handler: binding.handler,
                });
            }
            for message_type in &binding.message_types {
                if let Some(first) = request_handlers.get(message_type.key()) {
                    return Err(BuildError::DuplicateRequestHandler {
                        message_type: message_type.clone(),
                        first: first.clone(),
                        second: binding.handler,
                    });
                }
                request_handlers.insert(message_type.key().to_owned(), binding.handler.clone());
            }
            message_types.extend(binding.message_types);
        }

        let mut middleware: HashMap<String, Vec<TypeIdentity>> = HashMap::new();
        let mut bound: Vec<TypeIdentity> = Vec::new();
        for binding in bindings.middlewares() {
            if binding.message_types.is_empty() {
                return Err(BuildError::UnassociatedMiddleware {
                    middleware: binding.middleware,
                });
            }
            for message_type in &binding.message_types {
                middleware
                    .entry(message_type.key().to_owned())
                    .or_default()
                    .push(binding.middleware.clone());
            }
            message_types.extend(binding.message_types);
            bound.push(binding.middleware);
        }

        let order = bindings.middleware_order();
        let ordered: HashSet<&str> = order.iter().map(TypeIdentity::key).collect();
        let mut missing: Vec<&str> = Vec::new();
        for identity in &bound {
            if !ordered.contains(identity.key()) && !missing.contains(&identity.key()) {
                missing.push(identity.key());
            }
        }
        if !missing.is_empty() {
            let keys = missing
                .iter()
                .map(|key| format!("`{key}`"))
                .collect::<Vec<_>>()
                .join(", ");
            return Err(BuildError::UnorderedMiddleware { keys });
        }

        for message_type in &message_types {
            hierarchy::ensure_acyclic(message_type)?;
        }

        Ok(Self {
            notification_handlers,
            request_handlers,
            middleware,
            order,
        })
    }

    /// The handlers registered for a notification type, in registration
    /// order. Empty when none are registered, which is a valid publish
    /// target.
    pub fn notification_handlers(&self, key: &str) -> &[TypeIdentity] {
        self.notification_handlers
            .get(key)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// The single handler registered for a command or query type.
    pub fn request_handler(&self, key: &str) -> Option<&TypeIdentity> {
        self.request_handlers.get(key)
    }

    /// The middleware bound directly to a type key, not counting what the
    /// type inherits from ancestors.
    pub fn middleware_for(&self, key: &str) -> &[TypeIdentity] {
        self.middleware.get(key).map(Vec::as_slice).unwrap_or(&[])
    }

    /// The validated global middleware execution order.
    pub fn order(&self) -> &[TypeIdentity] {
        &self.order
    }
}
