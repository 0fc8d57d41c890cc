//! Type identity and hierarchy metadata.

use std::fmt;
use std::hash::{Hash, Hasher};
use std::sync::Arc;

/// An immutable, globally unique token for a message, handler, or middleware
/// shape.
///
/// Identity is determined by [`key`](TypeIdentity::key) alone: two values
/// carrying the same key name the same shape, whatever metadata they carry.
/// Equality and hashing follow that rule.
///
/// The metadata serves two purposes:
///
/// - [`parents`](TypeIdentity::parents) declares the "is-a" chain of a message
///   type. A concrete notification declares it is-a [`kind::notification`];
///   middleware bound against an ancestor applies to every descendant. A type
///   may declare several unrelated ancestors at once.
/// - [`associated`](TypeIdentity::associated) declares the message types a
///   handler or middleware shape services. The registry reads this list to
///   discover what a bound shape applies to.
///
/// # Example
///
/// ```rust,ignore
/// let deduct = TypeIdentity::new("billing.Deduct").is_a(kind::command());
/// let handler = TypeIdentity::new("billing.DeductHandler").services(deduct);
/// ```
#[derive(Clone)]
pub struct TypeIdentity {
    key: Arc<str>,
    parents: Vec<TypeIdentity>,
    associated: Vec<TypeIdentity>,
}

impl TypeIdentity {
    /// Create an identity with no ancestors and no associated types.
    pub fn new(key: impl Into<Arc<str>>) -> Self {
        Self {
            key: key.into(),
            parents: Vec::new(),
            associated: Vec::new(),
        }
    }

    /// Declare that this type is-a `parent`.
    pub fn is_a(mut self, parent: TypeIdentity) -> Self {
        self.parents.push(parent);
        self
    }

    /// Declare that this shape services `message_type`.
    pub fn services(mut self, message_type: TypeIdentity) -> Self {
        self.associated.push(message_type);
        self
    }

    /// The unique, human-readable name of this shape.
    pub fn key(&self) -> &str {
        &self.key
    }

    /// The declared ancestors of this type.
    pub fn parents(&self) -> &[TypeIdentity] {
        &self.parents
    }

    /// The message types this shape services.
    pub fn associated(&self) -> &[TypeIdentity] {
        &self.associated
    }
}

impl PartialEq for TypeIdentity {
    fn eq(&self, other: &Self) -> bool {
        self.key == other.key
    }
}

impl Eq for TypeIdentity {}

impl Hash for TypeIdentity {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.key.hash(state);
    }
}

impl fmt::Display for TypeIdentity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.key)
    }
}

impl fmt::Debug for TypeIdentity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "TypeIdentity({})", self.key)
    }
}

/// Well-known base kinds concrete message types declare as ancestors.
///
/// Binding middleware against one of these applies it to every message of
/// that kind; binding against several spans kinds (e.g. all commands *and*
/// all queries).
pub mod kind {
    use super::TypeIdentity;

    /// The base kind of fire-and-forget notifications.
    pub fn notification() -> TypeIdentity {
        TypeIdentity::new("Notification")
    }

    /// The base kind of commands.
    pub fn command() -> TypeIdentity {
        TypeIdentity::new("Command")
    }

    /// The base kind of queries.
    pub fn query() -> TypeIdentity {
        TypeIdentity::new("Query")
    }
}
