//! The in-flight message envelope.

use std::any::Any;
use std::fmt;
use std::sync::Arc;
use std::time::SystemTime;

use crate::identity::TypeIdentity;

/// A message instance travelling through the dispatcher.
///
/// Carries the declared [`TypeIdentity`] the registry routes on, a creation
/// timestamp, and a type-erased payload. Cloning is cheap; the payload is
/// shared, never copied, so a notification fanned out to many handlers hands
/// each the same payload.
#[derive(Clone)]
pub struct Envelope {
    identity: TypeIdentity,
    created_at: SystemTime,
    payload: Arc<dyn Any + Send + Sync>,
}

impl Envelope {
    /// Wrap `payload` as a message of type `identity`, stamped with the
    /// current time.
    pub fn new<P: Send + Sync + 'static>(identity: TypeIdentity, payload: P) -> Self {
        Self {
            identity,
            created_at: SystemTime::now(),
            payload: Arc::new(payload),
        }
    }

    /// The declared type of this message.
    pub fn identity(&self) -> &TypeIdentity {
        &self.identity
    }

    /// When this envelope was created.
    pub fn created_at(&self) -> SystemTime {
        self.created_at
    }

    /// Borrow the payload as `P`, if that is what it is.
    pub fn payload<P: 'static>(&self) -> Option<&P> {
        self.payload.downcast_ref()
    }
}

impl fmt::Debug for Envelope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Envelope")
            .field("identity", &self.identity)
            .field("created_at", &self.created_at)
            .finish_non_exhaustive()
    }
}
