#![allow(dead_code)]

use std::sync::{Arc, Mutex};

use missive::{BoxError, Envelope, Handler, Middleware, Next, Outcome, Reply, TypeIdentity, kind};

// ============================================================================
// Test Message Types
// ============================================================================

pub fn ping() -> TypeIdentity {
    TypeIdentity::new("test.Ping").is_a(kind::notification())
}

pub fn pong() -> TypeIdentity {
    TypeIdentity::new("test.Pong").is_a(kind::notification())
}

pub fn deduct() -> TypeIdentity {
    TypeIdentity::new("test.Deduct").is_a(kind::command())
}

pub fn balance() -> TypeIdentity {
    TypeIdentity::new("test.Balance").is_a(kind::query())
}

/// A handler or middleware identity servicing one message type.
pub fn shape(name: &'static str, services: TypeIdentity) -> TypeIdentity {
    TypeIdentity::new(name).services(services)
}

pub fn effect_log() -> Arc<Mutex<Vec<String>>> {
    Arc::new(Mutex::new(Vec::new()))
}

// ============================================================================
// Test Handlers and Middleware
// ============================================================================

/// Appends its name to a shared effect log and succeeds.
pub struct RecordingHandler {
    pub name: &'static str,
    pub log: Arc<Mutex<Vec<String>>>,
}

impl Handler for RecordingHandler {
    async fn handle(&self, _message: &Envelope) -> Result<Reply, BoxError> {
        self.log.lock().unwrap().push(self.name.to_owned());
        Ok(Reply::none())
    }
}

/// Appends its name to a shared effect log, then fails.
pub struct FailingHandler {
    pub name: &'static str,
    pub log: Arc<Mutex<Vec<String>>>,
}

impl Handler for FailingHandler {
    async fn handle(&self, _message: &Envelope) -> Result<Reply, BoxError> {
        self.log.lock().unwrap().push(self.name.to_owned());
        Err(format!("{} refused", self.name).into())
    }
}

/// Succeeds without observable effects.
pub struct NoopHandler;

impl Handler for NoopHandler {
    async fn handle(&self, _message: &Envelope) -> Result<Reply, BoxError> {
        Ok(Reply::none())
    }
}

/// Records its before and after phases around `next`.
pub struct TraceMiddleware {
    pub name: &'static str,
    pub log: Arc<Mutex<Vec<String>>>,
}

impl Middleware for TraceMiddleware {
    async fn handle(&self, message: Envelope, next: Next<'_>) -> Result<Outcome, BoxError> {
        self.log.lock().unwrap().push(format!("{}:before", self.name));
        let outcome = next.run(message).await;
        self.log.lock().unwrap().push(format!("{}:after", self.name));
        outcome
    }
}

/// Forwards to `next` without observable effects.
pub struct NoopMiddleware;

impl Middleware for NoopMiddleware {
    async fn handle(&self, message: Envelope, next: Next<'_>) -> Result<Outcome, BoxError> {
        next.run(message).await
    }
}
