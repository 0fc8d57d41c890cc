//! # missive - typed in-process message dispatch
//!
//! A dispatcher for three message shapes - fire-and-forget **notifications**
//! (many handlers), **commands** and **queries** (exactly one handler,
//! returning a value) - wrapped in an ordered, hierarchy-aware middleware
//! pipeline.
//!
//! Routing is identity-driven: the registry is built once, at construction,
//! from declarative type-to-handler associations, and a message's declared
//! ancestor chain decides which middleware wrap it. Middleware bound against
//! a base kind (all commands, all queries, all notifications) applies to
//! every descendant type.
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use missive::{Catalog, Envelope, TypeIdentity, kind};
//!
//! let deduct = TypeIdentity::new("billing.Deduct").is_a(kind::command());
//!
//! let dispatcher = Catalog::new()
//!     .register_request(
//!         TypeIdentity::new("billing.DeductHandler").services(deduct.clone()),
//!         DeductHandler::default(),
//!     )
//!     .into_dispatcher()?;
//!
//! let reply = dispatcher.invoke(Envelope::new(deduct, 42u64)).await?;
//! ```
//!
//! Publishing defaults to the best-effort strategy, which collects handler
//! failures instead of propagating them:
//!
//! ```rust,ignore
//! let failures = dispatcher.publish(Envelope::new(ping, ())).await?;
//! let () = dispatcher
//!     .publish_with(Envelope::new(ping, ()), Sequential)
//!     .await
//!     .map(drop)?;
//! ```

#![deny(clippy::wildcard_imports)]
#![warn(missing_docs)]

mod catalog;
mod dispatcher;
pub mod fanout;
mod hierarchy;
pub mod logging;
mod pipeline;
mod registry;

pub use catalog::Catalog;
pub use dispatcher::Dispatcher;
pub use fanout::{BestEffort, FanoutStrategy, Parallel, ResolvedHandler, Sequential};
pub use logging::LoggingMiddleware;
pub use pipeline::Pipeline;
pub use registry::Registry;

pub use missive_core::{
    // Collaborator seams
    BindingSet,
    // Errors
    BoxError,
    BuildError,
    DispatchError,
    // Handler
    DynHandler,
    // Middleware
    DynMiddleware,
    // Message
    Envelope,
    Handler,
    HandlerBinding,
    HandlerFailure,
    Middleware,
    MiddlewareBinding,
    Next,
    // Pipeline values
    Outcome,
    Reply,
    Resolver,
    StepFuture,
    Terminal,
    // Identity
    TypeIdentity,
    kind,
};

/// Common imports for Missive.
///
/// # Usage
///
/// ```rust,ignore
/// use missive::prelude::*;
/// ```
pub mod prelude {
    pub use crate::{
        BestEffort,
        BoxError,
        Catalog,
        Dispatcher,
        Envelope,
        FanoutStrategy,
        Handler,
        HandlerFailure,
        Middleware,
        Next,
        Outcome,
        Parallel,
        Reply,
        Sequential,
        TypeIdentity,
        kind,
    };
}
