//! # missive-core
//!
//! Core traits and data model for the Missive in-process message dispatcher.
//!
//! This crate has minimal dependencies and is designed to be imported by
//! collaborators (DI containers, binding catalogs) that implement the
//! [`BindingSet`] and [`Resolver`] seams without pulling in the full
//! `missive` dispatcher.
//!
//! # Model
//!
//! Three message shapes share one dispatcher:
//!
//! - **Notifications** - fire-and-forget, zero or more handlers
//! - **Commands** and **Queries** - request/response, exactly one handler
//!
//! Routing is identity-driven rather than type-parameter-driven: every
//! message, handler, and middleware shape carries a [`TypeIdentity`], and a
//! message's declared ancestor chain decides which middleware wrap it. The
//! pieces layer as follows:
//!
//! ## Identity ([`TypeIdentity`])
//!
//! An opaque unique token with two kinds of metadata: the is-a chain of a
//! message type, and the associated message types of a handler or middleware
//! shape. The [`kind`] module provides the well-known base kinds.
//!
//! ## Message ([`Envelope`])
//!
//! The in-flight unit: identity, creation timestamp, shared type-erased
//! payload.
//!
//! ## Seams ([`Handler`], [`Middleware`], [`BindingSet`], [`Resolver`])
//!
//! Handlers terminate a pipeline; middleware wrap it through a [`Next`]
//! continuation. Both come in a native-async flavor for implementors and an
//! object-safe `Dyn*` flavor for registries, connected by blanket impls.
//!
//! ## Pipeline values ([`Reply`], [`Outcome`])
//!
//! Commands and queries reply through the type-erased [`Reply`];
//! notification fan-outs resolve to the list of collected
//! [`HandlerFailure`]s. [`Outcome`] is the union middleware observe.
//!
//! # Error Types
//!
//! - [`BuildError`] - construction-time wiring failures (fail fast)
//! - [`DispatchError`] - per-call dispatch failures

#![deny(clippy::wildcard_imports)]
#![warn(missing_docs)]

mod binding;
mod error;
mod handler;
mod identity;
mod message;
mod middleware;
mod response;

// Re-exports
pub use binding::{BindingSet, HandlerBinding, MiddlewareBinding, Resolver};
pub use error::{BoxError, BuildError, DispatchError, HandlerFailure};
pub use handler::{DynHandler, Handler};
pub use identity::{TypeIdentity, kind};
pub use message::Envelope;
pub use middleware::{DynMiddleware, Middleware, Next, StepFuture, Terminal};
pub use response::{Outcome, Reply};
