//! Notification fan-out strategies.
//!
//! The terminal step of a `publish` dispatches to the (possibly many)
//! registered handlers under one of these strategies; the middleware
//! pipeline wraps the whole fan-out, not each handler.

pub(crate) mod traits;

pub(crate) mod best_effort;
pub(crate) mod parallel;
pub(crate) mod sequential;

// Expose strategies and the trait
pub use best_effort::BestEffort;
pub use parallel::Parallel;
pub use sequential::Sequential;
pub use traits::{FanoutStrategy, ResolvedHandler};
