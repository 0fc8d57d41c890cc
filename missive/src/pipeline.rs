//! Pipeline assembly and execution.
//!
//! A pipeline is assembled per dispatch call and discarded afterwards: the
//! applicable middleware, sequenced by the global execution order, wrapped
//! around a terminal step. Execution builds the nested continuation chain
//! through [`Next`], innermost (terminal) first.

use std::collections::HashSet;
use std::sync::Arc;

use missive_core::{BoxError, DynMiddleware, Envelope, Next, Outcome, Terminal, TypeIdentity};

/// Filter the global execution order down to the identities in `wanted`,
/// preserving the order's relative sequence.
///
/// The first yielded identity runs outermost.
pub(crate) fn execution_order<'a>(
    order: &'a [TypeIdentity],
    wanted: &'a HashSet<String>,
) -> impl Iterator<Item = &'a TypeIdentity> {
    order.iter().filter(|identity| wanted.contains(identity.key()))
}

/// An ordered middleware chain wrapped around a terminal step.
///
/// The first step runs outermost: its before-phase executes first and its
/// after-phase last, with the chain unwinding in LIFO order around the
/// terminal.
pub struct Pipeline {
    steps: Vec<Arc<dyn DynMiddleware>>,
    terminal: Terminal,
}

impl Pipeline {
    /// Compose `steps` (outermost first) around `terminal`.
    pub fn new(steps: Vec<Arc<dyn DynMiddleware>>, terminal: Terminal) -> Self {
        Self { steps, terminal }
    }

    /// Run the chain to completion with `message`.
    pub async fn run(&self, message: Envelope) -> Result<Outcome, BoxError> {
        Next::new(&self.steps, &self.terminal).run(message).await
    }
}
