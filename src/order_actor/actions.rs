//! Custom actions for the Order actor.
//!
//! `Submit` and `Status` come from callers. `Advance` and `Finalize` are posted
//! by the [`SubmissionDriver`](super::driver::SubmissionDriver) and carry the
//! run number they belong to, so a message from an older run is ignored.

use crate::model::{OrderStatus, OrderSummary, Transition};

#[derive(Debug, Clone)]
pub enum OrderAction {
    /// Starts a run when a contact is selected and the cart has items.
    Submit,
    Advance { run: u64 },
    /// Clears the cart and returns the tracker to idle.
    Finalize { run: u64 },
    Status,
}

/// Why a submission did or did not start.
#[derive(Debug, Clone, PartialEq)]
pub enum SubmitOutcome {
    Started {
        run: u64,
        stages: usize,
        summary: OrderSummary,
    },
    AlreadyRunning,
    NoContactSelected,
    EmptyCart,
}

/// Results from OrderActions - variants match 1:1 with OrderAction
#[derive(Debug, Clone, PartialEq)]
pub enum OrderActionResult {
    Submit(SubmitOutcome),
    Advance(Transition),
    /// The finished ticket, or `None` for a stale or premature request.
    Finalize(Option<OrderSummary>),
    Status(OrderStatus),
}
