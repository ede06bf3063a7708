//! Entity trait implementation for the OrderTracker domain type.
//!
//! The tracker depends on the cart and contact actors
//! (`Context = (CartClient, ContactClient)`): `Submit` reads the selected
//! contact and a snapshot of the cart, and `Finalize` clears the cart.

use super::actions::{OrderAction, OrderActionResult, SubmitOutcome};
use super::error::OrderError;
use crate::clients::{CartClient, ContactClient};
use crate::framework::ActorEntity;
use crate::model::{OrderCreate, OrderId, OrderSummary, OrderTracker};
use async_trait::async_trait;
use tracing::{debug, info, warn};

#[async_trait]
impl ActorEntity for OrderTracker {
    type Id = OrderId;
    type Create = OrderCreate;
    type Action = OrderAction;
    type ActionResult = OrderActionResult;
    type Context = (CartClient, ContactClient);
    type Error = OrderError;

    fn from_create_params(id: OrderId, params: OrderCreate) -> Result<Self, OrderError> {
        Self::new(id, params)
    }

    async fn handle_action(
        &mut self,
        action: OrderAction,
        ctx: &Self::Context,
    ) -> Result<OrderActionResult, OrderError> {
        let (carts, contacts) = ctx;
        match action {
            OrderAction::Submit => {
                let outcome = self.submit(carts, contacts).await?;
                Ok(OrderActionResult::Submit(outcome))
            }
            OrderAction::Advance { run } => {
                let transition = self.advance(run);
                debug!(order = %self.id, run, ?transition, stage = ?self.stage_label(), "Advance");
                Ok(OrderActionResult::Advance(transition))
            }
            OrderAction::Finalize { run } => {
                let ticket = self.finish(run);
                if ticket.is_some() {
                    match carts.clear(self.cart).await {
                        Ok(lines) => info!(order = %self.id, run, lines, "Order finalized"),
                        Err(e) => warn!(order = %self.id, run, error = %e, "Failed to clear cart"),
                    }
                }
                Ok(OrderActionResult::Finalize(ticket))
            }
            OrderAction::Status => Ok(OrderActionResult::Status(self.status())),
        }
    }
}

impl OrderTracker {
    async fn submit(
        &mut self,
        carts: &CartClient,
        contacts: &ContactClient,
    ) -> Result<SubmitOutcome, OrderError> {
        if !self.is_idle() {
            debug!(order = %self.id, state = ?self.state(), "Submission already running");
            return Ok(SubmitOutcome::AlreadyRunning);
        }

        let Some(contact) = contacts.selected(self.contacts).await? else {
            return Ok(SubmitOutcome::NoContactSelected);
        };
        let cart = carts
            .snapshot(self.cart)
            .await?
            .ok_or_else(|| OrderError::NotFound(self.cart.to_string()))?;
        if cart.is_empty() {
            return Ok(SubmitOutcome::EmptyCart);
        }

        let summary = OrderSummary::from_cart(&cart, &contact);
        match self.begin(summary.clone()) {
            Some(run) => {
                info!(order = %self.id, run, total = %summary.total, "Submission started");
                Ok(SubmitOutcome::Started {
                    run,
                    stages: self.stages().len(),
                    summary,
                })
            }
            None => Ok(SubmitOutcome::AlreadyRunning),
        }
    }
}
