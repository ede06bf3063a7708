//! # Order Client
//!
//! High-level API for the Order actor. Besides forwarding requests, the client
//! owns the timing of submissions: when `submit` starts a run it spawns the
//! [`SubmissionDriver`] that advances it. Each tracker's pending run holds its
//! own child of the system shutdown token, so closing one session stops its
//! timer without touching the others.

use crate::framework::{ActorClient, FrameworkError, ResourceClient};
use crate::model::{CartId, DirectoryId, OrderCreate, OrderId, OrderStatus, OrderTracker};
use crate::order_actor::{
    OrderAction, OrderActionResult, OrderError, StageTiming, SubmissionDriver, SubmitOutcome,
};
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Arc, Mutex, PoisonError};
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, instrument};

/// Client for interacting with the Order actor.
#[derive(Clone)]
pub struct OrderClient {
    inner: ResourceClient<OrderTracker>,
    timing: StageTiming,
    shutdown: CancellationToken,
    pending: Arc<Mutex<HashMap<OrderId, CancellationToken>>>,
}

impl OrderClient {
    pub fn new(
        inner: ResourceClient<OrderTracker>,
        timing: StageTiming,
        shutdown: CancellationToken,
    ) -> Self {
        Self {
            inner,
            timing,
            shutdown,
            pending: Arc::new(Mutex::new(HashMap::new())),
        }
    }

    /// Stops the driver of the tracker's current run, if one is still waiting.
    pub fn cancel_pending(&self, order: OrderId) {
        let token = self
            .pending
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .remove(&order);
        if let Some(token) = token {
            debug!(%order, "Cancelling pending submission");
            token.cancel();
        }
    }

    fn register_run(&self, order: OrderId) -> CancellationToken {
        let token = self.shutdown.child_token();
        let previous = self
            .pending
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(order, token.clone());
        // a tracker only starts a run when idle, so the old driver is done
        if let Some(previous) = previous {
            previous.cancel();
        }
        token
    }
}

#[async_trait]
impl ActorClient<OrderTracker> for OrderClient {
    type Error = OrderError;

    fn inner(&self) -> &ResourceClient<OrderTracker> {
        &self.inner
    }

    fn map_error(e: FrameworkError) -> Self::Error {
        match e.downcast_entity::<OrderError>() {
            Ok(e) => e,
            Err(FrameworkError::NotFound(id)) => OrderError::NotFound(id),
            Err(e) => OrderError::ActorCommunicationError(e.to_string()),
        }
    }
}

impl OrderClient {
    /// Opens a tracker bound to a session's cart and contact directory.
    #[instrument(skip(self, stages))]
    pub async fn open(
        &self,
        cart: CartId,
        contacts: DirectoryId,
        stages: Vec<String>,
    ) -> Result<OrderId, OrderError> {
        debug!(stages = stages.len(), "Sending request");
        let params = OrderCreate {
            cart,
            contacts,
            stages,
        };
        self.inner.create(params).await.map_err(Self::map_error)
    }

    /// Requests a submission. When it starts, a driver is spawned that walks
    /// the stages and finalizes the order.
    #[instrument(skip(self))]
    pub async fn submit(&self, order: OrderId) -> Result<SubmitOutcome, OrderError> {
        debug!("Sending request");
        let outcome = match self.action(order, OrderAction::Submit).await? {
            OrderActionResult::Submit(outcome) => outcome,
            _ => unreachable!("Submit action must return Submit result"),
        };

        if let SubmitOutcome::Started { run, stages, .. } = &outcome {
            info!(run, stages, "Spawning submission driver");
            SubmissionDriver::new(
                self.inner.clone(),
                order,
                *run,
                *stages,
                self.timing,
                self.register_run(order),
            )
            .spawn();
        }
        Ok(outcome)
    }

    #[instrument(skip(self))]
    pub async fn status(&self, order: OrderId) -> Result<OrderStatus, OrderError> {
        debug!("Sending request");
        match self.action(order, OrderAction::Status).await? {
            OrderActionResult::Status(status) => Ok(status),
            _ => unreachable!("Status action must return Status result"),
        }
    }

    async fn action(
        &self,
        order: OrderId,
        action: OrderAction,
    ) -> Result<OrderActionResult, OrderError> {
        self.inner
            .perform_action(order, action)
            .await
            .map_err(Self::map_error)
    }
}
