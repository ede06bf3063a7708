//! # Generic Client
//!
//! [`ResourceClient`] sends requests to a `ResourceActor`; [`ActorClient`] is the
//! seam the aggregate-specific clients implement to inherit `get`/`close` and
//! to translate framework failures into their own error type.

use super::entity::ActorEntity;
use super::error::FrameworkError;
use super::message::ResourceRequest;
use async_trait::async_trait;
use tokio::sync::{mpsc, oneshot};

/// A type-safe client for interacting with a `ResourceActor`.
///
/// Holds only the channel sender, so it is cheap to clone and share between
/// tasks (the submission driver keeps its own clone).
#[derive(Clone)]
pub struct ResourceClient<T: ActorEntity> {
    sender: mpsc::Sender<ResourceRequest<T>>,
}

impl<T: ActorEntity> ResourceClient<T> {
    pub fn new(sender: mpsc::Sender<ResourceRequest<T>>) -> Self {
        Self { sender }
    }

    pub async fn create(&self, params: T::Create) -> Result<T::Id, FrameworkError> {
        let (respond_to, response) = oneshot::channel();
        self.sender
            .send(ResourceRequest::Create { params, respond_to })
            .await
            .map_err(|_| FrameworkError::ActorClosed)?;
        response.await.map_err(|_| FrameworkError::ActorDropped)?
    }

    pub async fn get(&self, id: T::Id) -> Result<Option<T>, FrameworkError> {
        let (respond_to, response) = oneshot::channel();
        self.sender
            .send(ResourceRequest::Get { id, respond_to })
            .await
            .map_err(|_| FrameworkError::ActorClosed)?;
        response.await.map_err(|_| FrameworkError::ActorDropped)?
    }

    pub async fn delete(&self, id: T::Id) -> Result<(), FrameworkError> {
        let (respond_to, response) = oneshot::channel();
        self.sender
            .send(ResourceRequest::Delete { id, respond_to })
            .await
            .map_err(|_| FrameworkError::ActorClosed)?;
        response.await.map_err(|_| FrameworkError::ActorDropped)?
    }

    pub async fn perform_action(
        &self,
        id: T::Id,
        action: T::Action,
    ) -> Result<T::ActionResult, FrameworkError> {
        let (respond_to, response) = oneshot::channel();
        self.sender
            .send(ResourceRequest::Action {
                id,
                action,
                respond_to,
            })
            .await
            .map_err(|_| FrameworkError::ActorClosed)?;
        response.await.map_err(|_| FrameworkError::ActorDropped)?
    }
}

/// Trait for aggregate-specific clients to inherit the standard operations.
#[async_trait]
pub trait ActorClient<T: ActorEntity>: Send + Sync {
    /// The aggregate-specific error type.
    type Error: Send + Sync;

    /// Access the inner generic ResourceClient.
    fn inner(&self) -> &ResourceClient<T>;

    /// Map framework errors to the aggregate's error type.
    fn map_error(e: FrameworkError) -> Self::Error;

    /// Fetch a snapshot of the aggregate.
    #[tracing::instrument(skip(self))]
    async fn get(&self, id: T::Id) -> Result<Option<T>, Self::Error> {
        tracing::debug!("Sending request");
        self.inner().get(id).await.map_err(Self::map_error)
    }

    /// Close the aggregate. Closing an unknown id is a no-op.
    #[tracing::instrument(skip(self))]
    async fn close(&self, id: T::Id) -> Result<(), Self::Error> {
        tracing::debug!("Sending request");
        match self.inner().delete(id).await {
            Ok(()) | Err(FrameworkError::NotFound(_)) => Ok(()),
            Err(e) => Err(Self::map_error(e)),
        }
    }
}
