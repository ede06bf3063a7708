//! # Contact Client
//!
//! High-level API for the Contact Directory actor.

use crate::contact_actor::{ContactAction, ContactActionResult, ContactError};
use crate::framework::{ActorClient, FrameworkError, ResourceClient};
use crate::model::{ContactDirectory, DirectoryCreate, DirectoryId, PhoneEntry, PhoneId};
use async_trait::async_trait;
use tracing::{debug, instrument};

/// Client for interacting with the Contact Directory actor.
#[derive(Clone)]
pub struct ContactClient {
    inner: ResourceClient<ContactDirectory>,
}

impl ContactClient {
    pub fn new(inner: ResourceClient<ContactDirectory>) -> Self {
        Self { inner }
    }
}

#[async_trait]
impl ActorClient<ContactDirectory> for ContactClient {
    type Error = ContactError;

    fn inner(&self) -> &ResourceClient<ContactDirectory> {
        &self.inner
    }

    fn map_error(e: FrameworkError) -> Self::Error {
        match e.downcast_entity::<ContactError>() {
            Ok(e) => e,
            Err(FrameworkError::NotFound(id)) => ContactError::NotFound(id),
            Err(e) => ContactError::ActorCommunicationError(e.to_string()),
        }
    }
}

impl ContactClient {
    /// Opens a directory, restoring whatever the store holds.
    #[instrument(skip(self))]
    pub async fn open(&self) -> Result<DirectoryId, ContactError> {
        debug!("Sending request");
        self.inner
            .create(DirectoryCreate)
            .await
            .map_err(Self::map_error)
    }

    /// Saves a number and returns its id.
    #[instrument(skip(self))]
    pub async fn add(
        &self,
        directory: DirectoryId,
        alias: Option<String>,
        number: &str,
    ) -> Result<PhoneId, ContactError> {
        debug!("Sending request");
        let action = ContactAction::Add {
            alias,
            number: number.to_string(),
        };
        match self.action(directory, action).await? {
            ContactActionResult::Add(id) => Ok(id),
            _ => unreachable!("Add action must return Add result"),
        }
    }

    #[instrument(skip(self))]
    pub async fn update(
        &self,
        directory: DirectoryId,
        id: PhoneId,
        alias: Option<String>,
        number: &str,
    ) -> Result<bool, ContactError> {
        debug!("Sending request");
        let action = ContactAction::Update {
            id,
            alias,
            number: number.to_string(),
        };
        match self.action(directory, action).await? {
            ContactActionResult::Update(updated) => Ok(updated),
            _ => unreachable!("Update action must return Update result"),
        }
    }

    #[instrument(skip(self))]
    pub async fn delete(&self, directory: DirectoryId, id: PhoneId) -> Result<bool, ContactError> {
        debug!("Sending request");
        match self.action(directory, ContactAction::Delete(id)).await? {
            ContactActionResult::Delete(deleted) => Ok(deleted),
            _ => unreachable!("Delete action must return Delete result"),
        }
    }

    #[instrument(skip(self))]
    pub async fn select(&self, directory: DirectoryId, id: PhoneId) -> Result<bool, ContactError> {
        debug!("Sending request");
        match self.action(directory, ContactAction::Select(id)).await? {
            ContactActionResult::Select(selected) => Ok(selected),
            _ => unreachable!("Select action must return Select result"),
        }
    }

    #[instrument(skip(self))]
    pub async fn selected(&self, directory: DirectoryId) -> Result<Option<PhoneEntry>, ContactError> {
        debug!("Sending request");
        match self.action(directory, ContactAction::Selected).await? {
            ContactActionResult::Selected(entry) => Ok(entry),
            _ => unreachable!("Selected action must return Selected result"),
        }
    }

    #[instrument(skip(self))]
    pub async fn list(&self, directory: DirectoryId) -> Result<Vec<PhoneEntry>, ContactError> {
        debug!("Sending request");
        match self.action(directory, ContactAction::List).await? {
            ContactActionResult::List(entries) => Ok(entries),
            _ => unreachable!("List action must return List result"),
        }
    }

    async fn action(
        &self,
        directory: DirectoryId,
        action: ContactAction,
    ) -> Result<ContactActionResult, ContactError> {
        self.inner
            .perform_action(directory, action)
            .await
            .map_err(Self::map_error)
    }
}
