//! Entity trait implementation for the ContactDirectory domain type.
//!
//! The directory's context is its [`ContactStore`]. The store is read once in
//! `on_create`, and the whole directory is written back after every action that
//! changed it. Write failures are logged and never fail the action.

use super::actions::{ContactAction, ContactActionResult};
use super::error::ContactError;
use super::store::ContactStore;
use crate::framework::ActorEntity;
use crate::model::{ContactDirectory, DirectoryCreate, DirectoryId};
use async_trait::async_trait;
use std::sync::Arc;
use tracing::{debug, info, warn};

#[async_trait]
impl ActorEntity for ContactDirectory {
    type Id = DirectoryId;
    type Create = DirectoryCreate;
    type Action = ContactAction;
    type ActionResult = ContactActionResult;
    type Context = Arc<dyn ContactStore>;
    type Error = ContactError;

    fn from_create_params(id: DirectoryId, _params: DirectoryCreate) -> Result<Self, ContactError> {
        Ok(Self::new(id))
    }

    /// Restores the saved entries and selection.
    async fn on_create(&mut self, store: &Self::Context) -> Result<(), ContactError> {
        self.restore(store.load().await);
        info!(
            directory = %self.id,
            entries = self.entries().len(),
            selected = self.selected().is_some(),
            "Contacts restored"
        );
        Ok(())
    }

    async fn handle_action(
        &mut self,
        action: ContactAction,
        store: &Self::Context,
    ) -> Result<ContactActionResult, ContactError> {
        let (result, changed) = match action {
            ContactAction::Add { alias, number } => {
                let now = chrono::Utc::now().timestamp_millis();
                let id = self.add_entry(alias, &number, now)?;
                (ContactActionResult::Add(id), true)
            }
            ContactAction::Update { id, alias, number } => {
                let updated = self.update_entry(id, alias, &number)?;
                (ContactActionResult::Update(updated), updated)
            }
            ContactAction::Delete(id) => {
                let deleted = self.delete_entry(id);
                (ContactActionResult::Delete(deleted), deleted)
            }
            ContactAction::Select(id) => {
                let selected = self.select_entry(id);
                (ContactActionResult::Select(selected), selected)
            }
            ContactAction::Selected => (
                ContactActionResult::Selected(self.selected().cloned()),
                false,
            ),
            ContactAction::List => (ContactActionResult::List(self.entries().to_vec()), false),
        };

        if changed {
            self.persist(store.as_ref()).await;
        }
        Ok(result)
    }
}

impl ContactDirectory {
    async fn persist(&self, store: &dyn ContactStore) {
        match store.save(&self.snapshot()).await {
            Ok(()) => debug!(directory = %self.id, "Contacts saved"),
            Err(e) => warn!(directory = %self.id, error = %e, "Failed to save contacts"),
        }
    }
}
