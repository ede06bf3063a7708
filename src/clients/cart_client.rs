//! # Cart Client
//!
//! High-level API for the Cart actor. Operations on a missing line are
//! reported as values (`false`, [`QuantityChange::Missing`]), never as errors.

use crate::cart_actor::{CartAction, CartActionResult, CartError};
use crate::framework::{ActorClient, FrameworkError, ResourceClient};
use crate::model::{Cart, CartCreate, CartId, Category, LineId, MenuItem, QuantityChange};
use async_trait::async_trait;
use rust_decimal::Decimal;
use tracing::{debug, instrument};

/// Client for interacting with the Cart actor.
#[derive(Clone)]
pub struct CartClient {
    inner: ResourceClient<Cart>,
}

impl CartClient {
    pub fn new(inner: ResourceClient<Cart>) -> Self {
        Self { inner }
    }
}

#[async_trait]
impl ActorClient<Cart> for CartClient {
    type Error = CartError;

    fn inner(&self) -> &ResourceClient<Cart> {
        &self.inner
    }

    fn map_error(e: FrameworkError) -> Self::Error {
        match e.downcast_entity::<CartError>() {
            Ok(e) => e,
            Err(FrameworkError::NotFound(id)) => CartError::NotFound(id),
            Err(e) => CartError::ActorCommunicationError(e.to_string()),
        }
    }
}

impl CartClient {
    /// Opens an empty cart.
    #[instrument(skip(self))]
    pub async fn open(&self) -> Result<CartId, CartError> {
        debug!("Sending request");
        self.inner
            .create(CartCreate)
            .await
            .map_err(Self::map_error)
    }

    /// Snapshot of the whole cart, `None` if it was closed.
    #[instrument(skip(self))]
    pub async fn snapshot(&self, cart: CartId) -> Result<Option<Cart>, CartError> {
        self.get(cart).await
    }

    #[instrument(skip(self, item), fields(item = %item.id))]
    pub async fn add_item(
        &self,
        cart: CartId,
        item: MenuItem,
        category: Category,
    ) -> Result<LineId, CartError> {
        debug!("Sending request");
        match self.action(cart, CartAction::AddItem { item, category }).await? {
            CartActionResult::AddItem(line) => Ok(line),
            _ => unreachable!("AddItem action must return AddItem result"),
        }
    }

    #[instrument(skip(self))]
    pub async fn update_quantity(
        &self,
        cart: CartId,
        line: LineId,
        delta: i32,
    ) -> Result<QuantityChange, CartError> {
        debug!("Sending request");
        match self
            .action(cart, CartAction::UpdateQuantity { line, delta })
            .await?
        {
            CartActionResult::UpdateQuantity(change) => Ok(change),
            _ => unreachable!("UpdateQuantity action must return UpdateQuantity result"),
        }
    }

    #[instrument(skip(self))]
    pub async fn remove_line(&self, cart: CartId, line: LineId) -> Result<bool, CartError> {
        debug!("Sending request");
        match self.action(cart, CartAction::RemoveLine(line)).await? {
            CartActionResult::RemoveLine(removed) => Ok(removed),
            _ => unreachable!("RemoveLine action must return RemoveLine result"),
        }
    }

    /// Sets the note of one unit. Fails with [`CartError::UnitOutOfRange`] when
    /// `unit` is not below the line's quantity.
    #[instrument(skip(self, text))]
    pub async fn set_unit_note(
        &self,
        cart: CartId,
        line: LineId,
        unit: usize,
        text: impl Into<String> + Send,
    ) -> Result<bool, CartError> {
        debug!("Sending request");
        let action = CartAction::SetUnitNote {
            line,
            unit,
            text: text.into(),
        };
        match self.action(cart, action).await? {
            CartActionResult::SetUnitNote(set) => Ok(set),
            _ => unreachable!("SetUnitNote action must return SetUnitNote result"),
        }
    }

    #[instrument(skip(self, text))]
    pub async fn apply_note_to_all_units(
        &self,
        cart: CartId,
        line: LineId,
        text: impl Into<String> + Send,
    ) -> Result<bool, CartError> {
        debug!("Sending request");
        let action = CartAction::ApplyNoteToAll {
            line,
            text: text.into(),
        };
        match self.action(cart, action).await? {
            CartActionResult::ApplyNoteToAll(applied) => Ok(applied),
            _ => unreachable!("ApplyNoteToAll action must return ApplyNoteToAll result"),
        }
    }

    /// Returns `(total, item_count)`.
    #[instrument(skip(self))]
    pub async fn totals(&self, cart: CartId) -> Result<(Decimal, u32), CartError> {
        debug!("Sending request");
        match self.action(cart, CartAction::Totals).await? {
            CartActionResult::Totals { total, item_count } => Ok((total, item_count)),
            _ => unreachable!("Totals action must return Totals result"),
        }
    }

    /// Empties the cart, returning how many lines were dropped.
    #[instrument(skip(self))]
    pub async fn clear(&self, cart: CartId) -> Result<usize, CartError> {
        debug!("Sending request");
        match self.action(cart, CartAction::Clear).await? {
            CartActionResult::Clear(lines) => Ok(lines),
            _ => unreachable!("Clear action must return Clear result"),
        }
    }

    async fn action(&self, cart: CartId, action: CartAction) -> Result<CartActionResult, CartError> {
        self.inner
            .perform_action(cart, action)
            .await
            .map_err(Self::map_error)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::framework::mock::{create_mock_client, expect_action};

    #[tokio::test]
    async fn test_update_quantity_sends_delta() {
        let (client, mut receiver) = create_mock_client::<Cart>(10);
        let cart_client = CartClient::new(client);

        let task = tokio::spawn(async move {
            cart_client
                .update_quantity(CartId(1), LineId(2), -1)
                .await
        });

        let (id, action, responder) = expect_action(&mut receiver)
            .await
            .expect("Expected Action request");
        assert_eq!(id, CartId(1));
        match action {
            CartAction::UpdateQuantity { line, delta } => {
                assert_eq!(line, LineId(2));
                assert_eq!(delta, -1);
            }
            _ => panic!("Expected UpdateQuantity action"),
        }
        responder
            .send(Ok(CartActionResult::UpdateQuantity(QuantityChange::Removed)))
            .unwrap();

        assert_eq!(task.await.unwrap().unwrap(), QuantityChange::Removed);
    }

    #[tokio::test]
    async fn test_entity_error_is_recovered() {
        let (client, mut receiver) = create_mock_client::<Cart>(10);
        let cart_client = CartClient::new(client);

        let task =
            tokio::spawn(async move { cart_client.set_unit_note(CartId(1), LineId(1), 3, "x").await });

        let (_, _, responder) = expect_action(&mut receiver)
            .await
            .expect("Expected Action request");
        let error = CartError::UnitOutOfRange {
            line: "line_1".to_string(),
            index: 3,
            quantity: 1,
        };
        responder
            .send(Err(FrameworkError::EntityError(Box::new(error.clone()))))
            .unwrap();

        assert_eq!(task.await.unwrap().unwrap_err(), error);
    }

    #[tokio::test]
    async fn test_missing_cart_maps_to_not_found() {
        let (client, mut receiver) = create_mock_client::<Cart>(10);
        let cart_client = CartClient::new(client);

        let task = tokio::spawn(async move { cart_client.clear(CartId(9)).await });

        let (_, _, responder) = expect_action(&mut receiver)
            .await
            .expect("Expected Action request");
        responder
            .send(Err(FrameworkError::NotFound("cart_9".to_string())))
            .unwrap();

        assert_eq!(
            task.await.unwrap().unwrap_err(),
            CartError::NotFound("cart_9".to_string())
        );
    }

    #[tokio::test]
    async fn test_closed_actor_is_communication_error() {
        let (client, receiver) = create_mock_client::<Cart>(10);
        drop(receiver);
        let cart_client = CartClient::new(client);

        let result = cart_client.totals(CartId(1)).await;
        assert!(matches!(result, Err(CartError::ActorCommunicationError(_))));
    }
}
