//! # Session
//!
//! Everything one customer works with: a cart, a contact directory and an
//! order tracker, plus the clients to reach them. A session is the explicit
//! context callers pass around instead of global state.

use super::ordering_system::OrderingSystem;
use crate::cart_actor::CartError;
use crate::clients::{CartClient, ContactClient, OrderClient};
use crate::contact_actor::ContactError;
use crate::framework::ActorClient;
use crate::model::{
    CartId, CartLine, Catalog, DirectoryId, ItemId, LineId, OrderId, OrderStatus, OrderSummary,
    PhoneEntry, PhoneId, QuantityChange,
};
use crate::order_actor::{OrderError, SubmitOutcome};
use rust_decimal::Decimal;
use std::sync::Arc;
use tracing::{debug, instrument};

#[derive(Clone)]
pub struct Session {
    pub cart: CartId,
    pub contacts: DirectoryId,
    pub order: OrderId,
    cart_client: CartClient,
    contact_client: ContactClient,
    order_client: OrderClient,
    catalog: Arc<Catalog>,
    vendor_phone: Option<String>,
}

impl Session {
    pub(super) fn new(
        cart: CartId,
        contacts: DirectoryId,
        order: OrderId,
        system: &OrderingSystem,
    ) -> Self {
        Self {
            cart,
            contacts,
            order,
            cart_client: system.cart_client.clone(),
            contact_client: system.contact_client.clone(),
            order_client: system.order_client.clone(),
            catalog: system.catalog(),
            vendor_phone: system.config().vendor_phone.clone(),
        }
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    // ---- cart ----

    /// Adds one unit of a catalog item. Returns `None` for an unknown item.
    #[instrument(skip(self))]
    pub async fn add_item(&self, item: ItemId) -> Result<Option<LineId>, CartError> {
        let Some((category, menu_item)) = self.catalog.find(item) else {
            debug!("Unknown menu item");
            return Ok(None);
        };
        let line = self
            .cart_client
            .add_item(self.cart, menu_item.clone(), category)
            .await?;
        Ok(Some(line))
    }

    pub async fn update_quantity(
        &self,
        line: LineId,
        delta: i32,
    ) -> Result<QuantityChange, CartError> {
        self.cart_client.update_quantity(self.cart, line, delta).await
    }

    pub async fn remove_line(&self, line: LineId) -> Result<bool, CartError> {
        self.cart_client.remove_line(self.cart, line).await
    }

    pub async fn set_unit_note(
        &self,
        line: LineId,
        unit: usize,
        text: impl Into<String> + Send,
    ) -> Result<bool, CartError> {
        self.cart_client.set_unit_note(self.cart, line, unit, text).await
    }

    pub async fn apply_note_to_all_units(
        &self,
        line: LineId,
        text: impl Into<String> + Send,
    ) -> Result<bool, CartError> {
        self.cart_client
            .apply_note_to_all_units(self.cart, line, text)
            .await
    }

    /// Cart lines in display order.
    pub async fn lines(&self) -> Result<Vec<CartLine>, CartError> {
        let cart = self
            .cart_client
            .snapshot(self.cart)
            .await?
            .ok_or_else(|| CartError::NotFound(self.cart.to_string()))?;
        Ok(cart.lines().to_vec())
    }

    /// `(total, item_count)` of the cart.
    pub async fn totals(&self) -> Result<(Decimal, u32), CartError> {
        self.cart_client.totals(self.cart).await
    }

    // ---- contacts ----

    pub async fn add_phone(
        &self,
        alias: Option<String>,
        number: &str,
    ) -> Result<PhoneId, ContactError> {
        self.contact_client.add(self.contacts, alias, number).await
    }

    pub async fn update_phone(
        &self,
        id: PhoneId,
        alias: Option<String>,
        number: &str,
    ) -> Result<bool, ContactError> {
        self.contact_client
            .update(self.contacts, id, alias, number)
            .await
    }

    pub async fn delete_phone(&self, id: PhoneId) -> Result<bool, ContactError> {
        self.contact_client.delete(self.contacts, id).await
    }

    pub async fn select_phone(&self, id: PhoneId) -> Result<bool, ContactError> {
        self.contact_client.select(self.contacts, id).await
    }

    pub async fn selected_phone(&self) -> Result<Option<PhoneEntry>, ContactError> {
        self.contact_client.selected(self.contacts).await
    }

    pub async fn phones(&self) -> Result<Vec<PhoneEntry>, ContactError> {
        self.contact_client.list(self.contacts).await
    }

    // ---- submission ----

    /// Starts submitting the order. Refusals come back as a [`SubmitOutcome`].
    pub async fn submit(&self) -> Result<SubmitOutcome, OrderError> {
        self.order_client.submit(self.order).await
    }

    pub async fn status(&self) -> Result<OrderStatus, OrderError> {
        self.order_client.status(self.order).await
    }

    /// Handoff link for a ticket, if a vendor number is configured.
    pub fn whatsapp_link(&self, summary: &OrderSummary) -> Option<String> {
        self.vendor_phone
            .as_deref()
            .map(|vendor| summary.whatsapp_link(vendor))
    }

    /// Drops the session's aggregates. A pending submission timer is stopped
    /// first, then the tracker goes so it no longer reaches the cart.
    #[instrument(skip(self))]
    pub async fn close(self) -> Result<(), OrderError> {
        self.order_client.cancel_pending(self.order);
        self.order_client.close(self.order).await?;
        self.cart_client.close(self.cart).await?;
        self.contact_client.close(self.contacts).await?;
        debug!(order = %self.order, "Session closed");
        Ok(())
    }
}
