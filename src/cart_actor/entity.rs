//! Entity trait implementation for the Cart domain type.
//!
//! The cart has no dependencies (`Context = ()`); every action maps onto one of
//! the synchronous methods of [`Cart`].

use super::actions::{CartAction, CartActionResult};
use super::error::CartError;
use crate::framework::ActorEntity;
use crate::model::{Cart, CartCreate, CartId};
use async_trait::async_trait;

#[async_trait]
impl ActorEntity for Cart {
    type Id = CartId;
    type Create = CartCreate;
    type Action = CartAction;
    type ActionResult = CartActionResult;
    type Context = ();
    type Error = CartError;

    fn from_create_params(id: CartId, _params: CartCreate) -> Result<Self, CartError> {
        Ok(Self::new(id))
    }

    async fn handle_action(
        &mut self,
        action: CartAction,
        _ctx: &Self::Context,
    ) -> Result<CartActionResult, CartError> {
        match action {
            CartAction::AddItem { item, category } => {
                Ok(CartActionResult::AddItem(self.add_item(item, category)))
            }
            CartAction::UpdateQuantity { line, delta } => Ok(CartActionResult::UpdateQuantity(
                self.update_quantity(line, delta),
            )),
            CartAction::RemoveLine(line) => Ok(CartActionResult::RemoveLine(self.remove_line(line))),
            CartAction::SetUnitNote { line, unit, text } => self
                .set_unit_note(line, unit, text)
                .map(CartActionResult::SetUnitNote),
            CartAction::ApplyNoteToAll { line, text } => Ok(CartActionResult::ApplyNoteToAll(
                self.apply_note_to_all_units(line, text),
            )),
            CartAction::Totals => Ok(CartActionResult::Totals {
                total: self.total(),
                item_count: self.item_count(),
            }),
            CartAction::Clear => Ok(CartActionResult::Clear(self.clear())),
        }
    }
}
