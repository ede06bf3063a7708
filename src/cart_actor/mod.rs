//! Cart-specific resource logic: lines, quantities and per-unit notes.

mod actions;
pub mod entity;
pub mod error;

pub use actions::*;
pub use error::*;

use crate::clients::CartClient;
use crate::framework::ResourceActor;
use crate::model::Cart;

/// Creates a new Cart actor and its client.
pub fn new() -> (ResourceActor<Cart>, CartClient) {
    let (actor, generic_client) = ResourceActor::new(32);
    let client = CartClient::new(generic_client);

    (actor, client)
}
