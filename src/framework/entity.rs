//! # ActorEntity Trait
//!
//! The contract every session aggregate (cart, contact directory, order tracker)
//! implements so that it can be hosted by the generic [`ResourceActor`](crate::framework::ResourceActor).
//!
//! An aggregate is created once per session and then driven exclusively through
//! its `Action` enum. Reads go through `Get`, which hands back a clone of the
//! whole aggregate, and the session is torn down with `Delete`.
//!
//! # Provided Methods (Hooks)
//! - [`ActorEntity::on_create`]
//! - [`ActorEntity::on_delete`]
//!
//! Both default to `Ok(())`.

use async_trait::async_trait;
use std::fmt::{Debug, Display};
use std::hash::Hash;

/// Trait that any session aggregate must implement to be managed by `ResourceActor`.
///
/// # Async & Context
/// Hooks are async so that an aggregate can talk to other actors (the order
/// tracker reads the cart and the selected contact while handling `Submit`).
/// The `Context` is handed to `run()`, not to `new()`, so actors can be created
/// first and wired afterwards.
#[async_trait]
pub trait ActorEntity: Clone + Send + Sync + 'static {
    /// Identifier of one aggregate instance. Generated by the actor from a
    /// `u32` counter.
    type Id: Eq + Hash + Clone + Send + Sync + Display + Debug + From<u32>;

    /// Payload used to open the aggregate for a session.
    type Create: Send + Sync + Debug;

    /// Aggregate-specific operations (e.g. `AddItem`, `SelectEntry`).
    type Action: Send + Sync + Debug;

    /// Result of an action.
    type ActionResult: Send + Sync + Debug;

    /// Runtime dependencies injected into every hook. `()` when none.
    type Context: Send + Sync;

    /// One error enum per aggregate.
    type Error: std::error::Error + Send + Sync + 'static;

    /// Build the aggregate from its id and creation payload.
    /// Called synchronously, before `on_create`.
    fn from_create_params(id: Self::Id, params: Self::Create) -> Result<Self, Self::Error>;

    /// Called after construction and before the aggregate becomes visible.
    async fn on_create(&mut self, _ctx: &Self::Context) -> Result<(), Self::Error> {
        Ok(())
    }

    /// Called before the aggregate is dropped from the store.
    async fn on_delete(&self, _ctx: &Self::Context) -> Result<(), Self::Error> {
        Ok(())
    }

    /// Apply one action to the aggregate.
    async fn handle_action(
        &mut self,
        action: Self::Action,
        ctx: &Self::Context,
    ) -> Result<Self::ActionResult, Self::Error>;
}
