//! Generic actor framework hosting the session aggregates.
//!
//! # Main Components
//!
//! - [`ActorEntity`] - trait implemented by every aggregate (cart, contacts, order tracker)
//! - [`ResourceActor`] - generic actor that owns the aggregates of one type
//! - [`ResourceClient`] - typed handle for sending requests to an actor
//! - [`ActorClient`] - seam for aggregate-specific clients
//! - [`FrameworkError`] - plumbing errors
//!
//! # Testing
//!
//! See [`mock`] for clients that answer from queued expectations.

pub mod actor;
pub mod client;
pub mod entity;
pub mod error;
pub mod message;
pub mod mock;

pub use actor::ResourceActor;
pub use client::{ActorClient, ResourceClient};
pub use entity::ActorEntity;
pub use error::FrameworkError;
pub use message::{ResourceRequest, Response};
