//! Contact-directory resource logic, including its persistence.

mod actions;
pub mod entity;
pub mod error;
pub mod store;

pub use actions::*;
pub use error::*;
pub use store::{ContactStore, JsonFileStore, MemoryStore, StoreError};

use crate::clients::ContactClient;
use crate::framework::ResourceActor;
use crate::model::ContactDirectory;

/// Creates a new Contact Directory actor and its client.
///
/// The store is handed to `run()`, not here.
pub fn new() -> (ResourceActor<ContactDirectory>, ContactClient) {
    let (actor, generic_client) = ResourceActor::new(32);
    let client = ContactClient::new(generic_client);

    (actor, client)
}
