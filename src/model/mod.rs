//! Session aggregates and the data they carry. The aggregates implement
//! [`ActorEntity`](crate::framework::ActorEntity) in the `*_actor` modules.

pub mod cart;
pub mod contact;
pub mod menu;
pub mod order;
pub mod summary;

pub use cart::*;
pub use contact::*;
pub use menu::*;
pub use order::*;
pub use summary::*;
