//! Type-safe wrappers around [`ResourceClient`](crate::framework::ResourceClient).

pub mod cart_client;
pub mod contact_client;
pub mod order_client;

pub use cart_client::*;
pub use contact_client::*;
pub use order_client::*;
