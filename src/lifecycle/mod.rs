//! # System Lifecycle
//!
//! Starting, wiring and stopping the actors, and the per-customer [`Session`].
//!
//! ## Dependency Injection via Context
//!
//! Actors are created without dependencies and receive them in `run(context)`:
//!
//! ```rust,ignore
//! impl ActorEntity for Cart {
//!     type Context = ();
//! }
//! impl ActorEntity for ContactDirectory {
//!     type Context = Arc<dyn ContactStore>;
//! }
//! impl ActorEntity for OrderTracker {
//!     type Context = (CartClient, ContactClient);
//! }
//! ```
//!
//! ## Graceful Shutdown
//!
//! 1. **Cancel timers** - submission drivers stop without advancing
//! 2. **Drop all clients** - closes the sender side of the channels
//! 3. **Await completion** - each actor exits once its channel is closed
//!
//! The order actor holds clones of the cart and contact clients in its
//! context; they are released when it exits, so the dependency graph stays
//! acyclic and every actor terminates.

pub mod config;
pub mod ordering_system;
pub mod session;
pub mod tracing;

pub use config::OrderingConfig;
pub use ordering_system::OrderingSystem;
pub use session::Session;
pub use self::tracing::setup_tracing;
