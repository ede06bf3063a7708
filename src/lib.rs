//! # Calzadita Order
//!
//! > **The ordering core of a small food stand.**
//!
//! Customers browse a fixed menu, build a cart with a note for every single
//! unit ("sin cebolla" on the second torta only), keep a few contact numbers,
//! and submit. A submission walks through the kitchen stages on a timer, hands
//! the ticket to the vendor, and clears the cart.
//!
//! ## 🏗️ Design
//!
//! Each aggregate of a session (cart, contact directory, order tracker) lives
//! in a resource-oriented actor: a Tokio task that owns every instance of one
//! type and processes requests one at a time. No locks guard domain state.
//!
//! The business rules are plain synchronous methods on the [`model`] types and
//! are tested without any runtime. The actors only route actions to them.
//!
//! ## 👩‍💻 Architecture Notes
//!
//! ### 1. Type-Safe Error Handling
//! Each actor has its own error type (`CartError`, `ContactError`,
//! `OrderError`). The order actor wraps the other two with `#[from]`.
//! Missing lines or phone entries are not errors: operations on them report
//! `false` or [`QuantityChange::Missing`](model::QuantityChange::Missing).
//!
//! ### 2. Async Context Injection
//! Dependencies are injected through `run(context)`: the contact actor gets its
//! [`ContactStore`](contact_actor::ContactStore), the order actor gets the cart
//! and contact clients.
//!
//! ### 3. Timers
//! Stage timing lives outside the tracker, in a
//! [`SubmissionDriver`](order_actor::SubmissionDriver) task that posts
//! `Advance` and `Finalize` actions and stops on a `CancellationToken`. Tests
//! run it on Tokio's paused clock.
//!
//! ### 4. Observability
//! `tracing` everywhere, see [`lifecycle::tracing`].
//!
//! ## 🗺️ Module Tour
//!
//! - [`framework`]: the generic `ResourceActor<T>`, its clients and mocks.
//! - [`model`]: menu, cart, contacts, order tracker and the order ticket.
//! - [`cart_actor`], [`contact_actor`], [`order_actor`]: the `ActorEntity`
//!   implementations, their actions and errors.
//! - [`clients`]: typed clients for each actor.
//! - [`lifecycle`]: configuration, [`OrderingSystem`](lifecycle::OrderingSystem)
//!   and [`Session`](lifecycle::Session).
//!
//! ## 🚀 Quick Start
//!
//! ```bash
//! RUST_LOG=info cargo run
//! cargo test
//! ```

pub mod cart_actor;
pub mod clients;
pub mod contact_actor;
pub mod framework;
pub mod lifecycle;
pub mod model;
pub mod order_actor;
