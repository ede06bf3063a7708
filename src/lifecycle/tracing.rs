//! # Observability & Tracing
//!
//! [`setup_tracing`] initializes structured logging for the whole system with
//! the `tracing` crate. Log levels come from `RUST_LOG`.
//!
//! The compact format hides the module prefix (`with_target(false)`); actors
//! log an `entity_type` field instead, so a line still says which aggregate it
//! is about.
//!
//! ## What Gets Traced
//!
//! - **Actor lifecycle**: startup and shutdown, with the number of live aggregates
//! - **Aggregate operations**: Create, Get, Delete and every Action
//! - **Client calls**: one span per client method (`#[instrument]`)
//! - **Submissions**: start, each stage, completion or cancellation
//! - **Persistence**: restored contacts and failed saves
//!
//! ## Usage
//!
//! ```bash
//! RUST_LOG=info cargo run     # compact
//! RUST_LOG=debug cargo run    # payloads of every action
//! RUST_LOG=calzadita_order::order_actor=debug cargo run
//! ```
//!
//! A submission at `info` looks like:
//!
//! ```text
//! INFO submit: Submission started order=order_1 run=1 total=115
//! INFO submit: Spawning submission driver run=1 stages=6
//! INFO Action ok entity_type="OrderTracker" id=order_1
//! ...
//! INFO Order finalized order=order_1 run=1 lines=2
//! INFO Submission complete order=order_1 run=1 total=115
//! ```
pub fn setup_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_target(false)
        .compact()
        .init();
}
