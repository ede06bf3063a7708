//! Order submission: the tracker entity and the driver that times its stages.

mod actions;
pub mod driver;
pub mod entity;
pub mod error;

pub use actions::*;
pub use driver::{StageTiming, SubmissionDriver};
pub use error::*;

use crate::clients::OrderClient;
use crate::framework::ResourceActor;
use crate::model::OrderTracker;
use tokio_util::sync::CancellationToken;

/// Creates a new Order actor and its client.
///
/// The cart and contact clients are injected later through `run()`. Drivers
/// spawned by the client stop when `shutdown` is cancelled.
pub fn new(
    timing: StageTiming,
    shutdown: CancellationToken,
) -> (ResourceActor<OrderTracker>, OrderClient) {
    let (actor, generic_client) = ResourceActor::new(32);
    let client = OrderClient::new(generic_client, timing, shutdown);

    (actor, client)
}
