//! # Generic Messages
//!
//! Requests sent from a `ResourceClient` to its `ResourceActor`.

use super::entity::ActorEntity;
use super::error::FrameworkError;
use tokio::sync::oneshot;

/// Type alias for the one-shot response channel used by actors.
pub type Response<T> = oneshot::Sender<Result<T, FrameworkError>>;

/// Internal message type sent to the actor.
///
/// A session aggregate has a short lifecycle: it is opened (`Create`), driven
/// through its `Action` enum, read back as a whole (`Get`) and closed
/// (`Delete`). Field-level updates are expressed as actions, so there is no
/// separate update request.
#[derive(Debug)]
pub enum ResourceRequest<T: ActorEntity> {
    Create {
        params: T::Create,
        respond_to: Response<T::Id>,
    },
    Get {
        id: T::Id,
        respond_to: Response<Option<T>>,
    },
    Delete {
        id: T::Id,
        respond_to: Response<()>,
    },
    Action {
        id: T::Id,
        action: T::Action,
        respond_to: Response<T::ActionResult>,
    },
}
