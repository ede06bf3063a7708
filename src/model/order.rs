use crate::model::{CartId, DirectoryId, OrderSummary};
use crate::order_actor::OrderError;
use std::fmt::Display;

/// Type-safe identifier for order trackers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct OrderId(pub u32);

impl From<u32> for OrderId {
    fn from(id: u32) -> Self {
        Self(id)
    }
}

impl Display for OrderId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "order_{}", self.0)
    }
}

/// Stage labels shown to the customer while the order is processed.
pub fn default_stages() -> Vec<String> {
    [
        "Pedido recibido",
        "Preparando ingredientes",
        "Sazonando",
        "Cocinando",
        "Enviando a domicilio",
        "Pedido confirmado",
    ]
    .into_iter()
    .map(String::from)
    .collect()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SequencerState {
    Idle,
    Running { step: usize },
    Done,
}

/// Result of moving a run one step forward.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transition {
    Advanced { step: usize },
    /// The last stage finished; the run is waiting to be finalized.
    Completed,
    /// Stale run number or nothing running.
    Ignored,
}

/// Point-in-time view of a tracker.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrderStatus {
    pub state: SequencerState,
    pub stage: Option<String>,
    pub run: u64,
}

/// Payload for opening a tracker bound to a session's cart and directory.
#[derive(Debug, Clone)]
pub struct OrderCreate {
    pub cart: CartId,
    pub contacts: DirectoryId,
    pub stages: Vec<String>,
}

/// Tracks the submission of a session's order through its fulfillment stages.
///
/// # Actor Framework
/// This struct implements the [`ActorEntity`](crate::framework::ActorEntity) trait,
/// allowing it to be managed by a [`ResourceActor`](crate::framework::ResourceActor).
///
/// See [`impl ActorEntity for OrderTracker`](#impl-ActorEntity-for-OrderTracker) for details on:
/// - Creation parameters ([`OrderCreate`])
/// - Custom actions ([`OrderAction`](crate::order_actor::OrderAction))
#[derive(Debug, Clone)]
pub struct OrderTracker {
    pub id: OrderId,
    pub cart: CartId,
    pub contacts: DirectoryId,
    stages: Vec<String>,
    state: SequencerState,
    run: u64,
    ticket: Option<OrderSummary>,
}

impl OrderTracker {
    pub fn new(id: OrderId, params: OrderCreate) -> Result<Self, OrderError> {
        if params.stages.is_empty() {
            return Err(OrderError::ValidationError(
                "at least one stage is required".to_string(),
            ));
        }
        Ok(Self {
            id,
            cart: params.cart,
            contacts: params.contacts,
            stages: params.stages,
            state: SequencerState::Idle,
            run: 0,
            ticket: None,
        })
    }

    pub fn state(&self) -> SequencerState {
        self.state
    }

    pub fn stages(&self) -> &[String] {
        &self.stages
    }

    /// Label of the stage being processed, if any.
    pub fn stage_label(&self) -> Option<&str> {
        match self.state {
            SequencerState::Running { step } => self.stages.get(step).map(String::as_str),
            SequencerState::Done => self.stages.last().map(String::as_str),
            SequencerState::Idle => None,
        }
    }

    /// Number of the current (or last) run.
    pub fn run(&self) -> u64 {
        self.run
    }

    pub fn ticket(&self) -> Option<&OrderSummary> {
        self.ticket.as_ref()
    }

    pub fn status(&self) -> OrderStatus {
        OrderStatus {
            state: self.state,
            stage: self.stage_label().map(String::from),
            run: self.run,
        }
    }

    pub fn is_idle(&self) -> bool {
        self.state == SequencerState::Idle
    }

    pub fn is_last_step(&self, step: usize) -> bool {
        step + 1 >= self.stages.len()
    }

    /// Starts a run at the first stage. Returns `None` unless idle.
    pub fn begin(&mut self, ticket: OrderSummary) -> Option<u64> {
        if !self.is_idle() {
            return None;
        }
        self.run += 1;
        self.state = SequencerState::Running { step: 0 };
        self.ticket = Some(ticket);
        Some(self.run)
    }

    pub fn advance(&mut self, run: u64) -> Transition {
        if run != self.run {
            return Transition::Ignored;
        }
        match self.state {
            SequencerState::Running { step } if self.is_last_step(step) => {
                self.state = SequencerState::Done;
                Transition::Completed
            }
            SequencerState::Running { step } => {
                self.state = SequencerState::Running { step: step + 1 };
                Transition::Advanced { step: step + 1 }
            }
            SequencerState::Idle | SequencerState::Done => Transition::Ignored,
        }
    }

    /// Closes a completed run, handing back its ticket. Only valid in `Done`.
    pub fn finish(&mut self, run: u64) -> Option<OrderSummary> {
        if run != self.run || self.state != SequencerState::Done {
            return None;
        }
        self.state = SequencerState::Idle;
        self.ticket.take()
    }
}
