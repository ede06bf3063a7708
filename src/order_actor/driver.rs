//! # Submission Driver
//!
//! The timer half of the sequencer. One driver task is spawned per started run;
//! it sleeps for the dwell of the current stage, posts `Advance` to the order
//! actor, and posts `Finalize` once the last stage has finished.
//!
//! The driver never touches tracker state itself. Every transition goes through
//! the actor, so a cancelled or outdated driver can at most post a message that
//! the tracker ignores.

use super::actions::{OrderAction, OrderActionResult};
use crate::framework::ResourceClient;
use crate::model::{OrderId, OrderTracker, Transition};
use std::time::Duration;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

/// How long each stage is shown.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StageTiming {
    /// Dwell of every stage but the last.
    pub step_dwell: Duration,
    /// Dwell of the last stage, before the run is done.
    pub final_dwell: Duration,
}

impl Default for StageTiming {
    fn default() -> Self {
        Self {
            step_dwell: Duration::from_millis(1500),
            final_dwell: Duration::from_millis(2500),
        }
    }
}

impl StageTiming {
    fn dwell(&self, step: usize, stages: usize) -> Duration {
        if step + 1 >= stages {
            self.final_dwell
        } else {
            self.step_dwell
        }
    }
}

pub struct SubmissionDriver {
    tracker: ResourceClient<OrderTracker>,
    order: OrderId,
    run: u64,
    stages: usize,
    timing: StageTiming,
    shutdown: CancellationToken,
}

impl SubmissionDriver {
    pub fn new(
        tracker: ResourceClient<OrderTracker>,
        order: OrderId,
        run: u64,
        stages: usize,
        timing: StageTiming,
        shutdown: CancellationToken,
    ) -> Self {
        Self {
            tracker,
            order,
            run,
            stages,
            timing,
            shutdown,
        }
    }

    pub fn spawn(self) -> JoinHandle<()> {
        tokio::spawn(self.run())
    }

    /// Drives one run from its first stage to finalization.
    pub async fn run(self) {
        let mut step = 0;
        loop {
            let dwell = self.timing.dwell(step, self.stages);
            tokio::select! {
                _ = tokio::time::sleep(dwell) => {}
                _ = self.shutdown.cancelled() => {
                    info!(order = %self.order, run = self.run, step, "Submission cancelled");
                    return;
                }
            }

            let advanced = self
                .tracker
                .perform_action(self.order, OrderAction::Advance { run: self.run })
                .await;
            match advanced {
                Ok(OrderActionResult::Advance(Transition::Advanced { step: next })) => step = next,
                Ok(OrderActionResult::Advance(Transition::Completed)) => break,
                Ok(other) => {
                    debug!(order = %self.order, run = self.run, ?other, "Run no longer active");
                    return;
                }
                Err(e) => {
                    warn!(order = %self.order, run = self.run, error = %e, "Advance failed");
                    return;
                }
            }
        }

        let finalized = self
            .tracker
            .perform_action(self.order, OrderAction::Finalize { run: self.run })
            .await;
        match finalized {
            Ok(OrderActionResult::Finalize(Some(ticket))) => {
                info!(order = %self.order, run = self.run, total = %ticket.total, "Submission complete");
            }
            Ok(other) => debug!(order = %self.order, run = self.run, ?other, "Nothing to finalize"),
            Err(e) => warn!(order = %self.order, run = self.run, error = %e, "Finalize failed"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::framework::mock::{create_mock_client, expect_action};

    fn assert_elapsed(started: tokio::time::Instant, millis: u64) {
        let elapsed = started.elapsed();
        assert!(elapsed >= Duration::from_millis(millis), "{elapsed:?}");
        assert!(elapsed < Duration::from_millis(millis + 50), "{elapsed:?}");
    }

    #[test]
    fn test_last_stage_uses_final_dwell() {
        let timing = StageTiming::default();
        assert_eq!(timing.dwell(0, 6), Duration::from_millis(1500));
        assert_eq!(timing.dwell(4, 6), Duration::from_millis(1500));
        assert_eq!(timing.dwell(5, 6), Duration::from_millis(2500));
        assert_eq!(timing.dwell(0, 1), Duration::from_millis(2500));
    }

    #[tokio::test(start_paused = true)]
    async fn test_driver_posts_advances_then_finalize() {
        let (client, mut receiver) = create_mock_client::<OrderTracker>(10);
        let driver = SubmissionDriver::new(
            client,
            OrderId(1),
            7,
            2,
            StageTiming::default(),
            CancellationToken::new(),
        );
        let started = tokio::time::Instant::now();
        let handle = driver.spawn();

        let (id, action, responder) = expect_action(&mut receiver).await.expect("Expected Advance");
        assert_eq!(id, OrderId(1));
        assert!(matches!(action, OrderAction::Advance { run: 7 }));
        assert_elapsed(started, 1500);
        responder
            .send(Ok(OrderActionResult::Advance(Transition::Advanced { step: 1 })))
            .unwrap();

        let (_, action, responder) = expect_action(&mut receiver).await.expect("Expected Advance");
        assert!(matches!(action, OrderAction::Advance { run: 7 }));
        assert_elapsed(started, 4000);
        responder
            .send(Ok(OrderActionResult::Advance(Transition::Completed)))
            .unwrap();

        let (_, action, responder) = expect_action(&mut receiver).await.expect("Expected Finalize");
        assert!(matches!(action, OrderAction::Finalize { run: 7 }));
        responder.send(Ok(OrderActionResult::Finalize(None))).unwrap();

        handle.await.unwrap();
    }

    #[tokio::test(start_paused = true)]
    async fn test_cancelled_driver_posts_nothing() {
        let (client, mut receiver) = create_mock_client::<OrderTracker>(10);
        let shutdown = CancellationToken::new();
        let handle = SubmissionDriver::new(
            client,
            OrderId(1),
            1,
            6,
            StageTiming::default(),
            shutdown.clone(),
        )
        .spawn();

        shutdown.cancel();
        handle.await.unwrap();

        // the driver dropped its client without sending
        assert!(receiver.recv().await.is_none());
    }

    #[tokio::test(start_paused = true)]
    async fn test_driver_stops_on_stale_run() {
        let (client, mut receiver) = create_mock_client::<OrderTracker>(10);
        let handle = SubmissionDriver::new(
            client,
            OrderId(1),
            3,
            6,
            StageTiming::default(),
            CancellationToken::new(),
        )
        .spawn();

        let (_, _, responder) = expect_action(&mut receiver).await.expect("Expected Advance");
        responder
            .send(Ok(OrderActionResult::Advance(Transition::Ignored)))
            .unwrap();

        handle.await.unwrap();
        assert!(receiver.recv().await.is_none());
    }
}
