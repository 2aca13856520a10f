//! The fixed pause taken before each element is produced.
//!
//! A pause is a tokio timer, so the task awaiting it gives its worker back
//! until the timer fires. Every pause also listens on a `CancellationToken`;
//! once that token is cancelled (the server is shutting down) pauses return
//! straight away. Being interrupted is not an error: the wait is just shorter.

use std::time::Duration;
use tokio_util::sync::CancellationToken;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PauseOutcome {
    Elapsed,
    Interrupted,
}

#[derive(Debug, Clone)]
pub struct Pacing {
    delay: Duration,
    interrupt: CancellationToken,
}

impl Pacing {
    pub fn new(delay: Duration, interrupt: CancellationToken) -> Self {
        Self { delay, interrupt }
    }

    /// Pacing that nothing can interrupt.
    pub fn uninterruptible(delay: Duration) -> Self {
        Self::new(delay, CancellationToken::new())
    }

    pub fn delay(&self) -> Duration {
        self.delay
    }

    pub fn is_interrupted(&self) -> bool {
        self.interrupt.is_cancelled()
    }

    pub async fn pause(&self) -> PauseOutcome {
        tokio::select! {
            biased;
            _ = self.interrupt.cancelled() => PauseOutcome::Interrupted,
            _ = tokio::time::sleep(self.delay) => PauseOutcome::Elapsed,
        }
    }
}
