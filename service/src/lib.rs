use config::Config;
use domain::pacing::Pacing;
use std::sync::Arc;
use tokio_util::sync::CancellationToken;

pub mod config;
pub mod logging;

// Service-level state shared by every request handler
// Needs to implement Clone to be able to be passed into Router as State
#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    pub sse_manager: Arc<sse::Manager>,
    interrupt: CancellationToken,
}

impl AppState {
    pub fn new(app_config: Config) -> Self {
        Self {
            config: app_config,
            sse_manager: Arc::new(sse::Manager::new()),
            interrupt: CancellationToken::new(),
        }
    }

    /// Pacing for a single request: the configured per-element delay, cut
    /// short once the server starts shutting down.
    pub fn pacing(&self) -> Pacing {
        Pacing::new(self.config.element_delay(), self.interrupt.child_token())
    }

    /// Interrupts every pause currently in flight and any taken afterwards.
    pub fn interrupt(&self) {
        self.interrupt.cancel();
    }

    pub fn is_interrupted(&self) -> bool {
        self.interrupt.is_cancelled()
    }
}
