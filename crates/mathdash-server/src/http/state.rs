use std::sync::Arc;
use std::time::Instant;

use mathdash_engine::SessionController;
use mathdash_ledger::ScoreLedger;

/// Shared state for HTTP handlers.
#[derive(Clone)]
pub struct ApiState {
    pub controller: Arc<SessionController>,
    pub ledger: Arc<dyn ScoreLedger>,
    /// For the uptime reported by `/health`.
    pub start_time: Instant,
}

impl ApiState {
    pub fn new(controller: Arc<SessionController>, ledger: Arc<dyn ScoreLedger>) -> Self {
        Self {
            controller,
            ledger,
            start_time: Instant::now(),
        }
    }
}
