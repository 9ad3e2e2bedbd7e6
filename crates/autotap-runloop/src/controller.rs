//! Single-run workflow controller.

use std::sync::Arc;

use parking_lot::Mutex;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;
use tracing::info;

use crate::error::RunError;
use crate::orchestrator::WorkflowOrchestrator;
use crate::state::{RunStatus, TerminalState, WorkflowOutcome};

struct Slot {
    active: Option<CancellationToken>,
    last: Option<TerminalState>,
}

/// Clears the active slot when the run task ends, even by panic.
struct ActiveGuard {
    slot: Arc<Mutex<Slot>>,
    terminal: Option<TerminalState>,
}

impl Drop for ActiveGuard {
    fn drop(&mut self) {
        let mut slot = self.slot.lock();
        slot.active = None;
        slot.last = self.terminal;
    }
}

/// Owns the orchestrator and guarantees at most one active run.
///
/// Start and stop transitions happen under one lock, so two concurrent
/// `start` calls can never both succeed.
pub struct WorkflowController {
    orchestrator: Arc<WorkflowOrchestrator>,
    slot: Arc<Mutex<Slot>>,
}

impl WorkflowController {
    pub fn new(orchestrator: Arc<WorkflowOrchestrator>) -> Self {
        Self {
            orchestrator,
            slot: Arc::new(Mutex::new(Slot {
                active: None,
                last: None,
            })),
        }
    }

    pub fn orchestrator(&self) -> &Arc<WorkflowOrchestrator> {
        &self.orchestrator
    }

    /// Spawn a new run on the current tokio runtime.
    ///
    /// # Errors
    ///
    /// Returns [`RunError::AlreadyRunning`] while another run is active.
    pub fn start(&self) -> Result<JoinHandle<WorkflowOutcome>, RunError> {
        let mut slot = self.slot.lock();
        if slot.active.is_some() {
            return Err(RunError::AlreadyRunning);
        }

        let token = CancellationToken::new();
        slot.active = Some(token.clone());
        drop(slot);

        let orchestrator = self.orchestrator.clone();
        let mut guard = ActiveGuard {
            slot: self.slot.clone(),
            terminal: None,
        };
        Ok(tokio::spawn(async move {
            let outcome = orchestrator.run(token).await;
            guard.terminal = Some(outcome.terminal);
            drop(guard);
            outcome
        }))
    }

    /// Start a run and wait for it to end.
    pub async fn run(&self) -> Result<WorkflowOutcome, RunError> {
        let handle = self.start()?;
        handle
            .await
            .map_err(|e| RunError::TaskFailed(e.to_string()))
    }

    /// Request cancellation of the active run. Returns false when idle.
    pub fn stop(&self) -> bool {
        match &self.slot.lock().active {
            Some(token) => {
                info!("Stopping workflow");
                token.cancel();
                true
            }
            None => false,
        }
    }

    pub fn is_active(&self) -> bool {
        self.slot.lock().active.is_some()
    }

    pub fn status(&self) -> RunStatus {
        let slot = self.slot.lock();
        match (&slot.active, slot.last) {
            (Some(_), _) => RunStatus::Running,
            (None, Some(terminal)) => RunStatus::Finished(terminal),
            (None, None) => RunStatus::Idle,
        }
    }
}
