//! Run states and outcomes.

use autotap_protocols::PageState;
use tokio_util::sync::CancellationToken;
use tracing::info;

/// How a run ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TerminalState {
    /// Cancelled from outside.
    Stopped,
    /// Retry budget reached zero.
    Exhausted,
    /// The order page was reached and submission attempted.
    Completed,
}

impl std::fmt::Display for TerminalState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TerminalState::Stopped => write!(f, "stopped"),
            TerminalState::Exhausted => write!(f, "exhausted"),
            TerminalState::Completed => write!(f, "completed"),
        }
    }
}

/// Controller-level view of the workflow.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunStatus {
    Idle,
    Running,
    Finished(TerminalState),
}

/// Result of one run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WorkflowOutcome {
    /// True only when the run completed and the submit click succeeded.
    pub success: bool,
    pub terminal: TerminalState,
    /// Page state observed by the last classification.
    pub last_page: PageState,
    /// Loop iterations started.
    pub iterations: u64,
}

/// Mutable state of one active run. Dropped when the run ends.
#[derive(Debug)]
pub(crate) struct WorkflowRun {
    pub cancel: CancellationToken,
    pub budget: u64,
    pub page: PageState,
    pub date_cursor: usize,
    pub iterations: u64,
}

impl WorkflowRun {
    pub fn new(budget: u64, cancel: CancellationToken) -> Self {
        Self {
            cancel,
            budget,
            page: PageState::Unknown,
            date_cursor: 0,
            iterations: 0,
        }
    }

    /// Consume one retry. Returns true when the budget is used up.
    pub fn spend(&mut self) -> bool {
        self.budget = self.budget.saturating_sub(1);
        self.budget == 0
    }

    /// Pick the next date index round-robin and advance the cursor.
    pub fn next_date(&mut self, available: usize) -> usize {
        let index = self.date_cursor % available.max(1);
        self.date_cursor = self.date_cursor.wrapping_add(1);
        index
    }

    pub fn finish(self, terminal: TerminalState, success: bool) -> WorkflowOutcome {
        info!(
            "Workflow {} after {} iterations on {} (success: {})",
            terminal, self.iterations, self.page, success
        );
        WorkflowOutcome {
            success,
            terminal,
            last_page: self.page,
            iterations: self.iterations,
        }
    }
}
