//! Error types for workflow runs.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum RunError {
    /// A run is already active in this process.
    #[error("Workflow is already running")]
    AlreadyRunning,

    /// The run task panicked or was aborted.
    #[error("Workflow task failed: {0}")]
    TaskFailed(String),
}
