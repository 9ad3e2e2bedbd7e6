//! # AutoTap RunLoop
//!
//! Drives the foreground app through the purchase funnel.
//!
//! ```text
//!            start
//!   Idle ─────────────▶ Running ──┬── cancelled ──────▶ Stopped
//!                         ▲   │   ├── budget spent ───▶ Exhausted
//!                         └───┘   └── order submitted ─▶ Completed
//!                     classify, act, wait
//! ```
//!
//! ## Key Components
//!
//! - [`WorkflowOrchestrator`]: The classify/act/wait loop
//! - [`WorkflowController`]: Guarantees at most one active run per process
//! - [`SlidePlanner`]: Randomized slider-captcha gesture
//! - [`WorkflowOutcome`]: How and where a run ended

pub mod controller;
pub mod error;
pub mod orchestrator;
pub mod slide;
pub mod state;

pub use controller::WorkflowController;
pub use error::RunError;
pub use orchestrator::WorkflowOrchestrator;
pub use slide::{SlidePlan, SlidePlanner};
pub use state::{RunStatus, TerminalState, WorkflowOutcome};

// Re-export CancellationToken for convenience
pub use tokio_util::sync::CancellationToken;
