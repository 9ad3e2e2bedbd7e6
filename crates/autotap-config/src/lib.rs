//! # AutoTap Config
//!
//! Configuration management for the AutoTap framework: UI markers, page
//! signatures, wait timings, retry budget, captcha heuristics and channel
//! priority.

mod error;
mod loader;
mod schema;
mod validator;

pub use error::ConfigError;
pub use loader::ConfigLoader;
pub use schema::*;
pub use validator::{ConfigValidator, ValidationError, ValidationResult, ValidationWarning};
