//! Error types for the AutoTap protocol layer.

mod channel;

pub use channel::*;
