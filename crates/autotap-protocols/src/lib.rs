//! # AutoTap Protocols
//!
//! Core protocol definitions for the AutoTap framework.
//! Contains the data model and interface definitions - no implementations.
//!
//! ## Core Traits
//!
//! - [`ExecutionChannel`] - One mechanism able to inject synthetic input
//! - [`PointerDevice`] - Raw pointer/keyboard primitives a channel can be built on
//! - [`UiTreeProvider`] - Source of foreground UI tree snapshots
//!
//! ## Data Model
//!
//! - [`UiNode`] / [`Bounds`] - Immutable UI tree snapshot
//! - [`SearchCriteria`] - Node predicates
//! - [`Action`] / [`ActionKind`] / [`ChannelKind`] - Dispatchable input requests
//! - [`PageState`] - Coarse classification of the foreground screen

pub mod action;
pub mod channel;
pub mod error;
pub mod gesture;
pub mod tree;
pub mod types;

pub use action::{Action, ActionKind, ChannelKind, Point};
pub use channel::{ExecutionChannel, PointerDevice};
pub use error::ChannelError;
pub use tree::UiTreeProvider;
pub use types::*;
