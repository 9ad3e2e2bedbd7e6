//! # AutoTap Core
//!
//! Building blocks shared by every workflow.
//!
//! ## Components
//!
//! - [`query`] - Pure searches over an immutable [`UiNode`](autotap_protocols::UiNode) snapshot
//! - [`ActionDispatcher`] - Tries each registered execution channel in priority order
//! - [`PointerChannel`] - Gesture timing on top of raw pointer primitives
//! - [`PageClassifier`] - Maps the foreground screen to a page state
//! - [`ChannelRegistry`] - Registered channels keyed by privilege level

pub mod classifier;
pub mod dispatch;
pub mod error;
pub mod pointer;
pub mod query;
pub mod registry;
pub mod selector;

pub use classifier::{Classification, PageClassifier};
pub use dispatch::{ActionDispatcher, ChannelPriority, DispatchReport};
pub use error::RegistryError;
pub use pointer::PointerChannel;
pub use registry::ChannelRegistry;
