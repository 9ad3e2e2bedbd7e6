//! Execution channel protocol definitions.
//!
//! An [`ExecutionChannel`] is one mechanism able to inject synthetic input
//! into the foreground app. Several channels of different privilege levels
//! coexist; the dispatcher tries them in priority order.
//!
//! Channels that only expose raw pointer primitives implement
//! [`PointerDevice`] instead and get the shared gesture timing from the core
//! crate's `PointerChannel` adapter.

use async_trait::async_trait;

use crate::action::{ChannelKind, Point};
use crate::error::ChannelError;

/// Full gesture-level channel.
///
/// Every operation may have partially delivered input when it fails.
#[async_trait]
pub trait ExecutionChannel: Send + Sync {
    /// Privilege level this channel implements.
    fn kind(&self) -> ChannelKind;

    /// Whether the channel can be used right now.
    async fn is_available(&self) -> bool;

    async fn click(&self, at: Point) -> Result<(), ChannelError>;

    async fn long_click(&self, at: Point, duration_ms: u64) -> Result<(), ChannelError>;

    async fn double_click(&self, at: Point) -> Result<(), ChannelError>;

    async fn drag(&self, from: Point, to: Point, duration_ms: u64) -> Result<(), ChannelError>;

    async fn slide(&self, from: Point, to: Point, steps: u32) -> Result<(), ChannelError>;

    async fn type_text(&self, text: &str) -> Result<(), ChannelError>;

    async fn send_key(&self, key_code: i32) -> Result<(), ChannelError>;
}

/// Raw pointer and keyboard primitives.
#[async_trait]
pub trait PointerDevice: Send + Sync {
    fn kind(&self) -> ChannelKind;

    async fn is_available(&self) -> bool;

    async fn pointer_down(&self, at: Point) -> Result<(), ChannelError>;

    async fn pointer_move(&self, to: Point) -> Result<(), ChannelError>;

    async fn pointer_up(&self, at: Point) -> Result<(), ChannelError>;

    async fn type_text(&self, text: &str) -> Result<(), ChannelError>;

    async fn send_key(&self, key_code: i32) -> Result<(), ChannelError>;
}
