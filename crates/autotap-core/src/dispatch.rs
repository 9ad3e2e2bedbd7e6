//! Tiered action dispatch.
//!
//! An action is offered to each channel in the priority list of its
//! [`ActionKind`]. Channels that are missing or report themselves
//! unavailable are skipped, the first success stops the walk, and failure
//! is reported only once every channel has been tried.
//!
//! A failed dispatch means failure or an unknown partial effect on the
//! device, never a guaranteed no-op.

use std::collections::HashMap;
use std::sync::Arc;

use autotap_config::ChannelsConfig;
use autotap_protocols::{
    Action, ActionKind, ChannelError, ChannelKind, ExecutionChannel, Point, UiNode,
};
use tracing::{debug, warn};

use crate::registry::ChannelRegistry;

#[cfg(test)]
#[path = "dispatch_tests.rs"]
mod tests;

/// Ordered channel list per action kind.
#[derive(Debug, Clone, PartialEq)]
pub struct ChannelPriority {
    order: HashMap<ActionKind, Vec<ChannelKind>>,
}

impl ChannelPriority {
    /// Most privileged first for every kind.
    pub fn new() -> Self {
        let order = ActionKind::ALL
            .into_iter()
            .map(|kind| (kind, ChannelKind::ALL.to_vec()))
            .collect();
        Self { order }
    }

    /// Per-kind overrides from configuration, with disabled channels removed.
    pub fn from_config(config: &ChannelsConfig) -> Self {
        let order = ActionKind::ALL
            .into_iter()
            .map(|kind| {
                let channels = config
                    .priority_for(kind)
                    .into_iter()
                    .filter(|channel| config.is_enabled(*channel))
                    .collect();
                (kind, channels)
            })
            .collect();
        Self { order }
    }

    pub fn set(&mut self, kind: ActionKind, channels: Vec<ChannelKind>) {
        self.order.insert(kind, channels);
    }

    pub fn for_kind(&self, kind: ActionKind) -> &[ChannelKind] {
        self.order.get(&kind).map(Vec::as_slice).unwrap_or(&[])
    }
}

impl Default for ChannelPriority {
    fn default() -> Self {
        Self::new()
    }
}

/// Result of one dispatch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DispatchReport {
    pub success: bool,
    /// Channel that delivered the action.
    pub channel: Option<ChannelKind>,
    /// Channels actually invoked, in order.
    pub attempted: Vec<ChannelKind>,
}

/// Delivers actions through the first channel that accepts them.
pub struct ActionDispatcher {
    registry: Arc<ChannelRegistry>,
    priority: ChannelPriority,
}

impl ActionDispatcher {
    pub fn new(registry: Arc<ChannelRegistry>, priority: ChannelPriority) -> Self {
        Self { registry, priority }
    }

    pub fn registry(&self) -> &Arc<ChannelRegistry> {
        &self.registry
    }

    pub fn priority(&self) -> &ChannelPriority {
        &self.priority
    }

    pub async fn dispatch(&self, action: &Action) -> DispatchReport {
        let kind = action.kind();
        let mut attempted = Vec::new();

        for &channel_kind in self.priority.for_kind(kind) {
            let Some(channel) = self.registry.get(channel_kind) else {
                debug!("{} skipped for {}: not registered", channel_kind, kind);
                continue;
            };

            if !channel.is_available().await {
                debug!("{} skipped for {}: unavailable", channel_kind, kind);
                continue;
            }

            attempted.push(channel_kind);
            match execute(channel.as_ref(), action).await {
                Ok(()) => {
                    debug!("{} delivered by {}", kind, channel_kind);
                    return DispatchReport {
                        success: true,
                        channel: Some(channel_kind),
                        attempted,
                    };
                }
                Err(e) => {
                    warn!("{} failed on {}: {}", kind, channel_kind, e);
                }
            }
        }

        warn!(
            "{} failed on every channel (attempted: {:?})",
            kind, attempted
        );
        DispatchReport {
            success: false,
            channel: None,
            attempted,
        }
    }

    pub async fn click(&self, x: f32, y: f32) -> bool {
        self.dispatch(&Action::click(x, y)).await.success
    }

    pub async fn long_click(&self, x: f32, y: f32, duration_ms: u64) -> bool {
        self.dispatch(&Action::long_click(x, y, duration_ms))
            .await
            .success
    }

    pub async fn double_click(&self, x: f32, y: f32) -> bool {
        self.dispatch(&Action::double_click(x, y)).await.success
    }

    pub async fn drag(&self, from: Point, to: Point, duration_ms: u64) -> bool {
        self.dispatch(&Action::drag(from, to, duration_ms))
            .await
            .success
    }

    pub async fn slide(&self, from: Point, to: Point, steps: u32) -> bool {
        self.dispatch(&Action::slide(from, to, steps)).await.success
    }

    pub async fn type_text(&self, text: &str) -> bool {
        self.dispatch(&Action::type_text(text)).await.success
    }

    pub async fn send_key(&self, key_code: i32) -> bool {
        self.dispatch(&Action::send_key(key_code)).await.success
    }

    /// Click the center of a node. Nodes without area are never clicked.
    pub async fn click_node(&self, node: &UiNode) -> bool {
        if node.bounds.is_empty() {
            warn!(
                "Refusing to click {} ({}): empty bounds",
                node.class_name, node.id
            );
            return false;
        }
        let center = node.bounds.center();
        self.click(center.x, center.y).await
    }
}

async fn execute(channel: &dyn ExecutionChannel, action: &Action) -> Result<(), ChannelError> {
    match action {
        Action::Click { at } => channel.click(*at).await,
        Action::LongClick { at, duration_ms } => channel.long_click(*at, *duration_ms).await,
        Action::DoubleClick { at } => channel.double_click(*at).await,
        Action::Drag {
            from,
            to,
            duration_ms,
        } => channel.drag(*from, *to, *duration_ms).await,
        Action::Slide { from, to, steps } => channel.slide(*from, *to, *steps).await,
        Action::TypeText { text } => channel.type_text(text).await,
        Action::SendKey { key_code } => channel.send_key(*key_code).await,
    }
}
