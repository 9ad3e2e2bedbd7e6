//! Privileged execution channel and tree provider backed by the helper.

use async_trait::async_trait;
use autotap_protocols::{
    ChannelError, ChannelKind, ExecutionChannel, Point, UiNode, UiTreeProvider,
};
use serde_json::json;
use tracing::{debug, warn};

use crate::client::{RpcClient, RpcClientError};
use crate::protocol::RpcMethod;

/// Highest-privilege channel. Gesture timing is performed by the helper,
/// so each operation is a single round trip.
pub struct PrivilegedRpcChannel {
    client: RpcClient,
}

impl PrivilegedRpcChannel {
    pub fn new(client: RpcClient) -> Self {
        Self { client }
    }

    pub fn client(&self) -> &RpcClient {
        &self.client
    }

    /// Perform an acknowledged gesture. `false` from the helper is a
    /// rejection.
    async fn gesture(
        &self,
        method: RpcMethod,
        params: serde_json::Value,
    ) -> Result<(), ChannelError> {
        debug!("RPC {} {}", method, params);
        let accepted = self
            .client
            .call_bool(method, Some(params))
            .await
            .map_err(channel_error)?;
        if accepted {
            Ok(())
        } else {
            Err(ChannelError::Rejected {
                method: method.as_str().to_string(),
            })
        }
    }

    async fn query_string(&self, method: RpcMethod) -> Option<String> {
        match self.client.call_string(method).await {
            Ok(value) => value,
            Err(e) => {
                warn!("RPC {} failed: {}", method, e);
                None
            }
        }
    }
}

fn channel_error(err: RpcClientError) -> ChannelError {
    match err {
        RpcClientError::Transport(e) => ChannelError::Transport(e.to_string()),
        RpcClientError::Timeout(method) => {
            ChannelError::Transport(format!("{} timed out", method))
        }
        e @ (RpcClientError::ServerError { .. } | RpcClientError::ProtocolError(_)) => {
            ChannelError::Protocol(e.to_string())
        }
    }
}

#[async_trait]
impl ExecutionChannel for PrivilegedRpcChannel {
    fn kind(&self) -> ChannelKind {
        ChannelKind::PrivilegedRpc
    }

    async fn is_available(&self) -> bool {
        match self.client.call_bool(RpcMethod::IsAvailable, None).await {
            Ok(available) => available,
            Err(e) => {
                debug!("RPC helper unavailable: {}", e);
                false
            }
        }
    }

    async fn click(&self, at: Point) -> Result<(), ChannelError> {
        self.gesture(RpcMethod::Click, json!({ "x": at.x, "y": at.y }))
            .await
    }

    async fn long_click(&self, at: Point, duration_ms: u64) -> Result<(), ChannelError> {
        self.gesture(
            RpcMethod::LongClick,
            json!({ "x": at.x, "y": at.y, "durationMs": duration_ms }),
        )
        .await
    }

    async fn double_click(&self, at: Point) -> Result<(), ChannelError> {
        self.gesture(RpcMethod::DoubleClick, json!({ "x": at.x, "y": at.y }))
            .await
    }

    async fn drag(&self, from: Point, to: Point, duration_ms: u64) -> Result<(), ChannelError> {
        self.gesture(
            RpcMethod::Drag,
            json!({
                "startX": from.x,
                "startY": from.y,
                "endX": to.x,
                "endY": to.y,
                "durationMs": duration_ms,
            }),
        )
        .await
    }

    async fn slide(&self, from: Point, to: Point, steps: u32) -> Result<(), ChannelError> {
        self.gesture(
            RpcMethod::Slide,
            json!({
                "startX": from.x,
                "startY": from.y,
                "endX": to.x,
                "endY": to.y,
                "steps": steps,
            }),
        )
        .await
    }

    async fn type_text(&self, text: &str) -> Result<(), ChannelError> {
        self.gesture(RpcMethod::TypeText, json!({ "text": text }))
            .await
    }

    async fn send_key(&self, key_code: i32) -> Result<(), ChannelError> {
        self.gesture(RpcMethod::SendKey, json!({ "keyCode": key_code }))
            .await
    }
}

#[async_trait]
impl UiTreeProvider for PrivilegedRpcChannel {
    async fn foreground_tree(&self) -> Option<UiNode> {
        let value = match self.client.call(RpcMethod::GetRootNode, None).await {
            Ok(value) => value,
            Err(e) => {
                warn!("Failed to fetch UI tree: {}", e);
                return None;
            }
        };
        if value.is_null() {
            return None;
        }

        match serde_json::from_value(value) {
            Ok(root) => Some(root),
            Err(e) => {
                warn!("Malformed UI tree from helper: {}", e);
                None
            }
        }
    }

    async fn foreground_package(&self) -> Option<String> {
        self.query_string(RpcMethod::GetCurrentPackageName).await
    }

    async fn foreground_activity(&self) -> Option<String> {
        self.query_string(RpcMethod::GetCurrentActivity).await
    }
}

#[cfg(test)]
#[path = "channel_tests.rs"]
mod tests;
