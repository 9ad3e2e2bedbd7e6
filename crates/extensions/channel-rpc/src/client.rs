//! Helper RPC client.

use std::sync::atomic::{AtomicI64, Ordering};
use std::sync::Arc;
use std::time::Duration;

use tracing::debug;

use crate::protocol::{RpcMethod, RpcRequest};
use crate::transport::{Transport, TransportError};

/// Typed calls over a [`Transport`] with a per-request deadline.
pub struct RpcClient {
    transport: Arc<dyn Transport>,
    request_id: AtomicI64,
    timeout: Duration,
}

impl RpcClient {
    pub fn new(transport: Arc<dyn Transport>, timeout: Duration) -> Self {
        Self {
            transport,
            request_id: AtomicI64::new(1),
            timeout,
        }
    }

    fn next_id(&self) -> i64 {
        self.request_id.fetch_add(1, Ordering::SeqCst)
    }

    /// Send a request and return its raw result. A `null` or missing result
    /// comes back as `Value::Null`.
    pub async fn call(
        &self,
        method: RpcMethod,
        params: Option<serde_json::Value>,
    ) -> Result<serde_json::Value, RpcClientError> {
        let id = self.next_id();
        let mut request = RpcRequest::new(id, method.as_str());
        if let Some(p) = params {
            request = request.with_params(p);
        }

        debug!("Sending RPC request: {} (id={})", method, id);

        let response = tokio::time::timeout(self.timeout, self.transport.send(request))
            .await
            .map_err(|_| RpcClientError::Timeout(method.as_str().to_string()))??;

        if let Some(err) = response.error {
            return Err(RpcClientError::ServerError {
                code: err.code,
                message: err.message,
            });
        }

        Ok(response.result.unwrap_or(serde_json::Value::Null))
    }

    /// Call a method whose result is a boolean acknowledgement.
    pub async fn call_bool(
        &self,
        method: RpcMethod,
        params: Option<serde_json::Value>,
    ) -> Result<bool, RpcClientError> {
        let result = self.call(method, params).await?;
        result.as_bool().ok_or_else(|| {
            RpcClientError::ProtocolError(format!("{} returned non-boolean {}", method, result))
        })
    }

    /// Call a method whose result is a string or null.
    pub async fn call_string(&self, method: RpcMethod) -> Result<Option<String>, RpcClientError> {
        match self.call(method, None).await? {
            serde_json::Value::Null => Ok(None),
            serde_json::Value::String(s) => Ok(Some(s)),
            other => Err(RpcClientError::ProtocolError(format!(
                "{} returned non-string {}",
                method, other
            ))),
        }
    }

    pub async fn close(&self) -> Result<(), RpcClientError> {
        self.transport.close().await?;
        Ok(())
    }
}

/// RPC client errors.
#[derive(Debug, thiserror::Error)]
pub enum RpcClientError {
    #[error("Transport error: {0}")]
    Transport(#[from] TransportError),

    #[error("Server error ({code}): {message}")]
    ServerError { code: i32, message: String },

    #[error("Protocol error: {0}")]
    ProtocolError(String),

    #[error("Request timed out: {0}")]
    Timeout(String),
}

#[cfg(test)]
#[path = "client_tests.rs"]
mod tests;
