//! Transport layer for helper communication.

use async_trait::async_trait;
use std::process::Stdio;
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};
use tokio::process::{Child, ChildStdin, ChildStdout, Command};
use tokio::sync::Mutex;
use tracing::{debug, warn};

use crate::protocol::{RpcRequest, RpcResponse};

/// Request/response exchange with the helper.
#[async_trait]
pub trait Transport: Send + Sync {
    /// Send a request and receive its response.
    async fn send(&self, request: RpcRequest) -> Result<RpcResponse, TransportError>;

    /// Close the transport.
    async fn close(&self) -> Result<(), TransportError>;
}

/// Transport errors.
#[derive(Debug, thiserror::Error)]
pub enum TransportError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Process error: {0}")]
    Process(String),

    #[error("Connection closed")]
    Closed,
}

struct Pipes {
    stdin: ChildStdin,
    stdout: BufReader<ChildStdout>,
}

/// Helper subprocess reached over its stdin/stdout, one JSON document per
/// line.
///
/// Requests are strictly sequential: the pipe lock is held from write until
/// the matching response line is read.
pub struct StdioTransport {
    child: Mutex<Option<Child>>,
    pipes: Mutex<Option<Pipes>>,
}

impl StdioTransport {
    /// Spawn the helper process.
    pub async fn spawn(command: &str, args: &[String]) -> Result<Self, TransportError> {
        let mut child = Command::new(command)
            .args(args)
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::inherit())
            .kill_on_drop(true)
            .spawn()?;

        let stdin = child
            .stdin
            .take()
            .ok_or_else(|| TransportError::Process("Failed to capture stdin".to_string()))?;

        let stdout = child
            .stdout
            .take()
            .ok_or_else(|| TransportError::Process("Failed to capture stdout".to_string()))?;

        debug!("Spawned RPC helper: {} {:?}", command, args);
        Ok(Self {
            child: Mutex::new(Some(child)),
            pipes: Mutex::new(Some(Pipes {
                stdin,
                stdout: BufReader::new(stdout),
            })),
        })
    }
}

#[async_trait]
impl Transport for StdioTransport {
    async fn send(&self, request: RpcRequest) -> Result<RpcResponse, TransportError> {
        let mut guard = self.pipes.lock().await;
        let pipes = guard.as_mut().ok_or(TransportError::Closed)?;

        let json = serde_json::to_string(&request)?;
        pipes.stdin.write_all(json.as_bytes()).await?;
        pipes.stdin.write_all(b"\n").await?;
        pipes.stdin.flush().await?;

        // Skip blank lines and stale responses of timed-out requests.
        loop {
            let mut line = String::new();
            if pipes.stdout.read_line(&mut line).await? == 0 {
                *guard = None;
                return Err(TransportError::Closed);
            }
            if line.trim().is_empty() {
                continue;
            }

            let response = RpcResponse::from_line(&line)?;
            if response.id == request.id {
                return Ok(response);
            }
            warn!("Discarding response for stale request {:?}", response.id);
        }
    }

    async fn close(&self) -> Result<(), TransportError> {
        *self.pipes.lock().await = None;

        if let Some(mut child) = self.child.lock().await.take() {
            child.kill().await?;
        }

        Ok(())
    }
}
