//! Privileged helper channel for AutoTap.
//!
//! Talks newline-delimited JSON-RPC 2.0 to a helper process over its stdio.
//! The helper injects input with system privileges and exposes the
//! accessibility tree, so one connection serves both as the most privileged
//! execution channel and as the UI tree provider.

mod channel;
mod client;
mod protocol;
mod transport;

pub use channel::PrivilegedRpcChannel;
pub use client::{RpcClient, RpcClientError};
pub use protocol::{RequestId, RpcError, RpcMethod, RpcRequest, RpcResponse};
pub use transport::{StdioTransport, Transport, TransportError};
