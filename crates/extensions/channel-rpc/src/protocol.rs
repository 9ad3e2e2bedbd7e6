//! Helper wire types (JSON-RPC 2.0).

use serde::de::Error as _;
use serde::{Deserialize, Serialize};

/// Deepest JSON nesting accepted in one helper line. Each tree level costs
/// two (the node object and its `children` array).
pub const MAX_NESTING: usize = 1024;

/// JSON-RPC request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RpcRequest {
    pub jsonrpc: String,
    pub id: RequestId,
    pub method: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub params: Option<serde_json::Value>,
}

impl RpcRequest {
    pub fn new(id: impl Into<RequestId>, method: impl Into<String>) -> Self {
        Self {
            jsonrpc: "2.0".to_string(),
            id: id.into(),
            method: method.into(),
            params: None,
        }
    }

    pub fn with_params(mut self, params: serde_json::Value) -> Self {
        self.params = Some(params);
        self
    }
}

/// JSON-RPC response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RpcResponse {
    pub jsonrpc: String,
    pub id: RequestId,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub result: Option<serde_json::Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<RpcError>,
}

impl RpcResponse {
    pub fn success(id: impl Into<RequestId>, result: serde_json::Value) -> Self {
        Self {
            jsonrpc: "2.0".to_string(),
            id: id.into(),
            result: Some(result),
            error: None,
        }
    }

    pub fn error(id: impl Into<RequestId>, error: RpcError) -> Self {
        Self {
            jsonrpc: "2.0".to_string(),
            id: id.into(),
            result: None,
            error: Some(error),
        }
    }

    pub fn is_error(&self) -> bool {
        self.error.is_some()
    }

    /// Decode one response line.
    ///
    /// Accessibility trees nest far deeper than serde_json's default limit of
    /// 128, so nesting is bounded by [`MAX_NESTING`] instead.
    pub fn from_line(line: &str) -> Result<Self, serde_json::Error> {
        let depth = nesting_depth(line);
        if depth > MAX_NESTING {
            return Err(serde_json::Error::custom(format!(
                "response nested {} levels deep (limit {})",
                depth, MAX_NESTING
            )));
        }

        let mut de = serde_json::Deserializer::from_str(line);
        de.disable_recursion_limit();
        let response = Self::deserialize(&mut de)?;
        de.end()?;
        Ok(response)
    }
}

/// Deepest bracket nesting in a JSON text, ignoring brackets inside strings.
fn nesting_depth(text: &str) -> usize {
    let mut depth = 0usize;
    let mut max = 0usize;
    let mut in_string = false;
    let mut escaped = false;

    for byte in text.bytes() {
        if in_string {
            match byte {
                _ if escaped => escaped = false,
                b'\\' => escaped = true,
                b'"' => in_string = false,
                _ => {}
            }
            continue;
        }
        match byte {
            b'"' => in_string = true,
            b'{' | b'[' => {
                depth += 1;
                max = max.max(depth);
            }
            b'}' | b']' => depth = depth.saturating_sub(1),
            _ => {}
        }
    }
    max
}

/// Request ID (can be string or number).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(untagged)]
pub enum RequestId {
    Number(i64),
    String(String),
}

impl From<i64> for RequestId {
    fn from(n: i64) -> Self {
        RequestId::Number(n)
    }
}

impl From<&str> for RequestId {
    fn from(s: &str) -> Self {
        RequestId::String(s.to_string())
    }
}

/// JSON-RPC error object.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RpcError {
    pub code: i32,
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<serde_json::Value>,
}

impl RpcError {
    pub fn new(code: i32, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            data: None,
        }
    }

    pub fn method_not_found() -> Self {
        Self::new(-32601, "Method not found")
    }

    pub fn invalid_params() -> Self {
        Self::new(-32602, "Invalid params")
    }
}

/// Methods understood by the helper.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RpcMethod {
    IsAvailable,
    Click,
    LongClick,
    DoubleClick,
    Drag,
    Slide,
    TypeText,
    SendKey,
    GetRootNode,
    GetCurrentPackageName,
    GetCurrentActivity,
}

impl RpcMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            RpcMethod::IsAvailable => "isAvailable",
            RpcMethod::Click => "click",
            RpcMethod::LongClick => "longClick",
            RpcMethod::DoubleClick => "doubleClick",
            RpcMethod::Drag => "drag",
            RpcMethod::Slide => "slide",
            RpcMethod::TypeText => "typeText",
            RpcMethod::SendKey => "sendKey",
            RpcMethod::GetRootNode => "getRootNode",
            RpcMethod::GetCurrentPackageName => "getCurrentPackageName",
            RpcMethod::GetCurrentActivity => "getCurrentActivity",
        }
    }
}

impl std::fmt::Display for RpcMethod {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
#[path = "protocol_tests.rs"]
mod tests;
