use super::*;

#[test]
fn test_request_serialization() {
    let request = RpcRequest::new(3i64, RpcMethod::Click.as_str())
        .with_params(serde_json::json!({"x": 540.0, "y": 1200.0}));

    let json = serde_json::to_value(&request).unwrap();
    assert_eq!(json["jsonrpc"], "2.0");
    assert_eq!(json["id"], 3);
    assert_eq!(json["method"], "click");
    assert_eq!(json["params"]["x"], 540.0);
}

#[test]
fn test_request_without_params_omits_field() {
    let request = RpcRequest::new(1i64, RpcMethod::IsAvailable.as_str());
    let json = serde_json::to_string(&request).unwrap();
    assert!(!json.contains("params"));
}

#[test]
fn test_response_success_deserialize() {
    let json = r#"{"jsonrpc":"2.0","id":7,"result":true}"#;
    let response: RpcResponse = serde_json::from_str(json).unwrap();
    assert_eq!(response.id, RequestId::Number(7));
    assert!(!response.is_error());
    assert_eq!(response.result, Some(serde_json::Value::Bool(true)));
}

#[test]
fn test_response_null_result() {
    let json = r#"{"jsonrpc":"2.0","id":2,"result":null}"#;
    let response: RpcResponse = serde_json::from_str(json).unwrap();
    assert!(!response.is_error());
    assert!(response.result.is_none());
}

#[test]
fn test_response_error_deserialize() {
    let json = r#"{"jsonrpc":"2.0","id":"a","error":{"code":-32601,"message":"Method not found"}}"#;
    let response: RpcResponse = serde_json::from_str(json).unwrap();
    assert_eq!(response.id, RequestId::String("a".to_string()));
    assert!(response.is_error());
    let error = response.error.unwrap();
    assert_eq!(error.code, -32601);
    assert!(error.data.is_none());
}

#[test]
fn test_error_constructors() {
    assert_eq!(RpcError::method_not_found().code, -32601);
    assert_eq!(RpcError::invalid_params().code, -32602);
}

#[test]
fn test_method_names() {
    assert_eq!(RpcMethod::LongClick.as_str(), "longClick");
    assert_eq!(RpcMethod::GetRootNode.to_string(), "getRootNode");
    assert_eq!(RpcMethod::GetCurrentPackageName.as_str(), "getCurrentPackageName");
    assert_eq!(RpcMethod::GetCurrentActivity.as_str(), "getCurrentActivity");
}

/// `{"className":"L0","children":[{"className":"L1","children":[...]}]}`
fn nested_tree_json(levels: usize) -> String {
    let mut json = String::new();
    for level in 0..levels {
        json.push_str(&format!(r#"{{"className":"L{}","children":["#, level));
    }
    for _ in 0..levels {
        json.push_str("]}");
    }
    json
}

#[test]
fn test_from_line_accepts_deep_tree() {
    let line = format!(
        r#"{{"jsonrpc":"2.0","id":9,"result":{}}}"#,
        nested_tree_json(100)
    );
    // serde_json's default limit rejects this.
    assert!(serde_json::from_str::<RpcResponse>(&line).is_err());

    let response = RpcResponse::from_line(&line).unwrap();
    assert_eq!(response.id, RequestId::Number(9));

    let mut node = response.result.as_ref().unwrap();
    let mut levels = 1;
    while let Some(child) = node["children"].get(0) {
        node = child;
        levels += 1;
    }
    assert_eq!(levels, 100);
    assert_eq!(node["className"], "L99");
}

#[test]
fn test_from_line_rejects_runaway_nesting() {
    let line = format!(
        r#"{{"jsonrpc":"2.0","id":1,"result":{}}}"#,
        "[".repeat(MAX_NESTING + 1)
    );
    let err = RpcResponse::from_line(&line).unwrap_err();
    assert!(err.to_string().contains("nested"));
}

#[test]
fn test_from_line_ignores_brackets_in_strings() {
    let text = "[".repeat(MAX_NESTING + 10);
    let line = format!(
        r#"{{"jsonrpc":"2.0","id":2,"result":{{"text":"{}\"]"}}}}"#,
        text
    );
    let response = RpcResponse::from_line(&line).unwrap();
    assert!(response.result.unwrap()["text"].as_str().unwrap().ends_with("\"]"));
}

#[test]
fn test_from_line_rejects_trailing_garbage() {
    assert!(RpcResponse::from_line(r#"{"jsonrpc":"2.0","id":1} x"#).is_err());
}

