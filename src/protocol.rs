//! JSON-RPC 2.0 message types
//!
//! Request and response envelopes for the dispatch protocol. Exactly one of
//! `result`/`error` is ever serialized on a response, and the correlation id
//! is echoed from the request (omitted when the request carried none).

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Protocol version tag every request must carry
pub const JSONRPC_VERSION: &str = "2.0";

/// Requested tool does not exist or has no handler
pub const METHOD_NOT_FOUND: i32 = -32601;

/// Any other failure raised during dispatch
pub const INTERNAL_ERROR: i32 = -32603;

/// JSON-RPC 2.0 Request
///
/// `method` is the tool name; `params` is the keyword parameter bag, where a
/// missing bag is treated identically to an empty one.
#[derive(Debug, Deserialize)]
pub struct JsonRpcRequest {
    pub jsonrpc: String,
    pub id: Option<i64>,
    pub method: String,
    #[serde(default)]
    pub params: Option<Map<String, Value>>,
}

/// JSON-RPC 2.0 Response
#[derive(Debug, Serialize)]
pub struct JsonRpcResponse {
    pub jsonrpc: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub result: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<JsonRpcError>,
}

impl JsonRpcResponse {
    pub fn success(id: Option<i64>, result: Value) -> Self {
        Self {
            jsonrpc: JSONRPC_VERSION.to_string(),
            id,
            result: Some(result),
            error: None,
        }
    }

    pub fn error(id: Option<i64>, code: i32, message: String) -> Self {
        Self {
            jsonrpc: JSONRPC_VERSION.to_string(),
            id,
            result: None,
            error: Some(JsonRpcError { code, message }),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct JsonRpcError {
    pub code: i32,
    pub message: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn request_deserialize() {
        let json = r#"{
            "jsonrpc": "2.0",
            "id": 7,
            "method": "echo.ping",
            "params": {"msg": "hi"}
        }"#;
        let request: JsonRpcRequest = serde_json::from_str(json).unwrap();
        assert_eq!(request.jsonrpc, "2.0");
        assert_eq!(request.id, Some(7));
        assert_eq!(request.method, "echo.ping");
        let params = request.params.unwrap();
        assert_eq!(params["msg"], "hi");
    }

    #[test]
    fn request_without_params() {
        let json = r#"{"jsonrpc": "2.0", "id": 1, "method": "gha.status"}"#;
        let request: JsonRpcRequest = serde_json::from_str(json).unwrap();
        assert!(request.params.is_none());
    }

    #[test]
    fn request_without_id() {
        let json = r#"{"jsonrpc": "2.0", "method": "gha.status", "params": {}}"#;
        let request: JsonRpcRequest = serde_json::from_str(json).unwrap();
        assert!(request.id.is_none());
    }

    #[test]
    fn response_serializes_without_error_field() {
        let response = JsonRpcResponse::success(Some(1), serde_json::json!({"ok": true}));
        let json = serde_json::to_string(&response).unwrap();
        assert!(json.contains("result"));
        assert!(!json.contains("error"));
    }

    #[test]
    fn error_response_serializes_without_result_field() {
        let response = JsonRpcResponse::error(Some(1), METHOD_NOT_FOUND, "nope".to_string());
        let json = serde_json::to_string(&response).unwrap();
        assert!(json.contains("error"));
        assert!(json.contains("-32601"));
        assert!(!json.contains("result"));
    }

    #[test]
    fn response_omits_absent_id() {
        let response = JsonRpcResponse::success(None, Value::Null);
        let json = serde_json::to_string(&response).unwrap();
        assert!(!json.contains("\"id\""));
    }

    #[test]
    fn response_echoes_id() {
        let response = JsonRpcResponse::error(Some(42), INTERNAL_ERROR, "boom".to_string());
        assert_eq!(response.id, Some(42));
        assert!(response.result.is_none());
        let err = response.error.unwrap();
        assert_eq!(err.code, -32603);
        assert_eq!(err.message, "boom");
    }
}
