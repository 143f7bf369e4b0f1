// SPDX-License-Identifier: MIT

//! JSON-RPC 2.0 envelope types (request, response, error, id).

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Standard JSON-RPC error: invalid request shape.
pub const INVALID_REQUEST: i64 = -32600;
/// Standard JSON-RPC error: unknown method name.
pub const METHOD_NOT_FOUND: i64 = -32601;
/// Standard JSON-RPC error: params failed to match the method's expected shape.
pub const INVALID_PARAMS: i64 = -32602;

/// JSON-RPC request id: number, string, or null (notifications).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum JsonRpcId {
    Number(i64),
    String(String),
    #[default]
    Null,
}

/// An inbound JSON-RPC request addressed to one of the `a2a` methods
/// (`message/send`, `message/stream`, `tasks/get`, `tasks/cancel`,
/// `tasks/resubscribe`).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JsonRpcRequest {
    pub jsonrpc: String,
    pub method: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub params: Option<Value>,
    #[serde(default)]
    pub id: JsonRpcId,
}

impl JsonRpcRequest {
    pub fn new(method: impl Into<String>, params: Value, id: JsonRpcId) -> Self {
        Self { jsonrpc: "2.0".to_string(), method: method.into(), params: Some(params), id }
    }
}

/// A JSON-RPC response: exactly one of `result`/`error` is set.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JsonRpcResponse {
    pub jsonrpc: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub result: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<JsonRpcError>,
    pub id: JsonRpcId,
}

impl JsonRpcResponse {
    pub fn success(id: JsonRpcId, result: Value) -> Self {
        Self { jsonrpc: "2.0".to_string(), result: Some(result), error: None, id }
    }

    pub fn failure(id: JsonRpcId, error: JsonRpcError) -> Self {
        Self { jsonrpc: "2.0".to_string(), result: None, error: Some(error), id }
    }

    pub fn is_error(&self) -> bool {
        self.error.is_some()
    }
}

/// A JSON-RPC error object. Domain error kinds (spec §7) are carried in
/// `data.errorType` on top of the standard `-326xx` codes.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JsonRpcError {
    pub code: i64,
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<Value>,
}

impl JsonRpcError {
    pub fn new(code: i64, message: impl Into<String>) -> Self {
        Self { code, message: message.into(), data: None }
    }

    pub fn invalid_request(message: impl Into<String>) -> Self {
        Self::new(INVALID_REQUEST, message)
    }

    pub fn method_not_found(method: &str) -> Self {
        Self::new(METHOD_NOT_FOUND, format!("method '{method}' not found"))
    }

    pub fn invalid_params(message: impl Into<String>) -> Self {
        Self::new(INVALID_PARAMS, message)
    }

    pub fn with_data(mut self, data: Value) -> Self {
        self.data = Some(data);
        self
    }
}
