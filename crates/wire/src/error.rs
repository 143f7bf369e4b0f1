// SPDX-License-Identifier: MIT

//! Domain error surface carried in `error.data.errorType` (spec §7).
//!
//! `agentflow-workflow`/`agentflow-engine` raise their own narrower error
//! types internally; `agentflow-daemon` converts whichever one reaches the
//! transport boundary into an `A2aError` before it crosses the wire.

use serde::Serialize;
use serde_json::{json, Value};

use crate::rpc::{JsonRpcError, INVALID_PARAMS, INVALID_REQUEST, METHOD_NOT_FOUND};

/// Error kinds observable at the JSON-RPC boundary (spec §7 table).
#[derive(Debug, Clone, thiserror::Error, Serialize)]
#[serde(tag = "errorType", rename_all = "camelCase")]
pub enum A2aError {
    #[error("invalid plugin registration: {reason}")]
    InvalidPlugin { reason: String },

    #[error("plugin '{plugin_id}' is already registered")]
    DuplicatePlugin { plugin_id: String },

    #[error("unknown plugin '{plugin_id}'")]
    UnknownPlugin { plugin_id: String },

    #[error("unknown task '{task_id}'")]
    UnknownTask { task_id: String },

    #[error("unknown tool '{tool_name}'")]
    UnknownTool { tool_name: String },

    #[error("invalid parameters: {reason}")]
    InvalidParameters { reason: String },

    #[error("validation failed: {reason}")]
    ValidationFailed { reason: String },

    #[error("workflow error: {message}")]
    WorkflowError {
        message: String,
        #[serde(skip_serializing_if = "Option::is_none")]
        error_code: Option<String>,
        #[serde(skip_serializing_if = "Option::is_none")]
        stack: Option<String>,
    },

    #[error("workflow rejected: {reason}")]
    WorkflowRejected { reason: String },

    #[error("canceled")]
    Canceled,

    #[error("model stream error: {reason}")]
    StreamError { reason: String },

    #[error("malformed request: {reason}")]
    TransportError { reason: String },
}

impl A2aError {
    /// Convert to a JSON-RPC error object. Malformed-request kinds map to
    /// the standard `-326xx` codes; every other kind is carried as a
    /// generic `-32000` application error with `data.errorType` set to the
    /// matching tag so clients can dispatch on it.
    pub fn to_json_rpc_error(&self) -> JsonRpcError {
        let data = serde_json::to_value(self).unwrap_or(Value::Null);
        match self {
            A2aError::TransportError { reason } => JsonRpcError::invalid_request(reason.clone()).with_data(data),
            A2aError::InvalidParameters { reason } | A2aError::ValidationFailed { reason } => {
                JsonRpcError::invalid_params(reason.clone()).with_data(data)
            }
            A2aError::UnknownPlugin { .. } | A2aError::UnknownTask { .. } | A2aError::UnknownTool { .. } => {
                JsonRpcError::new(-32000, self.to_string()).with_data(data)
            }
            _ => JsonRpcError::new(-32000, self.to_string()).with_data(data),
        }
    }

    /// One of the three standard codes this kind maps to, if any — used by
    /// tests asserting spec §6's `-32600`/`-32601`/`-32602` contract.
    pub fn standard_code(&self) -> Option<i64> {
        match self {
            A2aError::TransportError { .. } => Some(INVALID_REQUEST),
            A2aError::InvalidParameters { .. } | A2aError::ValidationFailed { .. } => Some(INVALID_PARAMS),
            _ => None,
        }
    }
}

/// Method-not-found is a transport-level concern with no domain kind of
/// its own; kept as a free function since it never needs `data.errorType`.
pub fn method_not_found_error(method: &str) -> JsonRpcError {
    JsonRpcError::new(METHOD_NOT_FOUND, format!("method '{method}' not found")).with_data(json!({ "method": method }))
}
