// SPDX-License-Identifier: MIT

//! `AgentClient`: a thin JSON-RPC client over the daemon's `a2a` endpoint.
//!
//! Generalizes the teacher's `DaemonClient` (query methods that build a
//! `Request`, call `self.send`, and match the matching `Response` variant)
//! from a framed Unix-socket request/response pair onto one HTTP POST per
//! JSON-RPC call.

use agentflow_core::{Message, Task, TaskId};
use agentflow_wire::{CancelResult, JsonRpcId, JsonRpcRequest, JsonRpcResponse, SendResult};
use serde::de::DeserializeOwned;
use serde_json::json;

#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    #[error("request to the daemon failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("malformed response from the daemon: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("daemon rejected the request ({code}): {message}")]
    Rpc { code: i64, message: String },
}

pub struct AgentClient {
    http: reqwest::Client,
    endpoint: String,
}

impl AgentClient {
    pub fn new(base_url: impl AsRef<str>, base_path: impl AsRef<str>) -> Self {
        let base_url = base_url.as_ref().trim_end_matches('/');
        let base_path = base_path.as_ref();
        Self { http: reqwest::Client::new(), endpoint: format!("{base_url}{base_path}") }
    }

    async fn call(&self, method: &str, params: serde_json::Value) -> Result<serde_json::Value, ClientError> {
        let request = JsonRpcRequest::new(method, params, JsonRpcId::Number(1));
        let response: JsonRpcResponse = self.http.post(&self.endpoint).json(&request).send().await?.json().await?;
        match response.error {
            Some(err) => Err(ClientError::Rpc { code: err.code, message: err.message }),
            None => Ok(response.result.unwrap_or(serde_json::Value::Null)),
        }
    }

    async fn call_as<T: DeserializeOwned>(&self, method: &str, params: serde_json::Value) -> Result<T, ClientError> {
        let value = self.call(method, params).await?;
        Ok(serde_json::from_value(value)?)
    }

    pub async fn send_message(&self, message: Message, task_id: Option<TaskId>) -> Result<SendResult, ClientError> {
        self.call_as("message/send", json!({ "message": message, "taskId": task_id })).await
    }

    /// Opens the raw SSE response for `message/stream`; line parsing is the
    /// caller's job (see `commands::stream`).
    pub async fn stream_message(&self, message: Message, task_id: Option<TaskId>) -> Result<reqwest::Response, ClientError> {
        let request = JsonRpcRequest::new("message/stream", json!({ "message": message, "taskId": task_id }), JsonRpcId::Number(1));
        Ok(self.http.post(&self.endpoint).json(&request).send().await?)
    }

    pub async fn get_task(&self, id: &TaskId) -> Result<Task, ClientError> {
        self.call_as("tasks/get", json!({ "id": id })).await
    }

    pub async fn cancel_task(&self, id: &TaskId) -> Result<CancelResult, ClientError> {
        self.call_as("tasks/cancel", json!({ "id": id })).await
    }

    pub async fn resubscribe(&self, id: &TaskId) -> Result<reqwest::Response, ClientError> {
        let request = JsonRpcRequest::new("tasks/resubscribe", json!({ "id": id }), JsonRpcId::Number(1));
        Ok(self.http.post(&self.endpoint).json(&request).send().await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_joins_the_base_url_and_path() {
        let client = AgentClient::new("http://127.0.0.1:4700/", "/a2a");
        assert_eq!(client.endpoint, "http://127.0.0.1:4700/a2a");
    }

    #[test]
    fn rpc_error_display_includes_code_and_message() {
        let err = ClientError::Rpc { code: -32601, message: "method not found".to_string() };
        assert_eq!(err.to_string(), "daemon rejected the request (-32601): method not found");
    }
}
