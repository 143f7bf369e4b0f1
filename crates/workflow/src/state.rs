// SPDX-License-Identifier: MIT

//! The yield protocol a plugin's execution communicates through (spec §4.1
//! "Workflow execution protocol").

use agentflow_core::{Artifact, Message};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Why an execution suspended on an `interrupted` yield.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum InterruptReason {
    InputRequired,
    AuthRequired,
}

/// One value produced by a plugin's lazy execution sequence.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "kebab-case")]
pub enum WorkflowState {
    /// Must be the first yield if present; answers the dispatching tool-call
    /// synchronously and is never emitted as a task artifact.
    DispatchResponse {
        parts: Vec<agentflow_core::Part>,
    },

    /// A non-terminal status message. Does not suspend.
    StatusUpdate {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        message: Option<Message>,
    },

    /// A new or appended artifact. Does not suspend.
    Artifact {
        artifact: Artifact,
        #[serde(default)]
        append: bool,
        #[serde(default)]
        last_chunk: bool,
    },

    /// Suspends the execution until `resumeWorkflow` succeeds.
    Interrupted {
        reason: InterruptReason,
        message: String,
        input_schema: Value,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        artifact: Option<Artifact>,
    },

    /// Terminal: state becomes `rejected`.
    Reject { reason: String },
}

/// Snapshot of a paused execution's suspension point (spec §3
/// `Workflow Execution.pauseInfo`).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PauseInfo {
    pub reason: InterruptReason,
    pub message: String,
    pub input_schema: Value,
}

/// Structured failure carried by a `failed` execution (spec §7 `WorkflowError`).
/// `stack` is only populated when the runtime's log level is debug.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkflowFailure {
    pub error_type: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error_code: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stack: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub context: Option<Value>,
}

impl WorkflowFailure {
    pub fn new(error_type: impl Into<String>) -> Self {
        Self { error_type: error_type.into(), error_code: None, stack: None, context: None }
    }
}
