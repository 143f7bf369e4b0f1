// SPDX-License-Identifier: MIT

//! Workflow-side error kinds (spec §7), owned here the way
//! `agentflow-wire::A2aError` owns the JSON-RPC-facing kinds.

use agentflow_core::TaskId;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum WorkflowError {
    #[error("invalid plugin registration: {reason}")]
    InvalidPlugin { reason: String },

    #[error("plugin id {plugin_id} is already registered")]
    DuplicatePlugin { plugin_id: String },

    #[error("no plugin registered for id {plugin_id}")]
    UnknownPlugin { plugin_id: String },

    #[error("no execution for task {task_id}")]
    UnknownTask { task_id: TaskId },

    #[error("no tool named {tool_name}")]
    UnknownTool { tool_name: String },

    #[error("invalid parameters: {reason}")]
    InvalidParameters { reason: String },

    #[error("task {task_id} is not paused")]
    NotPaused { task_id: TaskId },

    #[error("the runtime has been shut down")]
    ShuttingDown,
}
