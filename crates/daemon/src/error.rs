// SPDX-License-Identifier: MIT

//! Converts the narrower error types produced by `agentflow-engine` and its
//! dependencies into the `agentflow_wire::A2aError` surface that crosses the
//! JSON-RPC wire (spec §7).

use agentflow_engine::EngineError;
use agentflow_wire::A2aError;
use agentflow_workflow::WorkflowError;

pub fn engine_error_to_a2a(err: EngineError) -> A2aError {
    match err {
        EngineError::Workflow(err) => workflow_error_to_a2a(err),
        EngineError::Bus(err) => A2aError::TransportError { reason: err.to_string() },
        EngineError::Storage(err) => A2aError::TransportError { reason: err.to_string() },
        EngineError::UnknownTask { task_id } => A2aError::UnknownTask { task_id: task_id.to_string() },
        EngineError::Stream { reason } => A2aError::StreamError { reason },
    }
}

pub fn workflow_error_to_a2a(err: WorkflowError) -> A2aError {
    match err {
        WorkflowError::InvalidPlugin { reason } => A2aError::InvalidPlugin { reason },
        WorkflowError::DuplicatePlugin { plugin_id } => A2aError::DuplicatePlugin { plugin_id },
        WorkflowError::UnknownPlugin { plugin_id } => A2aError::UnknownPlugin { plugin_id },
        WorkflowError::UnknownTask { task_id } => A2aError::UnknownTask { task_id: task_id.to_string() },
        WorkflowError::UnknownTool { tool_name } => A2aError::UnknownTool { tool_name },
        WorkflowError::InvalidParameters { reason } => A2aError::InvalidParameters { reason },
        WorkflowError::NotPaused { task_id } => A2aError::ValidationFailed { reason: format!("task {task_id} is not paused") },
        WorkflowError::ShuttingDown => A2aError::TransportError { reason: "the runtime is shutting down".to_string() },
    }
}

#[cfg(test)]
#[path = "error_tests.rs"]
mod tests;
