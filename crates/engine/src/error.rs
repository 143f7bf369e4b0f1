// SPDX-License-Identifier: MIT

//! Engine-side error kinds (spec §7), unifying the lower crates' error
//! types the way `agentflow-wire::A2aError` unifies them again at the
//! JSON-RPC boundary (`agentflow-daemon` owns that conversion).

use agentflow_core::TaskId;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum EngineError {
    #[error(transparent)]
    Workflow(#[from] agentflow_workflow::WorkflowError),

    #[error(transparent)]
    Bus(#[from] agentflow_bus::BusError),

    #[error(transparent)]
    Storage(#[from] agentflow_storage::StorageError),

    #[error("no task found for id {task_id}")]
    UnknownTask { task_id: TaskId },

    #[error("model stream error: {reason}")]
    Stream { reason: String },
}
