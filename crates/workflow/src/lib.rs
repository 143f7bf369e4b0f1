// SPDX-License-Identifier: MIT

//! agentflow-workflow: the Workflow Runtime (spec §4.1).
//!
//! Owns the plugin registry, the `dispatch_workflow_<id>` tool surface, and
//! the per-execution coroutine (a `tokio::task` paired with bounded `mpsc`
//! yield/resume channels) that drives one plugin's lazy `WorkflowState`
//! sequence to completion.

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

mod context;
mod error;
mod execution;
mod plugin;
mod runtime;
mod state;

pub use context::WorkflowContext;
pub use error::WorkflowError;
pub use execution::{Execution, ExecutionState};
pub use plugin::{dispatch_tool_name, ToolDescriptor, WorkflowLogic, WorkflowPlugin, DEFAULT_DISPATCH_RESPONSE_TIMEOUT};
pub use runtime::{ResumeOutcome, WorkflowRuntime};
pub use state::{InterruptReason, PauseInfo, WorkflowFailure, WorkflowState};

#[cfg(any(test, feature = "test-support"))]
pub mod test_support;
