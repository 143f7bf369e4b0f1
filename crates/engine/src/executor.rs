// SPDX-License-Identifier: MIT

//! Agent Executor: message routing (spec §4.4).
//!
//! The defining property is enforced by construction: `Route::NewTurn` is
//! the fallback for every case where `task_id` is absent, so a message
//! without an explicit `taskId` can never resume a paused workflow even if
//! a sibling task in the same context is currently paused.

use agentflow_core::{ContextId, Message, Part, TaskId, TaskState};
use agentflow_workflow::WorkflowRuntime;

/// One inbound turn, carrying whatever the caller already knows about it.
pub struct RequestContext {
    pub task_id: Option<TaskId>,
    pub context_id: ContextId,
    pub user_message: Message,
    /// The caller's last-known state for `task_id`, if any — a cache that
    /// may be stale; rule (1) prefers a live runtime lookup over this.
    pub previous_task_state: Option<TaskState>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Route {
    Resume { task_id: TaskId },
    NewTurn,
}

pub struct AgentExecutor<'a> {
    runtime: &'a WorkflowRuntime,
}

impl<'a> AgentExecutor<'a> {
    pub fn new(runtime: &'a WorkflowRuntime) -> Self {
        Self { runtime }
    }

    pub fn route(&self, request: &RequestContext) -> Route {
        let Some(task_id) = &request.task_id else {
            return Route::NewTurn;
        };

        // Rule 1: a live, currently paused execution resumes regardless of content.
        let live_paused = self.runtime.get_task_state(task_id).is_some_and(|s| s.state.is_paused());
        if live_paused {
            return Route::Resume { task_id: task_id.clone() };
        }

        // Rule 2: a caller-reported paused state plus a `data` part resumes too.
        let cached_paused = request.previous_task_state.is_some_and(TaskState::is_paused);
        if cached_paused && has_data_part(&request.user_message) {
            return Route::Resume { task_id: task_id.clone() };
        }

        Route::NewTurn
    }
}

fn has_data_part(message: &Message) -> bool {
    message.parts.iter().any(|p| matches!(p, Part::Data { .. }))
}

/// Extracts the resume input value from a `data` part, falling back to
/// `null` when the routed message carries none.
pub fn resume_input(message: &Message) -> serde_json::Value {
    message
        .parts
        .iter()
        .find_map(|p| match p {
            Part::Data { data, .. } => Some(data.clone()),
            _ => None,
        })
        .unwrap_or(serde_json::Value::Null)
}

#[cfg(test)]
#[path = "executor_tests.rs"]
mod tests;
