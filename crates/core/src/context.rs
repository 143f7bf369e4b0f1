// SPDX-License-Identifier: MIT

//! Context/session data record.
//!
//! The operations that mutate this record (create, add task, append to
//! history) live in `agentflow-engine::context` (spec §4.3) — this crate
//! only owns the plain data shape, the way `oj-core` owns `Job`/`Crew`
//! records while `oj-daemon::engine` owns the logic that mutates them.

use serde::{Deserialize, Serialize};

use crate::ids::{ContextId, TaskId};
use crate::task::Message;

/// A conversation scope grouping tasks and history under a shared `contextId`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Context {
    pub context_id: ContextId,
    #[serde(default)]
    pub tasks: Vec<TaskId>,
    #[serde(default)]
    pub history: Vec<Message>,
}

impl Context {
    pub fn new(context_id: ContextId) -> Self {
        Self { context_id, tasks: Vec::new(), history: Vec::new() }
    }

    /// Idempotent append preserving insertion order (spec §4.3 `addTask`).
    pub fn add_task(&mut self, task_id: TaskId) {
        if !self.tasks.contains(&task_id) {
            self.tasks.push(task_id);
        }
    }
}

#[cfg(test)]
#[path = "context_tests.rs"]
mod tests;
