// SPDX-License-Identifier: MIT

//! `TaskStore`: the pluggable `taskId -> Task` mapping (spec §5/§6.5).
//!
//! The persistence loop in `agentflow-bus` is the only writer during an
//! execution; `tasks/get` and `tasks/resubscribe` are the only readers
//! outside it. Any replacement implementation must guarantee
//! read-your-write for the persistence loop, the way the teacher's
//! `MaterializedState` is immediately consistent with its own WAL replay.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use parking_lot::RwLock;

use agentflow_core::{Task, TaskId};

#[async_trait]
pub trait TaskStore: Send + Sync + 'static {
    async fn load(&self, task_id: &TaskId) -> Option<Task>;
    async fn save(&self, task: Task);
}

/// Default in-memory `TaskStore`, backed by a `parking_lot::RwLock`.
#[derive(Debug, Default, Clone)]
pub struct InMemoryTaskStore {
    tasks: Arc<RwLock<HashMap<TaskId, Task>>>,
}

impl InMemoryTaskStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Current count of stored tasks, for tests and `tasks status` style queries.
    pub fn len(&self) -> usize {
        self.tasks.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.read().is_empty()
    }
}

#[async_trait]
impl TaskStore for InMemoryTaskStore {
    async fn load(&self, task_id: &TaskId) -> Option<Task> {
        self.tasks.read().get(task_id).cloned()
    }

    async fn save(&self, task: Task) {
        self.tasks.write().insert(task.id.clone(), task);
    }
}

#[cfg(test)]
#[path = "task_store_tests.rs"]
mod tests;
