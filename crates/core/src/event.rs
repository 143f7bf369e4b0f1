// SPDX-License-Identifier: MIT

//! The task event: the unit of everything published on an event bus.

use serde::{Deserialize, Serialize};

use crate::artifact::Artifact;
use crate::ids::{ContextId, TaskId};
use crate::task::{Message, Task, TaskStatus};

/// Announcement that a parent task dispatched a child workflow task.
///
/// Carried inside a `status-update`'s `message.metadata`, never as its own
/// event kind (spec §4.6 step 11).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReferencedWorkflow {
    pub workflow_name: String,
    pub description: String,
    pub plugin_id: String,
}

/// One event on a task's event bus. Serializes with `{"type": "...", ...}`.
///
/// Every task-scoped variant carries `taskId` and `contextId`; ordering
/// within one task's bus is strictly total (spec §3).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "kebab-case")]
pub enum TaskEvent {
    /// The initial creation event.
    Task { task_id: TaskId, context_id: ContextId, task: Task },

    /// A state transition, optionally carrying a message.
    StatusUpdate {
        task_id: TaskId,
        context_id: ContextId,
        status: TaskStatus,
        #[serde(default)]
        reference_task_ids: Vec<TaskId>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        referenced_workflow: Option<ReferencedWorkflow>,
        r#final: bool,
    },

    /// A new or appended artifact.
    ArtifactUpdate {
        task_id: TaskId,
        context_id: ContextId,
        artifact: Artifact,
        #[serde(default)]
        append: bool,
        #[serde(default)]
        last_chunk: bool,
    },

    /// An unassociated reply — the "Message-not-Task" reply path.
    Message { context_id: ContextId, message: Message },
}

impl TaskEvent {
    pub fn task_id(&self) -> Option<&TaskId> {
        match self {
            TaskEvent::Task { task_id, .. }
            | TaskEvent::StatusUpdate { task_id, .. }
            | TaskEvent::ArtifactUpdate { task_id, .. } => Some(task_id),
            TaskEvent::Message { .. } => None,
        }
    }

    pub fn context_id(&self) -> &ContextId {
        match self {
            TaskEvent::Task { context_id, .. }
            | TaskEvent::StatusUpdate { context_id, .. }
            | TaskEvent::ArtifactUpdate { context_id, .. }
            | TaskEvent::Message { context_id, .. } => context_id,
        }
    }

    /// True for a `status-update` carrying `final=true` — the event that
    /// seals a task's bus for draining (spec §4.2 "Drain on finish").
    pub fn is_terminal_status(&self) -> bool {
        matches!(self, TaskEvent::StatusUpdate { r#final: true, .. })
    }

    pub fn status_update(task_id: TaskId, context_id: ContextId, status: TaskStatus, is_final: bool) -> Self {
        TaskEvent::StatusUpdate {
            task_id,
            context_id,
            status,
            reference_task_ids: Vec::new(),
            referenced_workflow: None,
            r#final: is_final,
        }
    }
}

#[cfg(test)]
#[path = "event_tests.rs"]
mod tests;
