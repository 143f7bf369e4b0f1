// SPDX-License-Identifier: MIT

//! Apply one `TaskEvent` onto a persisted `Task` record.
//!
//! Mirrors the reference A2A request handler's `apply_event`: a `task`
//! event replaces the record outright, a `status-update` transitions
//! state (moving any carried message into history is the Context
//! Manager's job, not the task record's), and an `artifact-update` folds
//! into `Task::apply_artifact_update`. A bare `message` event carries no
//! task-record mutation.

use agentflow_core::{Task, TaskEvent};

pub fn apply_task_event(task: &mut Task, event: &TaskEvent) {
    match event {
        TaskEvent::Task { task: new_task, .. } => {
            *task = new_task.clone();
        }
        TaskEvent::StatusUpdate { status, r#final, .. } => {
            if let Err(err) = task.transition(status.clone(), *r#final) {
                tracing::warn!(%err, "dropping status-update on already-terminal task");
            }
        }
        TaskEvent::ArtifactUpdate { artifact, append, last_chunk, .. } => {
            let applied =
                task.apply_artifact_update(artifact.artifact_id.clone(), artifact.parts.clone(), *append, *last_chunk);
            if !applied {
                tracing::warn!(
                    task_id = %task.id,
                    artifact_id = %artifact.artifact_id,
                    "dropped append artifact-update with no existing artifact"
                );
            }
        }
        TaskEvent::Message { .. } => {}
    }
}

#[cfg(test)]
#[path = "apply_tests.rs"]
mod tests;
