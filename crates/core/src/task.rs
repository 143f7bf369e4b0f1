// SPDX-License-Identifier: MIT

//! Task identifier and state machine.
//!
//! Mirrors the teacher's `oj-core::job` module: a state enum with a
//! `Display` impl, transition helpers, and a test builder — generalized
//! from a runbook-driven job to the spec's task lifecycle.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::artifact::{Artifact, Part};
use crate::ids::{ArtifactId, ContextId, TaskId};

/// Who produced a [`Message`] or history entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    User,
    Agent,
}

/// A conversational message — either a task's status message or a history entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Message {
    pub role: Role,
    pub parts: Vec<Part>,
}

impl Message {
    pub fn user_text(text: impl Into<String>) -> Self {
        Self { role: Role::User, parts: vec![Part::text(text)] }
    }

    pub fn agent_text(text: impl Into<String>) -> Self {
        Self { role: Role::Agent, parts: vec![Part::text(text)] }
    }

    /// Concatenation of this message's text parts, for logging/history display.
    pub fn text(&self) -> String {
        self.parts.iter().filter_map(Part::as_text).collect::<Vec<_>>().join("")
    }
}

/// Task lifecycle state (spec §3).
///
/// ```text
///       submitted -> working <-> input-required | auth-required
///                       v                 (resume -> working)
///           completed | failed | canceled | rejected   (terminal; final=true)
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum TaskState {
    Submitted,
    Working,
    InputRequired,
    AuthRequired,
    Completed,
    Failed,
    Canceled,
    Rejected,
}

impl TaskState {
    /// Terminal states per spec §3: once reached, `final=true` and no
    /// further status transitions are accepted.
    pub fn is_terminal(self) -> bool {
        matches!(self, TaskState::Completed | TaskState::Failed | TaskState::Canceled | TaskState::Rejected)
    }

    pub fn is_paused(self) -> bool {
        matches!(self, TaskState::InputRequired | TaskState::AuthRequired)
    }
}

crate::simple_display! {
    TaskState {
        Submitted => "submitted",
        Working => "working",
        InputRequired => "input-required",
        AuthRequired => "auth-required",
        Completed => "completed",
        Failed => "failed",
        Canceled => "canceled",
        Rejected => "rejected",
    }
}

/// Current status of a task: state plus optional carried message and timestamp.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskStatus {
    pub state: TaskState,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<Message>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<DateTime<Utc>>,
}

impl TaskStatus {
    pub fn new(state: TaskState) -> Self {
        Self { state, message: None, timestamp: Some(Utc::now()) }
    }

    pub fn with_message(state: TaskState, message: Message) -> Self {
        Self { state, message: Some(message), timestamp: Some(Utc::now()) }
    }
}

/// Error returned by [`Task::transition`] when a caller attempts to move a
/// terminal task to a new state. Once `final=true` no further status
/// transitions are accepted (spec §3 invariant).
#[derive(Debug, Clone, thiserror::Error)]
#[error("cannot transition task {task_id} out of terminal state {from}")]
pub struct TerminalTransition {
    pub task_id: TaskId,
    pub from: TaskState,
}

/// A persistent record representing one unit of externally observable work.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    pub id: TaskId,
    pub context_id: ContextId,
    pub status: TaskStatus,
    #[serde(default)]
    pub artifacts: Vec<Artifact>,
    #[serde(rename = "final", default)]
    pub is_final: bool,
}

impl Task {
    /// Create a freshly submitted task (spec §3: `submitted` is the only
    /// valid initial state).
    pub fn submitted(id: TaskId, context_id: ContextId) -> Self {
        Self { id, context_id, status: TaskStatus::new(TaskState::Submitted), artifacts: Vec::new(), is_final: false }
    }

    /// Apply a status transition, enforcing the terminal-state invariant.
    pub fn transition(&mut self, status: TaskStatus, final_flag: bool) -> Result<(), TerminalTransition> {
        if self.is_final {
            return Err(TerminalTransition { task_id: self.id.clone(), from: self.status.state });
        }
        self.is_final = final_flag || status.state.is_terminal();
        self.status = status;
        Ok(())
    }

    /// Apply an artifact-update event's semantics onto this task's stored
    /// artifacts: replace-or-append by `artifactId`, honoring `append` and
    /// `lastChunk` exactly as spec §3/§4.2 describe.
    ///
    /// Returns `false` when `append=true` names an `artifactId` with no prior
    /// artifact — that chunk carries nothing to append to, so it is dropped
    /// rather than silently starting a new artifact (the caller should log
    /// this, matching the reference A2A request-handler's behavior).
    pub fn apply_artifact_update(&mut self, artifact_id: ArtifactId, parts: Vec<Part>, append: bool, last_chunk: bool) -> bool {
        let existing = self.artifacts.iter_mut().find(|a| a.artifact_id == artifact_id);
        let applied = match existing {
            Some(a) if append => {
                a.parts.extend(parts);
                true
            }
            Some(a) => {
                a.parts = parts;
                true
            }
            None if append => false,
            None => {
                let mut artifact = Artifact::new(artifact_id);
                artifact.parts = parts;
                self.artifacts.push(artifact);
                true
            }
        };
        let _ = last_chunk; // sealing is enforced by the persistence loop, not the data record
        applied
    }
}

crate::builder! {
    pub struct TaskBuilder => Task {
        into {
            id: TaskId = TaskId::new(),
            context_id: ContextId = ContextId::new(),
        }
        set {
            status: TaskStatus = TaskStatus::new(TaskState::Submitted),
            artifacts: Vec<Artifact> = Vec::new(),
            is_final: bool = false,
        }
    }
}

#[cfg(test)]
#[path = "task_tests.rs"]
mod tests;
