// SPDX-License-Identifier: MIT

//! Concrete id newtypes used throughout the data model.

crate::define_id! {
    /// Unique identifier for a [`crate::task::Task`]. Time-ordered (UUIDv7) per
    /// the spec's "ULID/UUIDv7, globally unique, time-ordered" requirement.
    pub struct TaskId;
}

crate::define_id! {
    /// Identifier grouping tasks and conversation history under one session.
    pub struct ContextId;
}

crate::define_id! {
    /// Runtime handle id for a workflow execution. Equal to the child task's
    /// [`TaskId`] by construction (spec §3: "`executionId` = taskId of the
    /// child task"), kept as a distinct type at the workflow-runtime boundary
    /// so the two concepts aren't accidentally conflated in signatures.
    pub struct ExecutionId;
}

crate::define_id! {
    /// Stable identifier for an [`crate::artifact::Artifact`] within one task.
    /// Repeated ids with `append=true` accumulate parts onto the same artifact.
    pub struct ArtifactId;
}

impl From<TaskId> for ExecutionId {
    fn from(id: TaskId) -> Self {
        ExecutionId::from_string(id.as_str().to_string())
    }
}

impl From<ExecutionId> for TaskId {
    fn from(id: ExecutionId) -> Self {
        TaskId::from_string(id.as_str().to_string())
    }
}
