// SPDX-License-Identifier: MIT

//! Shared test helpers for use across crates.
//!
//! Gated behind `#[cfg(any(test, feature = "test-support"))]`.

use crate::artifact::{Artifact, Part};
use crate::ids::{ArtifactId, ContextId, TaskId};
use crate::task::{Message, Task, TaskState, TaskStatus};

/// Proptest strategies for core state machine types.
pub mod strategies {
    use crate::task::TaskState;
    use proptest::prelude::*;

    pub fn arb_task_state() -> impl Strategy<Value = TaskState> {
        prop_oneof![
            Just(TaskState::Submitted),
            Just(TaskState::Working),
            Just(TaskState::InputRequired),
            Just(TaskState::AuthRequired),
            Just(TaskState::Completed),
            Just(TaskState::Failed),
            Just(TaskState::Canceled),
            Just(TaskState::Rejected),
        ]
    }

    pub fn arb_plugin_id() -> impl Strategy<Value = String> {
        "[A-Za-z][A-Za-z0-9_-]{0,20}"
    }
}

/// A submitted task with the given id/context, for handler and bus tests.
pub fn sample_task(task_id: &str, context_id: &str) -> Task {
    Task::submitted(TaskId::from_string(task_id.to_string()), ContextId::from_string(context_id.to_string()))
}

/// A text artifact, for artifact-update tests.
pub fn text_artifact(artifact_id: &str, text: &str) -> Artifact {
    Artifact::with_parts(ArtifactId::from_string(artifact_id.to_string()), vec![Part::text(text)])
}

/// A `working` status with no message, the common non-terminal transition.
pub fn working_status() -> TaskStatus {
    TaskStatus::new(TaskState::Working)
}

/// A completed status carrying a short agent confirmation message.
pub fn completed_status(text: &str) -> TaskStatus {
    TaskStatus::with_message(TaskState::Completed, Message::agent_text(text))
}
