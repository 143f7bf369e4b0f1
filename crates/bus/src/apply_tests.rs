// SPDX-License-Identifier: MIT

use super::*;
use agentflow_core::test_support::{sample_task, text_artifact, working_status};
use agentflow_core::{ContextId, TaskEvent, TaskId, TaskState};

#[test]
fn task_event_replaces_the_record() {
    let mut task = sample_task("t1", "c1");
    let replacement = sample_task("t1", "c1");
    let event = TaskEvent::Task { task_id: replacement.id.clone(), context_id: replacement.context_id.clone(), task: replacement.clone() };

    apply_task_event(&mut task, &event);
    assert_eq!(task, replacement);
}

#[test]
fn status_update_transitions_state() {
    let mut task = sample_task("t1", "c1");
    let event = TaskEvent::status_update(task.id.clone(), task.context_id.clone(), working_status(), false);

    apply_task_event(&mut task, &event);
    assert_eq!(task.status.state, TaskState::Working);
    assert!(!task.is_final);
}

#[test]
fn status_update_after_terminal_is_dropped() {
    let mut task = sample_task("t1", "c1");
    task.transition(working_status(), false).unwrap();
    let completed = agentflow_core::test_support::completed_status("done");
    task.transition(completed, true).unwrap();

    let stale = TaskEvent::status_update(task.id.clone(), task.context_id.clone(), working_status(), false);
    let before = task.clone();
    apply_task_event(&mut task, &stale);
    assert_eq!(task, before);
}

#[yare::parameterized(
    message_is_a_noop = { TaskEvent::Message { context_id: ContextId::new(), message: agentflow_core::Message::user_text("hi") }, false },
    status_update_mutates = { TaskEvent::status_update(TaskId::new(), ContextId::new(), working_status(), false), true },
    artifact_update_mutates = {
        TaskEvent::ArtifactUpdate { task_id: TaskId::new(), context_id: ContextId::new(), artifact: text_artifact("a1", "x"), append: false, last_chunk: true },
        true
    },
)]
fn apply_task_event_dispatches_by_event_kind(event: TaskEvent, expect_mutated: bool) {
    let mut task = sample_task("t1", "c1");
    let before = task.clone();
    apply_task_event(&mut task, &event);
    assert_eq!(task != before, expect_mutated);
}

#[test]
fn artifact_update_appends_into_task() {
    let mut task = sample_task("t1", "c1");
    let artifact = text_artifact("a1", "hello");
    let event = TaskEvent::ArtifactUpdate {
        task_id: task.id.clone(),
        context_id: task.context_id.clone(),
        artifact,
        append: false,
        last_chunk: true,
    };

    apply_task_event(&mut task, &event);
    assert_eq!(task.artifacts.len(), 1);
    assert_eq!(task.artifacts[0].parts[0].as_text(), Some("hello"));
}
