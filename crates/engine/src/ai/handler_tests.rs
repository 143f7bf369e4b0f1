// SPDX-License-Identifier: MIT

use std::sync::Arc;

use agentflow_bus::BusManager;
use agentflow_core::{ContextId, Message, TaskId, TaskState};
use agentflow_storage::InMemoryTaskStore;
use agentflow_workflow::test_support::{ScriptedStep, ScriptedWorkflowLogic};
use agentflow_workflow::{WorkflowPlugin, WorkflowRuntime, WorkflowState};
use serde_json::json;

use super::*;
use crate::ai::{ModelStreamEvent, ScriptedModelStream};
use crate::context::ContextManager;
use crate::workflow_handler::WorkflowHandler;

fn ai_handler() -> (AiHandler, BusManager, Arc<ContextManager>) {
    let bus_manager = BusManager::new();
    let task_store = Arc::new(InMemoryTaskStore::default());
    let context_manager = Arc::new(ContextManager::new());
    let runtime = Arc::new(WorkflowRuntime::new());
    let logic = ScriptedWorkflowLogic {
        script: vec![ScriptedStep::Emit(WorkflowState::DispatchResponse { parts: vec![] })],
        outcome: Ok(json!(null)),
    };
    runtime.register(WorkflowPlugin::new("greeter", "Greeter", "says hi", "0.1.0", Arc::new(logic))).unwrap();
    let workflow_handler = Arc::new(WorkflowHandler::new(runtime, bus_manager.clone(), task_store.clone(), context_manager.clone()));
    (AiHandler::new(bus_manager.clone(), task_store, context_manager.clone(), workflow_handler), bus_manager, context_manager)
}

async fn all_events(bus_manager: &BusManager, task_id: &agentflow_core::TaskId) -> Vec<agentflow_core::TaskEvent> {
    let bus = bus_manager.get_by_task_id(task_id).expect("bus retained until cleaned up");
    let mut sub = bus.subscribe();
    let mut events = Vec::new();
    while let Some(event) = sub.next().await {
        events.push(event);
    }
    events
}

#[tokio::test]
async fn a_plain_text_turn_publishes_chunks_then_a_final_completed_status_and_updates_history() {
    let (handler, bus_manager, context_manager) = ai_handler();
    let context_id = ContextId::new();
    let stream = Box::new(ScriptedModelStream::new(vec![
        ModelStreamEvent::TextDelta { text: Some("hi there".into()) },
        ModelStreamEvent::TextEnd,
    ]));

    let task_id = handler.streaming_turn(TaskId::new(), context_id.clone(), Message::user_text("hello"), stream).await.unwrap();
    let events = all_events(&bus_manager, &task_id).await;

    assert!(matches!(events.first(), Some(agentflow_core::TaskEvent::Task { .. })));
    let artifact_updates = events.iter().filter(|e| matches!(e, agentflow_core::TaskEvent::ArtifactUpdate { .. })).count();
    assert_eq!(artifact_updates, 2);
    match events.last().unwrap() {
        agentflow_core::TaskEvent::StatusUpdate { status, r#final, .. } => {
            assert!(*r#final);
            assert_eq!(status.state, TaskState::Completed);
        }
        other => panic!("expected a final completed status-update, got {other:?}"),
    }

    let history = context_manager.get_history(&context_id);
    assert_eq!(history.len(), 2);
    assert_eq!(history[0].text(), "hello");
    assert_eq!(history[1].text(), "hi there");
}

#[tokio::test]
async fn a_dispatch_workflow_tool_call_forwards_to_the_workflow_handler_and_announces_on_the_parent_bus() {
    let (handler, bus_manager, context_manager) = ai_handler();
    let context_id = ContextId::new();
    let stream = Box::new(ScriptedModelStream::new(vec![
        ModelStreamEvent::ToolCall { index: 0, name: Some("dispatch_workflow_greeter".into()), input: json!({}) },
    ]));

    let task_id = handler.streaming_turn(TaskId::new(), context_id.clone(), Message::user_text("do it"), stream).await.unwrap();
    let events = all_events(&bus_manager, &task_id).await;

    let announced = events.iter().any(|e| matches!(e, agentflow_core::TaskEvent::StatusUpdate { reference_task_ids, .. } if !reference_task_ids.is_empty()));
    assert!(announced);

    // A turn with no text still appends an (empty) assistant entry, keeping
    // history's {user, assistant} pairing even-length and strictly alternating.
    let history = context_manager.get_history(&context_id);
    assert_eq!(history.len(), 2);
    assert_eq!(history[0].text(), "do it");
    assert_eq!(history[1].text(), "");
}

#[tokio::test]
async fn a_stream_failure_publishes_a_final_failed_status_and_does_not_touch_history() {
    let (handler, bus_manager, context_manager) = ai_handler();
    let context_id = ContextId::new();
    let stream = Box::new(ScriptedModelStream::new(vec![
        ModelStreamEvent::TextDelta { text: Some("partial".into()) },
        ModelStreamEvent::StreamFailure { reason: "transport dropped".into() },
    ]));

    let task_id = handler.streaming_turn(TaskId::new(), context_id.clone(), Message::user_text("hello"), stream).await.unwrap();
    let events = all_events(&bus_manager, &task_id).await;

    match events.last().unwrap() {
        agentflow_core::TaskEvent::StatusUpdate { status, r#final, .. } => {
            assert!(*r#final);
            assert_eq!(status.state, TaskState::Failed);
        }
        other => panic!("expected a final failed status-update, got {other:?}"),
    }
    assert!(context_manager.get_history(&context_id).is_empty());
}
