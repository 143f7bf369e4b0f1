// SPDX-License-Identifier: MIT

use std::sync::Arc;
use std::time::Duration;

use agentflow_core::ContextId;
use serde_json::json;

use super::*;
use crate::state::InterruptReason;
use crate::test_support::{ScriptedStep, ScriptedWorkflowLogic};

fn plugin(id: &str, logic: ScriptedWorkflowLogic) -> WorkflowPlugin {
    WorkflowPlugin::new(id, "Test Plugin", "does a thing", "0.1.0", Arc::new(logic))
}

/// Sync wrapper so async bodies can run under `#[yare::parameterized]`,
/// which only expands to plain (non-`tokio::test`) functions.
fn run_async<F: std::future::Future>(f: F) -> F::Output {
    tokio::runtime::Runtime::new().unwrap().block_on(f)
}

#[test]
fn register_canonicalizes_and_rejects_duplicates() {
    let runtime = WorkflowRuntime::new();
    runtime.register(plugin("My-Plugin", ScriptedWorkflowLogic { script: vec![], outcome: Ok(json!(null)) })).unwrap();

    assert!(runtime.get_plugin("my_plugin").is_some());
    assert!(runtime.get_plugin("My-Plugin").is_none(), "lookup does not re-canonicalize");

    let dup = runtime.register(plugin("my_plugin", ScriptedWorkflowLogic { script: vec![], outcome: Ok(json!(null)) }));
    assert!(matches!(dup, Err(WorkflowError::DuplicatePlugin { .. })));
}

#[test]
fn available_tools_use_the_dispatch_prefix_and_no_resume_tool() {
    let runtime = WorkflowRuntime::new();
    runtime.register(plugin("greeter", ScriptedWorkflowLogic { script: vec![], outcome: Ok(json!(null)) })).unwrap();

    let tools = runtime.get_available_tools();
    assert_eq!(tools.len(), 1);
    assert_eq!(tools[0].name, "dispatch_workflow_greeter");
    assert!(tools.iter().all(|t| !t.name.starts_with("resume_workflow_")));
}

#[tokio::test]
async fn dispatch_runs_to_completion_and_publishes_events() {
    let runtime = WorkflowRuntime::new();
    let status = crate::state::WorkflowState::StatusUpdate { message: None };
    let logic = ScriptedWorkflowLogic { script: vec![ScriptedStep::Emit(status)], outcome: Ok(json!({"ok": true})) };
    runtime.register(plugin("greeter", logic)).unwrap();

    let mut execution = runtime.dispatch("greeter", ContextId::new(), json!({})).unwrap();
    let first = execution.events.recv().await;
    assert!(matches!(first, Some(crate::state::WorkflowState::StatusUpdate { .. })));

    execution.wait_for_completion().await;
    let state = runtime.get_task_state(&execution.task_id).unwrap();
    assert_eq!(state.state, agentflow_core::TaskState::Completed);
    assert!(state.is_final);
}

#[tokio::test]
async fn dispatch_unknown_plugin_fails() {
    let runtime = WorkflowRuntime::new();
    let err = runtime.dispatch("nope", ContextId::new(), json!({})).unwrap_err();
    assert!(matches!(err, WorkflowError::UnknownPlugin { .. }));
}

#[tokio::test]
async fn interrupt_then_resume_with_valid_input_advances_to_working_then_completes() {
    let runtime = WorkflowRuntime::new();
    let logic = ScriptedWorkflowLogic {
        script: vec![ScriptedStep::Interrupt {
            reason: InterruptReason::InputRequired,
            message: "need a name".into(),
            input_schema: json!({"type": "object", "required": ["name"]}),
        }],
        outcome: Ok(json!({"done": true})),
    };
    runtime.register(plugin("asker", logic)).unwrap();

    let mut execution = runtime.dispatch("asker", ContextId::new(), json!({})).unwrap();
    let yielded = execution.events.recv().await.unwrap();
    assert!(matches!(yielded, crate::state::WorkflowState::Interrupted { .. }));

    let state = runtime.get_task_state(&execution.task_id).unwrap();
    assert_eq!(state.state, agentflow_core::TaskState::InputRequired);

    let outcome = runtime.resume_workflow(&execution.task_id, json!({"name": "ada"})).await.unwrap();
    assert!(matches!(outcome, ResumeOutcome::Valid));

    execution.wait_for_completion().await;
    let state = runtime.get_task_state(&execution.task_id).unwrap();
    assert_eq!(state.state, agentflow_core::TaskState::Completed);
}

#[tokio::test]
async fn resume_with_invalid_input_keeps_execution_paused() {
    let runtime = WorkflowRuntime::new();
    let logic = ScriptedWorkflowLogic {
        script: vec![ScriptedStep::Interrupt {
            reason: InterruptReason::InputRequired,
            message: "need a name".into(),
            input_schema: json!({"type": "object", "required": ["name"]}),
        }],
        outcome: Ok(json!(null)),
    };
    runtime.register(plugin("asker", logic)).unwrap();

    let mut execution = runtime.dispatch("asker", ContextId::new(), json!({})).unwrap();
    execution.events.recv().await.unwrap();

    let outcome = runtime.resume_workflow(&execution.task_id, json!({})).await.unwrap();
    assert!(matches!(outcome, ResumeOutcome::Invalid { .. }));

    let state = runtime.get_task_state(&execution.task_id).unwrap();
    assert_eq!(state.state, agentflow_core::TaskState::InputRequired);
}

#[yare::parameterized(
    input_required_pauses = { InterruptReason::InputRequired, agentflow_core::TaskState::InputRequired },
    auth_required_pauses = { InterruptReason::AuthRequired, agentflow_core::TaskState::AuthRequired },
)]
fn dispatch_applies_an_interrupt_yield_to_task_state(reason: InterruptReason, expected_state: agentflow_core::TaskState) {
    run_async(async {
        let runtime = WorkflowRuntime::new();
        let logic = ScriptedWorkflowLogic {
            script: vec![ScriptedStep::Interrupt { reason, message: "need it".into(), input_schema: json!({}) }],
            outcome: Ok(json!(null)),
        };
        runtime.register(plugin("yielder", logic)).unwrap();

        let mut execution = runtime.dispatch("yielder", ContextId::new(), json!({})).unwrap();
        execution.events.recv().await;

        let state = runtime.get_task_state(&execution.task_id).unwrap();
        assert_eq!(state.state, expected_state);
    });
}

#[tokio::test]
async fn cancel_before_dispatch_is_applied_once_it_starts() {
    let runtime = WorkflowRuntime::new();
    // No execution exists yet for an arbitrary id: recorded as pending.
    let phantom = agentflow_core::TaskId::new();
    runtime.cancel_execution(&phantom);
    assert!(runtime.get_task_state(&phantom).is_none());
}

#[tokio::test]
async fn cancel_active_execution_reaches_canceled() {
    let runtime = WorkflowRuntime::new();
    let logic = ScriptedWorkflowLogic {
        script: vec![ScriptedStep::Interrupt {
            reason: InterruptReason::InputRequired,
            message: "pause forever".into(),
            input_schema: json!({}),
        }],
        outcome: Ok(json!(null)),
    };
    runtime.register(plugin("pauser", logic)).unwrap();

    let mut execution = runtime.dispatch("pauser", ContextId::new(), json!({})).unwrap();
    execution.events.recv().await.unwrap();

    runtime.cancel_execution(&execution.task_id);
    let state = runtime.get_task_state(&execution.task_id).unwrap();
    assert_eq!(state.state, agentflow_core::TaskState::Canceled);
}

#[tokio::test]
async fn wait_for_first_yield_returns_dispatch_response_only_when_first() {
    let runtime = WorkflowRuntime::new();
    let parts = vec![agentflow_core::Part::text("hi")];
    let logic = ScriptedWorkflowLogic {
        script: vec![ScriptedStep::Emit(crate::state::WorkflowState::DispatchResponse { parts: parts.clone() })],
        outcome: Ok(json!(null)),
    };
    runtime.register(plugin("responder", logic)).unwrap();

    let execution = runtime.dispatch("responder", ContextId::new(), json!({})).unwrap();
    let first = runtime.wait_for_first_yield(&execution.task_id, Duration::from_millis(200)).await;
    assert!(matches!(first, Some(crate::state::WorkflowState::DispatchResponse { .. })));
}

#[tokio::test]
async fn wait_for_first_yield_is_none_when_first_yield_is_not_dispatch_response() {
    let runtime = WorkflowRuntime::new();
    let logic = ScriptedWorkflowLogic {
        script: vec![ScriptedStep::Emit(crate::state::WorkflowState::StatusUpdate { message: None })],
        outcome: Ok(json!(null)),
    };
    runtime.register(plugin("quiet", logic)).unwrap();

    let execution = runtime.dispatch("quiet", ContextId::new(), json!({})).unwrap();
    let first = runtime.wait_for_first_yield(&execution.task_id, Duration::from_millis(200)).await;
    assert!(first.is_none());
}

#[tokio::test]
async fn shutdown_cancels_active_executions_and_blocks_further_dispatch() {
    let runtime = WorkflowRuntime::new();
    let logic = ScriptedWorkflowLogic {
        script: vec![ScriptedStep::Interrupt { reason: InterruptReason::InputRequired, message: "wait".into(), input_schema: json!({}) }],
        outcome: Ok(json!(null)),
    };
    runtime.register(plugin("lingering", logic)).unwrap();

    let mut execution = runtime.dispatch("lingering", ContextId::new(), json!({})).unwrap();
    execution.events.recv().await.unwrap();

    runtime.shutdown();

    let state = runtime.get_task_state(&execution.task_id).unwrap();
    assert_eq!(state.state, agentflow_core::TaskState::Canceled);
    assert!(runtime.get_plugin("lingering").is_none());

    let err = runtime.dispatch("lingering", ContextId::new(), json!({})).unwrap_err();
    assert!(matches!(err, WorkflowError::ShuttingDown));
}
