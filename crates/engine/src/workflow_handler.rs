// SPDX-License-Identifier: MIT

//! Workflow Handler: mediates between the Workflow Runtime and the Event
//! Bus system, owning the child-task lifecycle end-to-end (spec §4.6).

use std::collections::{HashMap, HashSet};
use std::sync::Arc;
use std::time::Duration;

use agentflow_bus::{BusManager, PersistenceLoop};
use agentflow_core::{canonicalize_plugin_id, ContextId, Message, Part, Task, TaskEvent, TaskId, TaskState, TaskStatus};
use agentflow_storage::TaskStore;
use agentflow_workflow::{InterruptReason, ResumeOutcome, WorkflowRuntime, WorkflowState};
use parking_lot::Mutex;

use crate::context::ContextManager;
use crate::error::EngineError;

/// How long a bus stays open after `finished()` so the persistence loop can
/// drain (spec §5, ≤100 ms).
const CLEANUP_GRACE_PERIOD: Duration = Duration::from_millis(50);

/// Buffers child-bus events produced before the child's creation event has
/// been confirmed persisted, then opens for direct publication (spec §4.6
/// steps 6/9, §9 "First-event gating").
enum Gate {
    Buffering(Vec<TaskEvent>),
    Open,
}

pub struct WorkflowHandler {
    runtime: Arc<WorkflowRuntime>,
    bus_manager: BusManager,
    task_store: Arc<dyn TaskStore>,
    context_manager: Arc<ContextManager>,
    context_task_map: Mutex<HashMap<ContextId, HashSet<TaskId>>>,
}

impl WorkflowHandler {
    pub fn new(runtime: Arc<WorkflowRuntime>, bus_manager: BusManager, task_store: Arc<dyn TaskStore>, context_manager: Arc<ContextManager>) -> Self {
        Self { runtime, bus_manager, task_store, context_manager, context_task_map: Mutex::new(HashMap::new()) }
    }

    /// The 13-step dispatch algorithm (spec §4.6). Returns the synchronous
    /// `dispatch-response` parts (empty if the plugin didn't yield one
    /// within its `dispatchResponseTimeout`).
    pub async fn dispatch(
        &self,
        plugin_id: &str,
        parameters: serde_json::Value,
        parent_bus: Arc<agentflow_bus::EventBus>,
        parent_task_id: TaskId,
        parent_context_id: ContextId,
    ) -> Result<Vec<Part>, EngineError> {
        // Step 1.
        let canonical = canonicalize_plugin_id(plugin_id);
        let plugin = self.runtime.get_plugin(&canonical).ok_or_else(|| agentflow_workflow::WorkflowError::UnknownPlugin { plugin_id: canonical.clone() })?;

        // Step 2.
        let workflow_context_id = ContextId::new();
        self.context_manager.create_context_with_id(workflow_context_id.clone());

        // Step 3.
        let mut execution = self.runtime.dispatch(&canonical, workflow_context_id.clone(), parameters)?;
        let task_id = execution.task_id.clone();

        // Step 4.
        let child_bus = self.bus_manager.create_or_get_by_task_id(&task_id);

        let initial_task = Task::submitted(task_id.clone(), workflow_context_id.clone());
        self.task_store.save(initial_task.clone()).await;

        // Step 5.
        let mut persistence = PersistenceLoop::spawn(child_bus.clone(), self.task_store.clone(), initial_task.clone());

        // Step 6: register listeners, buffering until the gate opens. The
        // gate's buffer is seeded with the synthetic `working` status (step
        // 10) up front, so it flushes ahead of any plugin-yielded event the
        // listener buffers behind it — a plugin that yields fast (e.g.
        // `artifact` then `interrupted`) cannot push its own events in front
        // of `working`, and cannot suppress it either. One background task
        // both drains the execution's yields (listener) and, once they're
        // exhausted, determines and publishes the terminal status and tears
        // the child bus down (monitor) — a single task that owns
        // `execution` end-to-end rather than two tasks racing over it, the
        // same ownership argument that shaped the runtime's own
        // `tokio::join!` fix for its yield pump.
        let initial_status = TaskEvent::status_update(task_id.clone(), workflow_context_id.clone(), TaskStatus::new(TaskState::Working), false);
        let gate = Arc::new(Mutex::new(Gate::Buffering(vec![initial_status])));
        let terminal_published = Arc::new(std::sync::atomic::AtomicBool::new(false));

        let bg_gate = gate.clone();
        let bg_terminal_published = terminal_published.clone();
        let bg_bus = child_bus.clone();
        let bg_bus_manager = self.bus_manager.clone();
        let bg_runtime = self.runtime.clone();
        let bg_task_id = task_id.clone();
        let bg_context_id = workflow_context_id.clone();
        tokio::spawn(async move {
            while let Some(yielded) = execution.events.recv().await {
                for event in workflow_state_to_task_events(&bg_task_id, &bg_context_id, yielded) {
                    if event.is_terminal_status() {
                        bg_terminal_published.store(true, std::sync::atomic::Ordering::Release);
                    }
                    publish_or_buffer(&bg_gate, &bg_bus, event);
                }
            }
            execution.wait_for_completion().await;
            if !bg_terminal_published.load(std::sync::atomic::Ordering::Acquire) {
                if let Some(state) = bg_runtime.get_task_state(&bg_task_id) {
                    if let Some(event) = terminal_event_for_runtime_state(&bg_task_id, &bg_context_id, &state) {
                        publish_or_buffer(&bg_gate, &bg_bus, event);
                    }
                }
            }
            bg_bus.finished();
            tokio::time::sleep(CLEANUP_GRACE_PERIOD).await;
            bg_bus_manager.cleanup_by_task_id(&bg_task_id);
        });

        // Step 7.
        child_bus.publish(TaskEvent::Task { task_id: task_id.clone(), context_id: workflow_context_id.clone(), task: initial_task.clone() });

        // Step 8.
        self.context_manager.add_task(&workflow_context_id, task_id.clone());
        self.context_task_map.lock().entry(workflow_context_id.clone()).or_default().insert(task_id.clone());

        // Step 9/10: await persistence confirmation, then open the gate —
        // flushing the seeded `working` status ahead of anything the
        // listener buffered behind it.
        let _ = persistence.first_committed().await;
        let buffered = {
            let mut g = gate.lock();
            std::mem::replace(&mut *g, Gate::Open)
        };
        if let Gate::Buffering(events) = buffered {
            for event in events {
                child_bus.publish(event);
            }
        }

        // Step 11: announce the child on the parent bus.
        let announcement = Message::agent_text(format!("Dispatching workflow: {} — {}", plugin.name, plugin.description));
        let mut status = TaskStatus::with_message(TaskState::Working, announcement);
        status.state = TaskState::Working;
        parent_bus.publish(TaskEvent::StatusUpdate {
            task_id: parent_task_id,
            context_id: parent_context_id,
            status,
            reference_task_ids: vec![task_id.clone()],
            referenced_workflow: Some(agentflow_core::ReferencedWorkflow { workflow_name: plugin.name.clone(), description: plugin.description.clone(), plugin_id: plugin.id.clone() }),
            r#final: false,
        });

        // Step 13.
        let first = self.runtime.wait_for_first_yield(&task_id, plugin.dispatch_response_timeout).await;
        let parts = match first {
            Some(WorkflowState::DispatchResponse { parts }) => parts,
            _ => Vec::new(),
        };
        Ok(parts)
    }

    /// Resume algorithm (spec §4.6).
    pub async fn resume(&self, task_id: &TaskId, input: serde_json::Value) -> Result<(), EngineError> {
        let child_bus = self.bus_manager.get_by_task_id(task_id);
        let context_id = self.task_store.load(task_id).await.map(|t| t.context_id);

        match self.runtime.resume_workflow(task_id, input).await {
            Err(err) => {
                if let (Some(bus), Some(context_id)) = (&child_bus, &context_id) {
                    let failure = Message::agent_text(err.to_string());
                    bus.publish(TaskEvent::status_update(task_id.clone(), context_id.clone(), TaskStatus::with_message(TaskState::Failed, failure), true));
                }
                Err(EngineError::from(err))
            }
            Ok(ResumeOutcome::Invalid { errors }) => {
                if let (Some(bus), Some(context_id)) = (&child_bus, &context_id) {
                    let state = self.runtime.get_task_state(task_id).map(|s| s.state).unwrap_or(TaskState::InputRequired);
                    let message = Message::agent_text(format!("validation failed: {errors}"));
                    bus.publish(TaskEvent::status_update(task_id.clone(), context_id.clone(), TaskStatus::with_message(state, message), false));
                }
                Ok(())
            }
            Ok(ResumeOutcome::Valid) => {
                if let (Some(bus), Some(context_id)) = (&child_bus, &context_id) {
                    bus.publish(TaskEvent::status_update(task_id.clone(), context_id.clone(), TaskStatus::new(TaskState::Working), false));
                }
                Ok(())
            }
        }
    }

    /// `cancelTask(taskId)`: idempotent either way (spec §4.6, §8 round-trip law).
    pub fn cancel(&self, task_id: &TaskId) {
        self.runtime.cancel_execution(task_id);
    }
}

fn publish_or_buffer(gate: &Mutex<Gate>, bus: &agentflow_bus::EventBus, event: TaskEvent) {
    let mut g = gate.lock();
    match &mut *g {
        Gate::Buffering(buf) => buf.push(event),
        Gate::Open => {
            drop(g);
            bus.publish(event);
        }
    }
}

fn workflow_state_to_task_events(task_id: &TaskId, context_id: &ContextId, state: WorkflowState) -> Vec<TaskEvent> {
    match state {
        WorkflowState::DispatchResponse { .. } => Vec::new(),
        WorkflowState::StatusUpdate { message } => {
            let status = match message {
                Some(m) => TaskStatus::with_message(TaskState::Working, m),
                None => TaskStatus::new(TaskState::Working),
            };
            vec![TaskEvent::status_update(task_id.clone(), context_id.clone(), status, false)]
        }
        WorkflowState::Artifact { artifact, append, last_chunk } => {
            vec![TaskEvent::ArtifactUpdate { task_id: task_id.clone(), context_id: context_id.clone(), artifact, append, last_chunk }]
        }
        WorkflowState::Interrupted { reason, message, artifact, .. } => {
            let state = match reason {
                InterruptReason::InputRequired => TaskState::InputRequired,
                InterruptReason::AuthRequired => TaskState::AuthRequired,
            };
            let mut events = Vec::new();
            if let Some(artifact) = artifact {
                events.push(TaskEvent::ArtifactUpdate { task_id: task_id.clone(), context_id: context_id.clone(), artifact, append: false, last_chunk: true });
            }
            events.push(TaskEvent::status_update(task_id.clone(), context_id.clone(), TaskStatus::with_message(state, Message::agent_text(message)), false));
            events
        }
        WorkflowState::Reject { reason } => {
            vec![TaskEvent::status_update(task_id.clone(), context_id.clone(), TaskStatus::with_message(TaskState::Rejected, Message::agent_text(reason)), true)]
        }
    }
}

fn terminal_event_for_runtime_state(task_id: &TaskId, context_id: &ContextId, state: &agentflow_workflow::ExecutionState) -> Option<TaskEvent> {
    if !state.state.is_terminal() {
        return None;
    }
    let status = match &state.error {
        Some(failure) => TaskStatus::with_message(TaskState::Failed, Message::agent_text(failure.error_type.clone())),
        None => TaskStatus::new(state.state),
    };
    Some(TaskEvent::status_update(task_id.clone(), context_id.clone(), status, true))
}

#[cfg(test)]
#[path = "workflow_handler_tests.rs"]
mod tests;
