// SPDX-License-Identifier: MIT

//! The Workflow Runtime: plugin registry plus execution lifecycle (spec §4.1).

use std::collections::{HashMap, HashSet};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

use agentflow_core::{canonicalize_plugin_id, ContextId, TaskId, TaskState};
use parking_lot::RwLock;
use serde_json::Value;
use tokio::sync::{mpsc, oneshot};

use crate::context::WorkflowContext;
use crate::error::WorkflowError;
use crate::execution::{Execution, ExecutionHandle, ExecutionState};
use crate::plugin::{ToolDescriptor, WorkflowPlugin};
use crate::state::WorkflowState;

/// Outcome of a `resumeWorkflow` attempt.
#[derive(Debug, Clone)]
pub enum ResumeOutcome {
    Valid,
    Invalid { errors: String },
}

pub struct WorkflowRuntime {
    registry: RwLock<HashMap<String, Arc<WorkflowPlugin>>>,
    executions: RwLock<HashMap<TaskId, Arc<ExecutionHandle>>>,
    pending_cancels: RwLock<HashSet<TaskId>>,
    shut_down: AtomicBool,
}

impl Default for WorkflowRuntime {
    fn default() -> Self {
        Self::new()
    }
}

impl WorkflowRuntime {
    pub fn new() -> Self {
        Self {
            registry: RwLock::new(HashMap::new()),
            executions: RwLock::new(HashMap::new()),
            pending_cancels: RwLock::new(HashSet::new()),
            shut_down: AtomicBool::new(false),
        }
    }

    /// Canonicalizes `plugin.id` in place and registers it. Fails with
    /// `DuplicatePlugin` on canonical collision.
    pub fn register(&self, mut plugin: WorkflowPlugin) -> Result<(), WorkflowError> {
        if plugin.name.trim().is_empty() {
            return Err(WorkflowError::InvalidPlugin { reason: "plugin name must not be empty".into() });
        }
        let canonical = canonicalize_plugin_id(&plugin.id);
        let mut registry = self.registry.write();
        if registry.contains_key(&canonical) {
            return Err(WorkflowError::DuplicatePlugin { plugin_id: canonical });
        }
        plugin.id = canonical.clone();
        registry.insert(canonical, Arc::new(plugin));
        Ok(())
    }

    pub fn list_plugins(&self) -> Vec<Arc<WorkflowPlugin>> {
        self.registry.read().values().cloned().collect()
    }

    /// `id` must already be canonical; a non-canonical id is a miss by
    /// construction (spec §4.1).
    pub fn get_plugin(&self, id: &str) -> Option<Arc<WorkflowPlugin>> {
        self.registry.read().get(id).cloned()
    }

    pub fn get_available_tools(&self) -> Vec<ToolDescriptor> {
        self.registry.read().values().map(|p| ToolDescriptor::from(p.as_ref())).collect()
    }

    pub fn get_tool_metadata(&self, name: &str) -> Result<ToolDescriptor, WorkflowError> {
        self.registry
            .read()
            .values()
            .map(|p| ToolDescriptor::from(p.as_ref()))
            .find(|t| t.name == name)
            .ok_or_else(|| WorkflowError::UnknownTool { tool_name: name.to_string() })
    }

    /// Create and start a new execution. Returns immediately; the caller
    /// observes its yields through `Execution::events` and its terminal
    /// outcome through `Execution::wait_for_completion` + `getTaskState`.
    pub fn dispatch(&self, plugin_id: &str, context_id: ContextId, parameters: Value) -> Result<Execution, WorkflowError> {
        if self.shut_down.load(Ordering::Acquire) {
            return Err(WorkflowError::ShuttingDown);
        }
        let canonical = canonicalize_plugin_id(plugin_id);
        let plugin = self.get_plugin(&canonical).ok_or_else(|| WorkflowError::UnknownPlugin { plugin_id: canonical })?;

        let task_id = TaskId::new();
        let canceled = Arc::new(AtomicBool::new(false));
        if self.pending_cancels.write().remove(&task_id) {
            canceled.store(true, Ordering::Release);
        }

        let (yield_tx, mut yield_rx) = WorkflowContext::channel();
        let (resume_tx, resume_rx) = mpsc::channel::<Value>(1);
        let (events_tx, events_rx) = mpsc::channel::<WorkflowState>(32);
        let (completion_tx, completion_rx) = oneshot::channel();

        let handle = Arc::new(ExecutionHandle::new(resume_tx, canceled.clone()));
        handle.record.write().state = TaskState::Working;
        self.executions.write().insert(task_id.clone(), handle.clone());

        let ctx = WorkflowContext::new(task_id.clone(), parameters.clone(), yield_tx, resume_rx, canceled);
        let logic = plugin.logic.clone();
        let pump_task_id = task_id.clone();
        let pump_handle = handle.clone();

        // `logic_fut` owns `ctx` (and therefore `yield_tx`); once it resolves,
        // `ctx` drops and the yield channel closes, so `pump_fut` is
        // guaranteed to drain every yield — including a terminal `reject` —
        // before this task decides the outcome below. Running both futures
        // in one task (rather than racing two `tokio::spawn`s) is what makes
        // that ordering a guarantee rather than a race.
        tokio::spawn(async move {
            let logic_fut = logic.run(ctx);
            let pump_fut = async {
                while let Some(yielded) = yield_rx.recv().await {
                    let mut record = pump_handle.record.write();
                    if record.state.is_terminal() {
                        continue;
                    }
                    if record.first_yield.is_none() {
                        record.first_yield = Some(yielded.clone());
                        pump_handle.notify.notify_waiters();
                    }
                    match &yielded {
                        WorkflowState::DispatchResponse { .. } => {
                            drop(record);
                            continue;
                        }
                        WorkflowState::Interrupted { reason, message, input_schema, .. } => {
                            record.state = match reason {
                                crate::state::InterruptReason::InputRequired => TaskState::InputRequired,
                                crate::state::InterruptReason::AuthRequired => TaskState::AuthRequired,
                            };
                            record.pause_info =
                                Some(crate::state::PauseInfo { reason: *reason, message: message.clone(), input_schema: input_schema.clone() });
                        }
                        WorkflowState::Reject { .. } => {
                            record.state = TaskState::Rejected;
                        }
                        WorkflowState::StatusUpdate { .. } | WorkflowState::Artifact { .. } => {}
                    }
                    drop(record);
                    if events_tx.send(yielded).await.is_err() {
                        tracing::warn!(task_id = %pump_task_id, "no listener consuming workflow events");
                    }
                }
            };
            let (outcome, ()) = tokio::join!(logic_fut, pump_fut);

            let mut record = handle.record.write();
            if !record.state.is_terminal() {
                match outcome {
                    Ok(_value) => record.state = TaskState::Completed,
                    Err(failure) => {
                        record.state = TaskState::Failed;
                        record.error = Some(failure);
                    }
                }
            }
            drop(record);
            let _ = completion_tx.send(());
        });

        Ok(Execution::new(task_id, context_id, events_rx, completion_rx))
    }

    /// Validate `input` against the paused execution's `pauseInfo.inputSchema`;
    /// on success, delivers it to the suspended plugin and advances the
    /// execution to `working`.
    pub async fn resume_workflow(&self, task_id: &TaskId, input: Value) -> Result<ResumeOutcome, WorkflowError> {
        let handle = self.executions.read().get(task_id).cloned().ok_or_else(|| WorkflowError::UnknownTask { task_id: task_id.clone() })?;

        let schema = {
            let record = handle.record.read();
            if !record.state.is_paused() {
                return Err(WorkflowError::NotPaused { task_id: task_id.clone() });
            }
            record.pause_info.as_ref().map(|p| p.input_schema.clone())
        };

        if let Some(schema) = schema {
            if let Ok(validator) = jsonschema::validator_for(&schema) {
                if let Err(err) = validator.validate(&input) {
                    return Ok(ResumeOutcome::Invalid { errors: err.to_string() });
                }
            }
        }

        handle.record.write().state = TaskState::Working;
        let _ = handle.resume_tx.send(input).await;
        Ok(ResumeOutcome::Valid)
    }

    /// Abort the execution if active; otherwise record a pending cancel
    /// applied when it starts. Idempotent either way.
    pub fn cancel_execution(&self, task_id: &TaskId) {
        match self.executions.read().get(task_id).cloned() {
            Some(handle) => {
                handle.canceled.store(true, Ordering::Release);
                let mut record = handle.record.write();
                if !record.state.is_terminal() {
                    record.state = TaskState::Canceled;
                }
            }
            None => {
                self.pending_cancels.write().insert(task_id.clone());
            }
        }
    }

    pub fn get_task_state(&self, task_id: &TaskId) -> Option<ExecutionState> {
        self.executions.read().get(task_id).map(|h| h.record.read().snapshot())
    }

    /// Returns the first `dispatch-response` yield if the execution's very
    /// first yield was of that kind, within `timeout`; `None` otherwise.
    pub async fn wait_for_first_yield(&self, task_id: &TaskId, timeout: Duration) -> Option<WorkflowState> {
        let handle = self.executions.read().get(task_id).cloned()?;
        let deadline = tokio::time::Instant::now() + timeout;
        loop {
            if let Some(first) = handle.record.read().first_yield.clone() {
                return match first {
                    WorkflowState::DispatchResponse { .. } => Some(first),
                    _ => None,
                };
            }
            let remaining = deadline.saturating_duration_since(tokio::time::Instant::now());
            if remaining.is_zero() {
                return None;
            }
            let notified = handle.notify.notified();
            if tokio::time::timeout(remaining, notified).await.is_err() {
                return None;
            }
        }
    }

    /// Cancel all active executions, clear the registry, and reject further dispatch.
    pub fn shutdown(&self) {
        self.shut_down.store(true, Ordering::Release);
        let executions = self.executions.read();
        for handle in executions.values() {
            handle.canceled.store(true, Ordering::Release);
            let mut record = handle.record.write();
            if !record.state.is_terminal() {
                record.state = TaskState::Canceled;
            }
        }
        drop(executions);
        self.registry.write().clear();
    }
}

#[cfg(test)]
#[path = "runtime_tests.rs"]
mod tests;
