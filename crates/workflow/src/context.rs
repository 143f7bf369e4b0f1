// SPDX-License-Identifier: MIT

//! The handle a plugin's [`crate::plugin::WorkflowLogic`] drives its yield
//! sequence through.
//!
//! Each execution is a `tokio::task` paired with two bounded `mpsc`
//! channels — outbound yields, inbound resume values — matching the
//! teacher's fiber-plus-channel modeling of a long-running, suspendable
//! unit of work (`oj-engine::runtime::agent_run`'s spawn/lifecycle split),
//! generalized from "agent process" to "workflow coroutine".

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use agentflow_core::{Artifact, TaskId};
use serde_json::Value;
use tokio::sync::{mpsc, Mutex};

use crate::state::{InterruptReason, WorkflowState};

const YIELD_CHANNEL_CAPACITY: usize = 32;

pub struct WorkflowContext {
    task_id: TaskId,
    parameters: Value,
    yield_tx: mpsc::Sender<WorkflowState>,
    resume_rx: Mutex<mpsc::Receiver<Value>>,
    canceled: Arc<AtomicBool>,
}

impl WorkflowContext {
    pub(crate) fn new(task_id: TaskId, parameters: Value, yield_tx: mpsc::Sender<WorkflowState>, resume_rx: mpsc::Receiver<Value>, canceled: Arc<AtomicBool>) -> Self {
        Self { task_id, parameters, yield_tx, resume_rx: Mutex::new(resume_rx), canceled }
    }

    pub(crate) fn channel() -> (mpsc::Sender<WorkflowState>, mpsc::Receiver<WorkflowState>) {
        mpsc::channel(YIELD_CHANNEL_CAPACITY)
    }

    pub fn task_id(&self) -> &TaskId {
        &self.task_id
    }

    pub fn parameters(&self) -> &Value {
        &self.parameters
    }

    /// Cooperative cancellation check. The spec requires plugins to suspend
    /// (and therefore observe this) periodically rather than being killed.
    pub fn is_canceled(&self) -> bool {
        self.canceled.load(Ordering::Acquire)
    }

    /// Emit a non-suspending yield (`status-update` or `artifact`).
    pub async fn emit(&self, state: WorkflowState) {
        if self.yield_tx.send(state).await.is_err() {
            tracing::warn!(task_id = %self.task_id, "workflow runtime dropped the execution before a yield was consumed");
        }
    }

    /// Emit the first, optional `dispatch-response` yield.
    pub async fn dispatch_response(&self, parts: Vec<agentflow_core::Part>) {
        self.emit(WorkflowState::DispatchResponse { parts }).await;
    }

    /// Emit `interrupted` and suspend until `resumeWorkflow` delivers a
    /// validated input value.
    pub async fn interrupt(&self, reason: InterruptReason, message: impl Into<String>, input_schema: Value, artifact: Option<Artifact>) -> Value {
        self.emit(WorkflowState::Interrupted { reason, message: message.into(), input_schema, artifact }).await;
        self.resume_rx.lock().await.recv().await.unwrap_or(Value::Null)
    }

    /// Emit the terminal `reject` yield.
    pub async fn reject(&self, reason: impl Into<String>) {
        self.emit(WorkflowState::Reject { reason: reason.into() }).await;
    }
}
