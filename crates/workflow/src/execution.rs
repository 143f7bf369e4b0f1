// SPDX-License-Identifier: MIT

//! Runtime bookkeeping for one dispatched execution (spec §3
//! "Workflow Execution").

use std::sync::atomic::AtomicBool;
use std::sync::Arc;

use agentflow_core::{ContextId, TaskId, TaskState};
use parking_lot::RwLock;
use serde_json::Value;
use tokio::sync::{mpsc, oneshot, Mutex};

use crate::state::{PauseInfo, WorkflowFailure, WorkflowState};

/// Point-in-time view returned by `getTaskState` (spec §4.1).
#[derive(Debug, Clone)]
pub struct ExecutionState {
    pub state: TaskState,
    pub pause_info: Option<PauseInfo>,
    pub error: Option<WorkflowFailure>,
    /// Whether the execution still has an outstanding generator (not yet terminal).
    pub has_generator: bool,
    pub is_final: bool,
}

/// Mutable execution record shared between the runtime's pump task and
/// every `getTaskState`/`resumeWorkflow`/`cancelExecution` caller.
pub(crate) struct ExecutionRecord {
    pub state: TaskState,
    pub pause_info: Option<PauseInfo>,
    pub error: Option<WorkflowFailure>,
    pub first_yield: Option<WorkflowState>,
}

impl ExecutionRecord {
    fn new() -> Self {
        Self { state: TaskState::Submitted, pause_info: None, error: None, first_yield: None }
    }

    fn is_final(&self) -> bool {
        self.state.is_terminal()
    }

    pub fn snapshot(&self) -> ExecutionState {
        ExecutionState {
            state: self.state,
            pause_info: self.pause_info.clone(),
            error: self.error.clone(),
            has_generator: !self.is_final(),
            is_final: self.is_final(),
        }
    }
}

/// Internal per-execution handle retained by the runtime's registry, keyed
/// by `taskId`.
pub(crate) struct ExecutionHandle {
    pub record: RwLock<ExecutionRecord>,
    pub resume_tx: mpsc::Sender<Value>,
    pub canceled: Arc<AtomicBool>,
    pub notify: Arc<tokio::sync::Notify>,
}

impl ExecutionHandle {
    pub fn new(resume_tx: mpsc::Sender<Value>, canceled: Arc<AtomicBool>) -> Self {
        Self { record: RwLock::new(ExecutionRecord::new()), resume_tx, canceled, notify: Arc::new(tokio::sync::Notify::new()) }
    }
}

/// The execution handle returned by `dispatch` to its caller (the Workflow
/// Handler). `events` carries every yield except `dispatch-response`;
/// `completion` resolves once the execution reaches a terminal state.
pub struct Execution {
    pub task_id: TaskId,
    pub context_id: ContextId,
    pub events: mpsc::Receiver<WorkflowState>,
    completion: Mutex<Option<oneshot::Receiver<()>>>,
}

impl Execution {
    pub(crate) fn new(task_id: TaskId, context_id: ContextId, events: mpsc::Receiver<WorkflowState>, completion: oneshot::Receiver<()>) -> Self {
        Self { task_id, context_id, events, completion: Mutex::new(Some(completion)) }
    }

    /// Await the execution reaching a terminal state. Callable once; a
    /// second call resolves immediately, matching the teacher's
    /// `PersistenceLoop::first_committed` "take-once" pattern.
    pub async fn wait_for_completion(&self) {
        let rx = self.completion.lock().await.take();
        match rx {
            Some(rx) => {
                let _ = rx.await;
            }
            None => {}
        }
    }
}
