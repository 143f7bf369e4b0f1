// SPDX-License-Identifier: MIT

//! The persistence loop: a bus's one mandatory subscriber, committing
//! each event to a `TaskStore` in order and yielding the updated `Task`
//! (spec §4.2 "Persistence loop").
//!
//! Also the sole source of the **first-event gating** signal: the
//! Workflow Handler awaits `first_committed()` before making a freshly
//! dispatched child task externally visible (spec §4.6 step 9).

use std::sync::Arc;

use tokio::sync::oneshot;
use tokio::task::JoinHandle;

use agentflow_core::Task;
use agentflow_storage::TaskStore;

use crate::apply::apply_task_event;
use crate::bus::EventBus;

/// Handle to a running persistence loop.
pub struct PersistenceLoop {
    handle: JoinHandle<()>,
    first_committed: Option<oneshot::Receiver<()>>,
}

impl PersistenceLoop {
    /// Start the loop for `bus`, seeded with `initial_task` (already saved
    /// by the caller as the task's creation event). Commits every
    /// subsequent event from the bus into `store` in order until the bus
    /// finishes and its backlog drains.
    pub fn spawn<S>(bus: Arc<EventBus>, store: Arc<S>, initial_task: Task) -> Self
    where
        S: TaskStore,
    {
        let (first_tx, first_rx) = oneshot::channel();
        let mut first_tx = Some(first_tx);
        let task_id = bus.task_id().clone();

        let handle = tokio::spawn(async move {
            let mut sub = bus.subscribe();
            let mut task = initial_task;

            if let Some(tx) = first_tx.take() {
                let _ = tx.send(());
            }

            while let Some(event) = sub.next().await {
                apply_task_event(&mut task, &event);
                store.save(task.clone()).await;
                tracing::debug!(task_id = %task_id, "persisted task event");
            }

            tracing::debug!(task_id = %task_id, "persistence loop drained");
        });

        Self { handle, first_committed: Some(first_rx) }
    }

    /// Resolves once the task's creation event has been committed. Takes
    /// the receiver, so it can only be awaited once per loop — matching
    /// its one legitimate caller, the Workflow Handler's dispatch gating.
    pub fn first_committed(&mut self) -> oneshot::Receiver<()> {
        self.first_committed.take().unwrap_or_else(|| {
            let (tx, rx) = oneshot::channel();
            let _ = tx.send(());
            rx
        })
    }

    /// Await the loop's natural completion (bus finished and backlog drained).
    pub async fn join(self) {
        let _ = self.handle.await;
    }
}

#[cfg(test)]
#[path = "persistence_tests.rs"]
mod tests;
