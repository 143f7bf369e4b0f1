// SPDX-License-Identifier: MIT

//! A single task's ordered, multi-subscriber event stream.
//!
//! Every published event is retained in an append-only log shared by all
//! subscribers (spec §4.2 "Event Bus contract"): delivery order equals
//! publish order, and a subscriber created after events were already
//! published still sees them from the start, which is what lets
//! `tasks/resubscribe` and the persistence loop's single mandatory
//! subscriber both replay a task's full history rather than losing
//! whatever was sent before they attached. `finished()` marks the bus
//! closed; existing subscribers drain the rest of the log before
//! observing end-of-stream, matching the reference A2A request handler's
//! `consume_until_terminal` loop.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use parking_lot::RwLock;
use tokio::sync::Notify;

use agentflow_core::{TaskEvent, TaskId};

pub struct EventBus {
    task_id: TaskId,
    log: Arc<RwLock<Vec<TaskEvent>>>,
    finished: Arc<AtomicBool>,
    notify: Arc<Notify>,
}

impl EventBus {
    pub fn new(task_id: TaskId) -> Self {
        Self {
            task_id,
            log: Arc::new(RwLock::new(Vec::new())),
            finished: Arc::new(AtomicBool::new(false)),
            notify: Arc::new(Notify::new()),
        }
    }

    pub fn task_id(&self) -> &TaskId {
        &self.task_id
    }

    /// Append `event` to the log and wake any waiting subscribers. A
    /// no-op, with a warning, once `finished()` has been called —
    /// publishing after end-of-stream would violate the contract that no
    /// event is observable after `finished`.
    pub fn publish(&self, event: TaskEvent) {
        if self.finished.load(Ordering::Acquire) {
            tracing::warn!(task_id = %self.task_id, "dropping publish on a finished bus");
            return;
        }
        self.log.write().push(event);
        self.notify.notify_waiters();
    }

    /// Subscribe to this bus from the beginning of its log. A subscriber
    /// started after `finished()` still drains everything already
    /// published.
    pub fn subscribe(&self) -> BusSubscription {
        BusSubscription {
            log: self.log.clone(),
            position: 0,
            finished: self.finished.clone(),
            notify: self.notify.clone(),
        }
    }

    /// Signal end-of-stream. Already-published events remain observable;
    /// no further `publish` has any effect.
    pub fn finished(&self) {
        self.finished.store(true, Ordering::Release);
        self.notify.notify_waiters();
    }

    pub fn is_finished(&self) -> bool {
        self.finished.load(Ordering::Acquire)
    }
}

/// A cursor into one subscriber's view of an `EventBus`.
pub struct BusSubscription {
    log: Arc<RwLock<Vec<TaskEvent>>>,
    position: usize,
    finished: Arc<AtomicBool>,
    notify: Arc<Notify>,
}

impl BusSubscription {
    /// Await the next event, or `None` once the bus is finished and the
    /// log has fully drained.
    pub async fn next(&mut self) -> Option<TaskEvent> {
        loop {
            let notified = self.notify.notified();
            if let Some(event) = self.log.read().get(self.position).cloned() {
                self.position += 1;
                return Some(event);
            }
            if self.finished.load(Ordering::Acquire) {
                // One last read in case a publish landed between the
                // length check above and the finished flag read.
                let last = self.log.read().get(self.position).cloned();
                if last.is_some() {
                    self.position += 1;
                }
                return last;
            }
            notified.await;
        }
    }
}

#[cfg(test)]
#[path = "bus_tests.rs"]
mod tests;
