// SPDX-License-Identifier: MIT

//! Process-wide `taskId -> EventBus` map (spec §4.2 "Bus Manager").
//!
//! A single `BusManager` instance must be shared across the Workflow
//! Handler, AI Handler, and transport — two independent managers would
//! silently break `tasks/resubscribe` for child tasks (spec §9's
//! "hardest bug in the source" warning), so `BusManager` is `Clone` over
//! a shared `Arc<RwLock<..>>` rather than handed out as separate owned maps.

use std::collections::HashMap;
use std::sync::Arc;

use parking_lot::RwLock;

use agentflow_core::TaskId;

use crate::bus::EventBus;

#[derive(Clone, Default)]
pub struct BusManager {
    buses: Arc<RwLock<HashMap<TaskId, Arc<EventBus>>>>,
}

impl BusManager {
    pub fn new() -> Self {
        Self::default()
    }

    /// Idempotent: returns the existing bus for `task_id`, creating one on
    /// first need.
    pub fn create_or_get_by_task_id(&self, task_id: &TaskId) -> Arc<EventBus> {
        if let Some(bus) = self.buses.read().get(task_id) {
            return bus.clone();
        }
        self.buses.write().entry(task_id.clone()).or_insert_with(|| Arc::new(EventBus::new(task_id.clone()))).clone()
    }

    pub fn get_by_task_id(&self, task_id: &TaskId) -> Option<Arc<EventBus>> {
        self.buses.read().get(task_id).cloned()
    }

    /// Remove the entry for `task_id`. Callers must only do this after the
    /// persistence loop and all subscribers have observed `finished` (spec
    /// §4.2) — removing it earlier would let a fresh `create_or_get` hand
    /// out a brand new bus to a still-live consumer.
    pub fn cleanup_by_task_id(&self, task_id: &TaskId) {
        self.buses.write().remove(task_id);
    }

    pub fn len(&self) -> usize {
        self.buses.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.buses.read().is_empty()
    }
}

#[cfg(test)]
#[path = "manager_tests.rs"]
mod tests;
