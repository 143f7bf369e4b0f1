// SPDX-License-Identifier: MIT

//! Context / Session Manager (spec §4.3).
//!
//! Process-local `parking_lot::Mutex<HashMap<ContextId, Context>>`, matching
//! the teacher's in-memory daemon state maps — no WAL or eviction, since
//! contexts are process-local and live for the runtime's lifetime.

use std::collections::HashMap;

use agentflow_core::{Context, ContextId, Message, TaskId};
use parking_lot::Mutex;

#[derive(Default)]
pub struct ContextManager {
    contexts: Mutex<HashMap<ContextId, Context>>,
}

impl ContextManager {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn create_context(&self) -> ContextId {
        let context_id = ContextId::new();
        self.create_context_with_id(context_id.clone());
        context_id
    }

    /// Idempotent: an existing context for `context_id` is left untouched.
    pub fn create_context_with_id(&self, context_id: ContextId) {
        self.contexts.lock().entry(context_id.clone()).or_insert_with(|| Context::new(context_id));
    }

    pub fn get_context(&self, context_id: &ContextId) -> Option<Context> {
        self.contexts.lock().get(context_id).cloned()
    }

    /// Alias kept for callers that think in terms of "session" rather than
    /// "context" (spec §4.3 `getSession`).
    pub fn get_session(&self, context_id: &ContextId) -> Option<Context> {
        self.get_context(context_id)
    }

    /// Idempotent append preserving insertion order. Creates the context on
    /// demand if it doesn't exist yet.
    pub fn add_task(&self, context_id: &ContextId, task_id: TaskId) {
        let mut contexts = self.contexts.lock();
        let context = contexts.entry(context_id.clone()).or_insert_with(|| Context::new(context_id.clone()));
        context.add_task(task_id);
    }

    pub fn get_history(&self, context_id: &ContextId) -> Vec<Message> {
        self.contexts.lock().get(context_id).map(|c| c.history.clone()).unwrap_or_default()
    }

    /// Appends one entry to a context's history. Called only on completed AI
    /// turns (user+assistant pair), never on workflow resume (spec §4.3).
    pub fn add_to_history(&self, context_id: &ContextId, message: Message) {
        let mut contexts = self.contexts.lock();
        let context = contexts.entry(context_id.clone()).or_insert_with(|| Context::new(context_id.clone()));
        context.history.push(message);
    }
}

#[cfg(test)]
#[path = "context_tests.rs"]
mod tests;
