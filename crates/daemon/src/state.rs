// SPDX-License-Identifier: MIT

//! Process-wide shared state handed to every axum handler.

use std::sync::Arc;

use agentflow_bus::BusManager;
use agentflow_core::Message;
use agentflow_engine::{AiHandler, ContextManager, ModelStream, ModelStreamEvent, ScriptedModelStream, WorkflowHandler};
use agentflow_storage::{InMemoryTaskStore, TaskStore};
use agentflow_wire::AgentCard;
use agentflow_workflow::WorkflowRuntime;

#[derive(Clone)]
pub struct AppState {
    pub bus_manager: BusManager,
    pub task_store: Arc<dyn TaskStore>,
    pub context_manager: Arc<ContextManager>,
    pub workflow_runtime: Arc<WorkflowRuntime>,
    pub workflow_handler: Arc<WorkflowHandler>,
    pub ai_handler: Arc<AiHandler>,
    pub agent_card: Arc<AgentCard>,
}

impl AppState {
    pub fn new(workflow_runtime: Arc<WorkflowRuntime>, agent_card: AgentCard) -> Self {
        let bus_manager = BusManager::new();
        let task_store: Arc<dyn TaskStore> = Arc::new(InMemoryTaskStore::new());
        let context_manager = Arc::new(ContextManager::new());
        let workflow_handler = Arc::new(WorkflowHandler::new(workflow_runtime.clone(), bus_manager.clone(), task_store.clone(), context_manager.clone()));
        let ai_handler = Arc::new(AiHandler::new(bus_manager.clone(), task_store.clone(), context_manager.clone(), workflow_handler.clone()));
        Self { bus_manager, task_store, context_manager, workflow_runtime, workflow_handler, ai_handler, agent_card: Arc::new(agent_card) }
    }
}

/// Model transport stand-in (spec §1/§4.5 Non-goal: "concrete language-model
/// transport"). No real provider is wired up; this echoes the inbound
/// message back as a single text delta so `message/send`/`message/stream`
/// are observable end-to-end. A real deployment supplies its own
/// `ModelStream` implementation in place of this one.
pub fn echo_model_stream(message: &Message) -> Box<dyn ModelStream> {
    Box::new(ScriptedModelStream::new(vec![
        ModelStreamEvent::TextDelta { text: Some(format!("echo: {}", message.text())) },
        ModelStreamEvent::TextEnd,
    ]))
}
