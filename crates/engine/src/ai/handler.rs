// SPDX-License-Identifier: MIT

//! AI Handler: opens a model stream for one turn and drives the Stream
//! Processor's actions onto the parent bus, forwarding workflow-dispatch
//! tool-calls to the Workflow Handler (spec §4.5).

use std::sync::Arc;

use agentflow_core::{Artifact, ArtifactId, ContextId, Message, Part, Task, TaskEvent, TaskId, TaskState, TaskStatus};
use agentflow_bus::{BusManager, PersistenceLoop};
use agentflow_storage::TaskStore;

use super::model::ModelStream;
use super::stream_processor::{StreamAction, StreamProcessor};
use crate::context::ContextManager;
use crate::error::EngineError;
use crate::workflow_handler::WorkflowHandler;

pub struct AiHandler {
    bus_manager: BusManager,
    task_store: Arc<dyn TaskStore>,
    context_manager: Arc<ContextManager>,
    workflow_handler: Arc<WorkflowHandler>,
}

impl AiHandler {
    pub fn new(bus_manager: BusManager, task_store: Arc<dyn TaskStore>, context_manager: Arc<ContextManager>, workflow_handler: Arc<WorkflowHandler>) -> Self {
        Self { bus_manager, task_store, context_manager, workflow_handler }
    }

    /// Drive one streaming AI turn to completion under `task_id` (the caller
    /// generates it up front so a transport can subscribe to the task's bus
    /// before this future resolves). Returns `task_id` back once the turn
    /// has reached a terminal status.
    pub async fn streaming_turn(&self, task_id: TaskId, context_id: ContextId, user_message: Message, mut stream: Box<dyn ModelStream>) -> Result<TaskId, EngineError> {
        let bus = self.bus_manager.create_or_get_by_task_id(&task_id);

        let initial_task = Task::submitted(task_id.clone(), context_id.clone());
        self.task_store.save(initial_task.clone()).await;
        let mut persistence = PersistenceLoop::spawn(bus.clone(), self.task_store.clone(), initial_task.clone());

        bus.publish(TaskEvent::Task { task_id: task_id.clone(), context_id: context_id.clone(), task: initial_task });

        let _ = persistence.first_committed().await;
        self.context_manager.add_task(&context_id, task_id.clone());

        let mut processor = StreamProcessor::new(task_id.clone());
        let mut failed = false;

        loop {
            let Some(event) = stream.next_event().await else { break };
            if let super::model::ModelStreamEvent::StreamFailure { reason } = &event {
                let status = TaskStatus::with_message(TaskState::Failed, Message::agent_text(reason.clone()));
                bus.publish(TaskEvent::status_update(task_id.clone(), context_id.clone(), status, true));
                failed = true;
                break;
            }
            let actions = processor.handle_event(event);
            self.apply_actions(&bus, &context_id, &task_id, actions).await?;
        }

        if !failed {
            let actions = processor.flush();
            self.apply_actions(&bus, &context_id, &task_id, actions).await?;

            let status = TaskStatus::new(TaskState::Completed);
            bus.publish(TaskEvent::status_update(task_id.clone(), context_id.clone(), status, true));

            self.context_manager.add_to_history(&context_id, user_message);
            self.context_manager.add_to_history(&context_id, Message::agent_text(processor.accumulated_text().to_string()));
        }

        bus.finished();
        Ok(task_id)
    }

    async fn apply_actions(&self, bus: &Arc<agentflow_bus::EventBus>, context_id: &ContextId, task_id: &TaskId, actions: Vec<StreamAction>) -> Result<(), EngineError> {
        for action in actions {
            match action {
                StreamAction::PublishArtifact { artifact, append, last_chunk } => {
                    bus.publish(TaskEvent::ArtifactUpdate { task_id: task_id.clone(), context_id: context_id.clone(), artifact, append, last_chunk });
                }
                StreamAction::DispatchWorkflow { tool_name, parameters } => {
                    let _parts = self.workflow_handler.dispatch(&tool_name, parameters, bus.clone(), task_id.clone(), context_id.clone()).await?;
                }
                StreamAction::ToolOutputError { error_text } => {
                    let artifact = Artifact::with_parts(ArtifactId::new(), vec![Part::ToolOutputError { error_text }]);
                    bus.publish(TaskEvent::ArtifactUpdate { task_id: task_id.clone(), context_id: context_id.clone(), artifact, append: false, last_chunk: true });
                }
            }
        }
        Ok(())
    }
}

#[cfg(test)]
#[path = "handler_tests.rs"]
mod tests;
