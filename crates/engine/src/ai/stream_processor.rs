// SPDX-License-Identifier: MIT

//! Stream Processor: translates a [`super::model::ModelStreamEvent`]
//! sequence into task-event actions (spec §4.5 event-handling table).

use std::collections::HashMap;

use agentflow_core::{Artifact, ArtifactId, TaskId};

use super::model::ModelStreamEvent;

/// One outcome of handling a single model-stream event.
#[derive(Debug, Clone, PartialEq)]
pub enum StreamAction {
    PublishArtifact { artifact: Artifact, append: bool, last_chunk: bool },
    DispatchWorkflow { tool_name: String, parameters: serde_json::Value },
    ToolOutputError { error_text: String },
}

/// Per-call mutable state (spec §4.5 "Stream Processor state").
pub struct StreamProcessor {
    task_id: TaskId,
    text_chunk_index: u64,
    reasoning_chunk_index: u64,
    buffered_artifact: Option<Artifact>,
    buffered_reasoning_artifact: Option<Artifact>,
    tool_call_artifacts: HashMap<usize, (ArtifactId, String)>,
    delta_counters: HashMap<String, i64>,
    accumulated_text: String,
    accumulated_reasoning: String,
}

impl StreamProcessor {
    pub fn new(task_id: TaskId) -> Self {
        Self {
            task_id,
            text_chunk_index: 0,
            reasoning_chunk_index: 0,
            buffered_artifact: None,
            buffered_reasoning_artifact: None,
            tool_call_artifacts: HashMap::new(),
            delta_counters: HashMap::new(),
            accumulated_text: String::new(),
            accumulated_reasoning: String::new(),
        }
    }

    pub fn accumulated_text(&self) -> &str {
        &self.accumulated_text
    }

    pub fn accumulated_reasoning(&self) -> &str {
        &self.accumulated_reasoning
    }

    pub fn handle_event(&mut self, event: ModelStreamEvent) -> Vec<StreamAction> {
        match event {
            ModelStreamEvent::TextDelta { text } => self.handle_text_delta(text),
            ModelStreamEvent::TextEnd => self.flush_text(),
            ModelStreamEvent::ReasoningDelta { text } => self.handle_reasoning_delta(text),
            ModelStreamEvent::ReasoningEnd => self.flush_reasoning(),
            ModelStreamEvent::ToolCall { index, name, input } => self.handle_tool_call(index, name, input),
            ModelStreamEvent::ToolResult { index, output } => self.handle_tool_result(index, output),
            ModelStreamEvent::ToolOutputError { error_text } => vec![StreamAction::ToolOutputError { error_text }],
            ModelStreamEvent::ToolInputDelta => {
                *self.delta_counters.entry("tool-input-delta".into()).or_insert(0) += 1;
                vec![]
            }
            ModelStreamEvent::ToolInputEnd => {
                self.delta_counters.insert("tool-input-delta".into(), 0);
                vec![]
            }
            ModelStreamEvent::StepStart | ModelStreamEvent::StepFinish | ModelStreamEvent::ReasoningStart => vec![],
            ModelStreamEvent::Other { kind } => {
                if kind.ends_with("-delta") {
                    *self.delta_counters.entry(kind).or_insert(0) += 1;
                }
                vec![]
            }
            ModelStreamEvent::StreamFailure { .. } => vec![],
        }
    }

    /// Flush any still-buffered artifacts with `lastChunk=true` (spec §4.5
    /// "End of stream").
    pub fn flush(&mut self) -> Vec<StreamAction> {
        let mut actions = self.flush_text();
        actions.extend(self.flush_reasoning());
        actions
    }

    fn handle_text_delta(&mut self, text: Option<String>) -> Vec<StreamAction> {
        let Some(text) = text else { return vec![] };
        let mut actions = Vec::new();
        if let Some(previous) = self.buffered_artifact.take() {
            actions.push(StreamAction::PublishArtifact { artifact: previous, append: false, last_chunk: false });
        }
        self.accumulated_text.push_str(&text);
        let artifact_id = ArtifactId::from_string(format!("text-response-{}-{}", self.task_id, self.text_chunk_index));
        self.text_chunk_index += 1;
        let artifact = Artifact::with_parts(artifact_id, vec![agentflow_core::Part::text(text)]);
        self.buffered_artifact = Some(artifact.clone());
        actions.push(StreamAction::PublishArtifact { artifact, append: false, last_chunk: false });
        actions
    }

    fn flush_text(&mut self) -> Vec<StreamAction> {
        match self.buffered_artifact.take() {
            Some(artifact) => vec![StreamAction::PublishArtifact { artifact, append: false, last_chunk: true }],
            None => vec![],
        }
    }

    fn handle_reasoning_delta(&mut self, text: Option<String>) -> Vec<StreamAction> {
        let Some(text) = text else { return vec![] };
        let mut actions = Vec::new();
        if let Some(previous) = self.buffered_reasoning_artifact.take() {
            actions.push(StreamAction::PublishArtifact { artifact: previous, append: false, last_chunk: false });
        }
        self.accumulated_reasoning.push_str(&text);
        let artifact_id = ArtifactId::from_string(format!("reasoning-{}-{}", self.task_id, self.reasoning_chunk_index));
        self.reasoning_chunk_index += 1;
        let artifact = Artifact::with_parts(artifact_id, vec![agentflow_core::Part::text(text)]);
        self.buffered_reasoning_artifact = Some(artifact.clone());
        actions.push(StreamAction::PublishArtifact { artifact, append: false, last_chunk: false });
        actions
    }

    fn flush_reasoning(&mut self) -> Vec<StreamAction> {
        match self.buffered_reasoning_artifact.take() {
            Some(artifact) => vec![StreamAction::PublishArtifact { artifact, append: false, last_chunk: true }],
            None => vec![],
        }
    }

    fn handle_tool_call(&mut self, index: usize, name: Option<String>, input: serde_json::Value) -> Vec<StreamAction> {
        let Some(name) = name else { return vec![] };
        if let Some(tool_name) = name.strip_prefix("dispatch_workflow_") {
            return vec![StreamAction::DispatchWorkflow { tool_name: tool_name.to_string(), parameters: input }];
        }
        let artifact_id = ArtifactId::new();
        self.tool_call_artifacts.insert(index, (artifact_id.clone(), name.clone()));
        let part = agentflow_core::Part::ToolCall { tool_call_id: artifact_id.to_string(), tool_name: name, args: input };
        vec![StreamAction::PublishArtifact { artifact: Artifact::with_parts(artifact_id, vec![part]), append: false, last_chunk: true }]
    }

    fn handle_tool_result(&mut self, index: usize, output: serde_json::Value) -> Vec<StreamAction> {
        let Some((artifact_id, tool_name)) = self.tool_call_artifacts.get(&index).cloned() else {
            return vec![];
        };
        let part = agentflow_core::Part::ToolResult { tool_call_id: artifact_id.to_string(), tool_name, output };
        vec![StreamAction::PublishArtifact { artifact: Artifact::with_parts(artifact_id, vec![part]), append: true, last_chunk: true }]
    }
}

#[cfg(test)]
#[path = "stream_processor_tests.rs"]
mod tests;
