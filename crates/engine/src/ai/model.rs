// SPDX-License-Identifier: MIT

//! The model transport boundary (spec §1 Non-goal: "concrete language-model
//! transport is out of scope"). `ModelStream` is the named interface the
//! Stream Processor consumes; `ScriptedModelStream` is the fixed-sequence
//! test double used by this component's own tests, the way
//! `agentflow-workflow::test_support::ScriptedWorkflowLogic` stands in for
//! a real plugin.

use async_trait::async_trait;
use serde_json::Value;

/// One event off the model's incremental response stream.
#[derive(Debug, Clone, PartialEq)]
pub enum ModelStreamEvent {
    TextDelta { text: Option<String> },
    TextEnd,
    ReasoningDelta { text: Option<String> },
    ReasoningEnd,
    ReasoningStart,
    ToolCall { index: usize, name: Option<String>, input: Value },
    ToolResult { index: usize, output: Value },
    ToolOutputError { error_text: String },
    ToolInputDelta,
    ToolInputEnd,
    StepStart,
    StepFinish,
    /// Any kind the table doesn't name. `StreamProcessor` bumps the delta
    /// counter for it when `kind` ends in `-delta`, otherwise ignores it.
    Other { kind: String },
    /// Not a model-provided kind: synthesized by the transport when the
    /// underlying stream fails, so `AiHandler` can end the turn with a
    /// `failed` status instead of silently truncating it.
    StreamFailure { reason: String },
}

#[async_trait]
pub trait ModelStream: Send {
    async fn next_event(&mut self) -> Option<ModelStreamEvent>;
}

/// Replays a fixed sequence of events, then ends the stream.
pub struct ScriptedModelStream {
    events: std::collections::VecDeque<ModelStreamEvent>,
}

impl ScriptedModelStream {
    pub fn new(events: Vec<ModelStreamEvent>) -> Self {
        Self { events: events.into() }
    }
}

#[async_trait]
impl ModelStream for ScriptedModelStream {
    async fn next_event(&mut self) -> Option<ModelStreamEvent> {
        self.events.pop_front()
    }
}
