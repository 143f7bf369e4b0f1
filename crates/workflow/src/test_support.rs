// SPDX-License-Identifier: MIT

//! Test doubles shared with `agentflow-engine`'s own test suite.

use async_trait::async_trait;
use serde_json::Value;

use crate::context::WorkflowContext;
use crate::plugin::WorkflowLogic;
use crate::state::WorkflowFailure;

/// Replays a fixed sequence of yields (emitting `interrupted` ones and
/// awaiting resume where the script calls for it), then resolves with a
/// scripted final outcome. Used the way `ScriptedModelStream` stands in for
/// a real model transport in `agentflow-engine`.
pub struct ScriptedWorkflowLogic {
    pub script: Vec<ScriptedStep>,
    pub outcome: Result<Value, WorkflowFailure>,
}

pub enum ScriptedStep {
    Emit(crate::state::WorkflowState),
    Interrupt { reason: crate::state::InterruptReason, message: String, input_schema: Value },
}

#[async_trait]
impl WorkflowLogic for ScriptedWorkflowLogic {
    async fn run(&self, ctx: WorkflowContext) -> Result<Value, WorkflowFailure> {
        for step in &self.script {
            match step {
                ScriptedStep::Emit(state) => ctx.emit(state.clone()).await,
                ScriptedStep::Interrupt { reason, message, input_schema } => {
                    ctx.interrupt(*reason, message.clone(), input_schema.clone(), None).await;
                }
            }
        }
        self.outcome.clone()
    }
}
