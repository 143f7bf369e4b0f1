// SPDX-License-Identifier: MIT

//! A registered workflow plugin and its tool descriptor (spec §3
//! "Workflow Plugin", §4.1 "Name canonicalization").

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use serde_json::Value;

use crate::context::WorkflowContext;
use crate::state::WorkflowFailure;

/// Default bound on the synchronous `dispatch-response` window (spec §4.1).
pub const DEFAULT_DISPATCH_RESPONSE_TIMEOUT: Duration = Duration::from_millis(500);

/// A plugin's `execute` factory: drives the lazy yield sequence via `ctx`
/// and produces the execution's final result (spec §4.1).
#[async_trait]
pub trait WorkflowLogic: Send + Sync {
    async fn run(&self, ctx: WorkflowContext) -> Result<Value, WorkflowFailure>;
}

/// Registration record for one workflow plugin. `id` holds the raw id until
/// `WorkflowRuntime::register` canonicalizes it in place.
pub struct WorkflowPlugin {
    pub id: String,
    pub name: String,
    pub description: String,
    pub version: String,
    pub input_schema: Option<Value>,
    pub dispatch_response_timeout: Duration,
    pub logic: Arc<dyn WorkflowLogic>,
}

impl WorkflowPlugin {
    pub fn new(id: impl Into<String>, name: impl Into<String>, description: impl Into<String>, version: impl Into<String>, logic: Arc<dyn WorkflowLogic>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            description: description.into(),
            version: version.into(),
            input_schema: None,
            dispatch_response_timeout: DEFAULT_DISPATCH_RESPONSE_TIMEOUT,
            logic,
        }
    }

    pub fn with_input_schema(mut self, schema: Value) -> Self {
        self.input_schema = Some(schema);
        self
    }

    pub fn with_dispatch_response_timeout(mut self, timeout: Duration) -> Self {
        self.dispatch_response_timeout = timeout;
        self
    }

    /// The tool name the AI layer sees for this plugin: `dispatch_workflow_<canonical id>`.
    /// Only meaningful once `id` has been canonicalized by registration.
    pub fn tool_name(&self) -> String {
        dispatch_tool_name(&self.id)
    }
}

pub fn dispatch_tool_name(canonical_id: &str) -> String {
    format!("dispatch_workflow_{canonical_id}")
}

/// Descriptor handed to the AI layer's tool set (spec §4.1 `getAvailableTools`).
#[derive(Debug, Clone)]
pub struct ToolDescriptor {
    pub name: String,
    pub description: String,
    pub parameters: Option<Value>,
}

impl From<&WorkflowPlugin> for ToolDescriptor {
    fn from(plugin: &WorkflowPlugin) -> Self {
        Self { name: plugin.tool_name(), description: plugin.description.clone(), parameters: plugin.input_schema.clone() }
    }
}
