// SPDX-License-Identifier: MIT

//! agentflow-engine: Context Manager, Agent Executor routing, AI Handler +
//! Stream Processor, and Workflow Handler (spec §4.3–§4.6).
//!
//! This crate wires `agentflow-workflow` (the coroutine runtime) to
//! `agentflow-bus` (per-task event streams) and `agentflow-storage`
//! (persistence), and decides, per inbound message, whether to resume a
//! paused execution or open a new AI turn. It does not know about
//! JSON-RPC or SSE; `agentflow-daemon` owns that boundary.

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

pub mod ai;
pub mod context;
pub mod error;
pub mod executor;
pub mod workflow_handler;

pub use ai::{AiHandler, ModelStream, ModelStreamEvent, ScriptedModelStream, StreamAction, StreamProcessor};
pub use context::ContextManager;
pub use error::EngineError;
pub use executor::{AgentExecutor, RequestContext, Route};
pub use workflow_handler::WorkflowHandler;
