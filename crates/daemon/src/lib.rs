// SPDX-License-Identifier: MIT

//! agentflow-daemon: JSON-RPC + SSE HTTP transport (spec §6).
//!
//! Binds the five `a2a` methods and the agent-card endpoints onto
//! `agentflow-engine`'s routing/dispatch pipeline; owns the
//! `EngineError -> A2aError` conversion at the wire boundary, the way
//! `oj-wire`'s response/status types are the seam between `oj-daemon` and
//! the rest of the teacher's workspace.

#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

pub mod card;
pub mod config;
pub mod error;
pub mod rpc;
pub mod sse;
pub mod state;

use std::sync::Arc;

use agentflow_wire::AgentCard;
use agentflow_workflow::WorkflowRuntime;
use axum::routing::{get, post};
use axum::Router;
use tower_http::trace::TraceLayer;

pub use state::AppState;

/// Builds the full router for a given `workflow_runtime` (already populated
/// with whatever plugins the caller registered) and `agent_card`.
pub fn app(workflow_runtime: Arc<WorkflowRuntime>, agent_card: AgentCard) -> Router {
    let base_path = config::base_path();
    let state = AppState::new(workflow_runtime, agent_card);

    Router::new()
        .route(&base_path, post(rpc::rpc_handler))
        .route("/.well-known/agent.json", get(card::agent_card))
        .route("/.well-known/agent-card.json", get(card::agent_card))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
