// SPDX-License-Identifier: MIT

//! Binary entrypoint for the agent execution runtime's HTTP/SSE daemon.

use std::sync::Arc;

use agentflow_daemon::config;
use agentflow_wire::AgentCard;
use agentflow_workflow::WorkflowRuntime;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt().with_env_filter(EnvFilter::new(config::log_filter())).init();

    let workflow_runtime = Arc::new(WorkflowRuntime::new());
    let agent_card = AgentCard::new(config::agent_name(), config::agent_description(), config::agent_url());
    let app = agentflow_daemon::app(workflow_runtime, agent_card);

    let bind_addr = config::bind_addr();
    let listener = tokio::net::TcpListener::bind(&bind_addr).await?;
    tracing::info!(%bind_addr, "agentflowd listening");
    axum::serve(listener, app).await?;
    Ok(())
}
