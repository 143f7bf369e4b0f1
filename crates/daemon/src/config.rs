// SPDX-License-Identifier: MIT

//! Centralized environment variable access for the daemon crate.

/// Address the HTTP listener binds to (spec §6).
pub fn bind_addr() -> String {
    std::env::var("AGENTFLOW_BIND_ADDR").unwrap_or_else(|_| "127.0.0.1:4700".to_string())
}

/// Base path the five `a2a` JSON-RPC methods are served under (default `/a2a`).
pub fn base_path() -> String {
    std::env::var("AGENTFLOW_BASE_PATH").unwrap_or_else(|_| "/a2a".to_string())
}

/// Public URL advertised in the agent card.
pub fn agent_url() -> String {
    std::env::var("AGENTFLOW_AGENT_URL").unwrap_or_else(|_| format!("http://{}", bind_addr()))
}

pub fn agent_name() -> String {
    std::env::var("AGENTFLOW_AGENT_NAME").unwrap_or_else(|_| "agentflow".to_string())
}

pub fn agent_description() -> String {
    std::env::var("AGENTFLOW_AGENT_DESCRIPTION").unwrap_or_else(|_| "Agent execution runtime with streaming workflow plugins".to_string())
}

/// `tracing_subscriber::EnvFilter` directive (default `info`).
pub fn log_filter() -> String {
    std::env::var("AGENTFLOW_LOG").unwrap_or_else(|_| "info".to_string())
}

#[cfg(test)]
#[path = "config_tests.rs"]
mod tests;
