// SPDX-License-Identifier: MIT

//! Static agent card descriptor served at the two well-known paths
//! (spec §6: `GET /.well-known/agent.json` and `.../agent-card.json`).

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AgentCapabilities {
    pub streaming: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AgentCard {
    pub name: String,
    pub description: String,
    pub url: String,
    pub version: String,
    pub capabilities: AgentCapabilities,
}

impl AgentCard {
    pub fn new(name: impl Into<String>, description: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            url: url.into(),
            version: env!("CARGO_PKG_VERSION").to_string(),
            capabilities: AgentCapabilities { streaming: true },
        }
    }
}
