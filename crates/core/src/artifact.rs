// SPDX-License-Identifier: MIT

//! Artifacts and their constituent parts.

use serde::{Deserialize, Serialize};

use crate::ids::ArtifactId;

/// One piece of an [`Artifact`] or a conversation [`crate::task::Message`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "kebab-case")]
pub enum Part {
    Text { text: String },
    Data {
        data: serde_json::Value,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        mime_type: Option<String>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        schema: Option<serde_json::Value>,
    },
    ToolCall {
        tool_call_id: String,
        tool_name: String,
        args: serde_json::Value,
    },
    ToolResult {
        tool_call_id: String,
        tool_name: String,
        output: serde_json::Value,
    },
    ToolOutputError { error_text: String },
}

impl Part {
    pub fn text(text: impl Into<String>) -> Self {
        Part::Text { text: text.into() }
    }

    /// `Some(text)` when this part is a text part, matching the teacher's
    /// style of narrow accessor methods instead of a blanket `as_*` family.
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Part::Text { text } => Some(text),
            _ => None,
        }
    }
}

/// Ordered sequence of parts produced under one stable `artifactId`.
///
/// Repeated ids with `append=true` accumulate parts onto the existing
/// artifact (spec §3); `lastChunk=true` seals it against further appends
/// (enforced by the persistence loop in `agentflow-bus`, not here — this
/// type is a plain data record).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Artifact {
    pub artifact_id: ArtifactId,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mime_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default)]
    pub parts: Vec<Part>,
}

impl Artifact {
    pub fn new(artifact_id: ArtifactId) -> Self {
        Self { artifact_id, name: None, mime_type: None, description: None, parts: Vec::new() }
    }

    pub fn with_parts(artifact_id: ArtifactId, parts: Vec<Part>) -> Self {
        Self { artifact_id, name: None, mime_type: None, description: None, parts }
    }

    crate::setters! {
        option {
            name: String,
            mime_type: String,
            description: String,
        }
    }
}

#[cfg(test)]
#[path = "artifact_tests.rs"]
mod tests;
