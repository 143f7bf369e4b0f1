// SPDX-License-Identifier: MIT

//! The two well-known agent-card endpoints (spec §6).

use axum::extract::State;
use axum::Json;
use serde_json::Value;

use crate::state::AppState;

pub async fn agent_card(State(state): State<AppState>) -> Json<Value> {
    Json(serde_json::to_value(state.agent_card.as_ref()).unwrap_or(Value::Null))
}

#[cfg(test)]
#[path = "card_tests.rs"]
mod tests;
