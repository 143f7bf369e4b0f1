// SPDX-License-Identifier: MIT

//! JSON-RPC 2.0 wire protocol for the agent execution runtime.
//!
//! Transport-agnostic DTOs: the JSON-RPC envelope, the five `a2a`
//! method params/results, the agent card descriptor, and the domain
//! error surface carried in `error.data.errorType`. `agentflow-daemon`
//! owns the HTTP/SSE binding; this crate only owns the shapes that
//! cross the wire.

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

mod card;
mod error;
mod methods;
mod rpc;

pub use card::AgentCard;
pub use error::A2aError;
pub use methods::{
    CancelParams, CancelResult, GetParams, ResubscribeParams, SendParams, SendResult,
};
pub use rpc::{JsonRpcError, JsonRpcId, JsonRpcRequest, JsonRpcResponse, INVALID_PARAMS, INVALID_REQUEST, METHOD_NOT_FOUND};

#[cfg(test)]
#[path = "wire_tests.rs"]
mod tests;
