// SPDX-License-Identifier: MIT

use super::*;
use agentflow_core::canonicalize_plugin_id;
use agentflow_core::test_support::strategies::arb_plugin_id;
use proptest::prelude::*;
use serde_json::json;

#[test]
fn request_round_trips_through_json() {
    let req = JsonRpcRequest::new("tasks/get", json!({"id": "t1"}), JsonRpcId::Number(7));
    let s = serde_json::to_string(&req).unwrap();
    let back: JsonRpcRequest = serde_json::from_str(&s).unwrap();
    assert_eq!(back.method, "tasks/get");
    assert_eq!(back.id, JsonRpcId::Number(7));
}

#[test]
fn notification_has_null_id() {
    let req = JsonRpcRequest::new("message/send", json!({}), JsonRpcId::Null);
    let s = serde_json::to_string(&req).unwrap();
    assert!(s.contains("\"id\":null"));
}

#[test]
fn success_response_omits_error_field() {
    let resp = JsonRpcResponse::success(JsonRpcId::Number(1), json!({"ok": true}));
    let s = serde_json::to_string(&resp).unwrap();
    assert!(!s.contains("\"error\""));
}

#[yare::parameterized(
    transport_error = { A2aError::TransportError { reason: "not valid json".into() }, Some(INVALID_REQUEST), "transportError" },
    invalid_parameters = { A2aError::InvalidParameters { reason: "missing field 'data'".into() }, Some(INVALID_PARAMS), "invalidParameters" },
    validation_failed = { A2aError::ValidationFailed { reason: "missing field 'data'".into() }, Some(INVALID_PARAMS), "validationFailed" },
    unknown_task = { A2aError::UnknownTask { task_id: "missing".into() }, None, "unknownTask" },
    unknown_plugin = { A2aError::UnknownPlugin { plugin_id: "missing".into() }, None, "unknownPlugin" },
    unknown_tool = { A2aError::UnknownTool { tool_name: "missing".into() }, None, "unknownTool" },
    canceled = { A2aError::Canceled, None, "canceled" },
)]
fn a2a_error_maps_to_its_json_rpc_code(err: A2aError, expected_standard_code: Option<i64>, expected_error_type: &str) {
    assert_eq!(err.standard_code(), expected_standard_code);
    let rpc_err = err.to_json_rpc_error();
    assert_eq!(rpc_err.code, expected_standard_code.unwrap_or(-32000));
    assert_eq!(rpc_err.data.unwrap()["errorType"], expected_error_type);
}

#[test]
fn method_not_found_carries_method_name() {
    let err = method_not_found_error("bogus/method");
    assert_eq!(err.code, METHOD_NOT_FOUND);
    assert_eq!(err.data.unwrap()["method"], "bogus/method");
}

#[test]
fn agent_card_advertises_streaming() {
    let card = AgentCard::new("agentflow", "agent execution runtime", "http://localhost:8080/a2a");
    assert!(card.capabilities.streaming);
}

proptest! {
    /// Canonicalization is idempotent, so an `UnknownPlugin` error built from
    /// an already-canonical id round-trips through JSON unchanged.
    #[test]
    fn unknown_plugin_error_round_trips_for_any_canonical_plugin_id(raw in arb_plugin_id()) {
        let canonical = canonicalize_plugin_id(&raw);
        prop_assert_eq!(canonicalize_plugin_id(&canonical), canonical.clone());

        let err = A2aError::UnknownPlugin { plugin_id: canonical.clone() };
        let rpc_err = err.to_json_rpc_error();
        prop_assert_eq!(rpc_err.data.unwrap()["pluginId"].as_str(), Some(canonical.as_str()));
    }
}
