//! Seed scenario 1 (spec §8): a plain `message/send` turn with no workflow
//! dispatch reaches `completed` with a non-empty final text artifact.

use serde_json::json;

use crate::prelude::{user_message, Daemon};

#[tokio::test]
async fn simple_turn_completes_with_text() {
    let daemon = Daemon::spawn().await;

    let response = daemon.rpc("message/send", json!({ "message": user_message("What is 2+2?") })).await;
    let task = &response["result"];

    assert_eq!(task["status"]["state"], "completed");
    assert_eq!(task["final"], true);

    let artifacts = task["artifacts"].as_array().unwrap();
    assert_eq!(artifacts.len(), 1);
    let parts = artifacts[0]["parts"].as_array().unwrap();
    assert!(!parts.is_empty());
    assert!(parts.last().unwrap()["text"].as_str().unwrap().contains("2+2"));
}

#[tokio::test]
async fn tasks_get_round_trips_the_completed_task() {
    let daemon = Daemon::spawn().await;

    let sent = daemon.rpc("message/send", json!({ "message": user_message("hello") })).await;
    let task_id = sent["result"]["id"].as_str().unwrap().to_string();

    let fetched = daemon.rpc("tasks/get", json!({ "id": task_id })).await;
    assert_eq!(fetched["result"]["id"], task_id);
    assert_eq!(fetched["result"]["status"]["state"], "completed");
}

#[tokio::test]
async fn tasks_get_for_an_unknown_id_is_a_json_rpc_error() {
    let daemon = Daemon::spawn().await;

    let response = daemon.rpc("tasks/get", json!({ "id": "no-such-task" })).await;
    assert!(response["result"].is_null());
    assert!(response["error"]["code"].is_i64());
}
