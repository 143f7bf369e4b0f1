//! `tasks/cancel` and `tasks/resubscribe` over HTTP (spec §6).

use serde_json::json;

use crate::prelude::{user_message, Daemon};

#[tokio::test]
async fn cancel_on_a_completed_task_is_not_accepted_but_still_succeeds() {
    let daemon = Daemon::spawn().await;

    let sent = daemon.rpc("message/send", json!({ "message": user_message("hi") })).await;
    let task_id = sent["result"]["id"].as_str().unwrap().to_string();

    let canceled = daemon.rpc("tasks/cancel", json!({ "id": task_id })).await;
    assert_eq!(canceled["result"]["accepted"], false);
    assert_eq!(canceled["result"]["id"], task_id);
}

#[tokio::test]
async fn resubscribe_after_completion_replays_a_terminal_snapshot() {
    let daemon = Daemon::spawn().await;

    let sent = daemon.rpc("message/send", json!({ "message": user_message("hi") })).await;
    let task_id = sent["result"]["id"].as_str().unwrap().to_string();

    let lines = daemon.rpc_sse("tasks/resubscribe", json!({ "id": task_id })).await;
    assert!(!lines.is_empty());
    let last: serde_json::Value = serde_json::from_str(lines.last().unwrap()).unwrap();
    assert_eq!(last["status"]["state"], "completed");
}

#[tokio::test]
async fn resubscribe_to_an_unknown_task_is_a_json_rpc_error() {
    let daemon = Daemon::spawn().await;
    let response = daemon.rpc("tasks/resubscribe", json!({ "id": "no-such-task" })).await;
    assert!(response["error"]["code"].is_i64());
}

#[tokio::test]
async fn cancel_on_an_unknown_task_is_a_json_rpc_error() {
    let daemon = Daemon::spawn().await;
    let response = daemon.rpc("tasks/cancel", json!({ "id": "no-such-task" })).await;
    assert_eq!(response["error"]["data"]["errorType"], "unknownTask");
}
