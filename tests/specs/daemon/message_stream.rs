//! `message/stream` subscribes before the turn starts, so nothing is lost
//! between task creation and the first published event (spec §4.4/§6).

use serde_json::json;

use crate::prelude::{user_message, Daemon};

#[tokio::test]
async fn message_stream_emits_task_then_a_terminal_completed_status() {
    let daemon = Daemon::spawn().await;

    let lines = daemon.rpc_sse("message/stream", json!({ "message": user_message("ping") })).await;
    assert!(!lines.is_empty());

    let events: Vec<serde_json::Value> = lines.iter().map(|l| serde_json::from_str(l).unwrap()).collect();
    assert_eq!(events.first().unwrap()["type"], "task");

    let terminal = events.iter().find(|e| e["type"] == "status-update" && e["final"] == true).expect("a terminal status-update");
    assert_eq!(terminal["status"]["state"], "completed");
}
