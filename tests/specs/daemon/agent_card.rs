//! `GET /.well-known/agent.json` and `.../agent-card.json` (spec §6).

use crate::prelude::Daemon;

#[tokio::test]
async fn agent_card_advertises_streaming_and_the_bound_url() {
    let daemon = Daemon::spawn().await;
    let client = reqwest::Client::new();

    for path in ["/.well-known/agent.json", "/.well-known/agent-card.json"] {
        let card: serde_json::Value = client.get(format!("{}{path}", daemon.base_url)).send().await.unwrap().json().await.unwrap();
        assert_eq!(card["capabilities"]["streaming"], true);
        assert_eq!(card["name"], "agentflow");
        assert!(card["url"].as_str().unwrap().contains(&daemon.base_url[7..]));
    }
}
