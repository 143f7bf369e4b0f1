//! Shared harness for the workspace-level integration suite.
//!
//! Spawns a real `agentflowd` binary per test (via `assert_cmd`'s binary
//! resolution) on a unique loopback port and drives it over HTTP with
//! `reqwest`, mirroring the teacher's `tests/specs/` convention of driving
//! the real binary rather than calling library code in-process.

use std::net::TcpListener;
use std::process::{Child, Command, Stdio};
use std::time::Duration;

use assert_cmd::cargo::cargo_bin;
use serde_json::{json, Value};

pub struct Daemon {
    child: Child,
    pub base_url: String,
}

impl Daemon {
    pub async fn spawn() -> Self {
        let port = free_port();
        let base_url = format!("http://127.0.0.1:{port}");

        let child = Command::new(cargo_bin("agentflowd"))
            .env("AGENTFLOW_BIND_ADDR", format!("127.0.0.1:{port}"))
            .env("AGENTFLOW_LOG", "error")
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .spawn()
            .expect("spawn agentflowd");

        let daemon = Self { child, base_url };
        daemon.wait_until_ready().await;
        daemon
    }

    async fn wait_until_ready(&self) {
        let client = reqwest::Client::new();
        for _ in 0..50 {
            if client.get(format!("{}/.well-known/agent.json", self.base_url)).send().await.is_ok() {
                return;
            }
            tokio::time::sleep(Duration::from_millis(100)).await;
        }
        panic!("agentflowd never became ready at {}", self.base_url);
    }

    pub async fn rpc(&self, method: &str, params: Value) -> Value {
        let client = reqwest::Client::new();
        let request = json!({ "jsonrpc": "2.0", "method": method, "params": params, "id": 1 });
        client.post(format!("{}/a2a", self.base_url)).json(&request).send().await.expect("rpc request").json().await.expect("rpc response json")
    }

    /// Issues an SSE-producing RPC call and collects every `data:` line.
    pub async fn rpc_sse(&self, method: &str, params: Value) -> Vec<String> {
        use futures_util::StreamExt;

        let client = reqwest::Client::new();
        let request = json!({ "jsonrpc": "2.0", "method": method, "params": params, "id": 1 });
        let response = client.post(format!("{}/a2a", self.base_url)).json(&request).send().await.expect("sse request");

        let mut lines = Vec::new();
        let mut buffer = String::new();
        let mut chunks = response.bytes_stream();
        while let Some(chunk) = chunks.next().await {
            let chunk = chunk.expect("sse chunk");
            buffer.push_str(&String::from_utf8_lossy(&chunk));
            while let Some(pos) = buffer.find('\n') {
                let line = buffer[..pos].trim_end_matches('\r').to_string();
                buffer.drain(..=pos);
                if let Some(data) = line.strip_prefix("data: ") {
                    lines.push(data.to_string());
                }
            }
        }
        lines
    }
}

impl Drop for Daemon {
    fn drop(&mut self) {
        let _ = self.child.kill();
        let _ = self.child.wait();
    }
}

fn free_port() -> u16 {
    TcpListener::bind("127.0.0.1:0").expect("bind ephemeral port").local_addr().expect("local addr").port()
}

pub fn user_message(text: &str) -> Value {
    json!({ "role": "user", "parts": [{ "kind": "text", "text": text }] })
}
