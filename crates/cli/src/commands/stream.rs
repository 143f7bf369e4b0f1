// SPDX-License-Identifier: MIT

use agentflow_core::{Message, TaskId};
use futures_util::StreamExt;

use crate::client::AgentClient;
use crate::exit_error::ExitError;

pub async fn run(client: &AgentClient, text: String, task_id: Option<String>) -> Result<(), ExitError> {
    let task_id = task_id.map(TaskId::from_string);
    let response = client.stream_message(Message::user_text(text), task_id).await?;
    print_sse(response).await
}

/// Prints each SSE `data:` line as it arrives, without buffering the whole
/// response first — shared with `commands::resubscribe`.
pub(crate) async fn print_sse(response: reqwest::Response) -> Result<(), ExitError> {
    let mut chunks = response.bytes_stream();
    let mut buffer = String::new();

    while let Some(chunk) = chunks.next().await {
        let chunk = chunk.map_err(|err| ExitError::new(1, format!("stream read failed: {err}")))?;
        buffer.push_str(&String::from_utf8_lossy(&chunk));

        while let Some(newline) = buffer.find('\n') {
            let line = buffer[..newline].trim_end_matches('\r').to_string();
            buffer.drain(..=newline);
            if let Some(data) = line.strip_prefix("data: ") {
                println!("{data}");
            }
        }
    }
    Ok(())
}
