// SPDX-License-Identifier: MIT

use agentflow_core::{Message, TaskId};
use agentflow_wire::SendResult;

use crate::client::AgentClient;
use crate::exit_error::ExitError;

pub async fn run(client: &AgentClient, text: String, task_id: Option<String>) -> Result<(), ExitError> {
    let task_id = task_id.map(TaskId::from_string);
    let result = client.send_message(Message::user_text(text), task_id).await?;

    match result {
        SendResult::Task(task) => println!("{}", serde_json::to_string_pretty(&task).unwrap_or_default()),
        SendResult::Message(message) => println!("{}", message.text()),
    }
    Ok(())
}
