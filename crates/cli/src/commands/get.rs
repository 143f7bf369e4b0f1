// SPDX-License-Identifier: MIT

use agentflow_core::TaskId;

use crate::client::AgentClient;
use crate::exit_error::ExitError;

pub async fn run(client: &AgentClient, task_id: String) -> Result<(), ExitError> {
    let task = client.get_task(&TaskId::from_string(task_id)).await?;
    println!("{}", serde_json::to_string_pretty(&task).unwrap_or_default());
    Ok(())
}
