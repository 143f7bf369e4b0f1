// SPDX-License-Identifier: MIT

use agentflow_core::TaskId;

use crate::client::AgentClient;
use crate::exit_error::ExitError;

pub async fn run(client: &AgentClient, task_id: String) -> Result<(), ExitError> {
    let result = client.cancel_task(&TaskId::from_string(task_id)).await?;
    println!("{}", serde_json::to_string_pretty(&result).unwrap_or_default());
    Ok(())
}
