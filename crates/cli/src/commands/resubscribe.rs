// SPDX-License-Identifier: MIT

use agentflow_core::TaskId;

use crate::client::AgentClient;
use crate::exit_error::ExitError;

pub async fn run(client: &AgentClient, task_id: String) -> Result<(), ExitError> {
    let response = client.resubscribe(&TaskId::from_string(task_id)).await?;
    super::stream::print_sse(response).await
}
