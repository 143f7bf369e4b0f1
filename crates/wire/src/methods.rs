// SPDX-License-Identifier: MIT

//! Params/result shapes for the five `a2a` JSON-RPC methods (spec §6).

use serde::{Deserialize, Serialize};

use agentflow_core::{Message, Task, TaskId};

/// Params for `message/send` and `message/stream`.
///
/// `task_id` is present when the message resumes a paused task (spec
/// §4.4: routing by explicit `taskId`, never implicit).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SendParams {
    pub message: Message,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub task_id: Option<TaskId>,
}

/// Result of `message/send`: either an unassociated reply or a `Task`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum SendResult {
    Message(Message),
    Task(Task),
}

/// Params for `tasks/get` and `tasks/resubscribe`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GetParams {
    pub id: TaskId,
}

/// Params for `tasks/cancel`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CancelParams {
    pub id: TaskId,
}

/// Result of `tasks/cancel`: the task's status at the time of the call.
/// A task already terminal is returned as-is (cancel is idempotent).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CancelResult {
    pub id: TaskId,
    pub accepted: bool,
}

/// Params for `tasks/resubscribe`; re-uses `GetParams`'s single `id` field.
pub type ResubscribeParams = GetParams;
