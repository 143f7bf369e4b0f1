// SPDX-License-Identifier: MIT

use agentflow_core::TaskId;

#[derive(Debug, Clone, thiserror::Error)]
pub enum BusError {
    #[error("no bus registered for task '{0}'")]
    UnknownBus(TaskId),
}
