// SPDX-License-Identifier: MIT

//! Pluggable task/context persistence (spec §5: Task Store interface).
//!
//! The persistence loop in `agentflow-bus` is the only writer during an
//! execution; everything else goes through `load`/`get` for reads. The
//! default implementation here is in-memory, the way `oj-storage`'s own
//! `MaterializedState` holds process memory — any replacement store must
//! guarantee read-your-write for the persistence loop.

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

mod error;
mod task_store;

pub use error::StorageError;
pub use task_store::{InMemoryTaskStore, TaskStore};
