// SPDX-License-Identifier: MIT

//! Per-task Event Bus, Bus Manager, and persistence loop (spec §4.2).
//!
//! An `EventBus` fans a task's events out to every subscriber in publish
//! order; the `BusManager` is the process-wide `taskId -> bus` map shared
//! by the Workflow Handler, AI Handler, and transport; a `PersistenceLoop`
//! is the bus's one mandatory subscriber, committing each event to a
//! `TaskStore` and resolving a first-event-commit signal for the
//! Workflow Handler's gating.

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

mod apply;
mod bus;
mod error;
mod manager;
mod persistence;

pub use apply::apply_task_event;
pub use bus::{BusSubscription, EventBus};
pub use error::BusError;
pub use manager::BusManager;
pub use persistence::PersistenceLoop;
