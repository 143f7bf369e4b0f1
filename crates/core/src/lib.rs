// SPDX-License-Identifier: MIT

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! agentflow-core: data model for the agent execution runtime.
//!
//! Owns the types every other crate in the workspace builds on: task ids,
//! the `Task`/`Artifact`/`Part`/`TaskEvent` data model, the `Context`
//! record, a clock abstraction, and the declarative macros (`define_id!`,
//! `simple_display!`, `builder!`, `setters!`) used throughout the
//! workspace to keep the other crates' boilerplate down.

pub mod macros;

pub mod artifact;
pub mod clock;
pub mod context;
pub mod error;
pub mod event;
pub mod id;
pub mod ids;
pub mod task;

#[cfg(any(test, feature = "test-support"))]
pub mod test_support;

pub use artifact::{Artifact, Part};
pub use clock::{Clock, FakeClock, SystemClock};
pub use context::Context;
pub use error::CoreError;
pub use event::{ReferencedWorkflow, TaskEvent};
pub use id::canonicalize_plugin_id;
pub use ids::{ArtifactId, ContextId, ExecutionId, TaskId};
#[cfg(any(test, feature = "test-support"))]
pub use task::TaskBuilder;
pub use task::{Message, Role, Task, TaskState, TaskStatus, TerminalTransition};
