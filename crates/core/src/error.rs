// SPDX-License-Identifier: MIT

//! Crate-wide error kinds shared by the data model itself.
//!
//! Component-specific error kinds (workflow dispatch/resume failures, bus
//! errors, wire/JSON-RPC codes) live in the crate that owns that component,
//! the way `oj-core`'s own error surface is narrow and most errors are
//! defined in `oj-storage`/`oj-daemon` instead.

pub use crate::task::TerminalTransition;

#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    #[error(transparent)]
    TerminalTransition(#[from] TerminalTransition),
}
