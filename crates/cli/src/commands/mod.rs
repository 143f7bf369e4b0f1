// SPDX-License-Identifier: MIT

//! CLI command implementations.

pub mod cancel;
pub mod get;
pub mod resubscribe;
pub mod send;
pub mod stream;
