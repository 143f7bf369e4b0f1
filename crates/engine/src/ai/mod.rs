// SPDX-License-Identifier: MIT

//! The AI Handler and its Stream Processor (spec §4.5).

mod handler;
mod model;
mod stream_processor;

pub use handler::AiHandler;
pub use model::{ModelStream, ModelStreamEvent, ScriptedModelStream};
pub use stream_processor::{StreamAction, StreamProcessor};
