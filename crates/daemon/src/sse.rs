// SPDX-License-Identifier: MIT

//! Bridges a `BusSubscription` onto an axum SSE response (spec §6 "SSE
//! contract"), the idiomatic-Rust counterpart of the teacher's framed
//! Unix-socket listener loop — grounded on the retrieval pack's own
//! `ChatStream -> Sse` adapters rather than anything in the teacher, since
//! the teacher has no HTTP/SSE transport to generalize from.

use std::convert::Infallible;

use agentflow_bus::BusSubscription;
use agentflow_core::TaskEvent;
use axum::response::sse::{Event, KeepAlive, Sse};
use futures_util::{stream, Stream};

/// The `event:` field a given `TaskEvent` is tagged with, so SSE clients
/// needn't parse the payload to route on it.
fn sse_kind(event: &TaskEvent) -> &'static str {
    match event {
        TaskEvent::Task { .. } => "task",
        TaskEvent::StatusUpdate { .. } => "status-update",
        TaskEvent::ArtifactUpdate { .. } => "artifact-update",
        TaskEvent::Message { .. } => "message",
    }
}

fn to_sse_event(event: TaskEvent) -> Event {
    let kind = sse_kind(&event);
    let data = serde_json::to_string(&event).unwrap_or_else(|_| "null".to_string());
    Event::default().event(kind).data(data)
}

/// Streams every event a subscription yields, past and future, as SSE.
pub fn subscription_to_sse(sub: BusSubscription) -> Sse<impl Stream<Item = Result<Event, Infallible>>> {
    let events = stream::unfold(sub, |mut sub| async move { sub.next().await.map(|event| (Ok(to_sse_event(event)), sub)) });
    Sse::new(events).keep_alive(KeepAlive::default())
}

/// A single terminal event for a task whose bus has already been cleaned up
/// (spec §6: "If the bus is already gone ... the snapshot alone suffices").
pub fn snapshot_to_sse(event: TaskEvent) -> Sse<impl Stream<Item = Result<Event, Infallible>>> {
    Sse::new(stream::once(async move { Ok(to_sse_event(event)) })).keep_alive(KeepAlive::default())
}

#[cfg(test)]
#[path = "sse_tests.rs"]
mod tests;
