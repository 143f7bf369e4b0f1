// SPDX-License-Identifier: MIT

//! The five `a2a` JSON-RPC methods (spec §6), dispatched from one POST
//! endpoint the way the teacher's listener dispatches one framed protocol
//! onto its command enum.

use agentflow_core::{ContextId, TaskEvent, TaskId};
use agentflow_engine::executor::resume_input;
use agentflow_engine::{AgentExecutor, RequestContext, Route};
use agentflow_wire::{A2aError, CancelParams, CancelResult, GetParams, JsonRpcError, JsonRpcId, JsonRpcRequest, JsonRpcResponse, ResubscribeParams, SendParams, SendResult};
use axum::extract::State;
use axum::response::{IntoResponse, Response};
use axum::Json;

use crate::error::engine_error_to_a2a;
use crate::sse::{snapshot_to_sse, subscription_to_sse};
use crate::state::{echo_model_stream, AppState};

pub async fn rpc_handler(State(state): State<AppState>, Json(request): Json<JsonRpcRequest>) -> Response {
    let id = request.id.clone();
    let params = request.params.unwrap_or(serde_json::Value::Null);

    match request.method.as_str() {
        "message/send" => dispatch(id, params, |p| message_send(state.clone(), p)).await,
        "tasks/get" => dispatch(id, params, |p| tasks_get(state.clone(), p)).await,
        "tasks/cancel" => dispatch(id, params, |p| tasks_cancel(state.clone(), p)).await,
        "message/stream" => match parse_params::<SendParams>(&params) {
            Ok(p) => message_stream(state.clone(), p).await.into_response(),
            Err(err) => Json(JsonRpcResponse::failure(id, err)).into_response(),
        },
        "tasks/resubscribe" => match parse_params::<ResubscribeParams>(&params) {
            Ok(p) => tasks_resubscribe(state.clone(), id, p).await.into_response(),
            Err(err) => Json(JsonRpcResponse::failure(id, err)).into_response(),
        },
        other => Json(JsonRpcResponse::failure(id, JsonRpcError::method_not_found(other))).into_response(),
    }
}

async fn dispatch<T, F, Fut>(id: JsonRpcId, params: serde_json::Value, f: F) -> Response
where
    T: serde::de::DeserializeOwned,
    F: FnOnce(T) -> Fut,
    Fut: std::future::Future<Output = Result<serde_json::Value, A2aError>>,
{
    let parsed = match parse_params::<T>(&params) {
        Ok(p) => p,
        Err(err) => return Json(JsonRpcResponse::failure(id, err)).into_response(),
    };
    match f(parsed).await {
        Ok(result) => Json(JsonRpcResponse::success(id, result)).into_response(),
        Err(err) => Json(JsonRpcResponse::failure(id, err.to_json_rpc_error())).into_response(),
    }
}

fn parse_params<T: serde::de::DeserializeOwned>(params: &serde_json::Value) -> Result<T, JsonRpcError> {
    serde_json::from_value(params.clone()).map_err(|err| JsonRpcError::invalid_params(err.to_string()))
}

/// Resolves the context and cached previous state a `SendParams` implies,
/// then routes it — shared by `message/send` and `message/stream` (spec
/// §4.4). The wire params carry no explicit `contextId` (§6), so a turn
/// that isn't a resume always opens a brand new context; see DESIGN.md.
async fn route_request(state: &AppState, params: &SendParams) -> (Route, ContextId) {
    let previous_task = match &params.task_id {
        Some(task_id) => state.task_store.load(task_id).await,
        None => None,
    };
    let context_id = previous_task.as_ref().map(|t| t.context_id.clone()).unwrap_or_else(|| state.context_manager.create_context());

    let request = RequestContext {
        task_id: params.task_id.clone(),
        context_id: context_id.clone(),
        user_message: params.message.clone(),
        previous_task_state: previous_task.map(|t| t.status.state),
    };
    let route = AgentExecutor::new(&state.workflow_runtime).route(&request);
    (route, context_id)
}

async fn message_send(state: AppState, params: SendParams) -> Result<serde_json::Value, A2aError> {
    let (route, context_id) = route_request(&state, &params).await;

    let task_id = match route {
        Route::Resume { task_id } => {
            let input = resume_input(&params.message);
            state.workflow_handler.resume(&task_id, input).await.map_err(engine_error_to_a2a)?;
            task_id
        }
        Route::NewTurn => {
            let task_id = TaskId::new();
            let stream = echo_model_stream(&params.message);
            state.ai_handler.streaming_turn(task_id.clone(), context_id, params.message.clone(), stream).await.map_err(engine_error_to_a2a)?;
            task_id
        }
    };

    let task = state.task_store.load(&task_id).await.ok_or_else(|| A2aError::UnknownTask { task_id: task_id.to_string() })?;
    serde_json::to_value(SendResult::Task(task)).map_err(|err| A2aError::TransportError { reason: err.to_string() })
}

async fn message_stream(state: AppState, params: SendParams) -> Response {
    let (route, context_id) = route_request(&state, &params).await;

    let task_id = match &route {
        Route::Resume { task_id } => task_id.clone(),
        Route::NewTurn => TaskId::new(),
    };

    // Subscribe before the turn starts producing events, so nothing is missed.
    let bus = state.bus_manager.create_or_get_by_task_id(&task_id);
    let sub = bus.subscribe();

    match route {
        Route::Resume { task_id } => {
            let input = resume_input(&params.message);
            let handler = state.workflow_handler.clone();
            tokio::spawn(async move {
                let _ = handler.resume(&task_id, input).await;
            });
        }
        Route::NewTurn => {
            let stream = echo_model_stream(&params.message);
            let ai_handler = state.ai_handler.clone();
            let message = params.message.clone();
            tokio::spawn(async move {
                let _ = ai_handler.streaming_turn(task_id, context_id, message, stream).await;
            });
        }
    }

    subscription_to_sse(sub).into_response()
}

async fn tasks_get(state: AppState, params: GetParams) -> Result<serde_json::Value, A2aError> {
    let task = state.task_store.load(&params.id).await.ok_or_else(|| A2aError::UnknownTask { task_id: params.id.to_string() })?;
    serde_json::to_value(task).map_err(|err| A2aError::TransportError { reason: err.to_string() })
}

async fn tasks_cancel(state: AppState, params: CancelParams) -> Result<serde_json::Value, A2aError> {
    let task = state.task_store.load(&params.id).await.ok_or_else(|| A2aError::UnknownTask { task_id: params.id.to_string() })?;
    let accepted = !task.status.state.is_terminal();
    state.workflow_handler.cancel(&params.id);
    serde_json::to_value(CancelResult { id: params.id, accepted }).map_err(|err| A2aError::TransportError { reason: err.to_string() })
}

async fn tasks_resubscribe(state: AppState, id: JsonRpcId, params: ResubscribeParams) -> Response {
    match state.bus_manager.get_by_task_id(&params.id) {
        Some(bus) => subscription_to_sse(bus.subscribe()).into_response(),
        None => match state.task_store.load(&params.id).await {
            Some(task) => {
                let event = TaskEvent::status_update(task.id.clone(), task.context_id.clone(), task.status.clone(), true);
                snapshot_to_sse(event).into_response()
            }
            None => Json(JsonRpcResponse::failure(id, A2aError::UnknownTask { task_id: params.id.to_string() }.to_json_rpc_error())).into_response(),
        },
    }
}

#[cfg(test)]
#[path = "rpc_tests.rs"]
mod tests;
