//! Chat session routes.

use axum::Json;
use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Deserialize;

use crate::failure::ApiFailure;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionFilter {
    case_id: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewSession {
    case_id: String,
    case_name: String,
    session_id: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct OutgoingMessage {
    message: String,
}

fn bad_request(rejection: &JsonRejection) -> Response {
    ApiFailure::new(400, format!("Invalid request body: {}", rejection.body_text())).into_response()
}

pub async fn list(State(state): State<AppState>, Query(filter): Query<SessionFilter>) -> Response {
    let store = state.chat.store();
    let sessions = match filter.case_id.as_deref() {
        Some(case_id) => store.list_by_case(case_id).await,
        None => store.list().await,
    };
    match sessions {
        Ok(sessions) => Json(sessions).into_response(),
        Err(e) => ApiFailure::session(&e).into_response(),
    }
}

pub async fn list_for_case(State(state): State<AppState>, Path(case_id): Path<String>) -> Response {
    match state.chat.store().list_by_case(&case_id).await {
        Ok(sessions) => Json(sessions).into_response(),
        Err(e) => ApiFailure::session(&e).into_response(),
    }
}

pub async fn create(
    State(state): State<AppState>,
    body: Result<Json<NewSession>, JsonRejection>,
) -> Response {
    let Json(new) = match body {
        Ok(body) => body,
        Err(rejection) => return bad_request(&rejection),
    };
    match state
        .chat
        .create_session(&new.case_id, &new.case_name, new.session_id)
        .await
    {
        Ok(session) => (StatusCode::CREATED, Json(session)).into_response(),
        Err(e) => ApiFailure::session(&e).into_response(),
    }
}

pub async fn get_one(State(state): State<AppState>, Path(id): Path<String>) -> Response {
    match state.chat.session(&id).await {
        Ok(session) => Json(session).into_response(),
        Err(e) => ApiFailure::session(&e).into_response(),
    }
}

pub async fn remove(State(state): State<AppState>, Path(id): Path<String>) -> Response {
    match state.chat.store().delete(&id).await {
        Ok(true) => StatusCode::NO_CONTENT.into_response(),
        Ok(false) => ApiFailure::new(404, "Session not found").into_response(),
        Err(e) => ApiFailure::session(&e).into_response(),
    }
}

pub async fn send_message(
    State(state): State<AppState>,
    Path(id): Path<String>,
    body: Result<Json<OutgoingMessage>, JsonRejection>,
) -> Response {
    let Json(outgoing) = match body {
        Ok(body) => body,
        Err(rejection) => return bad_request(&rejection),
    };
    if outgoing.message.trim().is_empty() {
        return ApiFailure::new(400, "Message is required").into_response();
    }
    match state.chat.send_message(&id, &outgoing.message).await {
        Ok(exchange) => Json(exchange).into_response(),
        Err(e) => ApiFailure::session(&e).into_response(),
    }
}
