//! Fraud-investigation backend routes.

use axum::Json;
use axum::body::Bytes;
use axum::extract::multipart::MultipartRejection;
use axum::extract::{Multipart, Query, State};
use axum::http::Method;
use axum::response::{IntoResponse, Response};
use conduit_core::entities::NewCase;
use conduit_proxy::catalog::investigation;
use conduit_proxy::{Endpoint, FormPart, ProxyError, ProxyRequest};

use super::{Params, forward, forward_any, form_parts};
use crate::failure::ApiFailure;
use crate::state::AppState;

pub async fn list_cases(
    State(state): State<AppState>,
    Query(query): Query<Vec<(String, String)>>,
) -> Response {
    forward(
        &state.investigation,
        &investigation::CASES,
        ProxyRequest::get().query(query),
    )
    .await
}

pub async fn create_case(State(state): State<AppState>, body: Bytes) -> Response {
    forward_any(
        &state.investigation,
        &investigation::CASE_CREATE,
        Method::POST,
        None,
        Vec::new(),
        &body,
    )
    .await
}

/// Multipart case creation: `name` and `description` text fields plus any
/// number of file parts, uploaded once the case exists.
pub async fn create_case_with_files(
    State(state): State<AppState>,
    multipart: Result<Multipart, MultipartRejection>,
) -> Response {
    let endpoint = &investigation::CASE_CREATE;
    let parts = match form_parts(multipart).await {
        Ok(parts) => parts,
        Err(e) => return ApiFailure::proxy(&e, endpoint).into_response(),
    };

    let text = |field: &str| {
        parts
            .iter()
            .find(|p| p.filename.is_none() && p.name == field)
            .map(|p| String::from_utf8_lossy(&p.data).trim().to_string())
            .unwrap_or_default()
    };
    let name = text("name");
    if name.is_empty() {
        let e = ProxyError::InvalidRequest("Case name is required".to_string());
        return ApiFailure::proxy(&e, endpoint).into_response();
    }
    let description = text("description");

    let files: Vec<FormPart> = parts.into_iter().filter(|p| p.filename.is_some()).collect();
    let new_case = files
        .iter()
        .filter_map(|p| p.filename.as_deref())
        .fold(NewCase::new(name, description), NewCase::with_file);

    match state.cases.create_case_with_files(&new_case, files).await {
        Ok(creation) => Json(creation).into_response(),
        Err(e) => ApiFailure::proxy(&e, endpoint).into_response(),
    }
}

pub async fn case(
    State(state): State<AppState>,
    method: Method,
    path: Params,
    Query(query): Query<Vec<(String, String)>>,
    body: Bytes,
) -> Response {
    forward_any(&state.investigation, &investigation::CASE, method, path, query, &body).await
}

pub async fn analyze_case(State(state): State<AppState>, path: Params, body: Bytes) -> Response {
    post_to(&state, &investigation::CASE_ANALYSIS, path, &body).await
}

pub async fn add_note(State(state): State<AppState>, path: Params, body: Bytes) -> Response {
    post_to(&state, &investigation::CASE_NOTES, path, &body).await
}

pub async fn delete_note(State(state): State<AppState>, path: Params) -> Response {
    forward_any(
        &state.investigation,
        &investigation::CASE_NOTE,
        Method::DELETE,
        path,
        Vec::new(),
        &Bytes::new(),
    )
    .await
}

pub async fn chat(State(state): State<AppState>, path: Params, body: Bytes) -> Response {
    post_to(&state, &investigation::CASE_CHAT, path, &body).await
}

pub async fn upload_file(
    State(state): State<AppState>,
    path: Params,
    multipart: Result<Multipart, MultipartRejection>,
) -> Response {
    let endpoint = &investigation::UPLOAD_FILE;
    let parts = match form_parts(multipart).await {
        Ok(parts) => parts,
        Err(e) => return ApiFailure::proxy(&e, endpoint).into_response(),
    };
    let mut request = ProxyRequest::post().multipart(parts);
    request.params = super::params(path);
    forward(&state.investigation, endpoint, request).await
}

pub async fn list_files(State(state): State<AppState>, path: Params) -> Response {
    let mut request = ProxyRequest::get();
    request.params = super::params(path);
    forward(&state.investigation, &investigation::LIST_FILES, request).await
}

pub async fn delete_file(State(state): State<AppState>, path: Params) -> Response {
    let mut request = ProxyRequest::delete();
    request.params = super::params(path);
    forward(&state.investigation, &investigation::DELETE_FILE, request).await
}

async fn post_to(state: &AppState, endpoint: &Endpoint, path: Params, body: &Bytes) -> Response {
    forward_any(
        &state.investigation,
        endpoint,
        Method::POST,
        path,
        Vec::new(),
        body,
    )
    .await
}
