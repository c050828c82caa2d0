//! HR backend routes.

use axum::body::Bytes;
use axum::extract::multipart::MultipartRejection;
use axum::extract::{Multipart, Query, State};
use axum::http::Method;
use axum::response::{IntoResponse, Response};
use conduit_proxy::ProxyRequest;
use conduit_proxy::catalog::hris;

use super::{Params, forward, forward_any, form_parts, params};
use crate::failure::ApiFailure;
use crate::state::AppState;

pub async fn candidates(
    State(state): State<AppState>,
    Query(query): Query<Vec<(String, String)>>,
) -> Response {
    forward(&state.hris, &hris::CANDIDATES, ProxyRequest::get().query(query)).await
}

pub async fn candidate(
    State(state): State<AppState>,
    method: Method,
    path: Params,
    Query(query): Query<Vec<(String, String)>>,
    body: Bytes,
) -> Response {
    forward_any(&state.hris, &hris::CANDIDATE, method, path, query, &body).await
}

pub async fn employee(
    State(state): State<AppState>,
    method: Method,
    path: Params,
    Query(query): Query<Vec<(String, String)>>,
    body: Bytes,
) -> Response {
    forward_any(&state.hris, &hris::EMPLOYEE, method, path, query, &body).await
}

pub async fn upload_document(
    State(state): State<AppState>,
    multipart: Result<Multipart, MultipartRejection>,
) -> Response {
    let parts = match form_parts(multipart).await {
        Ok(parts) => parts,
        Err(e) => return ApiFailure::proxy(&e, &hris::DOCUMENT_UPLOAD).into_response(),
    };
    forward(
        &state.hris,
        &hris::DOCUMENT_UPLOAD,
        ProxyRequest::post().multipart(parts),
    )
    .await
}

pub async fn analyze_document(
    State(state): State<AppState>,
    path: Params,
    multipart: Result<Multipart, MultipartRejection>,
) -> Response {
    let parts = match form_parts(multipart).await {
        Ok(parts) => parts,
        Err(e) => return ApiFailure::proxy(&e, &hris::DOCUMENT_ANALYZE).into_response(),
    };
    let mut request = ProxyRequest::post().multipart(parts);
    request.params = params(path);
    forward(&state.hris, &hris::DOCUMENT_ANALYZE, request).await
}
