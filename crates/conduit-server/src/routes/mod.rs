//! Route table and the helpers every handler shares.
//!
//! Proxy routes mirror the upstream paths under `/api`, one-to-one.

mod documents;
mod hris;
mod investigation;
mod sessions;
mod validate;

use std::collections::BTreeMap;

use axum::Json;
use axum::Router;
use axum::body::Bytes;
use axum::extract::multipart::MultipartRejection;
use axum::extract::{Multipart, Path};
use axum::http::{Method, StatusCode, Uri, header};
use axum::middleware;
use axum::response::{IntoResponse, Response};
use axum::routing::{any, delete, get, post};
use conduit_proxy::{Body, Endpoint, FormPart, Forwarder, ProxyError, ProxyRequest};
use serde_json::{Value, json};

use crate::failure::ApiFailure;
use crate::state::AppState;

/// Path parameters, absent when the route has none (e.g. a trailing slash
/// where an id should be).
pub(crate) type Params = Option<Path<BTreeMap<String, String>>>;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/healthz", get(healthz))
        // HR
        .route("/api/candidates", get(hris::candidates))
        .route("/api/candidates/", any(hris::candidate))
        .route("/api/candidates/:id", any(hris::candidate))
        .route("/api/employees/", any(hris::employee))
        .route("/api/employees/:id", any(hris::employee))
        .route("/api/employees/upload", post(hris::upload_document))
        .route("/api/document/analyze/:kind", post(hris::analyze_document))
        // Investigation
        .route(
            "/api/cases",
            get(investigation::list_cases).post(investigation::create_case),
        )
        .route("/api/cases/with-files", post(investigation::create_case_with_files))
        .route(
            "/api/cases/:id",
            get(investigation::case)
                .put(investigation::case)
                .delete(investigation::case),
        )
        .route("/api/cases/:id/analysis", post(investigation::analyze_case))
        .route("/api/cases/:id/notes", post(investigation::add_note))
        .route("/api/cases/:id/notes/:note_id", delete(investigation::delete_note))
        .route("/api/cases/:id/chat", post(investigation::chat))
        .route("/api/cases/:id/chat/sessions", get(sessions::list_for_case))
        .route("/api/upload/file/:case_id", post(investigation::upload_file))
        .route(
            "/api/upload/file/:case_id/*blob_name",
            delete(investigation::delete_file),
        )
        .route("/api/upload/files/:case_id", get(investigation::list_files))
        // Chat sessions
        .route("/api/chat/sessions", get(sessions::list).post(sessions::create))
        .route(
            "/api/chat/sessions/:id",
            get(sessions::get_one).delete(sessions::remove),
        )
        .route("/api/chat/sessions/:id/messages", post(sessions::send_message))
        // Tax
        .route("/api/proxy-pdf", get(documents::proxy_pdf))
        // Schemas
        .route("/api/validate/:shape", post(validate::validate))
        .fallback(not_found)
        .layer(middleware::map_response(method_not_allowed))
        .with_state(state)
}

async fn not_found(uri: Uri) -> ApiFailure {
    ApiFailure::new(404, format!("No route for {}", uri.path()))
}

/// Replaces axum's empty 405 with the usual error body. Relayed upstream
/// errors already carry a content type and pass through.
async fn method_not_allowed(response: Response) -> Response {
    if response.status() == StatusCode::METHOD_NOT_ALLOWED
        && !response.headers().contains_key(header::CONTENT_TYPE)
    {
        let allow = response.headers().get(header::ALLOW).cloned();
        let mut replaced = ApiFailure::new(405, "Method not allowed").into_response();
        if let Some(allow) = allow {
            replaced.headers_mut().insert(header::ALLOW, allow);
        }
        return replaced;
    }
    response
}

async fn healthz() -> Json<Value> {
    Json(json!({"status": "ok"}))
}

pub(crate) fn params(path: Params) -> BTreeMap<String, String> {
    path.map(|Path(p)| p).unwrap_or_default()
}

/// Forward and render either the reshaped body or the error body.
pub(crate) async fn forward(
    forwarder: &Forwarder,
    endpoint: &Endpoint,
    request: ProxyRequest,
) -> Response {
    match forwarder.forward(endpoint, request).await {
        Ok(value) => Json(value).into_response(),
        Err(e) => ApiFailure::proxy(&e, endpoint).into_response(),
    }
}

/// Forward with the inbound method and an optional JSON body.
pub(crate) async fn forward_any(
    forwarder: &Forwarder,
    endpoint: &Endpoint,
    method: Method,
    path: Params,
    query: Vec<(String, String)>,
    body: &Bytes,
) -> Response {
    let body = match json_body(body) {
        Ok(body) => body,
        Err(e) => return ApiFailure::proxy(&e, endpoint).into_response(),
    };
    let mut request = ProxyRequest::new(method).query(query);
    request.params = params(path);
    request.body = body;
    forward(forwarder, endpoint, request).await
}

/// An empty body forwards nothing; anything else must be JSON.
pub(crate) fn json_body(bytes: &Bytes) -> Result<Body, ProxyError> {
    if bytes.iter().all(u8::is_ascii_whitespace) {
        return Ok(Body::Empty);
    }
    serde_json::from_slice(bytes)
        .map(Body::Json)
        .map_err(|e| ProxyError::InvalidRequest(format!("Invalid JSON body: {e}")))
}

/// Read every part of an inbound multipart body.
pub(crate) async fn form_parts(
    multipart: Result<Multipart, MultipartRejection>,
) -> Result<Vec<FormPart>, ProxyError> {
    let missing = || ProxyError::InvalidRequest("No multipart data found".to_string());
    let mut multipart = multipart.map_err(|_| missing())?;
    let mut parts = Vec::new();
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| ProxyError::InvalidRequest(format!("Malformed multipart body: {e}")))?
    {
        let name = field.name().unwrap_or_default().to_string();
        let filename = field.file_name().map(str::to_string);
        let content_type = field.content_type().map(str::to_string);
        let data = field
            .bytes()
            .await
            .map_err(|e| ProxyError::InvalidRequest(format!("Malformed multipart body: {e}")))?;
        parts.push(FormPart {
            name,
            filename,
            content_type,
            data: data.to_vec(),
        });
    }
    if parts.is_empty() {
        return Err(missing());
    }
    Ok(parts)
}
