//! Payload validation against a named shape.

use axum::Json;
use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, Query, State};
use axum::response::{IntoResponse, Response};
use conduit_schema::CandidateRevision;
use serde::Deserialize;
use serde_json::{Value, json};

use crate::failure::ApiFailure;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct RevisionQuery {
    /// `legacy`, `v1` or `v2`. Detected from the payload when absent.
    revision: Option<String>,
}

/// `POST /api/validate/:shape` answers with the normalized record, or 422
/// and the field issues.
pub async fn validate(
    State(state): State<AppState>,
    Path(shape): Path<String>,
    Query(query): Query<RevisionQuery>,
    body: Result<Json<Value>, JsonRejection>,
) -> Response {
    let Json(raw) = match body {
        Ok(body) => body,
        Err(rejection) => {
            return ApiFailure::new(400, format!("Invalid JSON body: {}", rejection.body_text()))
                .into_response();
        }
    };

    let result = match query.revision.as_deref() {
        Some(name) => name
            .parse::<CandidateRevision>()
            .and_then(|revision| state.schemas.validate_revision(&shape, revision, &raw)),
        None => state.schemas.validate_detected(&shape, &raw),
    };
    let record = match result.and_then(|record| {
        record.to_value().map_err(|e| conduit_schema::SchemaError::Decode {
            shape: shape.clone(),
            message: e.to_string(),
        })
    }) {
        Ok(record) => record,
        Err(e) => return ApiFailure::schema(e).into_response(),
    };
    Json(json!({"shape": shape, "record": record})).into_response()
}
