//! Failures as HTTP responses.
//!
//! Everything that reaches the UI is `{statusCode, statusMessage}`.
//! Validation failures add the field `issues`.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use conduit_core::envelope::ErrorBody;
use conduit_proxy::catalog::investigation;
use conduit_proxy::{Endpoint, ProxyError};
use conduit_schema::{FieldIssue, SchemaError};
use conduit_session::SessionError;
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ApiFailure {
    #[serde(flatten)]
    pub body: ErrorBody,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub issues: Vec<FieldIssue>,
}

impl ApiFailure {
    #[must_use]
    pub fn new(status_code: u16, message: impl Into<String>) -> Self {
        Self {
            body: ErrorBody::new(status_code, message),
            issues: Vec::new(),
        }
    }

    /// Map a proxy error through the endpoint it happened on.
    #[must_use]
    pub fn proxy(error: &ProxyError, endpoint: &Endpoint) -> Self {
        Self {
            body: error.to_error_body(endpoint),
            issues: Vec::new(),
        }
    }

    #[must_use]
    pub fn session(error: &SessionError) -> Self {
        match error {
            SessionError::NotFound(_) => Self::new(404, "Session not found"),
            SessionError::Proxy(e) => Self::proxy(e, &investigation::CASE_CHAT),
            other => {
                tracing::error!(error = %other, "chat session storage failed");
                Self::new(500, "Failed to process chat session")
            }
        }
    }

    #[must_use]
    pub fn schema(error: SchemaError) -> Self {
        match error {
            SchemaError::NotFound(name) => Self::new(404, format!("Unknown shape '{name}'")),
            SchemaError::Invalid(invalid) => Self {
                body: ErrorBody::new(422, format!("Invalid {}", invalid.shape)),
                issues: invalid.issues,
            },
            SchemaError::UnknownRevision(_) | SchemaError::Migration { .. } => {
                Self::new(400, error.to_string())
            }
            SchemaError::Decode { .. } => Self::new(422, error.to_string()),
            SchemaError::Generation(_) => {
                tracing::error!(%error, "schema registry failure");
                Self::new(500, "Schema validation unavailable")
            }
        }
    }
}

impl IntoResponse for ApiFailure {
    fn into_response(self) -> Response {
        let status = StatusCode::from_u16(self.body.status_code)
            .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
        (status, Json(self)).into_response()
    }
}
