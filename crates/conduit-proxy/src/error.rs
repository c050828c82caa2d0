//! Proxy error types.

use conduit_core::envelope::ErrorBody;
use thiserror::Error;

use crate::endpoint::{Endpoint, StatusPolicy};

/// Errors raised while forwarding a request upstream.
#[derive(Debug, Error)]
pub enum ProxyError {
    /// A required path parameter was absent or empty. Raised before any I/O.
    #[error("Missing required parameter '{param}'")]
    MissingParameter { param: String },

    /// HTTP transport error.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Upstream API returned a non-success status code.
    #[error("Upstream error ({status}): {message}")]
    Upstream {
        /// HTTP status code returned by the upstream.
        status: u16,
        /// Response body, truncated.
        message: String,
    },

    /// The inbound request cannot be forwarded as given.
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    /// The request targets something the proxy refuses to fetch.
    #[error("Forbidden: {0}")]
    Forbidden(String),

    /// A success response could not be read as the expected type.
    #[error("Failed to decode upstream response: {0}")]
    Decode(String),
}

impl ProxyError {
    /// Status code the caller should see for this error on `endpoint`.
    #[must_use]
    pub fn status_code(&self, endpoint: &Endpoint) -> u16 {
        match self {
            Self::MissingParameter { .. } | Self::InvalidRequest(_) => 400,
            Self::Forbidden(_) => 403,
            Self::Upstream { status, .. } if matches!(endpoint.status, StatusPolicy::Relay) => {
                *status
            }
            _ => 500,
        }
    }

    /// The uniform `{statusCode, statusMessage}` body for this error.
    ///
    /// Upstream and transport failures never leak their cause; the caller
    /// gets the endpoint's fixed message.
    #[must_use]
    pub fn to_error_body(&self, endpoint: &Endpoint) -> ErrorBody {
        let message = match self {
            Self::MissingParameter { .. } => endpoint.missing_message.to_string(),
            Self::InvalidRequest(message) | Self::Forbidden(message) => message.clone(),
            Self::Http(_) | Self::Upstream { .. } | Self::Decode(_) => {
                endpoint.failure_message.to_string()
            }
        };
        ErrorBody::new(self.status_code(endpoint), message)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::{hris, investigation};
    use pretty_assertions::assert_eq;

    #[test]
    fn missing_parameter_uses_endpoint_message() {
        let err = ProxyError::MissingParameter { param: "id".into() };
        assert_eq!(
            err.to_error_body(&hris::CANDIDATE),
            ErrorBody::new(400, "Candidate ID is required")
        );
    }

    #[test]
    fn upstream_failure_is_masked_as_fixed_500() {
        let err = ProxyError::Upstream {
            status: 502,
            message: "bad gateway: stack trace".into(),
        };
        assert_eq!(
            err.to_error_body(&hris::CANDIDATES),
            ErrorBody::new(500, "Failed to fetch candidates")
        );
    }

    #[test]
    fn relaying_endpoints_keep_upstream_status() {
        let err = ProxyError::Upstream {
            status: 413,
            message: "too large".into(),
        };
        assert_eq!(
            err.to_error_body(&investigation::UPLOAD_FILE),
            ErrorBody::new(413, "Upload failed")
        );
    }

    #[test]
    fn forbidden_is_403() {
        let err = ProxyError::Forbidden("URL not allowed".into());
        assert_eq!(err.status_code(&hris::CANDIDATES), 403);
    }
}
