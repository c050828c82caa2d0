//! Upstream transport.
//!
//! [`Upstream`] is the seam between the forwarder and the network:
//! [`HttpUpstream`] issues real requests with `reqwest`, tests substitute
//! their own implementation to count or script calls.

use async_trait::async_trait;
use reqwest::Method;

use crate::error::ProxyError;
use crate::request::{Body, FormPart};

/// Upstream bodies kept in error messages are cut to this many bytes.
const ERROR_BODY_LIMIT: usize = 512;

/// A fully resolved outbound request.
#[derive(Debug, Clone, PartialEq)]
pub struct UpstreamCall {
    pub method: Method,
    /// Absolute URL including the query string.
    pub url: String,
    pub body: Body,
}

/// Status, content type and raw bytes of an upstream response.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UpstreamReply {
    pub status: u16,
    pub content_type: Option<String>,
    pub body: Vec<u8>,
}

impl UpstreamReply {
    #[must_use]
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    #[must_use]
    pub fn is_json(&self) -> bool {
        self.content_type
            .as_deref()
            .is_some_and(|ct| ct.contains("json"))
    }
}

#[async_trait]
pub trait Upstream: Send + Sync {
    /// Issue `call`. Non-2xx statuses are returned as replies, not errors.
    async fn send(&self, call: UpstreamCall) -> Result<UpstreamReply, ProxyError>;
}

/// `reqwest`-backed transport. No timeout beyond the transport defaults.
#[derive(Debug, Clone)]
pub struct HttpUpstream {
    http: reqwest::Client,
}

impl HttpUpstream {
    /// # Errors
    ///
    /// Returns [`ProxyError::Http`] if the TLS backend cannot be initialized.
    pub fn new() -> Result<Self, ProxyError> {
        let http = reqwest::Client::builder()
            .user_agent(concat!("conduit/", env!("CARGO_PKG_VERSION")))
            .build()?;
        Ok(Self { http })
    }

    #[must_use]
    pub const fn with_client(http: reqwest::Client) -> Self {
        Self { http }
    }
}

#[async_trait]
impl Upstream for HttpUpstream {
    async fn send(&self, call: UpstreamCall) -> Result<UpstreamReply, ProxyError> {
        let mut builder = self.http.request(call.method, &call.url);
        builder = match call.body {
            Body::Empty => builder,
            Body::Json(value) => builder.json(&value),
            Body::Multipart(parts) => builder.multipart(build_form(parts)?),
        };
        read_reply(builder.send().await?).await
    }
}

/// Rebuild an inbound multipart body as a fresh outbound form.
fn build_form(parts: Vec<FormPart>) -> Result<reqwest::multipart::Form, ProxyError> {
    let mut form = reqwest::multipart::Form::new();
    for part in parts {
        let FormPart {
            name,
            filename,
            content_type,
            data,
        } = part;
        match filename {
            Some(filename) => {
                let mut file = reqwest::multipart::Part::bytes(data).file_name(filename);
                if let Some(content_type) = content_type {
                    file = file.mime_str(&content_type)?;
                }
                form = form.part(name, file);
            }
            None => {
                let text = String::from_utf8(data).map_err(|e| {
                    ProxyError::InvalidRequest(format!("form field '{name}' is not UTF-8: {e}"))
                })?;
                form = form.text(name, text);
            }
        }
    }
    Ok(form)
}

/// Collect a response into an [`UpstreamReply`].
pub async fn read_reply(resp: reqwest::Response) -> Result<UpstreamReply, ProxyError> {
    let status = resp.status().as_u16();
    let content_type = resp
        .headers()
        .get(reqwest::header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .map(str::to_string);
    let body = resp.bytes().await?.to_vec();
    Ok(UpstreamReply {
        status,
        content_type,
        body,
    })
}

/// Turn a non-2xx reply into [`ProxyError::Upstream`].
///
/// The body is kept for logging, truncated at a character boundary.
pub fn check_reply(reply: UpstreamReply) -> Result<UpstreamReply, ProxyError> {
    if reply.is_success() {
        return Ok(reply);
    }
    let text = String::from_utf8_lossy(&reply.body);
    let mut end = text.len().min(ERROR_BODY_LIMIT);
    while !text.is_char_boundary(end) {
        end -= 1;
    }
    Err(ProxyError::Upstream {
        status: reply.status,
        message: text[..end].to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn mock_response(status: u16, content_type: &str, body: &str) -> reqwest::Response {
        reqwest::Response::from(
            ::http::Response::builder()
                .status(status)
                .header("Content-Type", content_type)
                .body(body.to_string())
                .unwrap(),
        )
    }

    #[tokio::test]
    async fn read_reply_keeps_status_and_content_type() {
        let reply = read_reply(mock_response(201, "application/json", "{}"))
            .await
            .unwrap();
        assert_eq!(reply.status, 201);
        assert!(reply.is_json());
        assert_eq!(reply.body, b"{}");
    }

    #[tokio::test]
    async fn check_reply_maps_non_success() {
        let reply = read_reply(mock_response(502, "text/plain", "bad gateway"))
            .await
            .unwrap();
        let err = check_reply(reply).unwrap_err();
        assert!(matches!(
            err,
            ProxyError::Upstream { status: 502, ref message } if message == "bad gateway"
        ));
    }

    #[test]
    fn check_reply_truncates_long_bodies() {
        let reply = UpstreamReply {
            status: 500,
            content_type: None,
            body: "é".repeat(400).into_bytes(),
        };
        let ProxyError::Upstream { message, .. } = check_reply(reply).unwrap_err() else {
            panic!("expected upstream error");
        };
        assert!(message.len() <= ERROR_BODY_LIMIT);
        assert!(message.chars().all(|c| c == 'é'));
    }

    #[test]
    fn success_passes_through() {
        let reply = UpstreamReply {
            status: 204,
            content_type: None,
            body: Vec::new(),
        };
        assert!(check_reply(reply).is_ok());
    }

    #[test]
    fn text_and_file_parts_build_a_form() {
        let form = build_form(vec![
            FormPart::text("case_id", "c-1"),
            FormPart::file("file", "a.pdf", Some("application/pdf".into()), vec![1, 2]),
        ]);
        assert!(form.is_ok());
    }

    #[test]
    fn invalid_mime_is_rejected() {
        let form = build_form(vec![FormPart::file(
            "file",
            "a.pdf",
            Some("not a mime".into()),
            vec![],
        )]);
        assert!(matches!(form, Err(ProxyError::Http(_))));
    }
}
