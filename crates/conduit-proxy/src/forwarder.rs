//! The proxy forwarder.
//!
//! [`Forwarder::forward`] turns a [`ProxyRequest`] into one upstream call on
//! an [`Endpoint`], then reshapes the reply:
//!
//! 1. Render the path template. A missing parameter fails before any I/O.
//! 2. Send the same method upstream, with the query string. GET and HEAD
//!    carry no body; multipart bodies are rebuilt part by part.
//! 3. On success, unwrap the `{status, message, data}` envelope (or return
//!    the raw body for [`ResponseMode::Raw`] endpoints).
//! 4. On failure, log the cause and return the error. Callers turn it into
//!    the uniform body with [`ProxyError::to_error_body`].

use std::sync::Arc;

use conduit_config::UpstreamConfig;
use conduit_core::envelope::unwrap_envelope;
use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::endpoint::{Endpoint, ResponseMode};
use crate::error::ProxyError;
use crate::request::{Body, ProxyRequest};
use crate::upstream::{HttpUpstream, Upstream, UpstreamCall, UpstreamReply, check_reply};

/// Forwards requests to one upstream backend.
#[derive(Clone)]
pub struct Forwarder {
    base_url: String,
    upstream: Arc<dyn Upstream>,
}

impl std::fmt::Debug for Forwarder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Forwarder")
            .field("base_url", &self.base_url)
            .finish_non_exhaustive()
    }
}

impl Forwarder {
    #[must_use]
    pub fn new(config: &UpstreamConfig, upstream: Arc<dyn Upstream>) -> Self {
        Self {
            base_url: config.base().to_string(),
            upstream,
        }
    }

    /// A forwarder over a fresh [`HttpUpstream`].
    ///
    /// # Errors
    ///
    /// Returns [`ProxyError::Http`] if the HTTP client cannot be built.
    pub fn http(config: &UpstreamConfig) -> Result<Self, ProxyError> {
        Ok(Self::new(config, Arc::new(HttpUpstream::new()?)))
    }

    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Full upstream URL for `endpoint`, query string included.
    ///
    /// # Errors
    ///
    /// Returns [`ProxyError::MissingParameter`] if a path parameter is absent.
    pub fn url_for(&self, endpoint: &Endpoint, request: &ProxyRequest) -> Result<String, ProxyError> {
        let mut url = format!("{}{}", self.base_url, endpoint.render(&request.params)?);
        if !request.query.is_empty() {
            let query: Vec<String> = request
                .query
                .iter()
                .map(|(k, v)| format!("{}={}", urlencoding::encode(k), urlencoding::encode(v)))
                .collect();
            url.push('?');
            url.push_str(&query.join("&"));
        }
        Ok(url)
    }

    /// Forward `request` to `endpoint` and return the reshaped body.
    ///
    /// A non-JSON success body comes back as a JSON string; an empty one as
    /// `null`.
    ///
    /// # Errors
    ///
    /// - [`ProxyError::MissingParameter`] before any upstream call.
    /// - [`ProxyError::Http`] on transport failure.
    /// - [`ProxyError::Upstream`] on a non-2xx reply.
    pub async fn forward(
        &self,
        endpoint: &Endpoint,
        request: ProxyRequest,
    ) -> Result<Value, ProxyError> {
        let reply = self.send(endpoint, request).await?;
        let body = decode_body(&reply);
        Ok(match endpoint.response {
            ResponseMode::Unwrap => unwrap_envelope(body),
            ResponseMode::Raw => body,
        })
    }

    /// [`forward`](Self::forward), then deserialize the result as `T`.
    ///
    /// # Errors
    ///
    /// As [`forward`](Self::forward), plus [`ProxyError::Decode`] when the
    /// body does not fit `T`.
    pub async fn forward_json<T: DeserializeOwned>(
        &self,
        endpoint: &Endpoint,
        request: ProxyRequest,
    ) -> Result<T, ProxyError> {
        let value = self.forward(endpoint, request).await?;
        serde_json::from_value(value).map_err(|e| {
            tracing::warn!(endpoint = endpoint.name, error = %e, "unexpected upstream body");
            ProxyError::Decode(e.to_string())
        })
    }

    /// Forward and return the raw bytes and content type, without decoding.
    ///
    /// # Errors
    ///
    /// As [`forward`](Self::forward).
    pub async fn forward_bytes(
        &self,
        endpoint: &Endpoint,
        request: ProxyRequest,
    ) -> Result<UpstreamReply, ProxyError> {
        self.send(endpoint, request).await
    }

    async fn send(
        &self,
        endpoint: &Endpoint,
        request: ProxyRequest,
    ) -> Result<UpstreamReply, ProxyError> {
        let url = self.url_for(endpoint, &request)?;
        let body = if request.sends_body() {
            request.body
        } else {
            Body::Empty
        };
        let call = UpstreamCall {
            method: request.method.clone(),
            url,
            body,
        };
        tracing::debug!(endpoint = endpoint.name, method = %call.method, url = %call.url, "forwarding");

        let result = match self.upstream.send(call).await {
            Ok(reply) => check_reply(reply),
            Err(e) => Err(e),
        };
        result.inspect_err(|e| {
            tracing::warn!(endpoint = endpoint.name, error = %e, "upstream request failed");
        })
    }
}

fn decode_body(reply: &UpstreamReply) -> Value {
    if reply.body.is_empty() {
        return Value::Null;
    }
    serde_json::from_slice(&reply.body)
        .unwrap_or_else(|_| Value::String(String::from_utf8_lossy(&reply.body).into_owned()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::{hris, investigation};
    use async_trait::async_trait;
    use pretty_assertions::assert_eq;
    use reqwest::Method;
    use serde_json::json;
    use std::sync::Mutex;

    /// Records every call and answers with a scripted reply.
    struct Scripted {
        calls: Mutex<Vec<UpstreamCall>>,
        reply: Result<UpstreamReply, u16>,
    }

    impl Scripted {
        fn json(status: u16, body: Value) -> Arc<Self> {
            Arc::new(Self {
                calls: Mutex::new(Vec::new()),
                reply: Ok(UpstreamReply {
                    status,
                    content_type: Some("application/json".into()),
                    body: serde_json::to_vec(&body).unwrap(),
                }),
            })
        }

        fn calls(&self) -> Vec<UpstreamCall> {
            self.calls.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl Upstream for Scripted {
        async fn send(&self, call: UpstreamCall) -> Result<UpstreamReply, ProxyError> {
            self.calls.lock().unwrap().push(call);
            self.reply.clone().map_err(|status| ProxyError::Upstream {
                status,
                message: String::new(),
            })
        }
    }

    fn forwarder(upstream: Arc<Scripted>) -> Forwarder {
        Forwarder::new(&UpstreamConfig::new("http://upstream.test/"), upstream)
    }

    #[tokio::test]
    async fn unwraps_envelope_data() {
        let upstream = Scripted::json(200, json!({"status": "Success", "message": "", "data": {"id": "42"}}));
        let value = forwarder(upstream.clone())
            .forward(&hris::CANDIDATE, ProxyRequest::get().param("id", "42"))
            .await
            .unwrap();
        assert_eq!(value, json!({"id": "42"}));
        assert_eq!(upstream.calls()[0].url, "http://upstream.test/api/v1/hr/candidate/42");
    }

    #[tokio::test]
    async fn raw_endpoints_keep_the_envelope() {
        let body = json!({"status": "Success", "data": {"blob": "x"}});
        let upstream = Scripted::json(200, body.clone());
        let value = forwarder(upstream)
            .forward(&hris::DOCUMENT_UPLOAD, ProxyRequest::post())
            .await
            .unwrap();
        assert_eq!(value, body);
    }

    #[tokio::test]
    async fn missing_parameter_makes_no_call() {
        let upstream = Scripted::json(200, json!({}));
        let err = forwarder(upstream.clone())
            .forward(&hris::CANDIDATE, ProxyRequest::get())
            .await
            .unwrap_err();
        assert!(matches!(err, ProxyError::MissingParameter { .. }));
        assert!(upstream.calls().is_empty());
    }

    #[tokio::test]
    async fn get_drops_body_and_keeps_query() {
        let upstream = Scripted::json(200, json!([]));
        forwarder(upstream.clone())
            .forward(
                &investigation::CASES,
                ProxyRequest::get()
                    .query(vec![("status".into(), "open cases".into())])
                    .json(json!({"ignored": true})),
            )
            .await
            .unwrap();
        let call = &upstream.calls()[0];
        assert_eq!(call.url, "http://upstream.test/api/v1/cases?status=open%20cases");
        assert_eq!(call.body, Body::Empty);
    }

    #[tokio::test]
    async fn non_success_reply_is_an_upstream_error() {
        let upstream = Scripted::json(404, json!({"detail": "not found"}));
        let err = forwarder(upstream)
            .forward(&investigation::CASE, ProxyRequest::new(Method::PUT).param("id", "c1"))
            .await
            .unwrap_err();
        assert!(matches!(err, ProxyError::Upstream { status: 404, .. }));
    }

    #[tokio::test]
    async fn forward_json_reports_decode_errors() {
        let upstream = Scripted::json(200, json!({"data": "not a list"}));
        let err = forwarder(upstream)
            .forward_json::<Vec<Value>>(&investigation::CASES, ProxyRequest::get())
            .await
            .unwrap_err();
        assert!(matches!(err, ProxyError::Decode(_)));
    }

    #[test]
    fn non_json_success_body_becomes_a_string() {
        let reply = UpstreamReply {
            status: 200,
            content_type: Some("text/plain".into()),
            body: b"ok".to_vec(),
        };
        assert_eq!(decode_body(&reply), json!("ok"));
    }
}
