//! PDF pass-through for documents in blob storage.

use std::sync::Arc;

use conduit_config::DocumentsConfig;
use reqwest::Method;

use crate::catalog::tax;
use crate::error::ProxyError;
use crate::request::Body;
use crate::upstream::{HttpUpstream, Upstream, UpstreamCall, check_reply};

pub const PDF_CONTENT_TYPE: &str = "application/pdf";
pub const PDF_CACHE_CONTROL: &str = "public, max-age=3600";

/// Fetches documents by absolute URL, restricted to an allowed prefix.
#[derive(Clone)]
pub struct DocumentFetcher {
    config: DocumentsConfig,
    upstream: Arc<dyn Upstream>,
}

impl std::fmt::Debug for DocumentFetcher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DocumentFetcher")
            .field("allowed_prefix", &self.config.allowed_prefix)
            .finish_non_exhaustive()
    }
}

impl DocumentFetcher {
    #[must_use]
    pub fn new(config: DocumentsConfig, upstream: Arc<dyn Upstream>) -> Self {
        Self { config, upstream }
    }

    /// # Errors
    ///
    /// Returns [`ProxyError::Http`] if the HTTP client cannot be built.
    pub fn http(config: DocumentsConfig) -> Result<Self, ProxyError> {
        Ok(Self::new(config, Arc::new(HttpUpstream::new()?)))
    }

    /// Fetch the document at `url` and return its bytes.
    ///
    /// # Errors
    ///
    /// - [`ProxyError::MissingParameter`] when `url` is absent or blank.
    /// - [`ProxyError::Forbidden`] when `url` is outside the allowed prefix.
    /// - [`ProxyError::Http`] or [`ProxyError::Upstream`] when the fetch fails.
    pub async fn fetch(&self, url: Option<&str>) -> Result<Vec<u8>, ProxyError> {
        let url = url
            .map(str::trim)
            .filter(|u| !u.is_empty())
            .ok_or_else(|| ProxyError::MissingParameter {
                param: "url".to_string(),
            })?;
        if !self.config.allows(url) {
            tracing::warn!(url, "document URL outside allowed prefix");
            return Err(ProxyError::Forbidden("URL not allowed".to_string()));
        }

        let call = UpstreamCall {
            method: Method::GET,
            url: url.to_string(),
            body: Body::Empty,
        };
        let reply = match self.upstream.send(call).await {
            Ok(reply) => check_reply(reply),
            Err(e) => Err(e),
        }
        .inspect_err(|e| {
            tracing::warn!(endpoint = tax::PROXY_PDF.name, url, error = %e, "document fetch failed");
        })?;
        Ok(reply.body)
    }
}
