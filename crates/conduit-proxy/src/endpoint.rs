//! Upstream endpoint descriptors.
//!
//! An [`Endpoint`] is plain data: the upstream path template, the messages
//! the UI sees on failure, and how failures and successes are reshaped.

use std::collections::BTreeMap;

use crate::error::ProxyError;

/// How an upstream failure status reaches the caller.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusPolicy {
    /// Always 500.
    Fixed,
    /// The upstream status, falling back to 500 for transport errors.
    Relay,
}

/// What a success response looks like to the caller.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResponseMode {
    /// `data` is extracted from the `{status, message, data}` envelope.
    Unwrap,
    /// The upstream body is returned untouched.
    Raw,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Endpoint {
    /// Short name used in logs.
    pub name: &'static str,
    /// Upstream path with `{param}` placeholders, e.g. `/api/v1/hr/candidate/{id}`.
    pub path: &'static str,
    /// Message for a missing path parameter.
    pub missing_message: &'static str,
    /// Message for any upstream or transport failure.
    pub failure_message: &'static str,
    pub status: StatusPolicy,
    pub response: ResponseMode,
}

impl Endpoint {
    /// An endpoint with fixed 500 failures and envelope unwrapping.
    #[must_use]
    pub const fn new(name: &'static str, path: &'static str, failure_message: &'static str) -> Self {
        Self {
            name,
            path,
            missing_message: "Missing required parameter",
            failure_message,
            status: StatusPolicy::Fixed,
            response: ResponseMode::Unwrap,
        }
    }

    #[must_use]
    pub const fn missing(mut self, message: &'static str) -> Self {
        self.missing_message = message;
        self
    }

    #[must_use]
    pub const fn relay_status(mut self) -> Self {
        self.status = StatusPolicy::Relay;
        self
    }

    #[must_use]
    pub const fn raw(mut self) -> Self {
        self.response = ResponseMode::Raw;
        self
    }

    /// Names of the `{param}` placeholders, in order.
    pub fn params(&self) -> impl Iterator<Item = &'static str> {
        let path: &'static str = self.path;
        path.split('{')
            .skip(1)
            .filter_map(|rest| rest.split_once('}').map(|(name, _)| name))
    }

    /// Fill the path template.
    ///
    /// Each parameter is percent-encoded per `/`-separated segment, so a
    /// blob name like `reports/q3.pdf` keeps its slash.
    ///
    /// # Errors
    ///
    /// Returns `ProxyError::MissingParameter` for the first placeholder whose
    /// value is absent or blank.
    pub fn render(&self, params: &BTreeMap<String, String>) -> Result<String, ProxyError> {
        let mut rendered = String::with_capacity(self.path.len());
        let mut rest = self.path;
        while let Some(start) = rest.find('{') {
            rendered.push_str(&rest[..start]);
            let Some(len) = rest[start..].find('}') else {
                break;
            };
            let name = &rest[start + 1..start + len];
            let value = params
                .get(name)
                .map(|v| v.trim())
                .filter(|v| !v.is_empty())
                .ok_or_else(|| ProxyError::MissingParameter {
                    param: name.to_string(),
                })?;
            let encoded: Vec<String> = value
                .split('/')
                .map(|segment| urlencoding::encode(segment).into_owned())
                .collect();
            rendered.push_str(&encoded.join("/"));
            rest = &rest[start + len + 1..];
        }
        rendered.push_str(rest);
        Ok(rendered)
    }
}
