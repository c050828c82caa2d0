//! Inbound request description, independent of the HTTP host.

use std::collections::BTreeMap;

use reqwest::Method;
use serde_json::Value;

/// One part of a multipart form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormPart {
    pub name: String,
    /// `Some` for file parts.
    pub filename: Option<String>,
    pub content_type: Option<String>,
    pub data: Vec<u8>,
}

impl FormPart {
    #[must_use]
    pub fn text(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            filename: None,
            content_type: None,
            data: value.into().into_bytes(),
        }
    }

    #[must_use]
    pub fn file(
        name: impl Into<String>,
        filename: impl Into<String>,
        content_type: Option<String>,
        data: Vec<u8>,
    ) -> Self {
        Self {
            name: name.into(),
            filename: Some(filename.into()),
            content_type,
            data,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub enum Body {
    #[default]
    Empty,
    Json(Value),
    Multipart(Vec<FormPart>),
}

/// A request to forward: method, path parameters, query and body.
#[derive(Debug, Clone, PartialEq)]
pub struct ProxyRequest {
    pub method: Method,
    pub params: BTreeMap<String, String>,
    pub query: Vec<(String, String)>,
    pub body: Body,
}

impl Default for ProxyRequest {
    fn default() -> Self {
        Self::new(Method::GET)
    }
}

impl ProxyRequest {
    #[must_use]
    pub fn new(method: Method) -> Self {
        Self {
            method,
            params: BTreeMap::new(),
            query: Vec::new(),
            body: Body::Empty,
        }
    }

    #[must_use]
    pub fn get() -> Self {
        Self::new(Method::GET)
    }

    #[must_use]
    pub fn post() -> Self {
        Self::new(Method::POST)
    }

    #[must_use]
    pub fn delete() -> Self {
        Self::new(Method::DELETE)
    }

    #[must_use]
    pub fn param(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.params.insert(name.into(), value.into());
        self
    }

    #[must_use]
    pub fn query(mut self, query: Vec<(String, String)>) -> Self {
        self.query = query;
        self
    }

    #[must_use]
    pub fn json(mut self, body: Value) -> Self {
        self.body = Body::Json(body);
        self
    }

    #[must_use]
    pub fn multipart(mut self, parts: Vec<FormPart>) -> Self {
        self.body = Body::Multipart(parts);
        self
    }

    /// GET and HEAD carry no body upstream.
    #[must_use]
    pub fn sends_body(&self) -> bool {
        self.method != Method::GET && self.method != Method::HEAD
    }
}
