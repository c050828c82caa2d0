//! # conduit-proxy
//!
//! Forwards front-end requests to the upstream HR, investigation and tax
//! backends and reshapes their responses.
//!
//! - [`endpoint`]: path templates and per-endpoint failure messages
//! - [`catalog`]: every upstream endpoint the front ends use
//! - [`Forwarder`]: one request in, one upstream call out, envelope unwrapped
//! - [`DocumentFetcher`]: allow-listed PDF pass-through
//! - [`CaseWorkflow`]: case creation with best-effort attachment uploads
//!
//! Failures become the uniform `{statusCode, statusMessage}` body through
//! [`ProxyError::to_error_body`].

pub mod catalog;
pub mod documents;
pub mod endpoint;
pub mod request;
pub mod upstream;
pub mod workflow;

mod error;
mod forwarder;

pub use documents::DocumentFetcher;
pub use endpoint::{Endpoint, ResponseMode, StatusPolicy};
pub use error::ProxyError;
pub use forwarder::Forwarder;
pub use request::{Body, FormPart, ProxyRequest};
pub use upstream::{HttpUpstream, Upstream, UpstreamCall, UpstreamReply};
pub use workflow::{CaseCreation, CaseWorkflow, UploadFailure};
