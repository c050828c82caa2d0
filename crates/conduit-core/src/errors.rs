//! Cross-cutting error types for Conduit.
//!
//! This module defines errors that can originate from any crate in the system.
//! Domain-specific errors (e.g., `SchemaError`, `ProxyError`) are defined in
//! their respective crates and converge in `conduit-server`.

use thiserror::Error;

/// Errors that can be raised by any Conduit crate.
#[derive(Debug, Error)]
pub enum CoreError {
    /// A string did not match any declared value of a categorical field.
    #[error("Unknown {kind} value: '{value}'")]
    UnknownVariant { kind: &'static str, value: String },
}
