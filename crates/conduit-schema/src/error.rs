//! Schema validation error types.

use std::fmt;

use serde::Serialize;
use thiserror::Error;

/// Errors from the schema registry.
#[derive(Debug, Error)]
pub enum SchemaError {
    /// Requested shape name was not found in the registry.
    #[error("Shape not found: {0}")]
    NotFound(String),

    /// The payload broke one or more declared constraints.
    #[error(transparent)]
    Invalid(#[from] ValidationError),

    /// The payload passed the schema but could not be built into the typed value.
    #[error("Failed to decode {shape}: {message}")]
    Decode { shape: String, message: String },

    /// Schema generation or compilation error.
    #[error("Schema generation error: {0}")]
    Generation(String),

    /// Revision name not recognized.
    #[error("Unknown revision: '{0}'")]
    UnknownRevision(String),

    /// The payload could not be migrated to the canonical revision.
    #[error("Cannot migrate {shape} from revision {revision}: {message}")]
    Migration {
        shape: String,
        revision: &'static str,
        message: String,
    },
}

impl SchemaError {
    /// Field issues when this is a validation failure, empty otherwise.
    #[must_use]
    pub fn issues(&self) -> &[FieldIssue] {
        match self {
            Self::Invalid(err) => &err.issues,
            _ => &[],
        }
    }
}

/// One broken constraint, located by field path.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldIssue {
    /// Dotted/indexed path such as `education[0].gpa`; `$` for the record itself.
    pub path: String,
    /// The declared constraint, e.g. `number between 0 and 5`.
    pub expected: String,
    /// JSON type of the offending value, or `missing`.
    pub actual: String,
}

impl fmt::Display for FieldIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}: expected {}, got {}",
            self.path, self.expected, self.actual
        )
    }
}

/// All field issues found in one payload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Error)]
pub struct ValidationError {
    pub shape: String,
    pub issues: Vec<FieldIssue>,
}

impl ValidationError {
    /// Whether any issue sits at exactly `path`.
    #[must_use]
    pub fn has_path(&self, path: &str) -> bool {
        self.issues.iter().any(|i| i.path == path)
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Invalid {}:", self.shape)?;
        for issue in &self.issues {
            write!(f, " [{issue}]")?;
        }
        Ok(())
    }
}
