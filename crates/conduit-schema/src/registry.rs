//! Central shape registry.
//!
//! The `SchemaRegistry` builds a JSON Schema for every `conduit-core` record
//! shape at construction time using [`schemars::schema_for!`], compiles it
//! once with `jsonschema`, and validates untyped payloads against it.

use std::collections::HashMap;

use schemars::schema_for;
use serde_json::Value;

use crate::error::{SchemaError, ValidationError};
use crate::issues::field_issue;
use crate::revision::CandidateRevision;
use crate::shape::{Record, Shape};

use conduit_core::entities::{
    Candidate, ChatHistory, ChatMessage, Employee, ExtractedContent, FraudCase, Job,
    KartuKeluargaStructured, KtpStructured, UploadedFile,
};

type Decoder = fn(Value) -> Result<Record, serde_json::Error>;

fn decode<T: Shape>(raw: Value) -> Result<Record, serde_json::Error> {
    serde_json::from_value::<T>(raw).map(Shape::into_record)
}

struct Entry {
    schema: Value,
    validator: jsonschema::Validator,
    decode: Decoder,
}

/// Every record shape by name, with its schema and compiled validator.
pub struct SchemaRegistry {
    shapes: HashMap<&'static str, Entry>,
}

impl std::fmt::Debug for SchemaRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SchemaRegistry")
            .field("shapes", &self.list())
            .finish()
    }
}

fn entry<T: Shape>() -> Result<(&'static str, Entry), SchemaError> {
    let schema = serde_json::to_value(schema_for!(T))
        .map_err(|e| SchemaError::Generation(format!("{}: {e}", T::NAME)))?;
    let validator = jsonschema::validator_for(&schema)
        .map_err(|e| SchemaError::Generation(format!("{}: {e}", T::NAME)))?;
    Ok((
        T::NAME,
        Entry {
            schema,
            validator,
            decode: decode::<T>,
        },
    ))
}

impl SchemaRegistry {
    /// Build a registry containing every record shape.
    ///
    /// # Errors
    ///
    /// Returns `SchemaError::Generation` if a generated schema fails to compile.
    pub fn new() -> Result<Self, SchemaError> {
        let shapes = [
            entry::<Candidate>()?,
            entry::<Employee>()?,
            entry::<Job>()?,
            entry::<FraudCase>()?,
            entry::<ChatHistory>()?,
            entry::<ChatMessage>()?,
            entry::<UploadedFile>()?,
            entry::<ExtractedContent>()?,
            entry::<KtpStructured>()?,
            entry::<KartuKeluargaStructured>()?,
        ];
        Ok(Self {
            shapes: shapes.into_iter().collect(),
        })
    }

    /// Get a shape's JSON Schema by name. Returns `None` if not found.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&Value> {
        self.shapes.get(name).map(|e| &e.schema)
    }

    fn entry(&self, name: &str) -> Result<&Entry, SchemaError> {
        self.shapes
            .get(name)
            .ok_or_else(|| SchemaError::NotFound(name.to_string()))
    }

    /// Check a payload against a named shape without building the typed value.
    ///
    /// Reports every broken constraint, not just the first.
    ///
    /// # Errors
    ///
    /// Returns `SchemaError::NotFound` if the shape is unknown, or
    /// `SchemaError::Invalid` listing each field issue.
    pub fn check(&self, name: &str, raw: &Value) -> Result<(), SchemaError> {
        let entry = self.entry(name)?;
        let mut issues = Vec::new();
        for err in entry.validator.iter_errors(raw) {
            let issue = field_issue(&err, &entry.schema, raw);
            if !issues.contains(&issue) {
                issues.push(issue);
            }
        }
        if issues.is_empty() {
            Ok(())
        } else {
            Err(ValidationError {
                shape: name.to_string(),
                issues,
            }
            .into())
        }
    }

    /// Validate a payload against a named shape and build the typed record.
    ///
    /// Defaults are applied (absent or null arrays become empty) and unknown
    /// keys on open records are kept in their extension bag.
    ///
    /// # Errors
    ///
    /// Returns `SchemaError::NotFound`, `SchemaError::Invalid`, or
    /// `SchemaError::Decode` when the value passes the schema but serde
    /// rejects it (for example an unparseable timestamp).
    pub fn validate(&self, name: &str, raw: &Value) -> Result<Record, SchemaError> {
        self.check(name, raw)?;
        let entry = self.entry(name)?;
        (entry.decode)(raw.clone()).map_err(|e| SchemaError::Decode {
            shape: name.to_string(),
            message: e.to_string(),
        })
    }

    /// Typed entry point: validate as `T` and return `T` itself.
    ///
    /// # Errors
    ///
    /// Same as [`SchemaRegistry::validate`].
    pub fn validate_as<T: Shape>(&self, raw: &Value) -> Result<T, SchemaError> {
        self.check(T::NAME, raw)?;
        serde_json::from_value(raw.clone()).map_err(|e| SchemaError::Decode {
            shape: T::NAME.to_string(),
            message: e.to_string(),
        })
    }

    /// Migrate a payload from `revision` to the canonical layout, then validate.
    ///
    /// Revisions describe the person-record layouts, so only `candidate` and
    /// `employee` accept a non-canonical revision; `legacy` is candidate-only.
    ///
    /// # Errors
    ///
    /// Returns `SchemaError::Migration` for an unsupported shape/revision pair,
    /// otherwise the same errors as [`SchemaRegistry::validate`].
    pub fn validate_revision(
        &self,
        name: &str,
        revision: CandidateRevision,
        raw: &Value,
    ) -> Result<Record, SchemaError> {
        let supported = match revision {
            CandidateRevision::V2 => true,
            CandidateRevision::V1 => matches!(name, "candidate" | "employee"),
            CandidateRevision::Legacy => name == "candidate",
        };
        if !supported {
            self.entry(name)?;
            return Err(SchemaError::Migration {
                shape: name.to_string(),
                revision: revision.as_str(),
                message: "revision does not apply to this shape".to_string(),
            });
        }
        let migrated = revision.migrate(name, raw.clone())?;
        self.validate(name, &migrated)
    }

    /// Detect the candidate revision of `raw` and validate through it.
    ///
    /// # Errors
    ///
    /// Same as [`SchemaRegistry::validate_revision`].
    pub fn validate_detected(&self, name: &str, raw: &Value) -> Result<Record, SchemaError> {
        let revision = if name == "candidate" {
            CandidateRevision::detect(raw)
        } else {
            CandidateRevision::CANONICAL
        };
        self.validate_revision(name, revision, raw)
    }

    /// Classify a candidate payload.
    #[must_use]
    pub fn detect_revision(&self, raw: &Value) -> CandidateRevision {
        CandidateRevision::detect(raw)
    }

    /// List all registered shape names.
    #[must_use]
    pub fn list(&self) -> Vec<&'static str> {
        let mut names: Vec<&'static str> = self.shapes.keys().copied().collect();
        names.sort_unstable();
        names
    }

    /// Number of registered shapes.
    #[must_use]
    pub fn shape_count(&self) -> usize {
        self.shapes.len()
    }
}
