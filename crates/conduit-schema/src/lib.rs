//! # conduit-schema
//!
//! Named shapes, validation, and revision migration for Conduit records.
//!
//! This crate provides:
//! - `SchemaRegistry`: every record shape by name, with its JSON Schema and a
//!   compiled validator
//! - Field-level validation errors (`FieldIssue`) with dotted/indexed paths
//! - Typed decoding with defaults applied and unknown keys preserved
//! - Candidate revision detection and migration into the canonical shape
//!
//! ## Architecture
//!
//! Record types are defined in `conduit-core` with `#[derive(JsonSchema)]`.
//! Validation runs in two phases: the generated JSON Schema reports every
//! structural problem at once, then serde builds the typed value.

pub mod error;
mod issues;
pub mod registry;
pub mod revision;
pub mod shape;

pub use error::{FieldIssue, SchemaError, ValidationError};
pub use registry::SchemaRegistry;
pub use revision::CandidateRevision;
pub use shape::{Record, Shape};
