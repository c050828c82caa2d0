//! # conduit-core
//!
//! Record shapes, enums, envelopes, and error types for Conduit.
//!
//! This crate provides the foundational types shared across all Conduit crates:
//! - Entity structs for the HR, investigation, and chat records the UIs consume
//! - Categorical enums with their exact wire spellings
//! - The `{status, message, data}` upstream envelope and the uniform error body
//! - The extension bag that carries pass-through keys on open records
//! - Serde helpers for null-tolerant collections
//!
//! Every entity derives `JsonSchema`; `conduit-schema` turns those derives into
//! the validation registry.

pub mod entities;
pub mod envelope;
pub mod enums;
pub mod errors;
pub mod extensions;
pub mod nullable;
