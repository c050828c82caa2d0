//! Sub-records shared by candidates and employees.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use super::structured::ExtractedContent;
use crate::enums::Severity;
use crate::nullable::vec_or_empty;

/// A reviewer note attached to a person record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct Note {
    pub author: String,
    pub role: String,
    pub message: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct Address {
    pub detail: String,
    pub city: String,
    pub country: String,
    pub zip: Option<u32>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct Education {
    pub institution: String,
    pub degree: String,
    pub field_of_study: String,
    pub graduation_year: i32,
    pub gpa: f64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct WorkExperience {
    pub company: String,
    pub position: String,
    pub start_date: String,
    /// `None` while the position is ongoing.
    pub end_date: Option<String>,
    #[serde(default)]
    pub is_current: bool,
    pub description: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct FamilyMember {
    pub name: String,
    pub relationship: String,
    pub date_of_birth: Option<String>,
    pub brief_data: Option<BriefData>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct BriefData {
    pub occupation: Option<String>,
    pub contact: Option<String>,
}

// ---------------------------------------------------------------------------
// Documents
// ---------------------------------------------------------------------------

/// An identity or legal document with its extraction result.
///
/// This is the snake_case form. The earlier camelCase form
/// (`lastUpdated`, `extractedContent`) is migrated by `conduit-schema`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct LegalDocument {
    #[serde(rename = "type")]
    pub kind: String,
    pub name: String,
    pub url: String,
    pub last_updated: String,
    pub extracted_content: Option<ExtractedContent>,
}

fn default_resume_kind() -> String {
    "RESUME".to_string()
}

/// The uploaded CV. Keys are camelCase on the wire.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct ResumeDocument {
    #[serde(rename = "type", default = "default_resume_kind")]
    pub kind: String,
    pub name: String,
    pub url: String,
    pub last_updated: String,
    pub extracted_content: Option<ResumeContent>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct ResumeContent {
    pub content: String,
    #[serde(default, deserialize_with = "vec_or_empty")]
    #[schemars(with = "Option<Vec<serde_json::Value>>")]
    pub tables: Vec<serde_json::Value>,
    #[serde(default, deserialize_with = "vec_or_empty")]
    #[schemars(with = "Option<Vec<serde_json::Value>>")]
    pub bounding_boxes: Vec<serde_json::Value>,
}

fn default_offering_letter_kind() -> String {
    "Signed Offering Letter".to_string()
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct OfferingLetter {
    #[serde(rename = "type", default = "default_offering_letter_kind")]
    pub kind: String,
    pub name: String,
    pub url: String,
    pub last_updated: String,
    pub extracted_content: Option<ExtractedContent>,
}

// ---------------------------------------------------------------------------
// Assessment
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct InterviewScore {
    pub label: String,
    pub value: f64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct Interview {
    pub summary: Option<String>,
    #[serde(default, deserialize_with = "vec_or_empty")]
    #[schemars(with = "Option<Vec<InterviewScore>>")]
    pub score_details: Vec<InterviewScore>,
    #[serde(default, deserialize_with = "vec_or_empty")]
    #[schemars(with = "Option<Vec<InterviewScore>>")]
    pub interview_scores: Vec<InterviewScore>,
    #[serde(default, deserialize_with = "vec_or_empty")]
    #[schemars(with = "Option<Vec<String>>")]
    pub signals: Vec<String>,
}

/// A `{min, max, currency}` band, used for salary market ranges and job postings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct SalaryRange {
    pub min: f64,
    pub max: f64,
    pub currency: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct SalaryFactor {
    pub name: String,
    pub value: String,
}

/// Salary expectation against the market, as assessed upstream.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct Salary {
    pub expectation: f64,
    pub market_range: Option<SalaryRange>,
    pub status: String,
    pub confidence: f64,
    pub analysis: String,
    #[serde(default, deserialize_with = "vec_or_empty")]
    #[schemars(with = "Option<Vec<SalaryFactor>>")]
    pub factors: Vec<SalaryFactor>,
}

/// One side of a discrepancy: which document and what it said.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct DocumentRef {
    #[serde(rename = "type")]
    pub kind: String,
    pub name: String,
    pub value: Option<String>,
}

/// A mismatch between applicant-provided data and a legal document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct Discrepancy {
    pub category: Option<String>,
    pub field: String,
    pub severity: Severity,
    pub note: Option<String>,
    pub source: Option<DocumentRef>,
    pub target: Option<DocumentRef>,
}
