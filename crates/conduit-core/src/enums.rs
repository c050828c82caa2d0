//! Categorical enums for Conduit records.
//!
//! Every enum serializes with the exact spelling the upstream APIs and UIs
//! use. Matching is case-sensitive: `"Applied"` is not a candidate status.
//! Each enum exposes `as_str()`, `ALL`, `Display`, and `FromStr`.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::errors::CoreError;

/// Implements `Display` and `FromStr` on top of `as_str()` and `ALL`.
macro_rules! wire_enum {
    ($ty:ident, $kind:literal) => {
        impl fmt::Display for $ty {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl FromStr for $ty {
            type Err = CoreError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                Self::ALL
                    .iter()
                    .copied()
                    .find(|v| v.as_str() == s)
                    .ok_or_else(|| CoreError::UnknownVariant {
                        kind: $kind,
                        value: s.to_string(),
                    })
            }
        }
    };
}

// ---------------------------------------------------------------------------
// CandidateStatus
// ---------------------------------------------------------------------------

/// Hiring pipeline stage of a candidate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum CandidateStatus {
    Applied,
    Reviewing,
    Shortlisted,
    Rejected,
    Hired,
}

impl CandidateStatus {
    pub const ALL: [Self; 5] = [
        Self::Applied,
        Self::Reviewing,
        Self::Shortlisted,
        Self::Rejected,
        Self::Hired,
    ];

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Applied => "applied",
            Self::Reviewing => "reviewing",
            Self::Shortlisted => "shortlisted",
            Self::Rejected => "rejected",
            Self::Hired => "hired",
        }
    }
}

wire_enum!(CandidateStatus, "candidate status");

// ---------------------------------------------------------------------------
// EmployeeStatus
// ---------------------------------------------------------------------------

/// Employment status of an employee.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum EmployeeStatus {
    Active,
    Inactive,
}

impl EmployeeStatus {
    pub const ALL: [Self; 2] = [Self::Active, Self::Inactive];

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Active => "active",
            Self::Inactive => "inactive",
        }
    }
}

wire_enum!(EmployeeStatus, "employee status");

// ---------------------------------------------------------------------------
// Severity
// ---------------------------------------------------------------------------

/// Severity of a discrepancy between applicant data and a legal document.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, JsonSchema,
)]
#[serde(rename_all = "snake_case")]
pub enum Severity {
    Low,
    Medium,
    High,
}

impl Severity {
    pub const ALL: [Self; 3] = [Self::Low, Self::Medium, Self::High];

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Low => "low",
            Self::Medium => "medium",
            Self::High => "high",
        }
    }
}

wire_enum!(Severity, "severity");

// ---------------------------------------------------------------------------
// JobType
// ---------------------------------------------------------------------------

/// Employment type of a job posting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
pub enum JobType {
    #[serde(rename = "Full-time")]
    FullTime,
    #[serde(rename = "Part-time")]
    PartTime,
    Contract,
    Internship,
}

impl JobType {
    pub const ALL: [Self; 4] = [
        Self::FullTime,
        Self::PartTime,
        Self::Contract,
        Self::Internship,
    ];

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::FullTime => "Full-time",
            Self::PartTime => "Part-time",
            Self::Contract => "Contract",
            Self::Internship => "Internship",
        }
    }
}

wire_enum!(JobType, "job type");

// ---------------------------------------------------------------------------
// JobStatus
// ---------------------------------------------------------------------------

/// Publication status of a job posting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
pub enum JobStatus {
    Open,
    Closed,
    Draft,
}

impl JobStatus {
    pub const ALL: [Self; 3] = [Self::Open, Self::Closed, Self::Draft];

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Open => "Open",
            Self::Closed => "Closed",
            Self::Draft => "Draft",
        }
    }
}

wire_enum!(JobStatus, "job status");

// ---------------------------------------------------------------------------
// CaseStatus
// ---------------------------------------------------------------------------

/// Status of a fraud case through its analysis lifecycle.
///
/// ```text
/// pending → analyzing → completed → archived
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum CaseStatus {
    #[default]
    Pending,
    Analyzing,
    Completed,
    Archived,
}

impl CaseStatus {
    pub const ALL: [Self; 4] = [
        Self::Pending,
        Self::Analyzing,
        Self::Completed,
        Self::Archived,
    ];

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Analyzing => "analyzing",
            Self::Completed => "completed",
            Self::Archived => "archived",
        }
    }
}

wire_enum!(CaseStatus, "case status");

// ---------------------------------------------------------------------------
// ChatRole
// ---------------------------------------------------------------------------

/// Author of a chat message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum ChatRole {
    User,
    Assistant,
}

impl ChatRole {
    pub const ALL: [Self; 2] = [Self::User, Self::Assistant];

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::User => "user",
            Self::Assistant => "assistant",
        }
    }
}

wire_enum!(ChatRole, "chat role");

// ---------------------------------------------------------------------------
// EnvelopeStatus
// ---------------------------------------------------------------------------

/// Outcome flag carried in the upstream `{status, message, data}` envelope.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
pub enum EnvelopeStatus {
    Success,
    Error,
}

impl EnvelopeStatus {
    pub const ALL: [Self; 2] = [Self::Success, Self::Error];

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Success => "Success",
            Self::Error => "Error",
        }
    }
}

wire_enum!(EnvelopeStatus, "envelope status");

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn serde_matches_as_str() {
        for status in CandidateStatus::ALL {
            let json = serde_json::to_value(status).unwrap();
            assert_eq!(json, status.as_str());
        }
        for kind in JobType::ALL {
            let json = serde_json::to_value(kind).unwrap();
            assert_eq!(json, kind.as_str());
        }
        for status in CaseStatus::ALL {
            let json = serde_json::to_value(status).unwrap();
            assert_eq!(json, status.as_str());
        }
    }

    #[test]
    fn from_str_is_case_sensitive() {
        assert_eq!("hired".parse::<CandidateStatus>().unwrap(), CandidateStatus::Hired);
        assert!("Hired".parse::<CandidateStatus>().is_err());
        assert_eq!("Full-time".parse::<JobType>().unwrap(), JobType::FullTime);
        assert!("full-time".parse::<JobType>().is_err());
    }

    #[test]
    fn unknown_variant_names_the_kind() {
        let err = "frozen".parse::<EmployeeStatus>().unwrap_err();
        assert_eq!(err.to_string(), "Unknown employee status value: 'frozen'");
    }

    #[test]
    fn severity_orders_low_to_high() {
        assert!(Severity::Low < Severity::Medium);
        assert!(Severity::Medium < Severity::High);
    }

    #[test]
    fn case_status_defaults_to_pending() {
        assert_eq!(CaseStatus::default(), CaseStatus::Pending);
    }
}
