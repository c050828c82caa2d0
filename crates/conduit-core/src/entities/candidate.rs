use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use super::profile::{
    Address, Discrepancy, Education, FamilyMember, Interview, LegalDocument, Note,
    OfferingLetter, ResumeDocument, Salary, WorkExperience,
};
use crate::enums::CandidateStatus;
use crate::extensions::Extensions;
use crate::nullable::vec_or_empty;

/// A job applicant tracked by the HR front end.
///
/// Array fields are never null after deserialization: absent or `null`
/// becomes an empty `Vec`. Keys not declared here land in `extensions`
/// and are written back unchanged.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct Candidate {
    pub id: String,
    pub candidate_id: String,
    pub name: String,
    pub photo_url: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub position: Option<String>,
    pub status: Option<CandidateStatus>,
    pub applied_date: Option<String>,
    /// Years of experience.
    pub experience: Option<f64>,
    #[serde(default, deserialize_with = "vec_or_empty")]
    #[schemars(with = "Option<Vec<String>>")]
    pub skills: Vec<String>,
    #[schemars(range(min = 0, max = 5))]
    pub rating: Option<f64>,
    #[serde(default, deserialize_with = "vec_or_empty")]
    #[schemars(with = "Option<Vec<Note>>")]
    pub notes: Vec<Note>,
    pub gender: Option<String>,
    pub date_of_birth: Option<String>,
    pub address: Option<Address>,
    #[serde(default, deserialize_with = "vec_or_empty")]
    #[schemars(with = "Option<Vec<Education>>")]
    pub education: Vec<Education>,
    #[serde(default, deserialize_with = "vec_or_empty")]
    #[schemars(with = "Option<Vec<WorkExperience>>")]
    pub work_experiences: Vec<WorkExperience>,
    #[serde(default, deserialize_with = "vec_or_empty")]
    #[schemars(with = "Option<Vec<FamilyMember>>")]
    pub family_members: Vec<FamilyMember>,
    #[serde(default, deserialize_with = "vec_or_empty")]
    #[schemars(with = "Option<Vec<LegalDocument>>")]
    pub legal_documents: Vec<LegalDocument>,
    pub resume: Option<ResumeDocument>,
    pub offering_letter: Option<OfferingLetter>,
    pub interview: Option<Interview>,
    pub salary: Option<Salary>,
    #[serde(default, deserialize_with = "vec_or_empty")]
    #[schemars(with = "Option<Vec<Discrepancy>>")]
    pub discrepancies: Vec<Discrepancy>,
    #[serde(flatten)]
    pub extensions: Extensions,
}

impl Candidate {
    /// A candidate with only the required fields set.
    #[must_use]
    pub fn new(
        id: impl Into<String>,
        candidate_id: impl Into<String>,
        name: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            candidate_id: candidate_id.into(),
            name: name.into(),
            photo_url: None,
            email: None,
            phone: None,
            position: None,
            status: None,
            applied_date: None,
            experience: None,
            skills: Vec::new(),
            rating: None,
            notes: Vec::new(),
            gender: None,
            date_of_birth: None,
            address: None,
            education: Vec::new(),
            work_experiences: Vec::new(),
            family_members: Vec::new(),
            legal_documents: Vec::new(),
            resume: None,
            offering_letter: None,
            interview: None,
            salary: None,
            discrepancies: Vec::new(),
            extensions: Extensions::new(),
        }
    }
}
