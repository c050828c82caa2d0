use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use super::profile::{
    Address, Discrepancy, Education, FamilyMember, LegalDocument, Note, OfferingLetter,
    ResumeDocument, Salary, WorkExperience,
};
use crate::enums::EmployeeStatus;
use crate::extensions::Extensions;
use crate::nullable::vec_or_empty;

/// A hired employee. Same profile layout as [`super::Candidate`] without the
/// interview record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct Employee {
    pub id: String,
    pub employee_id: String,
    pub name: String,
    pub photo_url: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub position: Option<String>,
    pub status: Option<EmployeeStatus>,
    pub joined_date: Option<String>,
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
    pub salary: Option<Salary>,
    #[serde(default, deserialize_with = "vec_or_empty")]
    #[schemars(with = "Option<Vec<Discrepancy>>")]
    pub discrepancies: Vec<Discrepancy>,
    #[serde(flatten)]
    pub extensions: Extensions,
}
