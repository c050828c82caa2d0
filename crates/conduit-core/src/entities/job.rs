use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use super::profile::SalaryRange;
use crate::enums::{JobStatus, JobType};
use crate::nullable::vec_or_empty;

/// A job posting. Keys are camelCase on the wire.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct Job {
    pub id: String,
    pub title: String,
    pub department: String,
    pub location: String,
    #[serde(rename = "type")]
    pub kind: JobType,
    pub status: JobStatus,
    pub posted_date: String,
    pub applicants: u32,
    pub description: Option<String>,
    #[serde(default, deserialize_with = "vec_or_empty")]
    #[schemars(with = "Option<Vec<String>>")]
    pub requirements: Vec<String>,
    pub salary: Option<SalaryRange>,
    #[serde(default, deserialize_with = "vec_or_empty")]
    #[schemars(with = "Option<Vec<String>>")]
    pub skills: Vec<String>,
    #[serde(default, deserialize_with = "vec_or_empty")]
    #[schemars(with = "Option<Vec<String>>")]
    pub benefits: Vec<String>,
    pub hiring_team: Option<HiringTeam>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct HiringTeam {
    pub hiring_manager: TeamMember,
    pub recruiter: TeamMember,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct TeamMember {
    pub name: String,
    pub avatar: Option<String>,
}
