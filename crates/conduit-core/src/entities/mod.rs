//! Record shapes consumed by the HR, investigation, and tax front ends.
//!
//! Every struct derives `Serialize`, `Deserialize`, and `JsonSchema`; the
//! generated schemas back the `conduit-schema` registry. Wire names follow
//! the upstream APIs, so some records are snake_case and others camelCase.

mod candidate;
mod chat;
mod employee;
mod fraud_case;
mod job;
mod profile;
mod structured;
mod upload;

pub use candidate::Candidate;
pub use chat::{ChatHistory, ChatMessage, ChatReply, ChatRequest, ConversationTurn};
pub use employee::Employee;
pub use fraud_case::{
    ApplicableLaw, CaseAnalysis, CaseFile, CaseNote, FileMetadata, FraudCase, GraphEdge,
    GraphNode, KnowledgeGraph, NewCase,
};
pub use job::{HiringTeam, Job, TeamMember};
pub use profile::{
    Address, BriefData, Discrepancy, DocumentRef, Education, FamilyMember, Interview,
    InterviewScore, LegalDocument, Note, OfferingLetter, ResumeContent, ResumeDocument, Salary,
    SalaryFactor, SalaryRange, WorkExperience,
};
pub use structured::{
    BoundingBox, ExtractedContent, FamilyMemberDetail, KartuKeluargaStructured, KtpStructured,
};
pub use upload::UploadedFile;
