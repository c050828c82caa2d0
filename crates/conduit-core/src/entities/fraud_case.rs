use std::collections::BTreeMap;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::enums::CaseStatus;
use crate::nullable::vec_or_empty;

/// A fraud investigation case.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct FraudCase {
    pub id: String,
    pub name: String,
    pub description: String,
    pub status: CaseStatus,
    #[serde(alias = "createdAt")]
    pub created_at: Option<String>,
    #[serde(alias = "updatedAt")]
    pub updated_at: Option<String>,
    #[serde(default, deserialize_with = "vec_or_empty")]
    #[schemars(with = "Option<Vec<CaseFile>>")]
    pub files: Vec<CaseFile>,
    pub analysis: Option<CaseAnalysis>,
    pub case_main_category: Option<String>,
    pub case_sub_category: Option<String>,
    #[serde(default, deserialize_with = "vec_or_empty")]
    #[schemars(with = "Option<Vec<ApplicableLaw>>")]
    pub applicable_laws: Vec<ApplicableLaw>,
    pub law_impact_analysis: Option<String>,
    #[serde(default, deserialize_with = "vec_or_empty")]
    #[schemars(with = "Option<Vec<String>>")]
    pub insights: Vec<String>,
    #[serde(default, deserialize_with = "vec_or_empty")]
    #[schemars(with = "Option<Vec<String>>")]
    pub recommendations: Vec<String>,
    #[serde(default, deserialize_with = "vec_or_empty")]
    #[schemars(with = "Option<Vec<CaseNote>>")]
    pub notes: Vec<CaseNote>,
    pub knowledge_graph: Option<KnowledgeGraph>,
}

/// A file attached to a case.
///
/// Older cases store a bare URL string; newer ones store metadata. The string
/// form is tried first.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(untagged)]
pub enum CaseFile {
    Reference(String),
    Metadata(FileMetadata),
}

impl CaseFile {
    /// The location of the file: the bare string, or the metadata URL.
    #[must_use]
    pub fn url(&self) -> &str {
        match self {
            Self::Reference(url) => url,
            Self::Metadata(meta) => &meta.url,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct FileMetadata {
    #[serde(default)]
    pub url: String,
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub format: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct CaseAnalysis {
    pub data_review: String,
    pub root_cause_analysis: String,
    pub hypothesis_testing: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct ApplicableLaw {
    pub law_name: String,
    #[serde(default, deserialize_with = "vec_or_empty")]
    #[schemars(with = "Option<Vec<String>>")]
    pub articles: Vec<String>,
    pub violation_description: String,
    pub penalty_level: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct CaseNote {
    pub id: Option<String>,
    pub content: String,
    pub created_at: Option<String>,
    pub author: Option<String>,
}

/// Entities and relations extracted from the case documents.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct KnowledgeGraph {
    #[serde(default)]
    pub nodes: BTreeMap<String, GraphNode>,
    #[serde(default)]
    pub edges: BTreeMap<String, GraphEdge>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct GraphNode {
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct GraphEdge {
    pub source: String,
    pub target: String,
    pub label: String,
}

/// Body sent upstream to open a new case.
///
/// `files` lists metadata for the attachments; their bytes are uploaded
/// separately once the case exists.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct NewCase {
    pub name: String,
    pub description: String,
    #[serde(default)]
    pub files: Vec<CaseFile>,
    #[serde(default)]
    pub status: CaseStatus,
}

impl NewCase {
    #[must_use]
    pub fn new(name: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            files: Vec::new(),
            status: CaseStatus::Pending,
        }
    }

    /// Describe an attachment by file name; the format is its extension.
    #[must_use]
    pub fn with_file(mut self, file_name: &str) -> Self {
        let format = file_name
            .rsplit_once('.')
            .map(|(_, ext)| ext.to_ascii_lowercase())
            .unwrap_or_default();
        self.files.push(CaseFile::Metadata(FileMetadata {
            url: String::new(),
            name: file_name.to_string(),
            description: String::new(),
            format,
        }));
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn case_file_prefers_string_form() {
        let files: Vec<CaseFile> = serde_json::from_value(json!([
            "https://blob/case-1/a.pdf",
            {"url": "https://blob/case-1/b.pdf", "name": "b.pdf", "description": "", "format": "pdf"}
        ]))
        .unwrap();
        assert!(matches!(files[0], CaseFile::Reference(_)));
        assert!(matches!(files[1], CaseFile::Metadata(_)));
        assert_eq!(files[1].url(), "https://blob/case-1/b.pdf");
    }

    #[test]
    fn metadata_defaults_missing_strings() {
        let file: CaseFile = serde_json::from_value(json!({"name": "x.pdf"})).unwrap();
        let CaseFile::Metadata(meta) = file else {
            panic!("expected metadata");
        };
        assert_eq!(meta.url, "");
        assert_eq!(meta.format, "");
    }

    #[test]
    fn attachments_are_described_by_extension() {
        let body = NewCase::new("n", "d").with_file("Ledger.XLSX").with_file("notes");
        assert_eq!(
            body.files,
            vec![
                CaseFile::Metadata(FileMetadata {
                    url: String::new(),
                    name: "Ledger.XLSX".into(),
                    description: String::new(),
                    format: "xlsx".into(),
                }),
                CaseFile::Metadata(FileMetadata {
                    url: String::new(),
                    name: "notes".into(),
                    description: String::new(),
                    format: String::new(),
                }),
            ]
        );
    }

    #[test]
    fn new_case_body_is_pending_with_no_files() {
        let body = serde_json::to_value(NewCase::new("Payroll", "Ghost employees")).unwrap();
        assert_eq!(
            body,
            json!({"name": "Payroll", "description": "Ghost employees", "files": [], "status": "pending"})
        );
    }
}
