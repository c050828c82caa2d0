use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// A file stored for a case by the investigation backend.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct UploadedFile {
    /// `{case_id}/{file name}` inside the storage container.
    pub blob_name: String,
    pub original_filename: String,
    pub case_id: String,
    pub size: u64,
    pub content_type: String,
    pub uploaded_at: String,
    pub url: String,
}
