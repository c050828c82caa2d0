//! Multi-step investigation workflows built on the forwarder.

use conduit_core::entities::{NewCase, UploadedFile};
use serde::Serialize;
use serde_json::Value;

use crate::catalog::investigation;
use crate::error::ProxyError;
use crate::forwarder::Forwarder;
use crate::request::{FormPart, ProxyRequest};

/// Form field name the upload endpoint reads the file from.
const UPLOAD_FIELD: &str = "file";

/// An attachment that could not be uploaded after its case was created.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UploadFailure {
    pub filename: String,
    /// Upstream status, when the upstream answered at all.
    pub status: Option<u16>,
    pub message: String,
}

/// Result of creating a case with attachments.
///
/// Creation is not atomic: the case exists even when some uploads failed.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CaseCreation {
    /// The created case as the upstream returned it.
    pub case: Value,
    pub uploaded: Vec<UploadedFile>,
    pub failed: Vec<UploadFailure>,
}

impl CaseCreation {
    #[must_use]
    pub fn is_partial(&self) -> bool {
        !self.failed.is_empty()
    }
}

#[derive(Debug, Clone)]
pub struct CaseWorkflow {
    forwarder: Forwarder,
}

impl CaseWorkflow {
    #[must_use]
    pub const fn new(forwarder: Forwarder) -> Self {
        Self { forwarder }
    }

    /// Create a case, then upload each file to it in order.
    ///
    /// Uploads are best-effort. A failed upload is logged and reported in
    /// [`CaseCreation::failed`]; the remaining files are still sent.
    ///
    /// # Errors
    ///
    /// Returns an error only if the case itself cannot be created, or the
    /// upstream answers without a case `id`.
    pub async fn create_case_with_files(
        &self,
        new_case: &NewCase,
        files: Vec<FormPart>,
    ) -> Result<CaseCreation, ProxyError> {
        let body = serde_json::to_value(new_case)
            .map_err(|e| ProxyError::InvalidRequest(e.to_string()))?;
        let case = self
            .forwarder
            .forward(&investigation::CASE_CREATE, ProxyRequest::post().json(body))
            .await?;
        let case_id = case
            .get("id")
            .and_then(Value::as_str)
            .map(str::to_string)
            .ok_or_else(|| ProxyError::Decode("created case has no id".to_string()))?;

        let mut uploaded = Vec::new();
        let mut failed = Vec::new();
        for part in files {
            let filename = part.filename.clone().unwrap_or_else(|| part.name.clone());
            let part = FormPart {
                name: UPLOAD_FIELD.to_string(),
                ..part
            };
            let request = ProxyRequest::post()
                .param("case_id", case_id.as_str())
                .multipart(vec![part]);
            match self
                .forwarder
                .forward_json::<UploadedFile>(&investigation::UPLOAD_FILE, request)
                .await
            {
                Ok(file) => uploaded.push(file),
                Err(e) => {
                    tracing::warn!(%case_id, %filename, error = %e, "attachment upload failed");
                    let status = match &e {
                        ProxyError::Upstream { status, .. } => Some(*status),
                        _ => None,
                    };
                    failed.push(UploadFailure {
                        filename,
                        status,
                        message: e.to_string(),
                    });
                }
            }
        }

        if !failed.is_empty() {
            tracing::warn!(
                %case_id,
                uploaded = uploaded.len(),
                failed = failed.len(),
                "case created with partial uploads"
            );
        }
        Ok(CaseCreation {
            case,
            uploaded,
            failed,
        })
    }
}
