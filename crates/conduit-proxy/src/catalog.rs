//! Upstream endpoint catalog, one module per backend.
//!
//! Messages are the exact strings the front ends display.

/// HR backend (candidates, employees, document intake).
pub mod hris {
    use crate::endpoint::Endpoint;

    pub const CANDIDATES: Endpoint = Endpoint::new(
        "hris.candidates",
        "/api/v1/hr/candidates",
        "Failed to fetch candidates",
    );

    /// Any method is forwarded as-is.
    pub const CANDIDATE: Endpoint = Endpoint::new(
        "hris.candidate",
        "/api/v1/hr/candidate/{id}",
        "Failed to process candidate request",
    )
    .missing("Candidate ID is required");

    /// Any method is forwarded as-is.
    pub const EMPLOYEE: Endpoint = Endpoint::new(
        "hris.employee",
        "/api/v1/hr/employee/{id}",
        "Failed to process employee request",
    )
    .missing("Employee ID is required");

    pub const DOCUMENT_UPLOAD: Endpoint = Endpoint::new(
        "hris.document_upload",
        "/api/v1/hr/document/upload",
        "Upload failed",
    )
    .relay_status()
    .raw();

    /// `{kind}` is e.g. `offering-letter` or `offering-signature`.
    pub const DOCUMENT_ANALYZE: Endpoint = Endpoint::new(
        "hris.document_analyze",
        "/api/v1/document/analyze/{kind}",
        "Document analysis failed",
    )
    .missing("Document kind is required")
    .raw();
}

/// Fraud-investigation backend (cases, notes, chat, attachments).
pub mod investigation {
    use crate::endpoint::Endpoint;

    pub const CASES: Endpoint =
        Endpoint::new("investigation.cases", "/api/v1/cases", "Failed to fetch cases");

    pub const CASE_CREATE: Endpoint = Endpoint::new(
        "investigation.case_create",
        "/api/v1/cases",
        "Failed to create case",
    );

    /// GET, PUT and DELETE.
    pub const CASE: Endpoint = Endpoint::new(
        "investigation.case",
        "/api/v1/cases/{id}",
        "Failed to process case request",
    )
    .missing("Case ID is required");

    pub const CASE_ANALYSIS: Endpoint = Endpoint::new(
        "investigation.case_analysis",
        "/api/v1/cases/{id}/analysis",
        "Failed to analyze case",
    )
    .missing("Case ID is required");

    pub const CASE_NOTES: Endpoint = Endpoint::new(
        "investigation.case_notes",
        "/api/v1/cases/{id}/notes",
        "Failed to add note",
    )
    .missing("Case ID is required");

    pub const CASE_NOTE: Endpoint = Endpoint::new(
        "investigation.case_note",
        "/api/v1/cases/{id}/notes/{note_id}",
        "Failed to delete note",
    )
    .missing("Case ID and note ID are required");

    pub const CASE_CHAT: Endpoint = Endpoint::new(
        "investigation.case_chat",
        "/api/v1/cases/{id}/chat",
        "Failed to send message",
    )
    .missing("Case ID is required");

    pub const UPLOAD_FILE: Endpoint = Endpoint::new(
        "investigation.upload_file",
        "/api/v1/upload/file/{case_id}",
        "Upload failed",
    )
    .missing("Case ID is required")
    .relay_status();

    pub const LIST_FILES: Endpoint = Endpoint::new(
        "investigation.list_files",
        "/api/v1/upload/files/{case_id}",
        "Failed to list files",
    )
    .missing("Case ID is required");

    pub const DELETE_FILE: Endpoint = Endpoint::new(
        "investigation.delete_file",
        "/api/v1/upload/file/{case_id}/{blob_name}",
        "Failed to delete file",
    )
    .missing("Case ID and blob name are required");
}

/// Tax backend. Documents are fetched by absolute URL, so the path is empty.
pub mod tax {
    use crate::endpoint::Endpoint;

    pub const PROXY_PDF: Endpoint = Endpoint::new("tax.proxy_pdf", "", "Failed to fetch PDF")
        .missing("Missing url parameter")
        .raw();
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::endpoint::{ResponseMode, StatusPolicy};

    #[test]
    fn uploads_relay_status() {
        assert_eq!(hris::DOCUMENT_UPLOAD.status, StatusPolicy::Relay);
        assert_eq!(investigation::UPLOAD_FILE.status, StatusPolicy::Relay);
        assert_eq!(hris::CANDIDATE.status, StatusPolicy::Fixed);
    }

    #[test]
    fn document_endpoints_return_raw_bodies() {
        assert_eq!(hris::DOCUMENT_UPLOAD.response, ResponseMode::Raw);
        assert_eq!(hris::DOCUMENT_ANALYZE.response, ResponseMode::Raw);
        assert_eq!(investigation::CASES.response, ResponseMode::Unwrap);
    }

    #[test]
    fn note_endpoint_needs_both_ids() {
        let params: Vec<_> = investigation::CASE_NOTE.params().collect();
        assert_eq!(params, vec!["id", "note_id"]);
    }
}
