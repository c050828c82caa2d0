//! Candidate revisions and their migration into the canonical shape.
//!
//! Three layouts of the candidate record exist in stored data:
//!
//! - `legacy`: `role`, `appliedDate`, capitalized pipeline statuses, a single
//!   `education` object, a string `address`, `avatar`, `birthdate`
//! - `v1`: camelCase `legalDocuments[]` entries (`lastUpdated`, `extractedContent`)
//! - `v2`: the canonical snake_case layout of [`conduit_core::entities::Candidate`]
//!
//! Migrations operate on raw JSON and run before validation, so any field a
//! migration cannot repair still surfaces as a normal field issue.

use std::fmt;
use std::str::FromStr;

use serde_json::{Map, Value, json};

use crate::error::SchemaError;

/// A historical layout of the candidate record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CandidateRevision {
    Legacy,
    V1,
    V2,
}

impl CandidateRevision {
    pub const ALL: [Self; 3] = [Self::Legacy, Self::V1, Self::V2];

    /// The revision every other one migrates into.
    pub const CANONICAL: Self = Self::V2;

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Legacy => "legacy",
            Self::V1 => "v1",
            Self::V2 => "v2",
        }
    }

    /// Classify a raw payload by the keys it carries.
    ///
    /// Legacy records never carried `candidate_id`, so a payload with one is
    /// at least `v1`. Otherwise a legacy key, an `education` object or a
    /// string `address` marks it legacy. Status spelling alone is not
    /// evidence: a capitalized status on a current record is an error.
    #[must_use]
    pub fn detect(raw: &Value) -> Self {
        let Some(map) = raw.as_object() else {
            return Self::V2;
        };

        if !map.contains_key("candidate_id") {
            let legacy_keys = ["role", "appliedDate", "avatar", "birthdate"]
                .iter()
                .any(|k| map.contains_key(*k));
            let legacy_education = map.get("education").is_some_and(Value::is_object);
            let legacy_address = map.get("address").is_some_and(Value::is_string);
            if legacy_keys || legacy_education || legacy_address {
                return Self::Legacy;
            }
        }

        let camel_documents = map.contains_key("legalDocuments")
            || map
                .get("legal_documents")
                .and_then(Value::as_array)
                .is_some_and(|docs| docs.iter().any(is_camel_document));
        if camel_documents {
            return Self::V1;
        }

        Self::V2
    }

    /// Rewrite `raw` from this revision into the canonical layout.
    ///
    /// # Errors
    ///
    /// Returns `SchemaError::Migration` when the payload is not a JSON object.
    pub fn migrate(self, shape: &str, raw: Value) -> Result<Value, SchemaError> {
        if self == Self::CANONICAL {
            return Ok(raw);
        }
        let Value::Object(mut map) = raw else {
            return Err(SchemaError::Migration {
                shape: shape.to_string(),
                revision: self.as_str(),
                message: "payload is not an object".to_string(),
            });
        };
        if self == Self::Legacy {
            legacy_to_v1(&mut map);
        }
        v1_to_v2(&mut map);
        Ok(Value::Object(map))
    }
}

impl fmt::Display for CandidateRevision {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for CandidateRevision {
    type Err = SchemaError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .iter()
            .copied()
            .find(|r| r.as_str() == s)
            .ok_or_else(|| SchemaError::UnknownRevision(s.to_string()))
    }
}

// ---------------------------------------------------------------------------
// legacy -> v1
// ---------------------------------------------------------------------------

fn legacy_status(status: &str) -> Option<&'static str> {
    match status {
        "New" => Some("applied"),
        "Screening" => Some("reviewing"),
        "Interview" | "Offer" => Some("shortlisted"),
        "Hired" => Some("hired"),
        "Rejected" => Some("rejected"),
        _ => None,
    }
}

/// Move `from` to `to` unless `to` is already set.
fn rename_key(map: &mut Map<String, Value>, from: &str, to: &str) {
    if let Some(value) = map.remove(from) {
        map.entry(to).or_insert(value);
    }
}

fn legacy_to_v1(map: &mut Map<String, Value>) {
    rename_key(map, "role", "position");
    rename_key(map, "appliedDate", "applied_date");
    rename_key(map, "avatar", "photo_url");
    rename_key(map, "birthdate", "date_of_birth");

    if let Some(mapped) = map
        .get("status")
        .and_then(Value::as_str)
        .and_then(legacy_status)
    {
        map.insert("status".to_string(), Value::String(mapped.to_string()));
    }

    if let Some(Value::Object(edu)) = map.get("education") {
        let graduation_year = edu
            .get("graduationYear")
            .and_then(|v| match v {
                Value::Number(n) => n.as_i64(),
                Value::String(s) => s.trim().parse::<i64>().ok(),
                _ => None,
            })
            .unwrap_or(0);
        let text = |key: &str| edu.get(key).cloned().unwrap_or_else(|| json!(""));
        let migrated = json!([{
            "institution": text("university"),
            "degree": text("qualification"),
            "field_of_study": "",
            "graduation_year": graduation_year,
            "gpa": 0.0,
        }]);
        map.insert("education".to_string(), migrated);
    }

    if let Some(Value::String(detail)) = map.get("address") {
        let address = json!({"detail": detail, "city": "", "country": ""});
        map.insert("address".to_string(), address);
    }

    if !map.contains_key("candidate_id") {
        if let Some(id) = map.get("id").cloned() {
            map.insert("candidate_id".to_string(), id);
        }
    }
}

// ---------------------------------------------------------------------------
// v1 -> v2
// ---------------------------------------------------------------------------

fn is_camel_document(doc: &Value) -> bool {
    doc.get("lastUpdated").is_some() || doc.get("extractedContent").is_some()
}

fn snake_document(doc: Value) -> Value {
    match doc {
        Value::Object(mut entry) => {
            rename_key(&mut entry, "lastUpdated", "last_updated");
            rename_key(&mut entry, "extractedContent", "extracted_content");
            Value::Object(entry)
        }
        other => other,
    }
}

fn take_documents(map: &mut Map<String, Value>, key: &str) -> Vec<Value> {
    match map.remove(key) {
        Some(Value::Array(docs)) => docs.into_iter().map(snake_document).collect(),
        Some(Value::Null) | None => Vec::new(),
        Some(other) => vec![other],
    }
}

fn v1_to_v2(map: &mut Map<String, Value>) {
    if !map.contains_key("legalDocuments") && !map.contains_key("legal_documents") {
        return;
    }
    let mut documents = take_documents(map, "legal_documents");
    for doc in take_documents(map, "legalDocuments") {
        if !documents.contains(&doc) {
            documents.push(doc);
        }
    }
    map.insert("legal_documents".to_string(), Value::Array(documents));
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    #[rstest]
    #[case(json!({"id": "1", "candidate_id": "c", "name": "A"}), CandidateRevision::V2)]
    #[case(json!({"id": "1", "name": "A", "role": "Dev"}), CandidateRevision::Legacy)]
    #[case(json!({"id": "1", "name": "A", "status": "Screening"}), CandidateRevision::V2)]
    #[case(json!({"id": "1", "candidate_id": "c", "name": "A", "status": "Hired"}), CandidateRevision::V2)]
    #[case(json!({"id": "1", "candidate_id": "c", "name": "A", "role": "bot"}), CandidateRevision::V2)]
    #[case(json!({"id": "1", "name": "A", "education": {"university": "UI"}}), CandidateRevision::Legacy)]
    #[case(json!({"id": "1", "name": "A", "address": "Jl. Mawar"}), CandidateRevision::Legacy)]
    #[case(json!({"id": "1", "candidate_id": "c", "name": "A", "legalDocuments": []}), CandidateRevision::V1)]
    #[case(
        json!({"id": "1", "candidate_id": "c", "name": "A",
               "legal_documents": [{"type": "KTP", "name": "k", "url": "u", "lastUpdated": "d"}]}),
        CandidateRevision::V1
    )]
    #[case(json!("not an object"), CandidateRevision::V2)]
    fn detects_revision(#[case] raw: Value, #[case] expected: CandidateRevision) {
        assert_eq!(CandidateRevision::detect(&raw), expected);
    }

    #[test]
    fn legacy_fields_move_to_canonical_names() {
        let raw = json!({
            "id": "17",
            "name": "Rina",
            "email": "rina@example.com",
            "phone": "0812",
            "role": "Accountant",
            "status": "Offer",
            "appliedDate": "2024-02-01",
            "avatar": "https://img/rina.png",
            "birthdate": "1993-07-04",
            "address": "Jl. Kenanga 5",
            "education": {"university": "UGM", "qualification": "S1", "graduationYear": "2015"},
            "score": 87
        });
        let migrated = CandidateRevision::Legacy.migrate("candidate", raw).unwrap();
        assert_eq!(
            migrated,
            json!({
                "id": "17",
                "candidate_id": "17",
                "name": "Rina",
                "email": "rina@example.com",
                "phone": "0812",
                "position": "Accountant",
                "status": "shortlisted",
                "applied_date": "2024-02-01",
                "photo_url": "https://img/rina.png",
                "date_of_birth": "1993-07-04",
                "address": {"detail": "Jl. Kenanga 5", "city": "", "country": ""},
                "education": [{
                    "institution": "UGM",
                    "degree": "S1",
                    "field_of_study": "",
                    "graduation_year": 2015,
                    "gpa": 0.0
                }],
                "score": 87
            })
        );
    }

    #[test]
    fn v1_documents_are_snake_cased_and_merged() {
        let doc = json!({"type": "KTP", "name": "ktp", "url": "u", "lastUpdated": "2024-01-01"});
        let raw = json!({
            "id": "1", "candidate_id": "c", "name": "A",
            "legal_documents": [doc.clone()],
            "legalDocuments": [doc, {"type": "NPWP", "name": "npwp", "url": "v", "lastUpdated": "2024-02-02",
                                     "extractedContent": {"content": "x"}}]
        });
        let migrated = CandidateRevision::V1.migrate("candidate", raw).unwrap();
        assert!(migrated.get("legalDocuments").is_none());
        assert_eq!(
            migrated["legal_documents"],
            json!([
                {"type": "KTP", "name": "ktp", "url": "u", "last_updated": "2024-01-01"},
                {"type": "NPWP", "name": "npwp", "url": "v", "last_updated": "2024-02-02",
                 "extracted_content": {"content": "x"}}
            ])
        );
    }

    #[test]
    fn canonical_payload_is_untouched() {
        let raw = json!({"id": "1", "candidate_id": "c", "name": "A", "role": "kept"});
        let migrated = CandidateRevision::V2.migrate("candidate", raw.clone()).unwrap();
        assert_eq!(migrated, raw);
    }

    #[test]
    fn non_object_cannot_be_migrated() {
        let err = CandidateRevision::Legacy
            .migrate("candidate", json!([1]))
            .unwrap_err();
        assert!(matches!(err, SchemaError::Migration { revision: "legacy", .. }));
    }

    #[test]
    fn revision_names_parse() {
        assert_eq!("v1".parse::<CandidateRevision>().unwrap(), CandidateRevision::V1);
        assert!(matches!(
            "v3".parse::<CandidateRevision>(),
            Err(SchemaError::UnknownRevision(_))
        ));
    }
}
