//! Serde roundtrip and JsonSchema validation tests for the record shapes.

use std::collections::BTreeMap;

use chrono::Utc;
use conduit_core::entities::*;
use conduit_core::enums::*;
use conduit_core::envelope::{Envelope, ErrorBody};
use conduit_core::extensions::Extensions;
use pretty_assertions::assert_eq;
use schemars::schema_for;
use serde_json::json;

/// Validate a JSON value against a schemars-generated schema.
fn validate_against_schema(
    schema: &serde_json::Value,
    instance: &serde_json::Value,
) -> Vec<String> {
    let validator = jsonschema::validator_for(schema).expect("schema should be valid");
    validator
        .iter_errors(instance)
        .map(|e| format!("{e}"))
        .collect()
}

macro_rules! roundtrip_and_validate {
    ($name:ident, $ty:ty, $instance:expr) => {
        #[test]
        fn $name() {
            let val: $ty = $instance;

            let json_str = serde_json::to_string_pretty(&val).unwrap();
            let recovered: $ty = serde_json::from_str(&json_str).unwrap();
            assert_eq!(
                recovered,
                val,
                "serde roundtrip failed for {}",
                stringify!($ty)
            );

            let schema = serde_json::to_value(schema_for!($ty)).unwrap();
            let instance = serde_json::to_value(&val).unwrap();
            let errors = validate_against_schema(&schema, &instance);
            assert!(
                errors.is_empty(),
                "Schema validation failed for {}: {:?}",
                stringify!($ty),
                errors
            );
        }
    };
}

fn sample_candidate() -> Candidate {
    let mut candidate = Candidate::new("42", "CAND-042", "Siti Rahma");
    candidate.email = Some("siti@example.com".into());
    candidate.position = Some("Data Analyst".into());
    candidate.status = Some(CandidateStatus::Shortlisted);
    candidate.rating = Some(4.5);
    candidate.skills = vec!["SQL".into(), "Python".into()];
    candidate.address = Some(Address {
        detail: "Jl. Sudirman 1".into(),
        city: "Jakarta".into(),
        country: "Indonesia".into(),
        zip: Some(10_220),
    });
    candidate.education = vec![Education {
        institution: "Universitas Indonesia".into(),
        degree: "S1".into(),
        field_of_study: "Statistics".into(),
        graduation_year: 2019,
        gpa: 3.6,
    }];
    candidate.legal_documents = vec![LegalDocument {
        kind: "KTP".into(),
        name: "ktp.jpg".into(),
        url: "https://blob/ktp.jpg".into(),
        last_updated: "2024-03-01".into(),
        extracted_content: Some(ExtractedContent {
            content: Some("NIK 3171".into()),
            structured_data: Some(json!({"nik": "3171"})),
            ..ExtractedContent::default()
        }),
    }];
    candidate.discrepancies = vec![Discrepancy {
        category: Some("identity".into()),
        field: "date_of_birth".into(),
        severity: Severity::High,
        note: None,
        source: Some(DocumentRef {
            kind: "RESUME".into(),
            name: "cv.pdf".into(),
            value: Some("1995-01-02".into()),
        }),
        target: None,
    }];
    candidate.extensions.insert("embedding_version", json!(3));
    candidate
}

roundtrip_and_validate!(candidate_roundtrip, Candidate, sample_candidate());

roundtrip_and_validate!(
    employee_roundtrip,
    Employee,
    Employee {
        id: "7".into(),
        employee_id: "EMP-007".into(),
        name: "Andi".into(),
        photo_url: None,
        email: None,
        phone: Some("+62 812".into()),
        position: Some("Engineer".into()),
        status: Some(EmployeeStatus::Active),
        joined_date: Some("2022-01-10".into()),
        experience: Some(4.0),
        skills: vec![],
        rating: Some(0.0),
        notes: vec![Note {
            author: "HR".into(),
            role: "recruiter".into(),
            message: "Onboarded".into(),
        }],
        gender: None,
        date_of_birth: None,
        address: None,
        education: vec![],
        work_experiences: vec![WorkExperience {
            company: "Acme".into(),
            position: "Dev".into(),
            start_date: "2020-01".into(),
            end_date: None,
            is_current: true,
            description: None,
        }],
        family_members: vec![],
        legal_documents: vec![],
        resume: None,
        offering_letter: None,
        salary: Some(Salary {
            expectation: 15_000_000.0,
            market_range: Some(SalaryRange {
                min: 12_000_000.0,
                max: 18_000_000.0,
                currency: "IDR".into(),
            }),
            status: "within".into(),
            confidence: 0.8,
            analysis: "In range".into(),
            factors: vec![],
        }),
        discrepancies: vec![],
        extensions: Extensions::new(),
    }
);

roundtrip_and_validate!(
    job_roundtrip,
    Job,
    Job {
        id: "JOB-1".into(),
        title: "Backend Engineer".into(),
        department: "Engineering".into(),
        location: "Remote".into(),
        kind: JobType::FullTime,
        status: JobStatus::Open,
        posted_date: "2024-05-01".into(),
        applicants: 12,
        description: None,
        requirements: vec!["Rust".into()],
        salary: None,
        skills: vec![],
        benefits: vec![],
        hiring_team: Some(HiringTeam {
            hiring_manager: TeamMember {
                name: "Dewi".into(),
                avatar: None,
            },
            recruiter: TeamMember {
                name: "Rudi".into(),
                avatar: Some("https://img/rudi.png".into()),
            },
        }),
    }
);

roundtrip_and_validate!(
    fraud_case_roundtrip,
    FraudCase,
    FraudCase {
        id: "case-1".into(),
        name: "Vendor kickbacks".into(),
        description: "Inflated invoices".into(),
        status: CaseStatus::Completed,
        created_at: Some("2024-06-01T10:00:00Z".into()),
        updated_at: None,
        files: vec![
            CaseFile::Reference("https://blob/case-1/a.pdf".into()),
            CaseFile::Metadata(FileMetadata {
                url: "https://blob/case-1/b.xlsx".into(),
                name: "b.xlsx".into(),
                description: "ledger".into(),
                format: "xlsx".into(),
            }),
        ],
        analysis: Some(CaseAnalysis {
            data_review: "r".into(),
            root_cause_analysis: "c".into(),
            hypothesis_testing: "h".into(),
        }),
        case_main_category: Some("Procurement".into()),
        case_sub_category: None,
        applicable_laws: vec![ApplicableLaw {
            law_name: "UU 31/1999".into(),
            articles: vec!["Pasal 2".into()],
            violation_description: "Corruption".into(),
            penalty_level: "high".into(),
        }],
        law_impact_analysis: None,
        insights: vec!["Round amounts".into()],
        recommendations: vec![],
        notes: vec![CaseNote {
            id: Some("n1".into()),
            content: "Check vendor".into(),
            created_at: None,
            author: None,
        }],
        knowledge_graph: Some(KnowledgeGraph {
            nodes: BTreeMap::from([(
                "v1".to_string(),
                GraphNode {
                    name: "Vendor".into(),
                },
            )]),
            edges: BTreeMap::new(),
        }),
    }
);

roundtrip_and_validate!(
    chat_history_roundtrip,
    ChatHistory,
    ChatHistory {
        id: "session-1".into(),
        case_id: "case-1".into(),
        case_name: "Vendor kickbacks".into(),
        title: "Chat: Vendor kickbacks".into(),
        messages: vec![ChatMessage {
            id: "msg-1".into(),
            role: ChatRole::User,
            content: "Who approved?".into(),
            timestamp: Utc::now(),
        }],
        created_at: Utc::now(),
        updated_at: Utc::now(),
    }
);

roundtrip_and_validate!(
    uploaded_file_roundtrip,
    UploadedFile,
    UploadedFile {
        blob_name: "case-1/a.pdf".into(),
        original_filename: "a.pdf".into(),
        case_id: "case-1".into(),
        size: 2048,
        content_type: "application/pdf".into(),
        uploaded_at: "2024-06-01T10:00:00Z".into(),
        url: "https://blob/case-1/a.pdf".into(),
    }
);

roundtrip_and_validate!(
    family_card_roundtrip,
    KartuKeluargaStructured,
    KartuKeluargaStructured {
        family_head_name: "Budi".into(),
        family_number: "3171".into(),
        address: "Jl. Melati".into(),
        rt_rw: "001/002".into(),
        village: "Menteng".into(),
        district: "Menteng".into(),
        city: "Jakarta Pusat".into(),
        province: "DKI Jakarta".into(),
        postal_code: "10310".into(),
        family_members: vec![FamilyMemberDetail {
            name: "Budi".into(),
            nik: "3171".into(),
            gender: "L".into(),
            birth_date: "1980-01-01".into(),
            religion: "Islam".into(),
            education: "S1".into(),
            occupation: "Karyawan".into(),
            marital_status: "Kawin".into(),
            blood_type: None,
        }],
    }
);

roundtrip_and_validate!(
    envelope_roundtrip,
    Envelope<UploadedFile>,
    Envelope::error("Upload failed")
);

roundtrip_and_validate!(
    error_body_roundtrip,
    ErrorBody,
    ErrorBody::new(400, "Candidate ID is required")
);

// ---------------------------------------------------------------------------
// Wire-level behavior
// ---------------------------------------------------------------------------

#[test]
fn minimal_candidate_gets_empty_arrays() {
    let candidate: Candidate =
        serde_json::from_value(json!({"id": "1", "candidate_id": "C1", "name": "A"})).unwrap();
    assert_eq!(candidate, Candidate::new("1", "C1", "A"));
}

#[test]
fn null_arrays_become_empty() {
    let candidate: Candidate = serde_json::from_value(json!({
        "id": "1", "candidate_id": "C1", "name": "A",
        "skills": null, "education": null, "legal_documents": null
    }))
    .unwrap();
    assert!(candidate.skills.is_empty());
    assert!(candidate.education.is_empty());
    assert!(candidate.legal_documents.is_empty());
}

#[test]
fn unknown_candidate_keys_survive_a_roundtrip() {
    let raw = json!({
        "id": "1", "candidate_id": "C1", "name": "A",
        "source_channel": "referral", "scores": {"culture": 4}
    });
    let candidate: Candidate = serde_json::from_value(raw).unwrap();
    assert_eq!(candidate.extensions.len(), 2);

    let back = serde_json::to_value(&candidate).unwrap();
    assert_eq!(back["source_channel"], "referral");
    assert_eq!(back["scores"], json!({"culture": 4}));
}

#[test]
fn resume_and_offering_letter_default_their_type() {
    let candidate: Candidate = serde_json::from_value(json!({
        "id": "1", "candidate_id": "C1", "name": "A",
        "resume": {"name": "cv.pdf", "url": "u", "lastUpdated": "2024-01-01"},
        "offering_letter": {"name": "ol.pdf", "url": "u", "last_updated": "2024-01-01"}
    }))
    .unwrap();
    assert_eq!(candidate.resume.unwrap().kind, "RESUME");
    assert_eq!(candidate.offering_letter.unwrap().kind, "Signed Offering Letter");
}

#[test]
fn candidate_schema_bounds_rating() {
    let schema = serde_json::to_value(schema_for!(Candidate)).unwrap();
    let base = json!({"id": "1", "candidate_id": "C1", "name": "A"});

    for (rating, ok) in [(5.0, true), (0.0, true), (5.5, false), (-0.1, false)] {
        let mut instance = base.clone();
        instance["rating"] = json!(rating);
        let errors = validate_against_schema(&schema, &instance);
        assert_eq!(errors.is_empty(), ok, "rating {rating}: {errors:?}");
    }
}

#[test]
fn job_keys_are_camel_case() {
    let job: Job = serde_json::from_value(json!({
        "id": "J", "title": "T", "department": "D", "location": "L",
        "type": "Part-time", "status": "Draft", "postedDate": "2024-01-01",
        "applicants": 0
    }))
    .unwrap();
    assert_eq!(job.kind, JobType::PartTime);
    assert!(job.requirements.is_empty());
}
