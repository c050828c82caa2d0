//! Document extraction output and its typed structured-data views.

use schemars::JsonSchema;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use crate::extensions::Extensions;
use crate::nullable::vec_or_empty;

/// A text span located on a page by OCR.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct BoundingBox {
    pub content: String,
    pub page_number: u32,
    #[serde(default, deserialize_with = "vec_or_empty")]
    #[schemars(with = "Option<Vec<f64>>")]
    pub polygons: Vec<f64>,
}

/// Output of the document extraction pipeline.
///
/// `structured_data` is left untyped because its layout depends on the
/// document kind; use [`ExtractedContent::structured_as`] with
/// [`KtpStructured`] or [`KartuKeluargaStructured`] for the known kinds.
/// Keys this struct does not declare are kept in `extensions`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct ExtractedContent {
    #[serde(
        rename = "boundingBoxes",
        default,
        deserialize_with = "vec_or_empty"
    )]
    #[schemars(with = "Option<Vec<BoundingBox>>")]
    pub bounding_boxes: Vec<BoundingBox>,
    pub content: Option<String>,
    #[serde(alias = "structuredData")]
    pub structured_data: Option<serde_json::Value>,
    #[serde(flatten)]
    pub extensions: Extensions,
}

impl ExtractedContent {
    /// Decode `structured_data` into a typed view.
    ///
    /// Returns `None` when there is no structured data.
    ///
    /// # Errors
    ///
    /// Returns the decode error when the data does not fit `T`.
    pub fn structured_as<T: DeserializeOwned>(&self) -> Option<Result<T, serde_json::Error>> {
        self.structured_data
            .as_ref()
            .filter(|v| !v.is_null())
            .map(|v| T::deserialize(v))
    }
}

/// Fields read from an Indonesian identity card (KTP).
///
/// Every field is optional; OCR rarely gets all of them.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct KtpStructured {
    pub nik: Option<String>,
    pub name: Option<String>,
    pub birth_place: Option<String>,
    pub birth_date: Option<String>,
    pub gender: Option<String>,
    pub religion: Option<String>,
    pub marital_status: Option<String>,
    pub occupation: Option<String>,
    pub nationality: Option<String>,
    pub address: Option<String>,
    pub rt_rw: Option<String>,
    pub village: Option<String>,
    pub district: Option<String>,
    pub city: Option<String>,
    pub province: Option<String>,
    #[serde(flatten)]
    pub extensions: Extensions,
}

/// Fields read from a family card (Kartu Keluarga).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct KartuKeluargaStructured {
    pub family_head_name: String,
    pub family_number: String,
    pub address: String,
    pub rt_rw: String,
    pub village: String,
    pub district: String,
    pub city: String,
    pub province: String,
    pub postal_code: String,
    #[serde(default, deserialize_with = "vec_or_empty")]
    #[schemars(with = "Option<Vec<FamilyMemberDetail>>")]
    pub family_members: Vec<FamilyMemberDetail>,
}

/// One row of the family card member table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct FamilyMemberDetail {
    pub name: String,
    pub nik: String,
    pub gender: String,
    pub birth_date: String,
    pub religion: String,
    pub education: String,
    pub occupation: String,
    pub marital_status: String,
    pub blood_type: Option<String>,
}
