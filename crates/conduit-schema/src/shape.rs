//! The set of named shapes and the typed value a validation produces.

use conduit_core::entities::{
    Candidate, ChatHistory, ChatMessage, Employee, ExtractedContent, FraudCase, Job,
    KartuKeluargaStructured, KtpStructured, UploadedFile,
};
use schemars::JsonSchema;
use serde::Serialize;
use serde::de::DeserializeOwned;

/// A record type addressable by name in the registry.
pub trait Shape: DeserializeOwned + Serialize + JsonSchema {
    /// Registry name, e.g. `candidate`.
    const NAME: &'static str;

    fn into_record(self) -> Record;
}

macro_rules! shapes {
    ($($variant:ident => $name:literal),+ $(,)?) => {
        /// A validated value of any registered shape.
        #[derive(Debug, Clone, PartialEq, Serialize)]
        #[serde(untagged)]
        pub enum Record {
            $($variant($variant),)+
        }

        impl Record {
            /// Name of the shape this record was validated as.
            #[must_use]
            pub const fn shape(&self) -> &'static str {
                match self {
                    $(Self::$variant(_) => $name,)+
                }
            }
        }

        $(
            impl Shape for $variant {
                const NAME: &'static str = $name;

                fn into_record(self) -> Record {
                    Record::$variant(self)
                }
            }
        )+
    };
}

shapes! {
    Candidate => "candidate",
    Employee => "employee",
    Job => "job",
    FraudCase => "fraud_case",
    ChatHistory => "chat_history",
    ChatMessage => "chat_message",
    UploadedFile => "uploaded_file",
    ExtractedContent => "extracted_content",
    KtpStructured => "ktp_structured",
    KartuKeluargaStructured => "kartu_keluarga_structured",
}

impl Record {
    /// Serialize back to JSON in wire form.
    ///
    /// # Errors
    ///
    /// Propagates `serde_json` serialization errors.
    pub fn to_value(&self) -> Result<serde_json::Value, serde_json::Error> {
        serde_json::to_value(self)
    }

    #[must_use]
    pub const fn as_candidate(&self) -> Option<&Candidate> {
        match self {
            Self::Candidate(c) => Some(c),
            _ => None,
        }
    }
}
