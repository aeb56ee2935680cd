use crate::session::deserialize_id;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// `POST /ingest/upload` reply.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct UploadResponse {
    #[serde(deserialize_with = "deserialize_id")]
    pub document_id: String,
    #[serde(default)]
    pub filename: Option<String>,
    #[serde(default)]
    pub title: Option<String>,
}

/// An uploaded document as listed by `GET /ingest/documents`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct DocumentSummary {
    #[serde(deserialize_with = "deserialize_id")]
    pub id: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub filename: String,
    #[serde(default)]
    pub extracted: bool,
}

/// A keyword extracted from a document, optionally already mapped to a symptom.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct DocumentKeyword {
    pub keyword: String,
    #[serde(default)]
    pub weight: f64,
    #[serde(default)]
    pub symptom_type: Option<String>,
}

/// `GET /ingest/documents/{id}`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct DocumentDetail {
    #[serde(default, deserialize_with = "deserialize_id")]
    pub id: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub filename: String,
    #[serde(default)]
    pub keywords: Vec<DocumentKeyword>,
}

pub const DEFAULT_TOP_K: u32 = 50;

/// What to extract keywords from.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum KeywordSource {
    Document { document_id: String },
    Text { text: String },
}

/// `POST /ingest/keywords/extract` body. The source is flattened into the
/// object as either `document_id` or `text`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KeywordExtractionRequest {
    #[serde(flatten)]
    pub source: KeywordSource,
    pub top_k: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub symptom_map: Option<BTreeMap<String, String>>,
}

impl KeywordExtractionRequest {
    pub fn from_document(document_id: impl Into<String>, top_k: u32) -> Self {
        Self {
            source: KeywordSource::Document {
                document_id: document_id.into(),
            },
            top_k,
            symptom_map: None,
        }
    }

    pub fn from_text(text: impl Into<String>, top_k: u32) -> Self {
        Self {
            source: KeywordSource::Text { text: text.into() },
            top_k,
            symptom_map: None,
        }
    }
}

/// Where a lexicon entry came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum KeywordOrigin {
    #[default]
    User,
    Doc,
    System,
}

impl KeywordOrigin {
    pub const ALL: [KeywordOrigin; 3] = [KeywordOrigin::User, KeywordOrigin::Doc, KeywordOrigin::System];

    pub fn as_str(&self) -> &'static str {
        match self {
            KeywordOrigin::User => "user",
            KeywordOrigin::Doc => "doc",
            KeywordOrigin::System => "system",
        }
    }

    pub fn parse(s: &str) -> Self {
        match s {
            "doc" => KeywordOrigin::Doc,
            "system" => KeywordOrigin::System,
            _ => KeywordOrigin::User,
        }
    }
}

/// One entry to insert or update in the global symptom lexicon.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SymptomKeywordInput {
    pub keyword: String,
    pub symptom_type: String,
    pub weight: f64,
    pub source: KeywordOrigin,
    pub active: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UpsertKeywordsRequest {
    pub items: Vec<SymptomKeywordInput>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct UpsertResult {
    #[serde(default)]
    pub inserted: u32,
    #[serde(default)]
    pub updated: u32,
}

/// A lexicon entry as stored by the backend.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct SymptomKeyword {
    #[serde(deserialize_with = "deserialize_id")]
    pub id: String,
    #[serde(default)]
    pub symptom_type: String,
    #[serde(default)]
    pub keyword: String,
    #[serde(default)]
    pub weight: f64,
    #[serde(default)]
    pub source: String,
    #[serde(default)]
    pub active: bool,
}

/// `GET /ingest/keywords/symptoms`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct SymptomKeywordList {
    #[serde(default)]
    pub items: Vec<SymptomKeyword>,
}
