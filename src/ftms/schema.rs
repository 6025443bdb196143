use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::extract::ExtractError;

/// The closed set of document types the service accepts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DocumentKind {
    Pdf,
    Txt,
}

impl DocumentKind {
    /// Every accepted kind, in the order they are listed to clients.
    pub const ALL: [DocumentKind; 2] = [DocumentKind::Pdf, DocumentKind::Txt];

    /// Extension used for the stored file name.
    pub fn extension(self) -> &'static str {
        match self {
            DocumentKind::Pdf => "pdf",
            DocumentKind::Txt => "txt",
        }
    }
}

impl fmt::Display for DocumentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.extension())
    }
}

impl FromStr for DocumentKind {
    type Err = ExtractError;

    /// Expects an already lower-cased extension without the leading dot.
    fn from_str(ext: &str) -> Result<Self, Self::Err> {
        match ext {
            "pdf" => Ok(DocumentKind::Pdf),
            "txt" => Ok(DocumentKind::Txt),
            other => Err(ExtractError::UnsupportedType(other.to_string())),
        }
    }
}

/// A stored upload with its extracted content.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UploadRecord {
    pub id: String,
    pub filename: String,
    pub file_path: String,
    pub kind: DocumentKind,
    pub text: String,
}

/// What a successful upload hands back to the caller.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UploadReceipt {
    #[serde(rename = "doc_id")]
    pub id: String,
    pub message: String,
}

/// Body of `GET /uploads/{doc_id}/text`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExtractedTextResponse {
    pub doc_id: String,
    pub filename: String,
    pub extracted_text: String,
}

impl From<UploadRecord> for ExtractedTextResponse {
    fn from(record: UploadRecord) -> Self {
        Self {
            doc_id: record.id,
            filename: record.filename,
            extracted_text: record.text,
        }
    }
}
