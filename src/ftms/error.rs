use thiserror::Error;

use super::extract::ExtractError;

/// Failures surfaced by the upload and lookup operations.
#[derive(Debug, Error)]
pub enum FtmsError {
    /// Extension missing or outside the accepted kinds.
    #[error("unsupported file type: {0:?}")]
    UnsupportedFileType(String),

    #[error("no file provided")]
    MissingFile,

    #[error("could not save file: {0}")]
    Storage(String),

    #[error("failed to extract text: {0}")]
    Extraction(#[from] ExtractError),

    #[error("document not found: {0}")]
    NotFound(String),
}

pub type Result<T> = std::result::Result<T, FtmsError>;
