use std::path::{Path, PathBuf};
use thiserror::Error;
use tokio::fs;

use super::schema::DocumentKind;

/// Why a stored file produced no text.
#[derive(Debug, Error)]
pub enum ExtractError {
    #[error("unsupported file type: .{0}")]
    UnsupportedType(String),

    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("text file is not valid UTF-8: {0}")]
    Utf8(#[from] std::string::FromUtf8Error),

    #[error("invalid PDF document: {0}")]
    Pdf(String),
}

/// Derive the lower-cased extension from an upload's file name.
///
/// Everything after the last `.`; empty when there is no name or no dot.
pub fn file_extension(filename: Option<&str>) -> String {
    filename
        .and_then(|name| name.rsplit_once('.'))
        .map(|(_, ext)| ext.to_lowercase())
        .unwrap_or_default()
}

/// Extract the text content of a stored file.
pub async fn extract_text(path: &Path, kind: DocumentKind) -> Result<String, ExtractError> {
    match kind {
        DocumentKind::Txt => extract_plain(path).await,
        DocumentKind::Pdf => extract_pdf(path).await,
    }
}

async fn extract_plain(path: &Path) -> Result<String, ExtractError> {
    let data = fs::read(path).await.map_err(|source| ExtractError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(String::from_utf8(data)?)
}

async fn extract_pdf(path: &Path) -> Result<String, ExtractError> {
    let owned = path.to_path_buf();
    // The parser is synchronous and may panic on hostile input; keep both on the blocking pool.
    tokio::task::spawn_blocking(move || pdf_pages_text(&owned))
        .await
        .map_err(|e| ExtractError::Pdf(format!("parser task failed: {e}")))?
}

/// Page texts in document order, joined with nothing in between.
fn pdf_pages_text(path: &Path) -> Result<String, ExtractError> {
    let pages =
        pdf_extract::extract_text_by_pages(path).map_err(|e| ExtractError::Pdf(e.to_string()))?;
    Ok(pages.concat())
}
