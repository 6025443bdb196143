use axum::body::Bytes;
use futures_util::Stream;
use uuid::Uuid;

use super::error::{FtmsError, Result};
use super::extract::{extract_text, file_extension};
use super::index::FileIndex;
use super::schema::{DocumentKind, UploadReceipt, UploadRecord};
use super::storage::FileStorage;

pub const UPLOAD_SUCCESS_MESSAGE: &str = "File uploaded and text extracted successfully.";

/// Upload and lookup over one storage root and one index.
pub struct FileService {
    storage: FileStorage,
    index: FileIndex,
}

impl FileService {
    pub fn new(storage: FileStorage) -> Self {
        Self {
            storage,
            index: FileIndex::new(),
        }
    }

    pub fn storage(&self) -> &FileStorage {
        &self.storage
    }

    pub fn index(&self) -> &FileIndex {
        &self.index
    }

    /// Store an uploaded file, extract its text and record it.
    ///
    /// Nothing touches the disk when the extension is rejected. When
    /// extraction fails the stored file is removed and no record is kept.
    pub async fn upload<S, E>(&self, filename: Option<&str>, stream: S) -> Result<UploadReceipt>
    where
        S: Stream<Item = std::result::Result<Bytes, E>>,
        E: std::error::Error + Send + Sync + 'static,
    {
        let id = Uuid::new_v4().to_string();

        let ext = file_extension(filename);
        let kind: DocumentKind = ext
            .parse()
            .map_err(|_| FtmsError::UnsupportedFileType(ext.clone()))?;

        let stored_name = format!("{id}.{kind}");
        let path = self
            .storage
            .store_stream(&stored_name, stream)
            .await
            .map_err(|e| {
                let reason = format!("{e:#}");
                tracing::error!(doc_id = %id, error = %reason, "Failed to store upload");
                FtmsError::Storage(reason)
            })?;

        let text = match extract_text(&path, kind).await {
            Ok(text) => text,
            Err(e) => {
                tracing::error!(doc_id = %id, path = %path.display(), error = %e, "Text extraction failed");
                if let Err(cleanup) = self.storage.delete(&path).await {
                    tracing::warn!(
                        path = %path.display(),
                        error = ?cleanup,
                        "Failed to remove file after extraction error"
                    );
                }
                return Err(e.into());
            }
        };

        let filename = filename.unwrap_or_default().to_string();
        tracing::info!(
            doc_id = %id,
            filename = %filename,
            kind = %kind,
            chars = text.chars().count(),
            "Document uploaded and extracted"
        );
        self.index.insert(UploadRecord {
            id: id.clone(),
            filename,
            file_path: path.to_string_lossy().into_owned(),
            kind,
            text,
        });

        Ok(UploadReceipt {
            id,
            message: UPLOAD_SUCCESS_MESSAGE.to_string(),
        })
    }

    /// Look up the record for a previously uploaded document.
    pub fn get_text(&self, id: &str) -> Result<UploadRecord> {
        tracing::debug!(doc_id = %id, "Text lookup");
        self.index
            .get(id)
            .ok_or_else(|| FtmsError::NotFound(id.to_string()))
    }
}
