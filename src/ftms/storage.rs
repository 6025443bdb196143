use anyhow::{Context, Result};
use axum::body::Bytes;
use futures_util::{Stream, StreamExt};
use std::path::{Path, PathBuf};
use tokio::fs;
use tokio::io::AsyncWriteExt;

/// Flat on-disk store for uploaded files, one file per document id.
pub struct FileStorage {
    base_dir: PathBuf,
}

impl FileStorage {
    /// Open the storage root, creating it if absent. `~` is expanded.
    pub fn new(base_dir: &str) -> Result<Self> {
        let expanded = shellexpand::tilde(base_dir).to_string();
        let base = PathBuf::from(expanded);
        std::fs::create_dir_all(&base)
            .with_context(|| format!("Failed to create storage directory {}", base.display()))?;
        Ok(Self { base_dir: base })
    }

    pub fn base_dir(&self) -> &Path {
        &self.base_dir
    }

    /// Absolute path for a stored file name.
    pub fn path_for(&self, stored_name: &str) -> PathBuf {
        self.base_dir.join(stored_name)
    }

    /// Copy an incoming byte stream to `stored_name`, returning the written path.
    ///
    /// The stream is consumed whatever the outcome. A partially written file
    /// is removed before the error is returned.
    pub async fn store_stream<S, E>(&self, stored_name: &str, stream: S) -> Result<PathBuf>
    where
        S: Stream<Item = std::result::Result<Bytes, E>>,
        E: std::error::Error + Send + Sync + 'static,
    {
        let path = self.path_for(stored_name);
        let written = write_stream(&path, stream).await;
        if written.is_err() {
            if let Err(e) = self.delete(&path).await {
                tracing::warn!(path = %path.display(), error = %e, "Failed to remove partial upload");
            }
        }
        written.map(|_| path)
    }

    /// Remove a stored file if it exists.
    pub async fn delete(&self, path: &Path) -> Result<()> {
        match fs::remove_file(path).await {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e).context("Failed to delete file"),
        }
    }
}

async fn write_stream<S, E>(path: &Path, stream: S) -> Result<u64>
where
    S: Stream<Item = std::result::Result<Bytes, E>>,
    E: std::error::Error + Send + Sync + 'static,
{
    let mut file = fs::File::create(path)
        .await
        .context("Failed to create file")?;
    let mut stream = std::pin::pin!(stream);
    let mut total = 0u64;
    while let Some(chunk) = stream.next().await {
        let chunk = chunk.context("Failed to read upload stream")?;
        file.write_all(&chunk).await.context("Failed to write file")?;
        total += chunk.len() as u64;
    }
    file.flush().await.context("Failed to flush file")?;
    Ok(total)
}
