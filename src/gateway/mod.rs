//! HTTP surface for the upload service.
//!
//! `POST /uploads/` stores a multipart file and extracts its text,
//! `GET /uploads/{doc_id}/text` returns what was extracted.

use anyhow::{Context, Result};
use axum::{
    extract::{multipart::MultipartRejection, DefaultBodyLimit, Multipart, Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use serde_json::json;
use std::sync::Arc;
use tower_http::limit::RequestBodyLimitLayer;

use crate::config::GatewayConfig;
use crate::ftms::{
    DocumentKind, ExtractedTextResponse, FileService, FileStorage, FtmsError, UploadReceipt,
};

/// Multipart field the upload is expected in.
pub const FILE_FIELD: &str = "file";

#[derive(Clone)]
pub struct AppState {
    pub files: Arc<FileService>,
}

impl AppState {
    pub fn new(files: FileService) -> Self {
        Self {
            files: Arc::new(files),
        }
    }
}

/// Build the router over an already constructed service.
pub fn router(state: AppState, max_upload_bytes: usize) -> Router {
    Router::new()
        .route("/health", get(handle_health))
        .route("/uploads", post(handle_upload))
        .route("/uploads/", post(handle_upload))
        .route("/uploads/{doc_id}/text", get(handle_get_text))
        .layer(DefaultBodyLimit::disable())
        .layer(RequestBodyLimitLayer::new(max_upload_bytes))
        .with_state(state)
}

/// Create the storage root, bind and serve until Ctrl-C.
pub async fn run(config: GatewayConfig) -> Result<()> {
    let storage = FileStorage::new(&config.storage_dir)?;
    tracing::info!(storage = %storage.base_dir().display(), "Storage ready");
    let state = AppState::new(FileService::new(storage));

    let addr = config.bind_addr()?;
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind {addr}"))?;
    tracing::info!(%addr, "Upload gateway listening");

    axum::serve(listener, router(state, config.max_upload_bytes))
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Gateway server error")?;
    tracing::info!("Upload gateway stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::warn!(error = %e, "Failed to listen for Ctrl-C");
        std::future::pending::<()>().await;
    }
}

async fn handle_health(State(state): State<AppState>) -> impl IntoResponse {
    Json(json!({
        "status": "ok",
        "documents": state.files.index().len(),
    }))
}

async fn handle_upload(
    State(state): State<AppState>,
    multipart: std::result::Result<Multipart, MultipartRejection>,
) -> std::result::Result<(StatusCode, Json<UploadReceipt>), ApiError> {
    let mut multipart = multipart.map_err(|e| ApiError::new(e.status(), e.body_text()))?;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| ApiError::new(e.status(), e.body_text()))?
    {
        let is_file = field.name() == Some(FILE_FIELD) || field.file_name().is_some();
        if !is_file {
            continue;
        }
        let filename = field.file_name().map(str::to_owned);
        let receipt = state.files.upload(filename.as_deref(), field).await?;
        return Ok((StatusCode::CREATED, Json(receipt)));
    }

    Err(FtmsError::MissingFile.into())
}

async fn handle_get_text(
    State(state): State<AppState>,
    Path(doc_id): Path<String>,
) -> std::result::Result<Json<ExtractedTextResponse>, ApiError> {
    let record = state.files.get_text(&doc_id)?;
    Ok(Json(record.into()))
}

/// JSON error body `{"detail": ...}` with its status code.
#[derive(Debug)]
pub struct ApiError {
    status: StatusCode,
    detail: String,
}

impl ApiError {
    pub fn new(status: StatusCode, detail: impl Into<String>) -> Self {
        Self {
            status,
            detail: detail.into(),
        }
    }
}

fn invalid_type_detail() -> String {
    let allowed: Vec<String> = DocumentKind::ALL
        .iter()
        .map(|k| k.extension().to_uppercase())
        .collect();
    format!(
        "Invalid file type. Only {} files are allowed.",
        allowed.join(", ")
    )
}

impl From<FtmsError> for ApiError {
    fn from(err: FtmsError) -> Self {
        match err {
            FtmsError::UnsupportedFileType(_) => {
                Self::new(StatusCode::BAD_REQUEST, invalid_type_detail())
            }
            FtmsError::MissingFile => Self::new(
                StatusCode::UNPROCESSABLE_ENTITY,
                format!("No file provided in field '{FILE_FIELD}'."),
            ),
            FtmsError::Storage(reason) => Self::new(
                StatusCode::INTERNAL_SERVER_ERROR,
                format!("Could not save file: {reason}"),
            ),
            FtmsError::Extraction(_) => Self::new(
                StatusCode::INTERNAL_SERVER_ERROR,
                "Failed to extract text from file.",
            ),
            FtmsError::NotFound(_) => Self::new(StatusCode::NOT_FOUND, "Document ID not found."),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.status, Json(json!({ "detail": self.detail }))).into_response()
    }
}
