//! FTMS — File/Text Management System
//!
//! Handles file upload, storage, text extraction and lookup of the
//! extracted text by document id.

pub mod error;
pub mod extract;
pub mod index;
pub mod schema;
pub mod service;
pub mod storage;

pub use error::FtmsError;
pub use extract::{extract_text, ExtractError};
pub use index::FileIndex;
pub use schema::{DocumentKind, ExtractedTextResponse, UploadReceipt, UploadRecord};
pub use service::FileService;
pub use storage::FileStorage;
