//! Upload PDF or plain-text documents over HTTP and read back their text.

pub mod config;
pub mod ftms;
pub mod gateway;

pub use config::GatewayConfig;
pub use ftms::{FileService, FileStorage, FtmsError};
