use serde::{Deserialize, Serialize};
use std::net::SocketAddr;

/// Runtime settings for the upload gateway.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GatewayConfig {
    pub host: String,
    pub port: u16,
    /// Directory holding uploaded files; created on startup.
    pub storage_dir: String,
    /// Largest accepted request body, in bytes.
    pub max_upload_bytes: usize,
}

impl Default for GatewayConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".into(),
            port: 8000,
            storage_dir: "backend/storage".into(),
            max_upload_bytes: 25 * 1024 * 1024,
        }
    }
}

impl GatewayConfig {
    pub fn bind_addr(&self) -> anyhow::Result<SocketAddr> {
        let addr = format!("{}:{}", self.host, self.port);
        addr.parse()
            .map_err(|e| anyhow::anyhow!("Invalid bind address {addr}: {e}"))
    }
}
