use anyhow::Result;
use clap::Parser;
use ftms_server::{gateway, GatewayConfig};
use tracing_subscriber::{fmt, EnvFilter};

/// Upload PDF or text files and fetch their extracted text over HTTP.
#[derive(Parser, Debug)]
#[command(name = "ftms-server", version, about, long_about = None)]
struct Cli {
    /// Address to bind
    #[arg(long)]
    host: Option<String>,

    /// Port to listen on
    #[arg(short, long)]
    port: Option<u16>,

    /// Directory uploaded files are written to (created if missing)
    #[arg(long)]
    storage_dir: Option<String>,

    /// Largest accepted upload, in megabytes
    #[arg(long)]
    max_upload_mb: Option<usize>,
}

impl Cli {
    fn into_config(self) -> GatewayConfig {
        let mut config = GatewayConfig::default();
        if let Some(host) = self.host {
            config.host = host;
        }
        if let Some(port) = self.port {
            config.port = port;
        }
        if let Some(dir) = self.storage_dir {
            config.storage_dir = dir;
        }
        if let Some(mb) = self.max_upload_mb {
            config.max_upload_bytes = mb.saturating_mul(1024 * 1024);
        }
        config
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .try_init()
        .map_err(|e| anyhow::anyhow!("Failed to initialise logging: {e}"))?;

    let config = Cli::parse().into_config();
    gateway::run(config).await
}
