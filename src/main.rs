//! Standalone dev server: runs the plugin router without a host, for
//! exercising the HTTP surface during frontend work.

use std::env;
use std::path::PathBuf;

use tracing::info;
use tracing_subscriber::EnvFilter;

use nz_workflow_bridge::{Plugin, PluginConfig};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let bind = env::args()
        .nth(1)
        .unwrap_or_else(|| "127.0.0.1:8189".to_string());
    let web_root = env::args()
        .nth(2)
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from("./web"));

    let plugin = Plugin::new(PluginConfig { web_root });

    let listener = tokio::net::TcpListener::bind(&bind).await?;
    info!(addr = %listener.local_addr()?, "dev server listening");
    axum::serve(listener, plugin.router()).await?;

    Ok(())
}
