mod config;
mod ddgs;
mod dispatch;
mod error;
mod format;
mod server;
mod tools;

use anyhow::Result;
use rmcp::{transport::stdio, ServiceExt};
use tokio::signal;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::Config;
use crate::server::DdgsSearchServer;

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    tracing::info!("Starting DDGS Search MCP Server v{}", env!("CARGO_PKG_VERSION"));

    let config = Config::load()?;
    tracing::debug!(
        "Configuration loaded: timeout={}s auto_backend={}",
        config.timeout.as_secs(),
        config.auto_backend
    );

    let server = DdgsSearchServer::new(&config);
    let service = server.serve(stdio()).await?;

    tokio::select! {
        result = service.waiting() => {
            if let Err(e) = result {
                tracing::warn!("Service ended with error: {}", e);
            }
        }
        _ = shutdown_signal() => {
            tracing::info!("Shutdown signal received");
        }
    }

    tracing::info!("DDGS Search MCP Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c().await.expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {}
        _ = terminate => {}
    }
}
