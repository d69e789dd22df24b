//! Sterling B2Bi MCP Server
//!
//! Validates the Sterling B2Bi connection settings, then serves the tools
//! over streamable HTTP or stdio.

use anyhow::{bail, Result};
use clap::{Parser, ValueEnum};
use rmcp::transport::streamable_http_server::{
    session::local::LocalSessionManager, StreamableHttpServerConfig, StreamableHttpService,
};
use rmcp::ServiceExt;
use sterling_b2b::config::{HOST_ENV, PASSWORD_ENV, USERNAME_ENV};
use sterling_b2b::{ConnectionProfile, SterlingB2bClient, SterlingError};
use sterling_b2b_mcp::{logging, SterlingB2bServer};
use std::net::SocketAddr;
use tracing::{error, info};

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Transport {
    /// Streamable HTTP on --bind
    Http,
    /// stdin/stdout
    Stdio,
}

#[derive(Debug, Parser)]
#[command(name = "sterling-b2b-mcp", version, about = "Sterling B2Bi MCP Server")]
struct Cli {
    /// How MCP clients reach the server
    #[arg(long, env = "SB2B_MCP_TRANSPORT", value_enum, default_value_t = Transport::Http)]
    transport: Transport,

    /// Listen address for the HTTP transport
    #[arg(long, env = "SB2B_MCP_BIND", default_value = "0.0.0.0:8000")]
    bind: SocketAddr,

    /// URL path of the MCP endpoint for the HTTP transport
    #[arg(long, env = "SB2B_MCP_PATH", default_value = "/mcp")]
    path: String,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env before parsing so env fallbacks see it
    let env_file = dotenvy::dotenv();
    let cli = Cli::parse();

    logging::setup_logging()?;

    match env_file {
        Ok(path) => info!("Environment configuration loaded: {}", path.display()),
        Err(_) => info!("Environment configuration loaded: No .env file found"),
    }

    let client = ConnectionProfile::from_env()
        .and_then(SterlingB2bClient::new)
        .inspect_err(|e| error!(category = e.category(), "{}", startup_failure(e)))?;
    info!(
        "Sterling B2Bi configuration validated host={}, username={}, password='XXXXXXX'",
        client.profile().host(),
        client.profile().username()
    );

    let server = SterlingB2bServer::new(client);

    info!("Starting Sterling B2Bi MCP Server");
    match cli.transport {
        Transport::Http => serve_http(server, cli.bind, &cli.path).await,
        Transport::Stdio => serve_stdio(server).await,
    }
}

/// Startup diagnostic; configuration faults point at where settings come from
fn startup_failure(e: &SterlingError) -> String {
    if e.is_config() {
        format!(
            "{} Check {}, {} and {} in the environment or .env file.",
            e, HOST_ENV, USERNAME_ENV, PASSWORD_ENV
        )
    } else {
        format!("Sterling B2Bi client could not start: {}", e)
    }
}

async fn serve_http(server: SterlingB2bServer, bind: SocketAddr, path: &str) -> Result<()> {
    if !path.starts_with('/') || path == "/" {
        bail!("MCP path must start with '/' and not be the root, got '{}'", path);
    }

    let service = StreamableHttpService::new(
        move || Ok(server.clone()),
        LocalSessionManager::default().into(),
        StreamableHttpServerConfig::default(),
    );
    let app = axum::Router::new().nest_service(path, service);

    let listener = tokio::net::TcpListener::bind(bind).await?;
    info!("MCP HTTP server listening on http://{}{}", bind, path);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server stopped");
    Ok(())
}

async fn serve_stdio(server: SterlingB2bServer) -> Result<()> {
    info!("Serving MCP on stdio");
    let running = server.serve(rmcp::transport::stdio()).await?;
    let quit_reason = running.waiting().await?;
    info!("Server stopped: {:?}", quit_reason);
    Ok(())
}

#[cfg(unix)]
async fn shutdown_signal() {
    use tokio::signal::unix::{signal, SignalKind};

    let sigterm = match signal(SignalKind::terminate()) {
        Ok(s) => Some(s),
        Err(e) => {
            tracing::warn!("Failed to install SIGTERM handler: {}", e);
            None
        }
    };

    match sigterm {
        Some(mut sigterm) => {
            tokio::select! {
                _ = tokio::signal::ctrl_c() => {},
                _ = sigterm.recv() => {},
            }
        }
        None => {
            let _ = tokio::signal::ctrl_c().await;
        }
    }
}

#[cfg(not(unix))]
async fn shutdown_signal() {
    let _ = tokio::signal::ctrl_c().await;
}
