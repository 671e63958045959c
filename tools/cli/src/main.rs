//! Letterbox server binary.
//!
//! Reads configuration from the environment, builds the application state
//! and serves the HTTP surface.

use anyhow::{Context, Result};
use clap::Parser;
use tracing::{info, Level};
use tracing_subscriber::FmtSubscriber;

use letterbox_server::{router, AppState, ServerConfig};

#[derive(Parser)]
#[command(name = "letterbox")]
#[command(about = "Letterbox - session broker for the Drive-backed letter editor")]
#[command(version)]
struct Cli {
    /// Enable verbose logging.
    #[arg(short, long)]
    verbose: bool,

    /// Listen port; overrides the PORT environment variable.
    #[arg(short, long)]
    port: Option<u16>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let level = if cli.verbose {
        Level::DEBUG
    } else {
        Level::INFO
    };
    let subscriber = FmtSubscriber::builder().with_max_level(level).finish();
    tracing::subscriber::set_global_default(subscriber)
        .context("Failed to set tracing subscriber")?;

    let mut config = ServerConfig::from_env().context("Failed to read configuration")?;
    if let Some(port) = cli.port {
        config.port = port;
    }

    let addr = format!("0.0.0.0:{}", config.port);
    let state = AppState::new(config).context("Failed to build application state")?;
    let app = router(state);

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind {}", addr))?;

    info!(%addr, "Letterbox server listening");
    axum::serve(listener, app).await.context("Server error")?;

    Ok(())
}
