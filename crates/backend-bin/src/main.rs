use anyhow::Result;
use clap::Parser;
use std::path::PathBuf;
use std::sync::Arc;
use tokio::net::TcpListener;
use tracing::info;
use tracing_subscriber::EnvFilter;

use axelsub_backend_lib::{config::Settings, router, seed, storage::MemoryStore, AppState};

/// AxelSub sharing server
#[derive(Parser, Debug)]
#[command(name = "axelsub-server", version, about)]
struct Cli {
    /// Explicit config file; otherwise config.{toml,yaml,json} and
    /// AXELSUB_* environment variables are merged over the defaults
    #[arg(short, long)]
    config: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let settings = match &cli.config {
        Some(path) => Settings::load_from(path)?,
        None => Settings::load()?,
    };

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(settings.log_level.clone()));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    let storage = MemoryStore::new();
    let bind_addr = settings.bind_addr;
    let seed_demo = settings.seed_demo_data;

    let state = Arc::new(AppState::new(storage.clone(), settings));

    if seed_demo {
        seed::seed_demo_data(&storage).await?;
    }

    let app = router::create_router(state);

    let listener = TcpListener::bind(bind_addr).await?;
    info!("listening on {bind_addr}");

    axum::serve(listener, app).await?;

    Ok(())
}
