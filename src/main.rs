use std::env;
use std::net::SocketAddr;

use anyhow::Context;
use paycheck_engine::api::{AppState, create_router};
use paycheck_engine::storage::FileStore;
use tracing::info;
use tracing_subscriber::EnvFilter;

const DEFAULT_DATA_DIR: &str = "./data";
const DEFAULT_ADDR: &str = "127.0.0.1:3000";

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize logging; RUST_LOG overrides the default level
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let data_dir = env::var("PAYCHECK_DATA_DIR").unwrap_or_else(|_| DEFAULT_DATA_DIR.to_string());
    let addr: SocketAddr = env::var("PAYCHECK_ADDR")
        .unwrap_or_else(|_| DEFAULT_ADDR.to_string())
        .parse()
        .context("PAYCHECK_ADDR must be a socket address such as 127.0.0.1:3000")?;

    info!(data_dir = %data_dir, "Opening timesheet store");
    let state = AppState::new(FileStore::new(data_dir));
    let app = create_router(state);

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("failed to bind {}", addr))?;
    info!("Listening on {}", addr);

    axum::serve(listener, app).await?;

    Ok(())
}
