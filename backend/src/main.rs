use std::net::SocketAddr;

use tracing::info;
use tracing_subscriber::EnvFilter;

use feeder_backend::storage::json::JsonConnection;
use feeder_backend::{create_router, initialize_backend};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize logging; RUST_LOG overrides the default level
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    info!("Setting up document store");
    let connection = JsonConnection::new_default()?;

    let app_state = initialize_backend(connection)?;
    let app = create_router(app_state);

    let addr: SocketAddr = std::env::var("FEEDER_ADDR")
        .unwrap_or_else(|_| "127.0.0.1:3000".to_string())
        .parse()?;
    info!("Starting server on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!("Listening on {}", addr);

    axum::serve(listener, app).await?;

    Ok(())
}
