mod cli;

use axum::Router;
use backend::config::BackendConfig;
use clap::Parser;
use std::net::SocketAddr;
use tower_http::services::ServeDir;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with(tracing_subscriber::fmt::layer())
        .init();
    let cli = cli::Cli::parse();
    if cli.api_key.is_empty() {
        tracing::warn!("No API key set; model calls will fail until GOOGLE_API_KEY is provided");
    }

    let mut router = Router::new();
    if let Some(dist_dir) = &cli.dist_dir {
        tracing::info!("Serving UI from {}", dist_dir.display());
        router = router.fallback_service(ServeDir::new(dist_dir));
    }

    let config = BackendConfig::new(cli.data_dir.clone(), cli.settings());
    let addr = SocketAddr::new(cli.host, cli.port);
    tracing::info!("Listening on {}", addr);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    let router = backend::init(router, config);
    axum::serve(listener, router).await?;
    Ok(())
}
