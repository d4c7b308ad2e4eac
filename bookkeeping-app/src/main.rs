//! # Bookkeeping Application
//!
//! Binary that wires together all the components:
//! - Load configuration from environment
//! - Initialize the repository adapter
//! - Resolve the exchange rates provider
//! - Start the HTTP server

mod config;

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use bookkeeping_hex::{ExchangeRateService, ExchangeRatesProvider, inbound::HttpServer};
use bookkeeping_repo::build_repo;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables
    dotenvy::dotenv().ok();

    // Initialize tracing subscriber
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                "info,bookkeeping_app=debug,bookkeeping_hex=debug,exchange_rates=debug".into()
            }),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load configuration
    let config = config::Config::from_env()?;

    tracing::info!("Starting bookkeeping server on port {}", config.port);
    tracing::info!("Using database: {}", config.database_url);
    tracing::info!(
        "Exchange rates data source: {}",
        config.exchange_rates.data_source
    );

    // Build repository (handles connection and migration)
    let repo = build_repo(&config.database_url).await?;

    // Resolve the exchange rates provider once
    let provider = ExchangeRatesProvider::initialize(&config.exchange_rates)?;

    let service = ExchangeRateService::new(repo, provider);

    // Create and run the HTTP server
    let server = HttpServer::new(service);
    let addr = format!("0.0.0.0:{}", config.port);

    server.run(&addr).await
}
