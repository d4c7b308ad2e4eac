//! HTTP Server configuration and startup.

use std::sync::Arc;

use axum::{
    Router,
    routing::{delete, get, post},
};
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use bookkeeping_types::BookkeepingRepository;

use super::handlers::{self, AppState};
use crate::ExchangeRateService;

/// HTTP Server for the Bookkeeping API.
pub struct HttpServer<R: BookkeepingRepository> {
    state: Arc<AppState<R>>,
}

impl<R: BookkeepingRepository> HttpServer<R> {
    /// Creates a new HTTP server with the given service.
    pub fn new(service: ExchangeRateService<R>) -> Self {
        Self {
            state: Arc::new(AppState { service }),
        }
    }

    /// Builds the Axum router with all routes.
    pub fn router(&self) -> Router {
        Router::new()
            .route("/health", get(handlers::health))
            .route("/api-docs/openapi.json", get(handlers::openapi_json))
            .route("/api/users", post(handlers::create_user::<R>))
            .route("/api/users/{uid}", get(handlers::get_user::<R>))
            .route(
                "/api/users/{uid}/exchange_rates/latest",
                get(handlers::latest_exchange_rates::<R>),
            )
            .route(
                "/api/users/{uid}/exchange_rates/custom",
                get(handlers::list_custom_exchange_rates::<R>)
                    .post(handlers::update_custom_exchange_rate::<R>),
            )
            .route(
                "/api/users/{uid}/exchange_rates/custom/{currency}",
                delete(handlers::delete_custom_exchange_rate::<R>),
            )
            .layer(CorsLayer::permissive())
            .layer(TraceLayer::new_for_http())
            .with_state(self.state.clone())
    }

    /// Runs the server on the given address with graceful shutdown.
    pub async fn run(self, addr: &str) -> anyhow::Result<()> {
        let listener = tokio::net::TcpListener::bind(addr).await?;
        tracing::info!("Server listening on {}", listener.local_addr()?);

        axum::serve(listener, self.router())
            .with_graceful_shutdown(shutdown_signal())
            .await?;

        Ok(())
    }
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %e, "Failed to listen for Ctrl+C");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "Failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    tracing::info!("Shutdown signal received, starting graceful shutdown...");
}
