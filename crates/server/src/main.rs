//! # server
//!
//! REST API server for the forecasting and reorder-decision operations.

use std::process::ExitCode;

use forecast_facade::{service_with, EstimationOptions, SarimaFitter};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod config;
mod pool;
mod routes;

use config::ServerConfig;
use pool::FitPool;
use routes::AppState;

#[tokio::main]
async fn main() -> ExitCode {
    // Load .env file (optional - won't fail if missing)
    dotenvy::dotenv().ok();

    // Initialize tracing
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer())
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "server=info,forecast_core=info,tower_http=info".into()),
        )
        .init();

    match run().await {
        Ok(()) => ExitCode::SUCCESS,
        Err(error) => {
            tracing::error!("server failed: {error}");
            ExitCode::FAILURE
        }
    }
}

async fn run() -> Result<(), Box<dyn std::error::Error>> {
    let config = ServerConfig::from_env()?;
    let addr = config.addr()?;

    let state = AppState {
        service: service_with(SarimaFitter::new(EstimationOptions::default()))
            .with_seed(config.search_seed),
        pool: FitPool::new(config.fit_workers, config.fit_timeout)?,
    };

    // CORS configuration
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let app = routes::router(state)
        .layer(TraceLayer::new_for_http())
        .layer(cors);

    tracing::info!(
        workers = config.fit_workers,
        timeout_secs = config.fit_timeout.map(|t| t.as_secs()),
        "server v{} listening on {}",
        env!("CARGO_PKG_VERSION"),
        addr
    );

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;
    Ok(())
}
