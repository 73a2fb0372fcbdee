use std::sync::Arc;

use axum::Router;
use candela::config::Config;
use candela::services::{BarStore, IngestService, ScriptForecaster};
use candela::sources::BinanceClient;
use candela::{api, AppState};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables
    dotenvy::dotenv().ok();

    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "candela=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load configuration
    let config = Arc::new(Config::from_env());
    info!("Starting Candela server on {}:{}", config.host, config.port);

    // Open the bar store
    let bar_store = Arc::new(BarStore::new(&config.database_path)?);
    info!(
        "Bar store opened at {} ({} bars)",
        config.database_path,
        bar_store.bar_count()
    );

    // Forecaster shells out to the configured model scripts
    let forecaster = Arc::new(ScriptForecaster::new(&config));

    // Backfill daily history for configured symbols in the background
    if !config.ingest_symbols.is_empty() {
        let ingest = IngestService::new(BinanceClient::new(), bar_store.clone());
        let symbols = config.ingest_symbols.clone();
        let history_days = config.ingest_history_days;
        tokio::spawn(async move {
            ingest.sync_symbols(&symbols, history_days).await;
        });
    }

    // Create application state
    let state = AppState {
        config: config.clone(),
        bar_store,
        forecaster,
    };

    // Build CORS layer
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    // Build the router
    let app = Router::new()
        .merge(api::router())
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state);

    // Start the server
    let addr = format!("{}:{}", config.host, config.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    info!("Candela server listening on {}", addr);

    axum::serve(listener, app).await?;

    Ok(())
}
