use nutriscan_api::analysis::RiskKeywords;
use nutriscan_api::api::{self, AppState};
use nutriscan_api::assessment::Assessor;
use nutriscan_api::config::AppConfig;
use nutriscan_api::lookup::OpenFoodFactsClient;
use std::sync::Arc;
use tracing::info;
use tracing_subscriber::{EnvFilter, FmtSubscriber};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize logging
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let subscriber = FmtSubscriber::builder()
        .with_env_filter(filter)
        .with_target(false)
        .with_thread_ids(false)
        .compact()
        .finish();

    tracing::subscriber::set_global_default(subscriber)?;

    info!("🚀 Starting NutriScan API Server");

    // Load configuration
    let config = AppConfig::load()?;
    info!("📋 Configuration loaded");
    info!("   - Upstream: {}", config.upstream.base_url);
    info!("   - Timeout: {}s", config.upstream.timeout_secs);
    info!("   - Server: {}:{}", config.server.host, config.server.port);

    // Risk keyword table
    let keywords = match config.dietary.modes.clone() {
        Some(modes) => RiskKeywords::from_pairs(modes),
        None => RiskKeywords::default(),
    };
    info!(
        "🥗 Dietary modes: {}",
        keywords.modes().collect::<Vec<_>>().join(", ")
    );

    // Upstream client
    let client = OpenFoodFactsClient::new(&config.upstream)?;
    if config.upstream.api_key.is_some() {
        info!("🔑 Using Open Food Facts API key");
    }

    let state = AppState {
        assessor: Assessor::new(client, Arc::new(keywords)),
    };

    let app = api::router(state);

    // Start server
    let addr = format!("{}:{}", config.server.host, config.server.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;

    info!("🌐 Server listening on http://{}", addr);
    info!("");
    info!("📡 Available endpoints:");
    info!("   GET  /health             - Health check");
    info!("   GET  /assess/{{barcode}}   - Assess a product");
    info!("   POST /scan-barcode       - Assess a scanned barcode");
    info!("   POST /search-product     - Search products by name");
    info!("");
    info!("✨ Server is ready to accept requests!");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("👋 Server shutting down gracefully");

    Ok(())
}

/// Graceful shutdown handler
async fn shutdown_signal() {
    use tokio::signal;

    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            tracing::error!("Failed to install Ctrl+C handler: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sig) => {
                sig.recv().await;
            }
            Err(e) => {
                tracing::error!("Failed to install SIGTERM handler: {}", e);
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

    info!("🛑 Shutdown signal received");
}
