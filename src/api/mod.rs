pub mod assess;
pub mod models;
pub mod search;

// Re-exports
pub use models::*;

use axum::{routing::get, Json, Router};
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

pub async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
        service: "NutriScan API".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

/// Full router with middleware
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health_handler))
        .merge(assess::routes())
        .merge(search::routes())
        .with_state(state)
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
}
