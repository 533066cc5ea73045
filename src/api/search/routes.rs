use crate::api::models::AppState;
use crate::api::search::handlers::search_product_handler;
use axum::{routing::post, Router};

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/search-product", post(search_product_handler))
}
