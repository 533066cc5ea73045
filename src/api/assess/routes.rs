use crate::api::assess::handlers::{assess_handler, scan_barcode_handler};
use crate::api::models::AppState;
use axum::{
    routing::{get, post},
    Router,
};

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/assess/{barcode}", get(assess_handler))
        .route("/scan-barcode", post(scan_barcode_handler))
}
