use crate::api::models::*;
use axum::{
    extract::{rejection::JsonRejection, State},
    Json,
};
use tracing::info;

pub async fn search_product_handler(
    State(state): State<AppState>,
    payload: Result<Json<SearchProductRequest>, JsonRejection>,
) -> Result<Json<SearchProductResponse>, AppError> {
    let Json(request) = payload.map_err(|e| {
        AppError::BadRequest(format!(
            "Missing 'name' field in request body: {}",
            e.body_text()
        ))
    })?;
    let name = request.validate()?;

    info!(name = %name, "Searching products");

    let products = state.assessor.client().search_products(name).await?;
    if products.is_empty() {
        return Err(AppError::NotFound(
            "No products found matching that name".to_string(),
        ));
    }

    Ok(Json(SearchProductResponse {
        count: products.len(),
        products,
    }))
}
