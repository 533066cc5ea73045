use crate::api::models::*;
use crate::assessment::AssessmentResult;
use axum::{
    extract::{rejection::JsonRejection, Path, State},
    Json,
};
use tracing::info;

pub async fn assess_handler(
    State(state): State<AppState>,
    Path(barcode): Path<String>,
) -> Result<Json<AssessmentResult>, AppError> {
    info!(barcode = %barcode, "Assessing product");

    let result = state.assessor.assess(&barcode).await?;
    Ok(Json(result))
}

pub async fn scan_barcode_handler(
    State(state): State<AppState>,
    payload: Result<Json<ScanBarcodeRequest>, JsonRejection>,
) -> Result<Json<AssessmentResult>, AppError> {
    let Json(request) = payload.map_err(|e| {
        AppError::BadRequest(format!(
            "Missing 'barcode' field in request body: {}",
            e.body_text()
        ))
    })?;
    let barcode = request.barcode.into_string();

    info!(barcode = %barcode, "Scanning barcode");

    let result = state.assessor.assess(&barcode).await?;
    Ok(Json(result))
}
