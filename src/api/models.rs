use crate::assessment::{AssessError, Assessor};
use crate::lookup::{LookupError, ProductSummary, ValidationError};
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};
use tracing::{error, warn};

/// Application state
#[derive(Clone)]
pub struct AppState {
    pub assessor: Assessor,
}

/// Barcode as sent by the scanner UI, either a string or a bare number
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub enum BarcodeInput {
    Text(String),
    Number(u64),
}

impl BarcodeInput {
    pub fn into_string(self) -> String {
        match self {
            BarcodeInput::Text(s) => s,
            BarcodeInput::Number(n) => n.to_string(),
        }
    }
}

/// Request to assess a scanned barcode
#[derive(Debug, Deserialize)]
pub struct ScanBarcodeRequest {
    pub barcode: BarcodeInput,
}

/// Request to search products by name
#[derive(Debug, Deserialize)]
pub struct SearchProductRequest {
    pub name: String,
}

impl SearchProductRequest {
    /// Validate the request, returning the trimmed name
    pub fn validate(&self) -> Result<&str, ValidationError> {
        let name = self.name.trim();
        if name.is_empty() {
            return Err(ValidationError::EmptySearchTerm);
        }
        Ok(name)
    }
}

/// Response from the search endpoint
#[derive(Debug, Serialize)]
pub struct SearchProductResponse {
    pub products: Vec<ProductSummary>,
    pub count: usize,
}

/// Health check response
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub service: String,
    pub version: String,
}

/// Error response
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
    pub message: String,
}

/// Application error type
#[derive(Debug)]
pub enum AppError {
    BadRequest(String),
    NotFound(String),
    Upstream(String),
}

impl From<ValidationError> for AppError {
    fn from(e: ValidationError) -> Self {
        AppError::BadRequest(e.to_string())
    }
}

impl From<LookupError> for AppError {
    fn from(e: LookupError) -> Self {
        match e {
            LookupError::NotFound(_) => AppError::NotFound(e.to_string()),
            other => AppError::Upstream(other.to_string()),
        }
    }
}

impl From<AssessError> for AppError {
    fn from(e: AssessError) -> Self {
        match e {
            AssessError::Validation(v) => v.into(),
            AssessError::Lookup(l) => l.into(),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            AppError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg),
            AppError::NotFound(msg) => {
                warn!("Not found: {}", msg);
                (StatusCode::NOT_FOUND, msg)
            }
            AppError::Upstream(msg) => {
                error!("Upstream error: {}", msg);
                (StatusCode::BAD_GATEWAY, msg)
            }
        };

        let body = Json(ErrorResponse {
            error: status.to_string(),
            message,
        });

        (status, body).into_response()
    }
}
