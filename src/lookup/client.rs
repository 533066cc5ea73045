use crate::config::UpstreamConfig;
use crate::lookup::barcode::Barcode;
use crate::lookup::product::{ProductRecord, ProductSummary};
use reqwest::{header, Client, StatusCode};
use serde_json::Value;
use std::time::Instant;
use thiserror::Error;
use tracing::{debug, info, instrument, warn};

#[derive(Debug, Error)]
pub enum LookupError {
    #[error("Product {0} not found")]
    NotFound(String),
    #[error("Product database did not answer within {0} seconds")]
    Timeout(u64),
    #[error("Product database returned status {0}")]
    Status(StatusCode),
    #[error("Product database request failed: {0}")]
    Transport(String),
    #[error("Product database returned a malformed payload: {0}")]
    Malformed(String),
}

/// Client for the Open Food Facts product database
#[derive(Debug, Clone)]
pub struct OpenFoodFactsClient {
    client: Client,
    base_url: String,
    api_key: Option<String>,
    timeout_secs: u64,
    search_page_size: u32,
}

impl OpenFoodFactsClient {
    pub fn new(config: &UpstreamConfig) -> Result<Self, LookupError> {
        let client = Client::builder()
            .user_agent(config.user_agent.as_str())
            .timeout(config.timeout())
            .build()
            .map_err(|e| LookupError::Transport(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            api_key: config.api_key.clone().filter(|k| !k.trim().is_empty()),
            timeout_secs: config.timeout_secs,
            search_page_size: config.search_page_size,
        })
    }

    fn map_send_error(&self, e: reqwest::Error) -> LookupError {
        if e.is_timeout() {
            LookupError::Timeout(self.timeout_secs)
        } else {
            LookupError::Transport(e.to_string())
        }
    }

    fn map_body_error(&self, e: reqwest::Error) -> LookupError {
        if e.is_timeout() {
            LookupError::Timeout(self.timeout_secs)
        } else {
            LookupError::Malformed(e.to_string())
        }
    }

    /// Fetch a single product. One attempt, no retries.
    #[instrument(skip(self, barcode), fields(barcode = %barcode))]
    pub async fn fetch_product(&self, barcode: &Barcode) -> Result<ProductRecord, LookupError> {
        let url = format!("{}/api/v0/product/{}.json", self.base_url, barcode);
        let mut request = self.client.get(&url);
        if let Some(key) = &self.api_key {
            request = request.header(header::AUTHORIZATION, format!("Bearer {}", key));
        }

        let started = Instant::now();
        let response = request.send().await.map_err(|e| {
            let err = self.map_send_error(e);
            warn!(error = %err, "Product lookup failed");
            err
        })?;

        let status = response.status();
        debug!(
            status = status.as_u16(),
            elapsed_ms = started.elapsed().as_millis() as u64,
            "Upstream responded"
        );

        if status == StatusCode::NOT_FOUND {
            info!("Product not found upstream");
            return Err(LookupError::NotFound(barcode.to_string()));
        }
        if !status.is_success() {
            warn!(status = status.as_u16(), "Upstream returned an error status");
            return Err(LookupError::Status(status));
        }

        let body: Value = response.json().await.map_err(|e| self.map_body_error(e))?;

        let record = parse_product_response(barcode, &body)?;
        info!(
            found_name = record.product_name.is_some(),
            elapsed_ms = started.elapsed().as_millis() as u64,
            "Product lookup complete"
        );
        Ok(record)
    }

    /// Search products by free-text name
    #[instrument(skip(self))]
    pub async fn search_products(&self, name: &str) -> Result<Vec<ProductSummary>, LookupError> {
        let url = format!("{}/cgi/search.pl", self.base_url);
        let page_size = self.search_page_size.to_string();

        let response = self
            .client
            .get(&url)
            .query(&[
                ("search_terms", name),
                ("search_simple", "1"),
                ("json", "1"),
                ("page_size", page_size.as_str()),
            ])
            .send()
            .await
            .map_err(|e| self.map_send_error(e))?;

        let status = response.status();
        if !status.is_success() {
            warn!(status = status.as_u16(), "Search returned an error status");
            return Err(LookupError::Status(status));
        }

        let body: Value = response.json().await.map_err(|e| self.map_body_error(e))?;

        let products = parse_search_response(&body)?;
        info!(found = products.len(), "Search complete");
        Ok(products)
    }
}

/// Interpret a `/api/v0/product` body
pub fn parse_product_response(
    barcode: &Barcode,
    body: &Value,
) -> Result<ProductRecord, LookupError> {
    if !body.is_object() {
        return Err(LookupError::Malformed("expected a JSON object".to_string()));
    }

    let found = body.get("status").and_then(Value::as_i64) == Some(1);
    match body.get("product") {
        Some(product) if found && product.is_object() => {
            Ok(ProductRecord::from_upstream(barcode.as_str(), product))
        }
        Some(product) if found && !product.is_null() => {
            Err(LookupError::Malformed("product is not an object".to_string()))
        }
        _ => Err(LookupError::NotFound(barcode.to_string())),
    }
}

pub fn parse_search_response(body: &Value) -> Result<Vec<ProductSummary>, LookupError> {
    let products = match body.get("products") {
        None | Some(Value::Null) => return Ok(Vec::new()),
        Some(Value::Array(items)) => items,
        Some(_) => return Err(LookupError::Malformed("products is not a list".to_string())),
    };

    Ok(products
        .iter()
        .filter(|p| p.is_object())
        .map(ProductSummary::from_upstream)
        .collect())
}
