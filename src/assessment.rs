use crate::analysis::{
    infer_allergens, parse_ingredients, DietaryFlags, HealthColor, HealthScore, NutrientTable,
    RiskKeywords,
};
use crate::lookup::{Barcode, LookupError, OpenFoodFactsClient, ProductRecord, ValidationError};
use serde::Serialize;
use std::collections::BTreeMap;
use std::sync::Arc;
use thiserror::Error;
use tracing::info;

/// Flat, client-facing result of one assessment
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AssessmentResult {
    pub barcode: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub product_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    pub ingredients: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub categories: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub nutriscore_score: Option<i64>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub allergens_tags: Vec<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub ingredients_analysis_tags: Vec<String>,
    pub nutrients_per_100g: NutrientTable,
    pub health_score: u8,
    pub health_color: HealthColor,
    pub dietary: BTreeMap<String, DietaryFlags>,
}

impl AssessmentResult {
    /// Shape a looked-up product and its derived flags into the response
    pub fn build(
        record: ProductRecord,
        dietary: BTreeMap<String, DietaryFlags>,
        score: HealthScore,
    ) -> Self {
        let ingredients = parse_ingredients(&record.ingredients_text);

        let allergens_tags = if !record.allergens_tags.is_empty() {
            record.allergens_tags
        } else {
            infer_allergens(&ingredients)
                .into_iter()
                .map(|a| format!("May contain: {}", a))
                .collect()
        };

        Self {
            barcode: record.barcode,
            product_name: record.product_name,
            image: record.image_url,
            ingredients,
            categories: record.categories,
            nutriscore_score: record.nutriscore_score,
            allergens_tags,
            ingredients_analysis_tags: record.ingredients_analysis_tags,
            nutrients_per_100g: record.nutrients,
            health_score: score.value,
            health_color: score.color,
            dietary,
        }
    }
}

#[derive(Debug, Error)]
pub enum AssessError {
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error(transparent)]
    Lookup(#[from] LookupError),
}

/// Fetch, scan, score, format
#[derive(Debug, Clone)]
pub struct Assessor {
    client: OpenFoodFactsClient,
    keywords: Arc<RiskKeywords>,
}

impl Assessor {
    pub fn new(client: OpenFoodFactsClient, keywords: Arc<RiskKeywords>) -> Self {
        Self { client, keywords }
    }

    pub fn client(&self) -> &OpenFoodFactsClient {
        &self.client
    }

    pub async fn assess(&self, raw_barcode: &str) -> Result<AssessmentResult, AssessError> {
        let barcode = Barcode::parse(raw_barcode)?;
        let record = self.client.fetch_product(&barcode).await?;
        Ok(self.evaluate(record))
    }

    /// The pure part of the pipeline, applied to an already fetched record
    pub fn evaluate(&self, record: ProductRecord) -> AssessmentResult {
        let dietary = self.keywords.scan_all(&record.ingredients_text);
        let score = HealthScore::compute(&record.nutrients);

        info!(
            barcode = %record.barcode,
            health_score = score.value,
            violations = dietary.values().filter(|f| f.violation).count(),
            "Assessment complete"
        );

        AssessmentResult::build(record, dietary, score)
    }
}
