use crate::analysis::NutrientTable;
use serde_json::Value;

/// Grams of salt per gram of sodium
const SALT_TO_SODIUM: f64 = 2.5;

/// Product data pulled out of an upstream record, with defaults for missing fields
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProductRecord {
    pub barcode: String,
    pub product_name: Option<String>,
    pub image_url: Option<String>,
    pub ingredients_text: String,
    pub categories: Option<String>,
    pub nutriscore_score: Option<i64>,
    pub allergens_tags: Vec<String>,
    pub ingredients_analysis_tags: Vec<String>,
    pub nutrients: NutrientTable,
}

/// Summary row returned by a name search
#[derive(Debug, Clone, PartialEq, serde::Serialize)]
pub struct ProductSummary {
    pub barcode: String,
    pub product_name: String,
    pub brand: String,
    pub image: String,
    pub categories: String,
}

impl ProductRecord {
    /// Build a record from the upstream `product` object
    pub fn from_upstream(barcode: &str, product: &Value) -> Self {
        Self {
            barcode: barcode.to_string(),
            product_name: text(product, "product_name")
                .or_else(|| text(product, "product_name_en")),
            image_url: text(product, "image_url"),
            ingredients_text: ingredients_text(product),
            categories: text(product, "categories"),
            nutriscore_score: product.get("nutriscore_score").and_then(integer),
            allergens_tags: tags(product, "allergens_tags")
                .into_iter()
                .map(|t| strip_language(&t).to_string())
                .collect(),
            ingredients_analysis_tags: tags(product, "ingredients_analysis_tags"),
            nutrients: nutrients(product.get("nutriments").unwrap_or(&Value::Null)),
        }
    }
}

impl ProductSummary {
    pub fn from_upstream(product: &Value) -> Self {
        Self {
            barcode: text(product, "code")
                .or_else(|| text(product, "id"))
                .unwrap_or_default(),
            product_name: text(product, "product_name")
                .unwrap_or_else(|| "Unknown Product".to_string()),
            brand: text(product, "brands").unwrap_or_default(),
            image: text(product, "image_url")
                .or_else(|| text(product, "image_small_url"))
                .unwrap_or_default(),
            categories: text(product, "categories").unwrap_or_default(),
        }
    }
}

/// Non-empty string field; numbers are rendered as text
fn text(obj: &Value, key: &str) -> Option<String> {
    let s = match obj.get(key)? {
        Value::String(s) => s.trim().to_string(),
        Value::Number(n) => n.to_string(),
        _ => return None,
    };
    (!s.is_empty()).then_some(s)
}

fn tags(obj: &Value, key: &str) -> Vec<String> {
    obj.get(key)
        .and_then(Value::as_array)
        .map(|items| {
            items
                .iter()
                .filter_map(Value::as_str)
                .map(str::to_string)
                .collect()
        })
        .unwrap_or_default()
}

fn integer(v: &Value) -> Option<i64> {
    match v {
        Value::Number(n) => n.as_i64().or_else(|| n.as_f64().map(|f| f.round() as i64)),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

/// `en:sugar` -> `sugar`
fn strip_language(tag: &str) -> &str {
    tag.rsplit(':').next().unwrap_or(tag)
}

/// `en:wheat-flour` -> `Wheat flour`
fn ingredient_label(id: &str) -> String {
    let words = strip_language(id).replace('-', " ");
    let mut chars = words.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars.flat_map(char::to_lowercase)).collect(),
        None => String::new(),
    }
}

fn ingredients_text(product: &Value) -> String {
    if let Some(en) = text(product, "ingredients_text_en") {
        return en;
    }

    let structured: Vec<String> = product
        .get("ingredients")
        .and_then(Value::as_array)
        .into_iter()
        .flatten()
        .filter_map(|item| {
            text(item, "text").or_else(|| {
                text(item, "id")
                    .map(|id| ingredient_label(&id))
                    .filter(|label| !label.is_empty())
            })
        })
        .collect();
    if !structured.is_empty() {
        return structured.join(", ");
    }

    text(product, "ingredients_text").unwrap_or_default()
}

/// Non-negative finite amount; numeric strings are accepted
fn amount(nutriments: &Value, key: &str) -> Option<f64> {
    let v = match nutriments.get(key)? {
        Value::Number(n) => n.as_f64()?,
        Value::String(s) => s.trim().parse().ok()?,
        _ => return None,
    };
    Some(saturate(v))
}

/// NaN and negatives become 0, overflow saturates at `f64::MAX`
fn saturate(v: f64) -> f64 {
    if v.is_nan() || v <= 0.0 { 0.0 } else { v.min(f64::MAX) }
}

fn nutrients(nutriments: &Value) -> NutrientTable {
    let sodium_g = amount(nutriments, "sodium_100g")
        .or_else(|| amount(nutriments, "salt_100g").map(|salt| salt / SALT_TO_SODIUM))
        .unwrap_or(0.0);

    NutrientTable {
        protein: amount(nutriments, "proteins_100g").unwrap_or(0.0),
        fiber: amount(nutriments, "fiber_100g").unwrap_or(0.0),
        sugar: amount(nutriments, "sugars_100g").unwrap_or(0.0),
        sodium: saturate(sodium_g * 1000.0),
        saturated_fat: amount(nutriments, "saturated-fat_100g").unwrap_or(0.0),
    }
}
