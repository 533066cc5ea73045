//! NutriScan API: barcode lookup against Open Food Facts, dietary risk
//! scanning and a simple nutrient health score.

pub mod analysis;
pub mod api;
pub mod assessment;
pub mod config;
pub mod lookup;
