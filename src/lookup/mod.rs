pub mod barcode;
pub mod client;
pub mod product;

pub use barcode::{Barcode, ValidationError};
pub use client::{LookupError, OpenFoodFactsClient};
pub use product::{ProductRecord, ProductSummary};
