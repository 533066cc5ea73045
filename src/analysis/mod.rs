pub mod dietary;
pub mod health;
pub mod ingredients;

pub use dietary::{DietaryFlags, RiskKeywords};
pub use health::{HealthColor, HealthScore, NutrientTable};
pub use ingredients::{infer_allergens, parse_ingredients};
