use serde::Serialize;

/// Nutrient amounts per 100g. Sodium is in milligrams, everything else in grams.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct NutrientTable {
    pub protein: f64,
    pub fiber: f64,
    pub sugar: f64,
    pub sodium: f64,
    pub saturated_fat: f64,
}

const BASE_OFFSET: f64 = 50.0;
const W_PROTEIN: f64 = 2.0;
const W_FIBER: f64 = 3.0;
const W_SUGAR: f64 = 1.0;
const W_SODIUM: f64 = 0.02;
const W_SATURATED_FAT: f64 = 2.0;

/// Upper bound for any single weighted term; keeps sums finite
const TERM_CAP: f64 = 1e9;

pub const GREEN_THRESHOLD: u8 = 70;
pub const ORANGE_THRESHOLD: u8 = 40;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum HealthColor {
    Green,
    Orange,
    Red,
}

impl HealthColor {
    pub fn from_score(score: u8) -> Self {
        if score >= GREEN_THRESHOLD {
            HealthColor::Green
        } else if score >= ORANGE_THRESHOLD {
            HealthColor::Orange
        } else {
            HealthColor::Red
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct HealthScore {
    pub value: u8,
    pub color: HealthColor,
}

impl HealthScore {
    pub fn compute(nutrients: &NutrientTable) -> Self {
        let value = score(nutrients);
        Self {
            value,
            color: HealthColor::from_score(value),
        }
    }
}

/// NaN and negatives count as zero; +inf saturates at the cap
fn term(weight: f64, amount: f64) -> f64 {
    if amount.is_nan() || amount <= 0.0 {
        return 0.0;
    }
    (weight * amount).min(TERM_CAP)
}

/// Weighted nutrient score clamped to 0..=100
pub fn score(n: &NutrientTable) -> u8 {
    let reward = term(W_PROTEIN, n.protein) + term(W_FIBER, n.fiber);
    let penalty = term(W_SUGAR, n.sugar)
        + term(W_SODIUM, n.sodium)
        + term(W_SATURATED_FAT, n.saturated_fat);

    let raw = BASE_OFFSET + reward - penalty;
    raw.clamp(0.0, 100.0).round() as u8
}
