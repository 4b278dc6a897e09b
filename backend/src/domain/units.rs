//! Weight unit conversions.
//!
//! Weights are stored canonically as integer grams; every other unit is
//! derived on demand. Rounding to display precision happens at the DTO
//! mapping layer, not here.

/// Exact conversion factor: 1 lb = 453.59237 g.
pub const GRAMS_PER_POUND: f64 = 453.59237;

/// 1 oz = 1 lb / 16.
pub const OUNCES_PER_POUND: f64 = 16.0;

pub const GRAMS_PER_KILOGRAM: f64 = 1000.0;

/// Convert kilograms to the nearest whole gram.
pub fn kilograms_to_grams(kilograms: f64) -> u32 {
    (kilograms * GRAMS_PER_KILOGRAM).round().max(0.0) as u32
}

/// Convert a pounds + ounces reading to the nearest whole gram.
pub fn pounds_ounces_to_grams(pounds: f64, ounces: f64) -> u32 {
    let total_pounds = pounds + ounces / OUNCES_PER_POUND;
    (total_pounds * GRAMS_PER_POUND).round().max(0.0) as u32
}

pub fn grams_to_kilograms(grams: u32) -> f64 {
    grams as f64 / GRAMS_PER_KILOGRAM
}

pub fn grams_to_pounds(grams: u32) -> f64 {
    grams as f64 / GRAMS_PER_POUND
}

/// Round to 2 decimal places for display.
pub fn round_for_display(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
