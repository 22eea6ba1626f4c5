use serde::{Deserialize, Serialize};

/// Scoring constants as shipped; overridable for experimentation via serde.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoringConfig {
    /// Category averages are normalized against this amount before being
    /// applied as a multiplier on the user's own average.
    pub category_norm: f64,
    /// Recommended amounts never drop below this floor.
    pub min_amount: u32,
    pub morning_multiplier: f64,
    pub midday_multiplier: f64,
    pub evening_multiplier: f64,
    /// Applied to every hour outside the three bands, including hours
    /// outside 0..=23.
    pub off_peak_multiplier: f64,
    pub base_confidence: u8,
    pub preferred_category_bonus: u8,
    pub frequent_user_bonus: u8,
    /// Transaction count a profile must exceed to earn the frequency bonus.
    pub frequent_user_threshold: u32,
    pub confidence_cap: u8,
    pub unknown_user_confidence: u8,
    /// Fallback amount when neither a profile nor a category average exists.
    pub default_amount: f64,
}

impl Default for ScoringConfig {
    fn default() -> Self {
        Self {
            category_norm: 500.0,
            min_amount: 50,
            morning_multiplier: 0.8,
            midday_multiplier: 1.2,
            evening_multiplier: 1.1,
            off_peak_multiplier: 0.7,
            base_confidence: 70,
            preferred_category_bonus: 20,
            frequent_user_bonus: 10,
            frequent_user_threshold: 10,
            confidence_cap: 95,
            unknown_user_confidence: 75,
            default_amount: 500.0,
        }
    }
}
