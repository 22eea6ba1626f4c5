use super::config::ScoringConfig;
use crate::recommender::domain::{Category, UserProfile};

/// Time-of-day multiplier. The bands are inclusive on both ends; everything
/// else, out-of-range hours included, is off-peak.
pub(crate) fn hour_multiplier(hour: i32, config: &ScoringConfig) -> f64 {
    match hour {
        6..=10 => config.morning_multiplier,
        11..=14 => config.midday_multiplier,
        18..=22 => config.evening_multiplier,
        _ => config.off_peak_multiplier,
    }
}

pub(crate) fn category_multiplier(category_avg: f64, config: &ScoringConfig) -> f64 {
    category_avg / config.category_norm
}

/// Confidence for the known-user path: base plus a bonus for an exact
/// preferred-category match and another for frequent users, capped.
pub(crate) fn confidence_for(
    profile: &UserProfile,
    category: &Category,
    config: &ScoringConfig,
) -> u8 {
    let mut confidence = u16::from(config.base_confidence);
    if profile.preferred_category == *category {
        confidence += u16::from(config.preferred_category_bonus);
    }
    if profile.transactions > config.frequent_user_threshold {
        confidence += u16::from(config.frequent_user_bonus);
    }
    confidence.min(u16::from(config.confidence_cap)) as u8
}

/// Round to whole currency units and apply the floor.
pub(crate) fn clamp_amount(raw: f64, config: &ScoringConfig) -> u32 {
    let rounded = raw.round().max(0.0) as u32;
    rounded.max(config.min_amount)
}
