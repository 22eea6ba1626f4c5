mod config;
mod rules;

pub use config::ScoringConfig;

use super::domain::{RecommendationRequest, RecommendationResult, UserProfile};
use super::store::CategoryAverages;

pub(crate) const UNKNOWN_CLUSTER: &str = "Unknown";

/// Stateless scorer applying the multiplier rubric to a request.
///
/// Each call is a pure transformation of the request plus the two reference
/// tables; identical inputs always produce identical results.
pub struct ScoringEngine {
    config: ScoringConfig,
}

impl ScoringEngine {
    pub fn new(config: ScoringConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &ScoringConfig {
        &self.config
    }

    /// Score one request. `profile` is the caller's lookup result for the
    /// request's user id; `None` selects the category-average fallback path.
    pub fn recommend(
        &self,
        request: &RecommendationRequest,
        profile: Option<&UserProfile>,
        averages: &CategoryAverages,
    ) -> Result<RecommendationResult, ScoringError> {
        match profile {
            Some(profile) => self.recommend_for_profile(request, profile, averages),
            None => Ok(self.recommend_for_new_user(request, averages)),
        }
    }

    fn recommend_for_profile(
        &self,
        request: &RecommendationRequest,
        profile: &UserProfile,
        averages: &CategoryAverages,
    ) -> Result<RecommendationResult, ScoringError> {
        let category_avg =
            averages
                .get(&request.category)
                .ok_or_else(|| ScoringError::UnknownCategory {
                    category: request.category.0.clone(),
                })?;

        let category_multiplier = rules::category_multiplier(category_avg, &self.config);
        let hour_multiplier = rules::hour_multiplier(request.hour, &self.config);
        let amount = rules::clamp_amount(
            profile.avg_amount * category_multiplier * hour_multiplier,
            &self.config,
        );
        let confidence = rules::confidence_for(profile, &request.category, &self.config);

        Ok(RecommendationResult {
            amount,
            confidence,
            cluster: profile.cluster_name.clone(),
            reasoning: format!(
                "Based on your {} spending pattern and typical {} amounts at this hour",
                profile.cluster_name, request.category.0
            ),
        })
    }

    fn recommend_for_new_user(
        &self,
        request: &RecommendationRequest,
        averages: &CategoryAverages,
    ) -> RecommendationResult {
        let base = averages
            .get(&request.category)
            .unwrap_or(self.config.default_amount);

        RecommendationResult {
            amount: base.round() as u32,
            confidence: self.config.unknown_user_confidence,
            cluster: UNKNOWN_CLUSTER.to_string(),
            reasoning: "No spending history on file; recommendation uses the category average"
                .to_string(),
        }
    }
}

impl Default for ScoringEngine {
    fn default() -> Self {
        Self::new(ScoringConfig::default())
    }
}

/// Scoring failure. Unknown users are a fallback path, never an error; only a
/// missing category on the profiled path is rejected.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ScoringError {
    #[error("category '{category}' has no average on file")]
    UnknownCategory { category: String },
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::recommender::domain::{Category, ClusterId, UserId};

    fn averages() -> CategoryAverages {
        let mut averages = CategoryAverages::empty();
        averages.insert(Category("Entertainment".to_string()), 398.0);
        averages.insert(Category("Shopping".to_string()), 842.0);
        averages
    }

    fn profile() -> UserProfile {
        UserProfile {
            avg_amount: 1017.0,
            cluster: ClusterId(1),
            cluster_name: "High-Value Users".to_string(),
            transactions: 8,
            preferred_category: Category("Entertainment".to_string()),
            amount_std: None,
            avg_hour: None,
            weekend_ratio: None,
        }
    }

    fn request(user_id: Option<&str>, category: &str, hour: i32) -> RecommendationRequest {
        RecommendationRequest {
            user_id: user_id.map(|id| UserId(id.to_string())),
            category: Category(category.to_string()),
            location: Some("Mumbai".to_string()),
            payment_method: Some("PhonePe".to_string()),
            hour,
        }
    }

    #[test]
    fn profiled_midday_entertainment_matches_reference_arithmetic() {
        let engine = ScoringEngine::default();
        let result = engine
            .recommend(
                &request(Some("USER_0001"), "Entertainment", 13),
                Some(&profile()),
                &averages(),
            )
            .expect("category known");

        // 1017 * (398 / 500) * 1.2 = 971.4384
        assert_eq!(result.amount, 971);
        assert_eq!(result.confidence, 90);
        assert_eq!(result.cluster, "High-Value Users");
        assert!(result.reasoning.contains("High-Value Users"));
        assert!(result.reasoning.contains("Entertainment"));
    }

    #[test]
    fn profiled_request_without_preference_match_keeps_base_confidence() {
        let engine = ScoringEngine::default();
        let result = engine
            .recommend(
                &request(Some("USER_0001"), "Shopping", 13),
                Some(&profile()),
                &averages(),
            )
            .expect("category known");
        assert_eq!(result.confidence, 70);
    }

    #[test]
    fn profiled_request_with_unknown_category_is_rejected() {
        let engine = ScoringEngine::default();
        let err = engine
            .recommend(
                &request(Some("USER_0001"), "Astrology", 13),
                Some(&profile()),
                &averages(),
            )
            .expect_err("category missing");
        assert_eq!(
            err,
            ScoringError::UnknownCategory {
                category: "Astrology".to_string()
            }
        );
    }

    #[test]
    fn unknown_user_takes_the_category_average() {
        let engine = ScoringEngine::default();
        let result = engine
            .recommend(&request(None, "Shopping", 15), None, &averages())
            .expect("fallback path never fails");
        assert_eq!(result.amount, 842);
        assert_eq!(result.confidence, 75);
        assert_eq!(result.cluster, "Unknown");
    }

    #[test]
    fn unknown_user_and_category_fall_back_to_the_default_amount() {
        let engine = ScoringEngine::default();
        let result = engine
            .recommend(&request(None, "Astrology", 15), None, &averages())
            .expect("fallback path never fails");
        assert_eq!(result.amount, 500);
        assert_eq!(result.confidence, 75);
    }

    #[test]
    fn scoring_is_idempotent() {
        let engine = ScoringEngine::default();
        let request = request(Some("USER_0001"), "Entertainment", 13);
        let profile = profile();
        let averages = averages();

        let first = engine.recommend(&request, Some(&profile), &averages);
        let second = engine.recommend(&request, Some(&profile), &averages);
        assert_eq!(first, second);
    }
}
