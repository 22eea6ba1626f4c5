use serde::{Deserialize, Serialize};

/// Identifier wrapper for payer accounts.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct UserId(pub String);

impl UserId {
    /// An id made only of whitespace is treated the same as a missing one.
    pub fn is_blank(&self) -> bool {
        self.0.trim().is_empty()
    }
}

/// Transaction category tag, doubling as the lookup key into the averages table.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Category(pub String);

/// Behavioral segment assigned upstream during profile building.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ClusterId(pub u8);

/// Per-user spending profile. Immutable reference data, loaded once at startup
/// and never mutated by the scoring path.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserProfile {
    pub avg_amount: f64,
    pub cluster: ClusterId,
    pub cluster_name: String,
    pub transactions: u32,
    pub preferred_category: Category,
    /// Standard deviation of historical amounts; surfaced in insights only.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub amount_std: Option<f64>,
    /// Mean transaction hour; surfaced in insights only.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub avg_hour: Option<f64>,
    /// Share of transactions placed on weekends; surfaced in insights only.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub weekend_ratio: Option<f64>,
}

/// One scoring request. Location and payment method ride along for display and
/// logging; the scorer never consults them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecommendationRequest {
    #[serde(default)]
    pub user_id: Option<UserId>,
    pub category: Category,
    #[serde(default)]
    pub location: Option<String>,
    #[serde(default)]
    pub payment_method: Option<String>,
    /// Hour of day. Deliberately not validated: anything outside the known
    /// bands takes the off-peak multiplier.
    pub hour: i32,
}

impl RecommendationRequest {
    /// The user id driving the profile lookup, with blank ids filtered out.
    pub fn effective_user_id(&self) -> Option<&UserId> {
        self.user_id.as_ref().filter(|id| !id.is_blank())
    }
}

/// Scoring output returned to API callers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecommendationResult {
    /// Recommended amount in whole currency units.
    pub amount: u32,
    /// Heuristic percentage, not a statistical measure.
    pub confidence: u8,
    /// Cluster display name, or "Unknown" for the fallback path.
    pub cluster: String,
    pub reasoning: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_user_ids_are_filtered() {
        let request = RecommendationRequest {
            user_id: Some(UserId("   ".to_string())),
            category: Category("Groceries".to_string()),
            location: None,
            payment_method: None,
            hour: 12,
        };
        assert!(request.effective_user_id().is_none());
    }

    #[test]
    fn request_deserializes_with_optional_fields_absent() {
        let request: RecommendationRequest =
            serde_json::from_str(r#"{"category": "Fuel", "hour": 9}"#).expect("valid request");
        assert_eq!(request.category, Category("Fuel".to_string()));
        assert!(request.user_id.is_none());
        assert!(request.location.is_none());
    }
}
