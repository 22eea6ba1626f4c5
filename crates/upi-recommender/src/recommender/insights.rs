use serde::Serialize;

use super::domain::{UserId, UserProfile};

/// Per-user insight view assembled from the profile table for API callers.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct UserInsights {
    pub user_id: UserId,
    pub spending_profile: SpendingProfile,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub behavior_patterns: Option<BehaviorPatterns>,
    pub user_segment: UserSegment,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SpendingProfile {
    pub avg_amount: f64,
    pub total_transactions: u32,
    /// Standard deviation of historical amounts, when the profile export
    /// carried it.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub spending_consistency: Option<f64>,
    pub preferred_category: String,
}

/// Present only when the behavioral columns were part of the profile export.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BehaviorPatterns {
    pub typical_hour: f64,
    pub weekend_activity: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct UserSegment {
    pub cluster_id: u8,
    pub cluster_name: &'static str,
}

/// Canonical segment labels assigned during profile clustering.
pub fn cluster_label(cluster_id: u8) -> &'static str {
    match cluster_id {
        0 => "Conservative Spenders",
        1 => "High-Value Users",
        2 => "Frequent Small Transactions",
        3 => "Active Users",
        4 => "Balanced Spenders",
        _ => "Unknown",
    }
}

impl UserInsights {
    pub fn from_profile(user_id: UserId, profile: &UserProfile) -> Self {
        let behavior_patterns = match (profile.avg_hour, profile.weekend_ratio) {
            (Some(typical_hour), Some(weekend_ratio)) => Some(BehaviorPatterns {
                typical_hour: (typical_hour * 10.0).round() / 10.0,
                weekend_activity: format!("{:.1}%", weekend_ratio * 100.0),
            }),
            _ => None,
        };

        Self {
            user_id,
            spending_profile: SpendingProfile {
                avg_amount: (profile.avg_amount * 100.0).round() / 100.0,
                total_transactions: profile.transactions,
                spending_consistency: profile.amount_std,
                preferred_category: profile.preferred_category.0.clone(),
            },
            behavior_patterns,
            user_segment: UserSegment {
                cluster_id: profile.cluster.0,
                cluster_name: cluster_label(profile.cluster.0),
            },
        }
    }
}
