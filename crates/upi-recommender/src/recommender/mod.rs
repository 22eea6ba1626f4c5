pub mod domain;
pub mod import;
pub mod insights;
pub mod router;
pub mod scoring;
pub mod service;
pub mod store;

pub use domain::{Category, RecommendationRequest, RecommendationResult, UserId, UserProfile};
pub use insights::UserInsights;
pub use scoring::{ScoringConfig, ScoringEngine, ScoringError};
pub use service::{BatchEntry, RecommendationError, RecommendationService};
pub use store::{CategoryAverages, ProfileStore, StoreError};
