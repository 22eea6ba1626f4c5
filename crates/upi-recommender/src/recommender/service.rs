use std::sync::Arc;

use serde::Serialize;

use super::domain::{RecommendationRequest, RecommendationResult, UserId};
use super::insights::UserInsights;
use super::scoring::{ScoringEngine, ScoringError};
use super::store::{CategoryAverages, ProfileStore, StoreError};

/// Facade composing the profile store, category table, and scoring engine.
pub struct RecommendationService<P> {
    store: Arc<P>,
    averages: Arc<CategoryAverages>,
    engine: ScoringEngine,
}

impl<P> RecommendationService<P>
where
    P: ProfileStore + 'static,
{
    pub fn new(store: Arc<P>, averages: CategoryAverages, engine: ScoringEngine) -> Self {
        Self {
            store,
            averages: Arc::new(averages),
            engine,
        }
    }

    /// Score one request. A missing or unknown user id routes through the
    /// category-average fallback; only catalog gaps and store outages fail.
    pub fn recommend(
        &self,
        request: &RecommendationRequest,
    ) -> Result<RecommendationResult, RecommendationError> {
        let profile = match request.effective_user_id() {
            Some(user_id) => {
                let profile = self.store.fetch(user_id)?;
                if profile.is_none() {
                    tracing::debug!(user_id = %user_id.0, "no profile on file, using category fallback");
                }
                profile
            }
            None => None,
        };
        let result = self
            .engine
            .recommend(request, profile.as_ref(), &self.averages)?;
        Ok(result)
    }

    /// Score a batch in order. Entries fail independently; one bad request
    /// never aborts the rest.
    pub fn recommend_batch(&self, requests: &[RecommendationRequest]) -> Vec<BatchEntry> {
        requests
            .iter()
            .map(|request| match self.recommend(request) {
                Ok(recommendation) => BatchEntry::Ok { recommendation },
                Err(error) => BatchEntry::Failed {
                    error: error.to_string(),
                },
            })
            .collect()
    }

    /// Assemble the insight view for a profiled user.
    pub fn user_insights(&self, user_id: &UserId) -> Result<UserInsights, RecommendationError> {
        let profile = self
            .store
            .fetch(user_id)?
            .ok_or_else(|| RecommendationError::UnknownUser {
                user_id: user_id.0.clone(),
            })?;
        Ok(UserInsights::from_profile(user_id.clone(), &profile))
    }

    pub fn category_averages(&self) -> &CategoryAverages {
        &self.averages
    }

    pub fn profile_count(&self) -> usize {
        self.store.len()
    }
}

/// Per-request outcome within a batch response.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum BatchEntry {
    Ok { recommendation: RecommendationResult },
    Failed { error: String },
}

/// Error raised by the recommendation facade.
#[derive(Debug, thiserror::Error)]
pub enum RecommendationError {
    #[error(transparent)]
    Scoring(#[from] ScoringError),
    #[error(transparent)]
    Store(#[from] StoreError),
    #[error("no profile on file for user '{user_id}'")]
    UnknownUser { user_id: String },
}
