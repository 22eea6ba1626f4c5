use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Router,
};
use serde_json::json;

use super::domain::{RecommendationRequest, UserId};
use super::service::{RecommendationError, RecommendationService};
use super::store::ProfileStore;

/// Router builder exposing the recommendation and insight endpoints.
pub fn recommendation_router<P>(service: Arc<RecommendationService<P>>) -> Router
where
    P: ProfileStore + 'static,
{
    Router::new()
        .route("/api/v1/recommendations", post(recommend_handler::<P>))
        .route(
            "/api/v1/recommendations/batch",
            post(recommend_batch_handler::<P>),
        )
        .route(
            "/api/v1/users/:user_id/insights",
            get(user_insights_handler::<P>),
        )
        .with_state(service)
}

pub(crate) async fn recommend_handler<P>(
    State(service): State<Arc<RecommendationService<P>>>,
    axum::Json(request): axum::Json<RecommendationRequest>,
) -> Response
where
    P: ProfileStore + 'static,
{
    match service.recommend(&request) {
        Ok(result) => (StatusCode::OK, axum::Json(result)).into_response(),
        Err(error) => error_response(error),
    }
}

pub(crate) async fn recommend_batch_handler<P>(
    State(service): State<Arc<RecommendationService<P>>>,
    axum::Json(requests): axum::Json<Vec<RecommendationRequest>>,
) -> Response
where
    P: ProfileStore + 'static,
{
    let entries = service.recommend_batch(&requests);
    (StatusCode::OK, axum::Json(entries)).into_response()
}

pub(crate) async fn user_insights_handler<P>(
    State(service): State<Arc<RecommendationService<P>>>,
    Path(user_id): Path<String>,
) -> Response
where
    P: ProfileStore + 'static,
{
    match service.user_insights(&UserId(user_id)) {
        Ok(insights) => (StatusCode::OK, axum::Json(insights)).into_response(),
        Err(error) => error_response(error),
    }
}

fn error_response(error: RecommendationError) -> Response {
    let status = match &error {
        RecommendationError::Scoring(_) => StatusCode::UNPROCESSABLE_ENTITY,
        RecommendationError::UnknownUser { .. } => StatusCode::NOT_FOUND,
        RecommendationError::Store(_) => StatusCode::INTERNAL_SERVER_ERROR,
    };
    let payload = json!({ "error": error.to_string() });
    (status, axum::Json(payload)).into_response()
}
