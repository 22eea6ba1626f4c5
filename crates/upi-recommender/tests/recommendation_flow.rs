//! End-to-end specifications for the recommendation facade and HTTP router.
//!
//! Scenarios go through the public service and router only, covering the
//! profiled path, the category-average fallback, and the error mapping.

mod common {
    use std::collections::HashMap;
    use std::sync::Arc;

    use upi_recommender::recommender::domain::{Category, ClusterId, UserId, UserProfile};
    use upi_recommender::recommender::scoring::ScoringEngine;
    use upi_recommender::recommender::service::RecommendationService;
    use upi_recommender::recommender::store::{CategoryAverages, ProfileStore, StoreError};

    pub(super) struct MemoryProfiles(HashMap<UserId, UserProfile>);

    impl ProfileStore for MemoryProfiles {
        fn fetch(&self, id: &UserId) -> Result<Option<UserProfile>, StoreError> {
            Ok(self.0.get(id).cloned())
        }

        fn len(&self) -> usize {
            self.0.len()
        }
    }

    pub(super) fn profile() -> UserProfile {
        UserProfile {
            avg_amount: 1017.0,
            cluster: ClusterId(1),
            cluster_name: "High-Value Users".to_string(),
            transactions: 8,
            preferred_category: Category("Entertainment".to_string()),
            amount_std: Some(305.1),
            avg_hour: Some(14.2),
            weekend_ratio: Some(0.31),
        }
    }

    pub(super) fn service() -> Arc<RecommendationService<MemoryProfiles>> {
        let mut profiles = HashMap::new();
        profiles.insert(UserId("USER_0001".to_string()), profile());

        let mut averages = CategoryAverages::empty();
        averages.insert(Category("Entertainment".to_string()), 398.0);
        averages.insert(Category("Shopping".to_string()), 842.0);
        averages.insert(Category("Transportation".to_string()), 132.0);

        Arc::new(RecommendationService::new(
            Arc::new(MemoryProfiles(profiles)),
            averages,
            ScoringEngine::default(),
        ))
    }
}

mod facade {
    use super::common::service;
    use upi_recommender::recommender::domain::{Category, RecommendationRequest, UserId};
    use upi_recommender::recommender::service::{BatchEntry, RecommendationError};

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
    fn profiled_user_gets_the_reference_scenario_amount() {
        let service = service();
        let result = service
            .recommend(&request(Some("USER_0001"), "Entertainment", 13))
            .expect("known category");
        assert_eq!(result.amount, 971);
        assert_eq!(result.confidence, 90);
        assert_eq!(result.cluster, "High-Value Users");
    }

    #[test]
    fn confidence_stays_in_the_known_user_set_across_hours() {
        let service = service();
        for hour in [-3, 0, 6, 13, 16, 20, 23, 40] {
            let result = service
                .recommend(&request(Some("USER_0001"), "Shopping", hour))
                .expect("known category");
            assert!(
                [70u8, 80, 90, 95].contains(&result.confidence),
                "hour {hour} gave confidence {}",
                result.confidence
            );
            assert!(result.amount >= 50);
        }
    }

    #[test]
    fn missing_user_id_scores_as_new_user() {
        let service = service();
        let result = service
            .recommend(&request(None, "Shopping", 15))
            .expect("fallback");
        assert_eq!(result.amount, 842);
        assert_eq!(result.confidence, 75);
        assert_eq!(result.cluster, "Unknown");
    }

    #[test]
    fn profiled_user_with_unknown_category_is_rejected() {
        let service = service();
        let err = service
            .recommend(&request(Some("USER_0001"), "Numerology", 13))
            .expect_err("catalog gap");
        assert!(matches!(
            err,
            RecommendationError::Scoring(_)
        ));
    }

    #[test]
    fn batch_preserves_order_and_isolates_failures() {
        let service = service();
        let entries = service.recommend_batch(&[
            request(Some("USER_0001"), "Entertainment", 13),
            request(Some("USER_0001"), "Numerology", 13),
            request(None, "Shopping", 15),
        ]);

        match &entries[0] {
            BatchEntry::Ok { recommendation } => assert_eq!(recommendation.amount, 971),
            other => panic!("expected success, got {other:?}"),
        }
        assert!(matches!(entries[1], BatchEntry::Failed { .. }));
        match &entries[2] {
            BatchEntry::Ok { recommendation } => assert_eq!(recommendation.confidence, 75),
            other => panic!("expected success, got {other:?}"),
        }
    }

    #[test]
    fn insights_expose_segment_and_behavior() {
        let service = service();
        let insights = service
            .user_insights(&UserId("USER_0001".to_string()))
            .expect("profiled user");
        assert_eq!(insights.user_segment.cluster_name, "High-Value Users");
        assert_eq!(insights.spending_profile.total_transactions, 8);
        let patterns = insights.behavior_patterns.expect("behavioral columns");
        assert_eq!(patterns.weekend_activity, "31.0%");
    }
}

mod http {
    use super::common::service;
    use axum::body::Body;
    use axum::http::{header, Request, StatusCode};
    use serde_json::{json, Value};
    use tower::ServiceExt;
    use upi_recommender::recommender::router::recommendation_router;

    async fn body_json(response: axum::response::Response) -> Value {
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .expect("body");
        serde_json::from_slice(&bytes).expect("json body")
    }

    fn post(uri: &str, payload: Value) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(payload.to_string()))
            .expect("request")
    }

    #[tokio::test]
    async fn recommendation_endpoint_returns_the_scored_amount() {
        let app = recommendation_router(service());
        let response = app
            .oneshot(post(
                "/api/v1/recommendations",
                json!({ "user_id": "USER_0001", "category": "Entertainment", "hour": 13 }),
            ))
            .await
            .expect("response");

        assert_eq!(response.status(), StatusCode::OK);
        let body = body_json(response).await;
        assert_eq!(body["amount"], 971);
        assert_eq!(body["confidence"], 90);
        assert_eq!(body["cluster"], "High-Value Users");
    }

    #[tokio::test]
    async fn unknown_category_maps_to_unprocessable_entity() {
        let app = recommendation_router(service());
        let response = app
            .oneshot(post(
                "/api/v1/recommendations",
                json!({ "user_id": "USER_0001", "category": "Numerology", "hour": 13 }),
            ))
            .await
            .expect("response");

        assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
        let body = body_json(response).await;
        assert!(body["error"].as_str().expect("error string").contains("Numerology"));
    }

    #[tokio::test]
    async fn batch_endpoint_tags_each_entry() {
        let app = recommendation_router(service());
        let response = app
            .oneshot(post(
                "/api/v1/recommendations/batch",
                json!([
                    { "user_id": "USER_0001", "category": "Entertainment", "hour": 13 },
                    { "user_id": "USER_0001", "category": "Numerology", "hour": 13 }
                ]),
            ))
            .await
            .expect("response");

        assert_eq!(response.status(), StatusCode::OK);
        let body = body_json(response).await;
        let entries = body.as_array().expect("array body");
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0]["status"], "ok");
        assert_eq!(entries[1]["status"], "failed");
    }

    #[tokio::test]
    async fn insights_endpoint_serves_profiled_users_and_404s_unknown_ones() {
        let app = recommendation_router(service());
        let response = app
            .clone()
            .oneshot(
                Request::builder()
                    .uri("/api/v1/users/USER_0001/insights")
                    .body(Body::empty())
                    .expect("request"),
            )
            .await
            .expect("response");
        assert_eq!(response.status(), StatusCode::OK);
        let body = body_json(response).await;
        assert_eq!(body["user_segment"]["cluster_name"], "High-Value Users");

        let missing = app
            .oneshot(
                Request::builder()
                    .uri("/api/v1/users/USER_9999/insights")
                    .body(Body::empty())
                    .expect("request"),
            )
            .await
            .expect("response");
        assert_eq!(missing.status(), StatusCode::NOT_FOUND);
    }
}
