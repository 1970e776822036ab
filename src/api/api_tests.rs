#[cfg(test)]
mod gateway_router_tests {
    use axum::{
        Router,
        body::{Body, to_bytes},
        http::{Request, StatusCode, header},
    };
    use chrono::Utc;
    use jsonwebtoken::{EncodingKey, Header, encode};
    use serde_json::{Value, json};
    use std::sync::Arc;
    use tower::ServiceExt;

    use crate::api::{REQUEST_ID_HEADER, app_state::AppState, create_router};
    use crate::client::journal_api::MockJournalApi;
    use crate::client::reflection::MockReflectionGenerator;
    use crate::config::config::AppConfig;
    use crate::error::AppError;
    use crate::models::{JournalEntry, MoodDataPoint};
    use crate::observability::AppMetrics;
    use crate::security::Claims;
    use crate::services::{JournalServiceImpl, ReflectionService};

    fn token(exp_offset: i64) -> String {
        let claims = Claims {
            sub: "alice".into(),
            exp: Some(Utc::now().timestamp() + exp_offset),
            iat: None,
        };
        encode(&Header::default(), &claims, &EncodingKey::from_secret(b"upstream-secret")).unwrap()
    }

    fn entries() -> Vec<JournalEntry> {
        vec![
            JournalEntry::new("1", "2024-01-01", "first day")
                .with_mood_score(0.8)
                .with_emotions([("joy", 0.8)])
                .with_concerns(["Work"]),
            JournalEntry::new("2", "2024-01-03", "second day")
                .with_mood_score(-0.3)
                .with_emotions([("joy", 0.4), ("sadness", 0.2)])
                .with_concerns(["Work", " "]),
        ]
    }

    fn app_with(api: MockJournalApi, generator: MockReflectionGenerator) -> (Router, Arc<AppMetrics>) {
        let metrics = Arc::new(AppMetrics::default());
        let state = AppState::new(
            AppConfig::development(),
            Box::new(JournalServiceImpl::new(Arc::new(api))),
            ReflectionService::new(Arc::new(generator), true),
            metrics.clone(),
        );
        (create_router(state), metrics)
    }

    fn get(uri: &str, bearer: Option<&str>) -> Request<Body> {
        let mut builder = Request::builder().method("GET").uri(uri);
        if let Some(token) = bearer {
            builder = builder.header(header::AUTHORIZATION, format!("Bearer {}", token));
        }
        builder.body(Body::empty()).unwrap()
    }

    async fn json_body(response: axum::response::Response) -> Value {
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn test_missing_token_is_rejected_before_upstream() {
        let (app, metrics) = app_with(MockJournalApi::new(), MockReflectionGenerator::new());

        let response = app.oneshot(get("/api/v1/entries", None)).await.unwrap();

        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
        assert!(response.headers().contains_key(REQUEST_ID_HEADER));
        assert_eq!(json_body(response).await["code"], "UNAUTHORIZED");
        assert_eq!(
            metrics
                .sessions_rejected_total
                .load(std::sync::atomic::Ordering::Relaxed),
            1
        );
    }

    #[tokio::test]
    async fn test_error_body_carries_request_id() {
        let (app, _) = app_with(MockJournalApi::new(), MockReflectionGenerator::new());

        let response = app
            .clone()
            .oneshot(get("/api/v1/entries", None))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
        let header_id = response.headers()[REQUEST_ID_HEADER]
            .to_str()
            .unwrap()
            .to_string();
        let body = json_body(response).await;
        assert_eq!(body["requestId"], header_id.as_str());
        assert_eq!(body["details"], "No bearer token provided");

        let request = Request::builder()
            .uri("/api/v1/entries")
            .header(REQUEST_ID_HEADER, "client-req-7")
            .body(Body::empty())
            .unwrap();
        let response = app.oneshot(request).await.unwrap();
        assert_eq!(response.headers()[REQUEST_ID_HEADER], "client-req-7");
        assert_eq!(json_body(response).await["requestId"], "client-req-7");
    }

    #[tokio::test]
    async fn test_expired_token_is_rejected() {
        let (app, _) = app_with(MockJournalApi::new(), MockReflectionGenerator::new());

        let response = app
            .oneshot(get("/api/v1/dashboard", Some(&token(-3600))))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn test_list_entries_newest_first() {
        let mut api = MockJournalApi::new();
        api.expect_history().returning(|_, _| Ok(entries()));
        let (app, _) = app_with(api, MockReflectionGenerator::new());

        let response = app
            .oneshot(get("/api/v1/entries", Some(&token(3600))))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(response.headers()["x-content-type-options"], "nosniff");
        let body = json_body(response).await;
        assert_eq!(body["total"], 2);
        assert_eq!(body["entries"][0]["id"], "2");
        assert_eq!(body["entries"][0]["moodLabel"], "Negative");
        assert_eq!(body["entries"][1]["moodLabel"], "Very Positive");
    }

    #[tokio::test]
    async fn test_invalid_date_range_is_bad_request() {
        let (app, _) = app_with(MockJournalApi::new(), MockReflectionGenerator::new());

        let response = app
            .oneshot(get(
                "/api/v1/entries?startDate=2024-02-10&endDate=2024-02-01",
                Some(&token(3600)),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_create_entry_returns_refreshed_history() {
        let mut api = MockJournalApi::new();
        api.expect_create_entry()
            .returning(|_, text| Ok(JournalEntry::new("3", "2024-01-04", text).with_mood_score(0.2)));
        api.expect_history().returning(|_, _| {
            let mut all = entries();
            all.push(JournalEntry::new("3", "2024-01-04", "new"));
            Ok(all)
        });
        let (app, _) = app_with(api, MockReflectionGenerator::new());

        let response = app
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/api/v1/entries")
                    .header(header::AUTHORIZATION, format!("Bearer {}", token(3600)))
                    .header(header::CONTENT_TYPE, "application/json")
                    .body(Body::from(json!({"text": "new"}).to_string()))
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::CREATED);
        let body = json_body(response).await;
        assert_eq!(body["entry"]["moodLabel"], "Positive");
        assert_eq!(body["history"]["total"], 3);
        assert_eq!(body["history"]["entries"][0]["id"], "3");
    }

    #[tokio::test]
    async fn test_upstream_rejection_maps_to_401() {
        let mut api = MockJournalApi::new();
        api.expect_history()
            .returning(|_, _| Err(AppError::Authentication("token revoked".into())));
        let (app, _) = app_with(api, MockReflectionGenerator::new());

        let response = app
            .oneshot(get("/api/v1/insights/emotions", Some(&token(3600))))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn test_upstream_failure_maps_to_502() {
        let mut api = MockJournalApi::new();
        api.expect_get_entry()
            .returning(|_, _| Err(AppError::Upstream("journal API returned 500".into())));
        let (app, metrics) = app_with(api, MockReflectionGenerator::new());

        let response = app
            .oneshot(get("/api/v1/entries/9", Some(&token(3600))))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_GATEWAY);
        assert!(metrics.gather().contains("upstream_failures_total 1"));
    }

    #[tokio::test]
    async fn test_emotion_averages_keep_encounter_order() {
        let mut api = MockJournalApi::new();
        api.expect_history().returning(|_, _| Ok(entries()));
        let (app, _) = app_with(api, MockReflectionGenerator::new());

        let response = app
            .oneshot(get("/api/v1/insights/emotions", Some(&token(3600))))
            .await
            .unwrap();

        let body = json_body(response).await;
        assert_eq!(body["emotions"][0]["label"], "joy");
        assert!((body["emotions"][0]["average"].as_f64().unwrap() - 0.6).abs() < 1e-9);
        assert_eq!(body["emotions"][1]["label"], "sadness");
        assert!(body.get("message").is_none());
    }

    #[tokio::test]
    async fn test_empty_concerns_render_placeholder() {
        let mut api = MockJournalApi::new();
        api.expect_history().returning(|_, _| Ok(Vec::new()));
        let (app, _) = app_with(api, MockReflectionGenerator::new());

        let response = app
            .oneshot(get("/api/v1/insights/concerns", Some(&token(3600))))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let body = json_body(response).await;
        assert_eq!(body["concerns"], json!([]));
        assert_eq!(
            body["message"],
            "No concerns detected yet. Journal more to see your patterns!"
        );
    }

    #[tokio::test]
    async fn test_reflection_failure_is_soft() {
        let mut api = MockJournalApi::new();
        api.expect_history().returning(|_, _| Ok(entries()));
        let mut generator = MockReflectionGenerator::new();
        generator
            .expect_generate()
            .returning(|_, _| Err(AppError::Timeout("reflection service".into())));
        let (app, metrics) = app_with(api, generator);

        let response = app
            .oneshot(get("/api/v1/insights/reflection", Some(&token(3600))))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let body = json_body(response).await;
        assert_eq!(
            body["text"],
            "Couldn't generate a reflection today. Keep journaling!"
        );
        assert_eq!(body["error"], "Failed to generate reflection.");
        assert!(metrics.gather().contains("reflections_failed_total 1"));
    }

    #[tokio::test]
    async fn test_dashboard_combines_history_and_trend() {
        let mut api = MockJournalApi::new();
        api.expect_history().returning(|_, _| Ok(entries()));
        api.expect_mood_data().returning(|_, _| {
            Ok(vec![
                MoodDataPoint::new("2024-01-03", -0.3),
                MoodDataPoint::new("2024-01-01", 0.8),
            ])
        });
        let (app, _) = app_with(api, MockReflectionGenerator::new());

        let response = app
            .oneshot(get("/api/v1/dashboard", Some(&token(3600))))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let body = json_body(response).await;
        assert_eq!(body["history"][0]["id"], "2");
        assert_eq!(body["moodTrend"][0]["date"], "2024-01-01");
        assert_eq!(body["concernFrequency"][0]["concern"], "Work");
        assert_eq!(body["concernFrequency"][0]["count"], 2);
        assert_eq!(body["snapshot"]["entryId"], "2");
    }

    #[tokio::test]
    async fn test_unknown_route_is_not_gated() {
        let (app, _) = app_with(MockJournalApi::new(), MockReflectionGenerator::new());

        let response = app.oneshot(get("/api/v1/nothing", None)).await.unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }
}
