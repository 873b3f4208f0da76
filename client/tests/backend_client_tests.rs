//! Backend integration tests against an in-process mock server
//!
//! Tests for the HTTP clients and the dashboard flows including:
//! - Property 9: Base-language translation short-circuits
//! - Translation degrades to the original text on any failure
//! - Error bodies surface `detail` or a status fallback
//! - Manual validation blocks the network call
//! - The location flow normalizes, records and mirrors history
//! - Remote history is displayed without rewriting the local cache
//! - One malformed community post does not sink the feed

mod common;

use axum::{
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use proptest::prelude::*;
use serde_json::{json, Value};
use std::time::Duration;

use agrismart_client::external::{BackendClient, TranslationClient};
use agrismart_client::services::{
    CommunityService, DashboardService, FeedbackService, FixedPositionProvider, HistoryOrigin,
    LocationFlow, ProfileService,
};
use agrismart_client::AppError;
use common::{captured, Captured, MockBackend};
use shared::{
    FeedbackSubmission, FeedbackType, HistoryCache, HistorySource, Language, MemoryStore,
    NewCommunityPost, PositionOptions, RawPosition, RequestMethod, SoilInputs, SoilPreset,
};

fn translate_route(reply: Value, sink: Captured) -> Router {
    Router::new().route(
        "/api/translate",
        post(move |Json(body): Json<Value>| {
            let sink = sink.clone();
            let reply = reply.clone();
            async move {
                sink.lock().unwrap().push(body);
                Json(reply)
            }
        }),
    )
}

fn recommendation_payload() -> Value {
    json!({
        "recommendations": [
            {"crop_name": "Rice", "suitability_score": 142, "market_price": 2100, "reason": "Heavy rainfall"},
            {"crop_name": "Maize", "suitability_score": 77.4},
            {"name": "Cotton", "score": 60, "price": "₹6620/quintal"},
            {"crop_name": "Jute", "suitability_score": 41}
        ],
        "location": {"latitude": 17.385, "longitude": 78.4867, "address": "Hyderabad"},
        "detected_soil": {"soil_type": "Black Soil", "technical_name": "Vertisol"},
        "current_weather": {"temperature": 29.5, "humidity": 61.0}
    })
}

/// Mock with both recommendation endpoints and the history endpoints.
/// Request bodies are captured per endpoint.
fn dashboard_router(recommend: Captured, history: Captured, remote_history: Value) -> Router {
    let manual_sink = recommend.clone();
    Router::new()
        .route(
            "/api/recommend-from-location",
            post(move |Json(body): Json<Value>| {
                let sink = recommend.clone();
                async move {
                    sink.lock().unwrap().push(body);
                    Json(recommendation_payload())
                }
            }),
        )
        .route(
            "/api/recommend-manual",
            post(move |Json(body): Json<Value>| {
                let sink = manual_sink.clone();
                async move {
                    sink.lock().unwrap().push(body);
                    Json(recommendation_payload())
                }
            }),
        )
        .route(
            "/api/history",
            post(move |Json(body): Json<Value>| {
                let sink = history.clone();
                async move {
                    sink.lock().unwrap().push(body);
                    Json(json!({"success": true, "history_id": "h-1"}))
                }
            }),
        )
        .route(
            "/api/history/:user_id",
            get(move || {
                let reply = remote_history.clone();
                async move { Json(reply) }
            }),
        )
}

fn dashboard(mock: &MockBackend) -> DashboardService<MemoryStore, FixedPositionProvider> {
    DashboardService::new(
        BackendClient::with_base_url(&mock.base_url),
        MemoryStore::new(),
        LocationFlow::new(
            FixedPositionProvider::new(RawPosition::new(17.385, 78.4867)),
            PositionOptions::default(),
        ),
    )
}

// ============================================================================
// Translation
// ============================================================================

#[cfg(test)]
mod translation_tests {
    use super::*;

    #[tokio::test]
    async fn test_translates_text() {
        let sink = captured();
        let mock = MockBackend::start(translate_route(json!({"translated_text": "నమస్కారం"}), sink.clone())).await;
        let client = TranslationClient::with_base_url(&mock.base_url);

        assert_eq!(client.translate("Hello", Language::Telugu).await, "నమస్కారం");
        let body = sink.lock().unwrap()[0].clone();
        assert_eq!(body, json!({"text": "Hello", "target_language": "te"}));
    }

    #[tokio::test]
    async fn test_base_language_makes_no_request() {
        let mock = MockBackend::start(translate_route(json!({"translated_text": "x"}), captured())).await;
        let client = TranslationClient::with_base_url(&mock.base_url);

        assert_eq!(client.translate("Sow after rain", Language::English).await, "Sow after rain");
        assert_eq!(client.translate("   ", Language::Hindi).await, "   ");
        assert_eq!(mock.hits(), 0);
    }

    #[tokio::test]
    async fn test_server_error_returns_original() {
        let router = Router::new().route(
            "/api/translate",
            post(|| async { (StatusCode::INTERNAL_SERVER_ERROR, "boom") }),
        );
        let mock = MockBackend::start(router).await;
        let client = TranslationClient::with_base_url(&mock.base_url);

        assert_eq!(client.translate("Hello", Language::Hindi).await, "Hello");
        assert_eq!(mock.hits_for("/api/translate"), 1);
    }

    #[tokio::test]
    async fn test_malformed_or_incomplete_reply_returns_original() {
        let malformed = Router::new().route("/api/translate", post(|| async { "not json" }));
        let mock = MockBackend::start(malformed).await;
        let client = TranslationClient::with_base_url(&mock.base_url);
        assert_eq!(client.translate("Hello", Language::Telugu).await, "Hello");

        let mock = MockBackend::start(translate_route(json!({"status": "ok"}), captured())).await;
        let client = TranslationClient::with_base_url(&mock.base_url);
        assert_eq!(client.translate("Hello", Language::Telugu).await, "Hello");

        let mock = MockBackend::start(translate_route(json!({"translated_text": ""}), captured())).await;
        let client = TranslationClient::with_base_url(&mock.base_url);
        assert_eq!(client.translate("Hello", Language::Telugu).await, "Hello");
    }

    #[tokio::test]
    async fn test_unreachable_backend_returns_original() {
        // Nothing listens on port 9 locally
        let client = TranslationClient::with_base_url("http://127.0.0.1:9");
        assert_eq!(client.translate("Hello", Language::Hindi).await, "Hello");
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(20))]

        /// Property 9: Base-language translation short-circuits
        /// No request is made whatever the text
        #[test]
        fn prop_base_language_never_calls_backend(text in ".{0,80}") {
            let runtime = tokio::runtime::Runtime::new().unwrap();
            runtime.block_on(async {
                let mock = MockBackend::start(translate_route(json!({"translated_text": "x"}), captured())).await;
                let client = TranslationClient::with_base_url(&mock.base_url);
                let translated = client.translate(&text, Language::English).await;
                assert_eq!(translated, text);
                assert_eq!(mock.hits(), 0);
            });
        }
    }
}

// ============================================================================
// Backend client errors
// ============================================================================

#[cfg(test)]
mod backend_error_tests {
    use super::*;

    #[tokio::test]
    async fn test_error_detail_is_surfaced() {
        let router = Router::new().route(
            "/api/recommend-from-location",
            post(|| async {
                (
                    StatusCode::BAD_REQUEST,
                    Json(json!({"detail": "Invalid coordinates. Please enable location services."})),
                )
            }),
        );
        let mock = MockBackend::start(router).await;
        let client = BackendClient::with_base_url(&mock.base_url);

        let err = client.recommend_from_location(17.385, 78.4867).await.unwrap_err();
        match err {
            AppError::Backend { status, message } => {
                assert_eq!(status, 400);
                assert_eq!(message, "Invalid coordinates. Please enable location services.");
            }
            other => panic!("unexpected error {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_status_fallback_without_detail() {
        let router = Router::new().route(
            "/api/recommend-manual",
            post(|| async { StatusCode::SERVICE_UNAVAILABLE }),
        );
        let mock = MockBackend::start(router).await;
        let client = BackendClient::with_base_url(&mock.base_url);

        let err = client.recommend_manual(&SoilPreset::Rice.inputs()).await.unwrap_err();
        assert_eq!(err.to_string(), "HTTP error! status: 503");
    }

    #[tokio::test]
    async fn test_manual_body_uses_npk_keys() {
        let sink = captured();
        let router = dashboard_router(sink.clone(), captured(), json!([]));
        let mock = MockBackend::start(router).await;
        let client = BackendClient::with_base_url(&mock.base_url);

        client.recommend_manual(&SoilPreset::Cotton.inputs()).await.unwrap();

        let body = sink.lock().unwrap()[0].clone();
        assert_eq!(body["N"], json!(120.0));
        assert_eq!(body["P"], json!(60.0));
        assert_eq!(body["K"], json!(40.0));
        assert_eq!(body["ph"], json!(6.8));
    }

    #[tokio::test]
    async fn test_history_skips_malformed_items() {
        let router = dashboard_router(
            captured(),
            captured(),
            json!([
                {"user_id": "u", "method": "manual", "recommendations": [], "timestamp": "2024-06-01T06:00:00"},
                {"method": 42}
            ]),
        );
        let mock = MockBackend::start(router).await;
        let client = BackendClient::with_base_url(&mock.base_url);

        let items = client.get_history("u").await.unwrap();
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].method, "manual");
    }
}

// ============================================================================
// Dashboard flows
// ============================================================================

#[cfg(test)]
mod dashboard_tests {
    use super::*;

    #[tokio::test]
    async fn test_location_flow_end_to_end() {
        let recommend = captured();
        let history = captured();
        let mock = MockBackend::start(dashboard_router(recommend.clone(), history.clone(), json!([]))).await;
        let mut service = dashboard(&mock);

        let results = service.recommend_from_location().await.unwrap();
        service.flush_history_mirror().await;

        // Normalized
        assert_eq!(results.len(), 4);
        assert_eq!(results.items[0].suitability, 100);
        assert_eq!(results.items[0].price, "₹2100/quintal");
        assert_eq!(results.items[1].suitability, 77);
        assert_eq!(results.items[2].name, "Cotton");
        assert_eq!(results.items[2].price, "₹6620/quintal");

        // Request carried the device reading
        let body = recommend.lock().unwrap()[0].clone();
        assert_eq!(body, json!({"lat": 17.385, "lon": 78.4867}));

        // Recorded locally (top three) and mirrored remotely
        assert_eq!(service.history().len(), 1);
        assert_eq!(service.history().entries()[0].crops.len(), 3);
        assert_eq!(mock.hits_for("/api/history"), 1);
        let mirrored = history.lock().unwrap()[0].clone();
        assert_eq!(mirrored["method"], json!("auto"));
        assert_eq!(mirrored["user_id"], json!(service.context().user_id()));
        assert_eq!(mirrored["recommendations"].as_array().map(Vec::len), Some(3));

        let insights = service.insights().unwrap();
        assert_eq!(insights.location.as_ref().map(|l| l.latitude), Some(17.385));
    }

    #[tokio::test]
    async fn test_invalid_manual_inputs_never_reach_network() {
        let mock = MockBackend::start(dashboard_router(captured(), captured(), json!([]))).await;
        let mut service = dashboard(&mock);

        let inputs = SoilInputs {
            humidity: 150.0,
            ..SoilPreset::Rice.inputs()
        };
        let err = service.recommend_manual(&inputs).await.unwrap_err();

        assert!(matches!(err, AppError::Validation(_)));
        assert_eq!(mock.hits(), 0);
        assert!(service.history().is_empty());
    }

    #[tokio::test]
    async fn test_language_switch_relocalizes_current_results() {
        let mock = MockBackend::start(dashboard_router(captured(), captured(), json!([]))).await;
        let mut service = dashboard(&mock);
        service.recommend_manual(&SoilPreset::Rice.inputs()).await.unwrap();

        service.set_language(Language::Telugu);

        let current = service.current().unwrap();
        assert_eq!(current.items[0].name, "వరి");
        assert_eq!(current.items[0].original_name, "Rice");
        assert_eq!(current.items[0].suitability, 100);
        assert_eq!(service.context().language(), Language::Telugu);
    }

    fn remote_history_fixture() -> Value {
        json!([
            {
                "user_id": "u",
                "method": "auto",
                "location": {"latitude": 12.97, "longitude": 77.59},
                "recommendations": [
                    {"crop_name": "Coffee", "suitability_score": 88, "market_price": "₹300/kg", "reason": "Hills"}
                ],
                "timestamp": "2024-06-02T08:30:00Z"
            },
            {
                "user_id": "u",
                "method": "telepathy",
                "recommendations": [],
                "timestamp": "2024-06-03T08:30:00Z"
            }
        ])
    }

    #[tokio::test]
    async fn test_remote_history_failure_keeps_local() {
        let failing = Router::new()
            .route(
                "/api/recommend-manual",
                post(|| async { Json(recommendation_payload()) }),
            )
            .route("/api/history", post(|| async { StatusCode::INTERNAL_SERVER_ERROR }))
            .route(
                "/api/history/:user_id",
                get(|| async { StatusCode::INTERNAL_SERVER_ERROR }),
            );
        let mock = MockBackend::start(failing).await;
        let mut service = dashboard(&mock);

        // Remote save fails, local append still happens
        service.recommend_manual(&SoilPreset::Wheat.inputs()).await.unwrap();
        service.flush_history_mirror().await;
        assert_eq!(service.history().len(), 1);

        let view = service.sync_history().await;
        assert_eq!(view.origin, HistoryOrigin::Local);
        assert_eq!(view.entries, service.history().entries());
    }

    #[tokio::test]
    async fn test_remote_history_is_shown_not_stored() {
        let mock = MockBackend::start(dashboard_router(captured(), captured(), remote_history_fixture())).await;
        let service = dashboard(&mock);

        let view = service.sync_history().await;
        assert_eq!(view.origin, HistoryOrigin::Remote);
        assert_eq!(view.entries.len(), 1);
        assert_eq!(view.entries[0].crops[0].original_name, "Coffee");
        assert_eq!(view.entries[0].crops[0].suitability, 88);

        assert!(service.history().is_empty());
    }

    #[tokio::test]
    async fn test_sync_keeps_entries_only_saved_locally() {
        let router = Router::new()
            .route(
                "/api/recommend-manual",
                post(|| async { Json(recommendation_payload()) }),
            )
            .route("/api/history", post(|| async { StatusCode::INTERNAL_SERVER_ERROR }))
            .route(
                "/api/history/:user_id",
                get(|| async { Json(remote_history_fixture()) }),
            );
        let mock = MockBackend::start(router).await;
        let store = MemoryStore::new();
        let mut service = DashboardService::new(
            BackendClient::with_base_url(&mock.base_url),
            store.clone(),
            LocationFlow::new(FixedPositionProvider::unsupported(), PositionOptions::default()),
        );

        // The mirror fails, so this entry exists only on the device
        service.recommend_manual(&SoilPreset::Wheat.inputs()).await.unwrap();
        service.flush_history_mirror().await;

        let view = service.sync_history().await;
        assert_eq!(view.origin, HistoryOrigin::Remote);

        let local = service.history().entries();
        assert_eq!(local.len(), 1);
        assert_eq!(local[0].method, RequestMethod::Manual);
        assert!(matches!(local[0].source, HistorySource::Manual { inputs: Some(_) }));

        let reloaded = HistoryCache::load(store);
        assert_eq!(reloaded.len(), 1);
        assert_eq!(reloaded.entries()[0].method, RequestMethod::Manual);
    }

    #[tokio::test]
    async fn test_results_do_not_wait_for_history_mirror() {
        let router = Router::new()
            .route(
                "/api/recommend-manual",
                post(|| async { Json(recommendation_payload()) }),
            )
            .route("/api/history", post(|| std::future::pending::<StatusCode>()));
        let mock = MockBackend::start(router).await;
        let mut service = dashboard(&mock);

        let results = tokio::time::timeout(
            Duration::from_secs(5),
            service.recommend_manual(&SoilPreset::Rice.inputs()),
        )
        .await
        .expect("results held back by the history mirror")
        .unwrap();

        assert_eq!(results.len(), 4);
        assert_eq!(service.current(), Some(&results));
        assert_eq!(service.history().len(), 1);
    }

    #[tokio::test]
    async fn test_remove_history_by_index() {
        let mock = MockBackend::start(dashboard_router(captured(), captured(), json!([]))).await;
        let mut service = dashboard(&mock);
        service.recommend_manual(&SoilPreset::Rice.inputs()).await.unwrap();

        assert!(!service.remove_history(5));
        assert!(service.remove_history(0));
        assert!(service.history().is_empty());
    }
}

// ============================================================================
// Community, feedback and profile
// ============================================================================

#[cfg(test)]
mod service_tests {
    use super::*;

    #[tokio::test]
    async fn test_community_posts_get_display_defaults() {
        let router = Router::new().route(
            "/api/community-posts",
            get(|| async {
                Json(json!({
                    "success": true,
                    "posts": [
                        {"id": "p1", "author": "Ravi", "title": "Paddy tips", "content": "Transplant early", "timestamp": "2025-03-05T10:00:00Z", "likes": 4},
                        {"author": "Sita", "title": "Hello", "content": "First post"}
                    ]
                }))
            }),
        );
        let mock = MockBackend::start(router).await;
        let service = CommunityService::new(BackendClient::with_base_url(&mock.base_url));

        let posts = service.list_posts().await.unwrap();
        assert_eq!(posts.len(), 2);
        assert_eq!(posts[0].date, "Mar 5, 2025");
        assert_eq!(posts[0].likes, 4);
        assert_eq!(posts[1].date, "Recently");
        assert_eq!(posts[1].likes, 0);
        assert!(!posts[1].id.is_empty());
    }

    #[tokio::test]
    async fn test_malformed_post_does_not_fail_feed() {
        let router = Router::new().route(
            "/api/community-posts",
            get(|| async {
                Json(json!({
                    "success": true,
                    "posts": [
                        {"id": "p1", "author": "Ravi", "title": "Paddy tips", "content": "Transplant early", "likes": 4},
                        {"id": "p2", "author": "Anil", "title": "Great app", "content": "Helped me", "rating": 4.5, "likes": -2, "comments": "lots", "type": "feedback"},
                        "garbage"
                    ]
                }))
            }),
        );
        let mock = MockBackend::start(router).await;
        let service = CommunityService::new(BackendClient::with_base_url(&mock.base_url));

        let posts = service.list_posts().await.unwrap();
        assert_eq!(posts.len(), 2);
        assert_eq!(posts[0].likes, 4);
        assert_eq!(posts[1].title, "Great app");
        assert_eq!(posts[1].kind, "feedback");
        assert_eq!(posts[1].rating, 5);
        assert_eq!(posts[1].likes, 0);
        assert_eq!(posts[1].comments, 0);
    }

    #[tokio::test]
    async fn test_empty_post_rejected_locally() {
        let mock = MockBackend::start(Router::new()).await;
        let service = CommunityService::new(BackendClient::with_base_url(&mock.base_url));

        let post = NewCommunityPost {
            author: "Ravi".into(),
            title: String::new(),
            content: "Body".into(),
        };
        assert!(matches!(service.create_post(&post).await, Err(AppError::Validation(_))));
        assert_eq!(mock.hits(), 0);
    }

    #[tokio::test]
    async fn test_feedback_rejection_is_an_error() {
        let router = Router::new().route(
            "/api/feedback",
            post(|| async { Json(json!({"success": false, "message": "try later"})) }),
        );
        let mock = MockBackend::start(router).await;
        let service = FeedbackService::new(BackendClient::with_base_url(&mock.base_url));

        let feedback = FeedbackSubmission {
            name: "Ravi".into(),
            email: "ravi@example.com".into(),
            feedback_type: FeedbackType::Feature,
            message: "Add tomato".into(),
            rating: 4,
            show_in_community: true,
        };
        assert!(service.submit(&feedback).await.is_err());
        assert_eq!(mock.hits_for("/api/feedback"), 1);
    }

    #[tokio::test]
    async fn test_missing_profile_is_empty() {
        let router = Router::new().route(
            "/api/profile/:user_id",
            get(|| async { Json(json!({"success": false})) }),
        );
        let mock = MockBackend::start(router).await;
        let service = ProfileService::new(BackendClient::with_base_url(&mock.base_url));

        let profile = service.load("user_abc").await.unwrap();
        assert_eq!(profile.user_id, "user_abc");
        assert!(profile.name.is_empty());
    }
}
