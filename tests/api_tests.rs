use std::{sync::Arc, time::Duration};

use axum::http::{HeaderName, HeaderValue, StatusCode};
use axum_test::TestServer;
use serde_json::{json, Value};
use wiremock::{
    matchers::{method, path},
    Mock, MockServer, ResponseTemplate,
};

use cinemood_api::{
    api::{create_router, AppState},
    catalog::Catalog,
    middleware::REQUEST_ID_HEADER,
    models::{DayType, Mood, RecommendationInput, Weather, WeightVector},
    services::{ranker, RecommendationSession, RemoteRecommender, Scorer},
};

// Nothing listens on the discard port, so every remote call is refused.
const UNREACHABLE_URL: &str = "http://127.0.0.1:9";

fn create_test_session(recommender_url: &str) -> Arc<RecommendationSession> {
    Arc::new(RecommendationSession::new(
        Arc::new(RemoteRecommender::with_client(
            reqwest::Client::builder().no_proxy().build().unwrap(),
            recommender_url,
        )),
        Arc::new(Catalog::builtin()),
        Scorer::new(),
    ))
}

fn server_for(session: Arc<RecommendationSession>) -> TestServer {
    let app = create_router(AppState::new(session, 6));
    TestServer::new(app).unwrap()
}

fn create_test_server(recommender_url: &str) -> TestServer {
    server_for(create_test_session(recommender_url))
}

async fn healthy_backend() -> MockServer {
    let mock_server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/health"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({"status": "healthy", "message": "model loaded"})),
        )
        .mount(&mock_server)
        .await;
    mock_server
}

#[tokio::test]
async fn test_health_check() {
    let server = create_test_server(UNREACHABLE_URL);
    let response = server.get("/health").await;
    response.assert_status_ok();
    let body: Value = response.json();
    assert_eq!(body["status"], "healthy");
}

#[tokio::test]
async fn test_request_id_header_is_added() {
    let server = create_test_server(UNREACHABLE_URL);
    let response = server.get("/health").await;
    assert!(response.headers().get(REQUEST_ID_HEADER).is_some());
}

#[tokio::test]
async fn test_request_id_header_is_propagated() {
    let server = create_test_server(UNREACHABLE_URL);
    let response = server
        .get("/health")
        .add_header(
            HeaderName::from_static(REQUEST_ID_HEADER),
            HeaderValue::from_static("abc-123"),
        )
        .await;
    response.assert_status_ok();
    assert_eq!(
        response.headers().get(REQUEST_ID_HEADER).unwrap(),
        "abc-123"
    );
}

#[tokio::test]
async fn test_local_routes_respond_while_startup_probe_hangs() {
    let mock_server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/health"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({"status": "healthy"}))
                .set_delay(Duration::from_secs(3600)),
        )
        .mount(&mock_server)
        .await;

    let session = create_test_session(&mock_server.uri());
    let probe = session.spawn_probe();
    let server = server_for(session);

    let served = tokio::time::timeout(Duration::from_secs(5), async {
        server.get("/health").await.assert_status_ok();
        server.get("/api/v1/recommendations/featured").await.assert_status_ok();
        server.get("/api/v1/recommendations/random").await.assert_status_ok();
        server
            .post("/api/v1/recommendations/local")
            .json(&json!({"mood": "happy", "weather": "sunny", "day": "weekend"}))
            .await
            .assert_status_ok();
    })
    .await;

    assert!(served.is_ok());
    assert!(!probe.is_finished());
    probe.abort();
}
#[tokio::test]
async fn test_options_lists_categories() {
    let server = create_test_server(UNREACHABLE_URL);
    let response = server.get("/api/v1/options").await;
    response.assert_status_ok();
    let body: Value = response.json();
    assert_eq!(body["moods"].as_array().unwrap().len(), 6);
    assert_eq!(body["weather"].as_array().unwrap().len(), 4);
    assert_eq!(body["days"], json!(["weekday", "weekend"]));
}

#[tokio::test]
async fn test_options_come_from_service_when_connected() {
    let mock_server = healthy_backend().await;
    Mock::given(method("GET"))
        .and(path("/options"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "moods": ["Happy", "Melancholic", "Romantic"],
            "weather": ["Sunny", "Rainy"],
            "days": ["Weekday", "Weekend"]
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    let server = create_test_server(&mock_server.uri());
    let body: Value = server.get("/api/v1/options").await.json();
    assert_eq!(body["moods"], json!(["happy", "sad", "romantic"]));
    assert_eq!(body["weather"], json!(["sunny", "rainy"]));
}

#[tokio::test]
async fn test_fallback_when_service_unreachable() {
    let server = create_test_server(UNREACHABLE_URL);

    let response = server
        .post("/api/v1/recommendations")
        .json(&json!({
            "mood": "happy",
            "weather": "sunny",
            "day": "weekend"
        }))
        .await;

    response.assert_status_ok();
    let body: Value = response.json();
    assert_eq!(body["source"], "fallback");
    assert!(body["notice"].is_string());

    let results = body["results"].as_array().unwrap();
    assert_eq!(results.len(), 6);
    assert_eq!(results[0]["rank"], 1);

    let confidences: Vec<f64> = results
        .iter()
        .map(|r| r["confidence"].as_f64().unwrap())
        .collect();
    assert!(confidences.windows(2).all(|w| w[0] >= w[1]));
}

#[tokio::test]
async fn test_fallback_honors_requested_count() {
    let server = create_test_server(UNREACHABLE_URL);

    let response = server
        .post("/api/v1/recommendations")
        .json(&json!({
            "mood": "relaxed",
            "weather": "cloudy",
            "day": "weekday",
            "num_recommendations": 3
        }))
        .await;

    response.assert_status_ok();
    let body: Value = response.json();
    assert_eq!(body["results"].as_array().unwrap().len(), 3);
}

#[tokio::test]
async fn test_remote_results_when_service_healthy() {
    let mock_server = healthy_backend().await;
    Mock::given(method("POST"))
        .and(path("/recommendations"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            {"movie_title": "Zindagi Na Milegi Dobara", "confidence": 0.94, "rank": 1, "year": 2011},
            {"movie_title": "Queen", "confidence": 0.71, "rank": 2, "genre": "Comedy"}
        ])))
        .mount(&mock_server)
        .await;

    let server = create_test_server(&mock_server.uri());
    let response = server
        .post("/api/v1/recommendations")
        .json(&json!({
            "mood": "Adventurous",
            "weather": "Sunny",
            "day": "Weekend"
        }))
        .await;

    response.assert_status_ok();
    let body: Value = response.json();
    assert_eq!(body["source"], "remote");
    assert!(body.get("notice").is_none());
    assert_eq!(body["results"][0]["title"], "Zindagi Na Milegi Dobara");
    assert_eq!(body["results"][1]["genres"], json!(["Comedy"]));
}

#[tokio::test]
async fn test_remote_error_falls_back() {
    let mock_server = healthy_backend().await;
    Mock::given(method("POST"))
        .and(path("/recommendations"))
        .respond_with(ResponseTemplate::new(500).set_body_json(json!({"detail": "model crashed"})))
        .mount(&mock_server)
        .await;

    let server = create_test_server(&mock_server.uri());
    let response = server
        .post("/api/v1/recommendations")
        .json(&json!({"mood": "sad", "weather": "rainy", "day": "weekday"}))
        .await;

    response.assert_status_ok();
    let body: Value = response.json();
    assert_eq!(body["source"], "fallback");
    assert_eq!(body["results"].as_array().unwrap().len(), 6);
}

#[tokio::test]
async fn test_missing_day_defaults_to_today() {
    let server = create_test_server(UNREACHABLE_URL);

    let before = DayType::today();
    let entries: Vec<Value> = server
        .post("/api/v1/recommendations/local")
        .json(&json!({"mood": "happy", "weather": "sunny", "num_recommendations": 6}))
        .await
        .json();
    let after = DayType::today();

    let expected = |day: DayType| {
        let input = RecommendationInput::new(Mood::Happy, Weather::Sunny, day);
        ranker::rank(&Scorer::new(), &Catalog::builtin(), &input, &WeightVector::default(), 6)
            .iter()
            .map(|entry| entry.total_score)
            .collect::<Vec<f64>>()
    };
    let totals: Vec<f64> = entries
        .iter()
        .map(|entry| entry["total_score"].as_f64().unwrap())
        .collect();
    assert!(totals == expected(before) || totals == expected(after));
}

#[tokio::test]
async fn test_missing_category_is_rejected() {
    let server = create_test_server(UNREACHABLE_URL);

    let response = server
        .post("/api/v1/recommendations")
        .json(&json!({"mood": "happy", "day": "weekend"}))
        .await;

    response.assert_status(StatusCode::UNPROCESSABLE_ENTITY);
}

#[tokio::test]
async fn test_negative_weight_is_bad_request() {
    let server = create_test_server(UNREACHABLE_URL);

    let response = server
        .post("/api/v1/recommendations/local")
        .json(&json!({
            "mood": "happy",
            "weather": "sunny",
            "day": "weekend",
            "weights": {"mood_weight": -0.5}
        }))
        .await;

    response.assert_status(StatusCode::BAD_REQUEST);
    let body: Value = response.json();
    assert!(body["error"].as_str().unwrap().contains("mood_weight"));
}

#[tokio::test]
async fn test_local_scoring_returns_breakdown() {
    let server = create_test_server(UNREACHABLE_URL);

    let response = server
        .post("/api/v1/recommendations/local")
        .json(&json!({
            "mood": "romantic",
            "weather": "rainy",
            "day": "weekend",
            "num_recommendations": 2
        }))
        .await;

    response.assert_status_ok();
    let entries: Vec<Value> = response.json();
    assert_eq!(entries.len(), 2);
    assert_eq!(entries[0]["title"], "Jab We Met");
    assert_eq!(entries[0]["breakdown"]["mood_score"], 1.0);
    assert!(entries[0]["total_score"].as_f64().unwrap() >= entries[1]["total_score"].as_f64().unwrap());
}

#[tokio::test]
async fn test_featured_returns_curated_order() {
    let server = create_test_server(UNREACHABLE_URL);

    let response = server.get("/api/v1/recommendations/featured").await;
    response.assert_status_ok();
    let picks: Vec<Value> = response.json();
    assert_eq!(picks.len(), 6);
    assert_eq!(picks[0]["title"], "3 Idiots");
    assert_eq!(picks[5]["title"], "PK");
}

#[tokio::test]
async fn test_random_picks_respect_limit() {
    let server = create_test_server(UNREACHABLE_URL);

    let response = server
        .get("/api/v1/recommendations/random")
        .add_query_param("limit", 2)
        .await;
    response.assert_status_ok();
    let picks: Vec<Value> = response.json();
    assert_eq!(picks.len(), 2);

    let response = server.get("/api/v1/recommendations/random").await;
    let picks: Vec<Value> = response.json();
    assert_eq!(picks.len(), 3);
}

#[tokio::test]
async fn test_status_reports_disconnected_service() {
    let server = create_test_server(UNREACHABLE_URL);

    let response = server.get("/api/v1/status").await;
    response.assert_status_ok();
    let status: Value = response.json();
    assert_eq!(status["connected"], false);
    assert_eq!(status["provider"], "remote");
}

#[tokio::test]
async fn test_status_reset_probes_again() {
    let mock_server = healthy_backend().await;
    let server = create_test_server(&mock_server.uri());

    let first: Value = server.get("/api/v1/status").await.json();
    assert_eq!(first["connected"], true);

    let response = server.post("/api/v1/status/reset").await;
    response.assert_status_ok();
    let second: Value = response.json();
    assert_eq!(second["connected"], true);

    let requests = mock_server.received_requests().await.unwrap();
    let probes = requests.iter().filter(|r| r.url.path() == "/health").count();
    assert_eq!(probes, 2);
}

#[tokio::test]
async fn test_model_info_unavailable_is_bad_gateway() {
    let server = create_test_server(UNREACHABLE_URL);
    let response = server.get("/api/v1/model-info").await;
    response.assert_status(StatusCode::BAD_GATEWAY);
}
