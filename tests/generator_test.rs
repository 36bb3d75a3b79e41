use std::sync::Arc;

use serde_json::{json, Value};
use wiremock::matchers::{header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use diet_buddy_rs::config::AppConfig;
use diet_buddy_rs::generator::{build_prompt, GeminiClient};
use diet_buddy_rs::models::{ActivityLevel, DietIntensity, DietType, Gender, UserProfile, ERROR_PREFIX};
use diet_buddy_rs::state::AppState;

const ENDPOINT_PATH: &str = "/models/gemini-2.0-flash:generateContent";

const PLAN_TEXT: &str = "Day 1:\n\nBreakfast\n- Idli with sambar\n- Calories: 300 kcal\n- Protein: 10g";

fn profile() -> UserProfile {
    UserProfile {
        name: "Arjun".to_string(),
        age: 35,
        gender: Gender::Male,
        weight: 70.0,
        height: 175.0,
        diet_intensity: DietIntensity::Moderate,
        activity_level: ActivityLevel::Active,
        diet_type: DietType::NonVegetarian,
    }
}

fn config_for(server: &MockServer) -> AppConfig {
    AppConfig {
        api_key: Some("test-key".to_string()),
        base_url: server.uri(),
        ..AppConfig::default()
    }
}

fn success_body(text: &str) -> Value {
    json!({
        "candidates": [
            { "content": { "parts": [ { "text": text } ], "role": "model" } }
        ]
    })
}

#[tokio::test]
async fn test_successful_generation_returns_text_verbatim() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(ENDPOINT_PATH))
        .and(header("x-goog-api-key", "test-key"))
        .respond_with(ResponseTemplate::new(200).set_body_json(success_body(PLAN_TEXT)))
        .expect(1)
        .mount(&server)
        .await;

    let client = GeminiClient::new(&config_for(&server)).unwrap();
    let status = profile().bmi().band.status_label();
    let plan = client.generate_diet(&profile(), &status).await;

    assert!(!plan.is_error());
    assert_eq!(plan.text(), PLAN_TEXT);
}

#[tokio::test]
async fn test_request_body_carries_prompt() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_json(success_body("ok")))
        .mount(&server)
        .await;

    let client = GeminiClient::new(&config_for(&server)).unwrap();
    let status = profile().bmi().band.status_label();
    client.generate_diet(&profile(), &status).await;

    let requests = server.received_requests().await.unwrap();
    assert_eq!(requests.len(), 1);
    assert!(!requests[0].url.as_str().contains("test-key"));

    let body: Value = requests[0].body_json().unwrap();
    let expected = build_prompt(&profile(), &status);
    assert_eq!(body, json!({ "contents": [ { "parts": [ { "text": expected } ] } ] }));
    assert!(expected.contains("Normal (suggested goal: maintain weight)"));
}

#[tokio::test]
async fn test_server_error_becomes_error_plan() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(500).set_body_json(json!({
            "error": { "code": 500, "message": "internal failure", "status": "INTERNAL" }
        })))
        .mount(&server)
        .await;

    let client = GeminiClient::new(&config_for(&server)).unwrap();
    let plan = client.generate_diet(&profile(), "Normal").await;

    assert!(plan.is_error());
    assert!(plan.text().starts_with(ERROR_PREFIX));
    assert!(plan.text().contains("500"));
    assert!(plan.text().contains("internal failure"));
}

#[tokio::test]
async fn test_malformed_json_becomes_error_plan() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>not json</html>"))
        .mount(&server)
        .await;

    let client = GeminiClient::new(&config_for(&server)).unwrap();
    let plan = client.generate_diet(&profile(), "Normal").await;

    assert!(plan.text().starts_with("Error generating diet:"));
}

#[tokio::test]
async fn test_missing_candidates_is_malformed() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "candidates": [] })))
        .mount(&server)
        .await;

    let client = GeminiClient::new(&config_for(&server)).unwrap();
    let plan = client.generate_diet(&profile(), "Normal").await;

    assert!(plan.is_error());
    assert!(plan.text().contains("candidates"));
}

#[tokio::test]
async fn test_generation_updates_state() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_json(success_body(PLAN_TEXT)))
        .mount(&server)
        .await;

    let client = Arc::new(GeminiClient::new(&config_for(&server)).unwrap());
    let mut state = AppState::new();
    state.set_profile(profile());

    let pending = state.start_generation(Arc::clone(&client), profile());
    assert!(state.is_generating());

    let (id, plan) = pending.wait().await.unwrap();
    assert!(state.apply_plan(id, plan));
    assert!(!state.is_generating());
    assert_eq!(state.plan().unwrap().text(), PLAN_TEXT);
    assert_eq!(
        state.nutrition().meal("Day 1", "Breakfast").unwrap().calories,
        "300 kcal"
    );
}

#[tokio::test]
async fn test_older_request_cannot_overwrite_newer() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_json(success_body(PLAN_TEXT)))
        .mount(&server)
        .await;

    let client = Arc::new(GeminiClient::new(&config_for(&server)).unwrap());
    let mut state = AppState::new();

    let first = state.start_generation(Arc::clone(&client), profile());
    let first_id = first.id;
    let second = state.start_generation(Arc::clone(&client), profile());

    // Starting the second request aborted the first.
    assert!(first.wait().await.is_none());

    let (id, plan) = second.wait().await.unwrap();
    assert!(state.apply_plan(id, plan.clone()));
    assert!(!state.apply_plan(first_id, plan));
    assert_eq!(state.latest_request(), id);
}
