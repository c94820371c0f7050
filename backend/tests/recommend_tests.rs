//! Recommendation endpoint integration tests
//!
//! Drives the router in-process and stubs the weather provider and the
//! generative model with wiremock servers.

use axum::{
    body::{to_bytes, Body},
    http::{Request, StatusCode},
    Router,
};
use crop_advisor_backend::{
    config::{AiConfig, Config, WeatherConfig},
    create_app, AppState,
};
use serde_json::{json, Value};
use tower::ServiceExt;
use wiremock::matchers::{body_string_contains, header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

const MODEL_PATH: &str = "/v1beta/models/gemini-2.5-flash:generateContent";

fn build_app(weather: &MockServer, model: &MockServer) -> Router {
    let config = Config {
        weather: WeatherConfig {
            api_endpoint: weather.uri(),
            api_key: "test-weather-key".into(),
            timeout_secs: 5,
        },
        ai: AiConfig {
            api_endpoint: format!("{}/v1beta", model.uri()),
            api_key: "test-model-key".into(),
            ..AiConfig::default()
        },
        ..Config::default()
    };
    create_app(AppState::from_config(config).unwrap())
}

fn payload() -> Value {
    json!({
        "location": {"name": "Detected location", "lat": "20.5937", "lon": "78.9629"},
        "season": "kharif",
        "soil": "loamy",
        "budget": "low",
        "crop_preference": "",
        "previous_crop": "wheat",
        "risk_level": "medium"
    })
}

fn model_reply(text: &str) -> Value {
    json!({
        "candidates": [{
            "content": {"role": "model", "parts": [{"text": text}]},
            "finishReason": "STOP"
        }]
    })
}

const RECOMMENDATION: &str = r#"{
  "best_crops": [
    {"name": "Pearl Millet (Bajra)", "water_need": "Low", "reason": "Handles dry spells"},
    {"name": "Pigeon Pea", "water_need": "Medium", "reason": "Fixes nitrogen after wheat"}
  ],
  "budget_friendly": ["Sorghum", "Moong"],
  "not_recommended": ["Rice", "Sugarcane"],
  "explanation": "Rainfall is modest, so water-hungry crops are risky."
}"#;

async fn mount_weather_ok(server: &MockServer) {
    Mock::given(method("GET"))
        .and(path("/weather"))
        .and(query_param("units", "metric"))
        .and(query_param("appid", "test-weather-key"))
        .and(query_param("lat", "20.5937"))
        .and(query_param("lon", "78.9629"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "main": {"temp": 28.5, "humidity": 74, "pressure": 1006},
            "rain": {"1h": 1.25},
            "name": "Nagpur"
        })))
        .mount(server)
        .await;
}

async fn mount_model(server: &MockServer, text: &str) {
    Mock::given(method("POST"))
        .and(path(MODEL_PATH))
        .and(header("x-goog-api-key", "test-model-key"))
        .respond_with(ResponseTemplate::new(200).set_body_json(model_reply(text)))
        .mount(server)
        .await;
}

async fn post_recommend(app: Router, body: String) -> (StatusCode, Value) {
    let response = app
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/recommend")
                .header("content-type", "application/json")
                .body(Body::from(body))
                .unwrap(),
        )
        .await
        .unwrap();

    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let json = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
    (status, json)
}

#[tokio::test]
async fn test_recommend_with_live_weather() {
    let weather = MockServer::start().await;
    let model = MockServer::start().await;
    mount_weather_ok(&weather).await;
    mount_model(&model, &format!("```json\n{}\n```", RECOMMENDATION)).await;

    let (status, body) = post_recommend(build_app(&weather, &model), payload().to_string()).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["weather"], json!({"temp": 28.5, "humidity": 74.0, "rainfall": 1.25}));
    assert_eq!(body["ai"]["best_crops"][0]["name"], "Pearl Millet (Bajra)");
    assert_eq!(body["ai"]["budget_friendly"], json!(["Sorghum", "Moong"]));
    assert_eq!(body["ai"]["not_recommended"], json!(["Rice", "Sugarcane"]));
    assert!(body.get("error").is_none());
}

#[tokio::test]
async fn test_weather_failure_uses_fallback_and_still_succeeds() {
    let weather = MockServer::start().await;
    let model = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/weather"))
        .respond_with(ResponseTemplate::new(401).set_body_json(json!({"cod": 401, "message": "Invalid API key"})))
        .mount(&weather)
        .await;
    mount_model(&model, RECOMMENDATION).await;

    let (status, body) = post_recommend(build_app(&weather, &model), payload().to_string()).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["weather"], json!({"temp": 32.0, "humidity": 60.0, "rainfall": 2.0}));
    assert!(body["ai"].is_object());
}

#[tokio::test]
async fn test_malformed_weather_body_uses_fallback() {
    let weather = MockServer::start().await;
    let model = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/weather"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>maintenance</html>"))
        .mount(&weather)
        .await;
    mount_model(&model, RECOMMENDATION).await;

    let (status, body) = post_recommend(build_app(&weather, &model), payload().to_string()).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["weather"]["temp"], 32.0);
}

#[tokio::test]
async fn test_missing_rain_reports_zero() {
    let weather = MockServer::start().await;
    let model = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/weather"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "main": {"temp": 36.0, "humidity": 18}
        })))
        .mount(&weather)
        .await;
    mount_model(&model, RECOMMENDATION).await;

    let (status, body) = post_recommend(build_app(&weather, &model), payload().to_string()).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["weather"]["rainfall"], 0.0);
}

#[tokio::test]
async fn test_prompt_carries_context_and_weather() {
    let weather = MockServer::start().await;
    let model = MockServer::start().await;
    mount_weather_ok(&weather).await;
    Mock::given(method("POST"))
        .and(path(MODEL_PATH))
        .and(body_string_contains("Season: kharif"))
        .and(body_string_contains("Previous crop: wheat"))
        .and(body_string_contains("Rainfall: 1.25 mm"))
        .respond_with(ResponseTemplate::new(200).set_body_json(model_reply(RECOMMENDATION)))
        .expect(1)
        .mount(&model)
        .await;

    let (status, _) = post_recommend(build_app(&weather, &model), payload().to_string()).await;
    assert_eq!(status, StatusCode::OK);
}

#[tokio::test]
async fn test_malformed_model_reply_is_500_without_ai() {
    let weather = MockServer::start().await;
    let model = MockServer::start().await;
    mount_weather_ok(&weather).await;
    mount_model(&model, "```json\n{\"best_crops\": [ oops\n```").await;

    let (status, body) = post_recommend(build_app(&weather, &model), payload().to_string()).await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["error"], "AI reasoning failed");
    assert!(body.get("ai").is_none());
    assert!(body.get("weather").is_none());
}

#[tokio::test]
async fn test_model_reply_with_wrong_shape_is_500() {
    let weather = MockServer::start().await;
    let model = MockServer::start().await;
    mount_weather_ok(&weather).await;
    mount_model(&model, r#"{"best_crops": "millet", "explanation": "dry"}"#).await;

    let (status, body) = post_recommend(build_app(&weather, &model), payload().to_string()).await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["code"], "AI_RESPONSE_INVALID");
    assert!(body.get("ai").is_none());
}

#[tokio::test]
async fn test_model_provider_error_is_500() {
    let weather = MockServer::start().await;
    let model = MockServer::start().await;
    mount_weather_ok(&weather).await;
    Mock::given(method("POST"))
        .and(path(MODEL_PATH))
        .respond_with(ResponseTemplate::new(429).set_body_string("quota exceeded"))
        .mount(&model)
        .await;

    let (status, body) = post_recommend(build_app(&weather, &model), payload().to_string()).await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["error"], "AI reasoning failed");
    assert_eq!(body["code"], "AI_SERVICE_ERROR");
}

#[tokio::test]
async fn test_missing_model_key_reports_reasoning_failure() {
    let weather = MockServer::start().await;
    mount_weather_ok(&weather).await;
    let config = Config {
        weather: WeatherConfig {
            api_endpoint: weather.uri(),
            api_key: "test-weather-key".into(),
            timeout_secs: 5,
        },
        ai: AiConfig {
            api_key: String::new(),
            ..AiConfig::default()
        },
        ..Config::default()
    };
    let app = create_app(AppState::from_config(config).unwrap());

    let (status, body) = post_recommend(app, payload().to_string()).await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["error"], "AI reasoning failed");
    assert_eq!(body["code"], "AI_SERVICE_ERROR");
    assert!(body.get("ai").is_none());
}

#[tokio::test]
async fn test_invalid_coordinates_are_rejected() {
    let weather = MockServer::start().await;
    let model = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(MODEL_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_json(model_reply(RECOMMENDATION)))
        .expect(0)
        .mount(&model)
        .await;

    let mut body = payload();
    body["location"]["lat"] = json!("123.0");
    let (status, response) = post_recommend(build_app(&weather, &model), body.to_string()).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(response["code"], "VALIDATION_ERROR");
}

#[tokio::test]
async fn test_unparseable_body_is_rejected() {
    let weather = MockServer::start().await;
    let model = MockServer::start().await;

    let (status, response) =
        post_recommend(build_app(&weather, &model), "{\"season\": \"kharif\"".to_string()).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(response["code"], "INVALID_BODY");
    assert!(response["error"].is_string());
}

#[tokio::test]
async fn test_unknown_season_is_rejected() {
    let weather = MockServer::start().await;
    let model = MockServer::start().await;

    let mut body = payload();
    body["season"] = json!("monsoon");
    let (status, _) = post_recommend(build_app(&weather, &model), body.to_string()).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
}
