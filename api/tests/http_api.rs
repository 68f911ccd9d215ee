use std::{
    collections::VecDeque,
    sync::{Arc, Mutex},
};

use axum::{Json, Router, extract::State, http::StatusCode, routing::post};
use axum_test::{
    TestServer,
    multipart::{MultipartForm, Part},
};
use clap::Parser;
use nutriplan_api::{
    application::http::server::http_server::{router, state},
    args::Args,
};
use serde_json::{Value, json};

const DAYS: [&str; 7] = [
    "monday",
    "tuesday",
    "wednesday",
    "thursday",
    "friday",
    "saturday",
    "sunday",
];

#[derive(Clone, Default)]
struct FakeGemini {
    responses: Arc<Mutex<VecDeque<(StatusCode, Value)>>>,
    requests: Arc<Mutex<Vec<Value>>>,
}

impl FakeGemini {
    fn requests(&self) -> Vec<Value> {
        self.requests.lock().unwrap().clone()
    }
}

async fn fake_generate(
    State(fake): State<FakeGemini>,
    Json(body): Json<Value>,
) -> (StatusCode, Json<Value>) {
    fake.requests.lock().unwrap().push(body);
    let next = fake.responses.lock().unwrap().pop_front();

    match next {
        Some((status, body)) => (status, Json(body)),
        None => (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(json!({"error": {"message": "no scripted response"}})),
        ),
    }
}

/// Starts a stand-in for the Gemini endpoint that replays the given responses in order.
async fn spawn_gemini(responses: Vec<(StatusCode, Value)>) -> (FakeGemini, String) {
    let fake = FakeGemini {
        responses: Arc::new(Mutex::new(responses.into())),
        ..FakeGemini::default()
    };

    let app = Router::new()
        .route("/v1beta/models/{call}", post(fake_generate))
        .with_state(fake.clone());

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    (fake, format!("http://{}/v1beta", addr))
}

fn api_server(base_url: &str) -> TestServer {
    let args = Args::try_parse_from([
        "nutriplan-api",
        "--gemini-api-key",
        "test-key",
        "--gemini-base-url",
        base_url,
        "--llm-max-attempts",
        "2",
        "--llm-initial-backoff-ms",
        "1",
    ])
    .unwrap();

    let state = state(Arc::new(args)).unwrap();
    TestServer::new(router(state).unwrap()).unwrap()
}

fn gemini_text(text: String) -> (StatusCode, Value) {
    (
        StatusCode::OK,
        json!({"candidates": [{"content": {"parts": [{"text": text}]}}]}),
    )
}

fn day(base: u32) -> Value {
    json!({
        "meals": {
            "breakfast": {"description": "Papas de aveia com fruta", "calories": base},
            "lunch": {"description": "Frango grelhado com arroz", "calories": base + 200},
            "snack": {"description": "Iogurte natural", "calories": 150},
            "dinner": {"description": "Salmão com legumes", "calories": base + 100}
        },
        "workout": {"description": "Caminhada rápida", "duration_minutes": 30},
        "total_calories": base * 3 + 450
    })
}

fn plan_json(skip: Option<&str>) -> String {
    let mut plan = serde_json::Map::new();
    for (i, name) in DAYS.iter().enumerate() {
        if Some(*name) != skip {
            plan.insert(name.to_string(), day(300 + i as u32 * 10));
        }
    }
    plan.insert(
        "shopping_list".to_string(),
        json!(["aveia", "frango", "arroz", "salmão"]),
    );
    Value::Object(plan).to_string()
}

fn profile_body() -> Value {
    json!({
        "age": 30,
        "weight": 70.5,
        "height": 175,
        "sex": "male",
        "activity_level": "moderate",
        "goal": "perder peso"
    })
}

#[tokio::test]
async fn test_generate_plan_returns_weekly_plan() {
    let (fake, base_url) = spawn_gemini(vec![gemini_text(plan_json(None))]).await;
    let server = api_server(&base_url);

    let response = server.post("/plans").json(&profile_body()).await;

    assert_eq!(response.status_code(), StatusCode::OK);
    let body: Value = response.json();
    for name in DAYS {
        assert!(body["data"][name]["meals"]["dinner"]["calories"].is_u64());
    }
    assert_eq!(body["data"]["shopping_list"][1], "frango");

    let requests = fake.requests();
    assert_eq!(requests.len(), 1);
    assert_eq!(
        requests[0]["generationConfig"]["responseMimeType"],
        "application/json"
    );
    let prompt = requests[0]["contents"][0]["parts"][0]["text"]
        .as_str()
        .unwrap();
    assert!(prompt.contains("perder peso"));
    assert_eq!(prompt.matches("moderado").count(), 1);
}

#[tokio::test]
async fn test_unknown_activity_level_is_rejected_before_any_model_call() {
    let (fake, base_url) = spawn_gemini(vec![]).await;
    let server = api_server(&base_url);

    let mut body = profile_body();
    body["activity_level"] = json!("extreme");
    let response = server.post("/plans").json(&body).await;

    assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);
    let body: Value = response.json();
    assert_eq!(body["code"], "invalid_input");
    assert!(fake.requests().is_empty());
}

#[tokio::test]
async fn test_zero_age_is_rejected() {
    let (fake, base_url) = spawn_gemini(vec![]).await;
    let server = api_server(&base_url);

    let mut body = profile_body();
    body["age"] = json!(0);
    let response = server.post("/plans").json(&body).await;

    assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);
    assert!(fake.requests().is_empty());
}

#[tokio::test]
async fn test_plan_missing_a_day_is_bad_gateway() {
    let (_fake, base_url) =
        spawn_gemini(vec![gemini_text(plan_json(Some("sunday")))]).await;
    let server = api_server(&base_url);

    let response = server.post("/plans").json(&profile_body()).await;

    assert_eq!(response.status_code(), StatusCode::BAD_GATEWAY);
    let body: Value = response.json();
    assert_eq!(body["code"], "invalid_shape");
}

#[tokio::test]
async fn test_rejected_key_is_not_retried() {
    let (fake, base_url) = spawn_gemini(vec![(
        StatusCode::UNAUTHORIZED,
        json!({"error": {"code": 401, "message": "API key not valid."}}),
    )])
    .await;
    let server = api_server(&base_url);

    let response = server.post("/plans").json(&profile_body()).await;

    assert_eq!(response.status_code(), StatusCode::BAD_GATEWAY);
    let body: Value = response.json();
    assert_eq!(body["code"], "transport");
    assert!(!body["message"].as_str().unwrap().contains("test-key"));
    assert_eq!(fake.requests().len(), 1);
}

#[tokio::test]
async fn test_unavailable_upstream_is_retried() {
    let (fake, base_url) = spawn_gemini(vec![
        (
            StatusCode::SERVICE_UNAVAILABLE,
            json!({"error": {"message": "overloaded"}}),
        ),
        gemini_text(plan_json(None)),
    ])
    .await;
    let server = api_server(&base_url);

    let response = server.post("/plans").json(&profile_body()).await;

    assert_eq!(response.status_code(), StatusCode::OK);
    assert_eq!(fake.requests().len(), 2);
}

#[tokio::test]
async fn test_analyze_meal_image_forwards_photo() {
    let analysis = json!({
        "dish_name": "Grilled chicken salad",
        "total_calories": 420,
        "analysis": "Peito de frango grelhado com alface e tomate."
    });
    let (fake, base_url) = spawn_gemini(vec![gemini_text(analysis.to_string())]).await;
    let server = api_server(&base_url);

    let form = MultipartForm::new().add_part(
        "image",
        Part::bytes(vec![0xFF, 0xD8, 0xFF, 0xE0])
            .file_name("meal.jpg")
            .mime_type("image/jpeg"),
    );
    let response = server.post("/calorie-analysis").multipart(form).await;

    assert_eq!(response.status_code(), StatusCode::OK);
    let body: Value = response.json();
    assert_eq!(body["data"]["dish_name"], "Grilled chicken salad");
    assert_eq!(body["data"]["total_calories"], 420);

    let requests = fake.requests();
    let parts = &requests[0]["contents"][0]["parts"];
    assert_eq!(parts[0]["inlineData"]["mimeType"], "image/jpeg");
    assert_eq!(parts[0]["inlineData"]["data"], "/9j/4A==");
    assert!(parts[1]["text"].is_string());
}

#[tokio::test]
async fn test_analyze_without_image_is_bad_request() {
    let (fake, base_url) = spawn_gemini(vec![]).await;
    let server = api_server(&base_url);

    let form = MultipartForm::new().add_text("note", "sem foto");
    let response = server.post("/calorie-analysis").multipart(form).await;

    assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);
    assert!(fake.requests().is_empty());
}

#[tokio::test]
async fn test_unsupported_image_type_is_bad_request() {
    let (fake, base_url) = spawn_gemini(vec![]).await;
    let server = api_server(&base_url);

    let form = MultipartForm::new().add_part(
        "image",
        Part::bytes(b"GIF89a".to_vec())
            .file_name("meal.gif")
            .mime_type("image/gif"),
    );
    let response = server.post("/calorie-analysis").multipart(form).await;

    assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);
    assert!(fake.requests().is_empty());
}

#[tokio::test]
async fn test_health() {
    let (_fake, base_url) = spawn_gemini(vec![]).await;
    let server = api_server(&base_url);

    let response = server.get("/health").await;

    assert_eq!(response.status_code(), StatusCode::OK);
    let body: Value = response.json();
    assert_eq!(body["status"], "ok");
}
