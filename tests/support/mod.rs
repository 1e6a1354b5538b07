// Shared helpers: a fake Edusign API and the real wheel server, both on ephemeral ports.
use axum::{
    Json, Router,
    extract::{Path, State},
    http::{HeaderMap, StatusCode, header},
    routing::get,
};
use serde_json::{Value, json};
use std::sync::{Arc, Mutex};
use std::time::Duration;
use wheel_server::Settings;
use wheel_server::domain::RosterStrategy;

// Authorization headers seen by the fake API, in arrival order.
pub type SeenTokens = Arc<Mutex<Vec<String>>>;

pub fn seen(tokens: &SeenTokens) -> Vec<String> {
    tokens.lock().expect("tokens mutex poisoned").clone()
}

fn record(tokens: &SeenTokens, headers: &HeaderMap) {
    let value = headers
        .get(header::AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .unwrap_or_default()
        .to_string();
    tokens.lock().expect("tokens mutex poisoned").push(value);
}

async fn course_students(
    State(tokens): State<SeenTokens>,
    Path(course_id): Path<String>,
    headers: HeaderMap,
) -> (StatusCode, Json<Value>) {
    record(&tokens, &headers);
    match course_id.as_str() {
        "broken" => (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(json!({ "status": "error", "message": "boom" })),
        ),
        "empty" => (
            StatusCode::OK,
            Json(json!({ "status": "success", "result": [] })),
        ),
        // Edusign reports some failures with a 200.
        "soft-error" => (
            StatusCode::OK,
            Json(json!({ "status": "error", "message": "course not found" })),
        ),
        "no-result" => (StatusCode::OK, Json(json!({ "status": "success" }))),
        _ => (
            StatusCode::OK,
            Json(json!({
                "status": "success",
                "result": [
                    { "FIRSTNAME": "Ada", "LASTNAME": "Lovelace" },
                    { "firstname": "Alan", "lastname": "turing" },
                    { "name": "Grace Hopper" }
                ]
            })),
        ),
    }
}

async fn course(
    State(tokens): State<SeenTokens>,
    Path(course_id): Path<String>,
    headers: HeaderMap,
) -> Json<Value> {
    record(&tokens, &headers);
    match course_id.as_str() {
        "no-students" => Json(json!({ "status": "success", "result": { "NAME": "Algo 101" } })),
        "no-result" => Json(json!({ "status": "success" })),
        _ => Json(json!({
            "status": "success",
            "result": { "NAME": "Algo 101", "STUDENTS": ["s1", "s2", { "id": "s3" }] }
        })),
    }
}

async fn student(
    State(tokens): State<SeenTokens>,
    Path(student_id): Path<String>,
    headers: HeaderMap,
) -> (StatusCode, Json<Value>) {
    record(&tokens, &headers);
    match student_id.as_str() {
        "s1" => {
            // Slowest answer comes first in the roster.
            tokio::time::sleep(Duration::from_millis(50)).await;
            (
                StatusCode::OK,
                Json(json!({
                    "status": "success",
                    "result": { "FIRSTNAME": "Ada", "LASTNAME": "Lovelace" }
                })),
            )
        }
        "s3" => (
            StatusCode::OK,
            Json(json!({ "status": "success", "result": { "_id": "s3" } })),
        ),
        _ => (
            StatusCode::SERVICE_UNAVAILABLE,
            Json(json!({ "message": "try later" })),
        ),
    }
}

// Start the fake Edusign API; returns its `/v1` base URL.
pub async fn spawn_fake_edusign() -> (String, SeenTokens) {
    let tokens = SeenTokens::default();
    let app = Router::new()
        .route("/v1/course/{course_id}/students", get(course_students))
        .route("/v1/course/{course_id}", get(course))
        .route("/v1/student/{student_id}", get(student))
        .with_state(tokens.clone());

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("bind fake edusign port");
    let addr = listener.local_addr().expect("get fake edusign addr");
    tokio::spawn(async move {
        axum::serve(listener, app).await.expect("fake edusign failed");
    });

    (format!("http://{addr}/v1"), tokens)
}

pub fn settings(edusign_api_url: &str, strategy: RosterStrategy) -> Settings {
    Settings {
        app_url: "https://wheel.example.com".to_string(),
        edusign_api_url: edusign_api_url.to_string(),
        default_api_key: Some("default-key".to_string()),
        roster_strategy: strategy,
        edusign_timeout: Duration::from_secs(2),
        roster_timeout: Duration::from_secs(5),
        database_url: None,
        privacy_url: "https://legal.example.com/privacy".to_string(),
        terms_url: "https://legal.example.com/terms".to_string(),
        support_url: "https://legal.example.com/support".to_string(),
    }
}

// Start the wheel server on an ephemeral port; returns its base URL.
pub async fn spawn_server(settings: Settings) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("bind ephemeral test port");
    let addr = listener.local_addr().expect("get local addr");
    tokio::spawn(async move {
        wheel_server::run(listener, settings)
            .await
            .expect("server failed");
    });

    format!("http://{addr}")
}
