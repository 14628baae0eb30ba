mod common;

use axum::{
    body::{to_bytes, Body},
    http::{header, Request, StatusCode},
    Router,
};
use fitness_coach::api::routes::create_routes;
use fitness_coach::services::{
    CannedNarrativeGenerator, CoachingService, NarrativeGenerator, StorageService,
};
use serde_json::{json, Value};
use std::sync::Arc;
use tower::ServiceExt;

use common::{memory_pool, FailingNarrativeGenerator};

async fn app_with(narrator: Arc<dyn NarrativeGenerator>) -> Router {
    let storage = StorageService::new(memory_pool().await);
    create_routes(CoachingService::new(storage, narrator))
}

async fn app() -> Router {
    app_with(Arc::new(CannedNarrativeGenerator::new("Coach says hi."))).await
}

async fn send(app: &Router, request: Request<Body>) -> (StatusCode, Value) {
    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let body = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap_or(Value::Null)
    };
    (status, body)
}

fn json_request(method: &str, uri: &str, body: Value) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

fn get(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).unwrap()
}

fn plan_body() -> Value {
    json!({
        "name": "alex",
        "goal": "build_muscle",
        "level": "beginner",
        "days_per_week": 7,
        "session_minutes": 100,
        "equipment": "dumbbells",
        "weight_kg": 80
    })
}

#[tokio::test]
async fn test_root_and_health() {
    let app = app().await;

    let (status, body) = send(&app, get("/")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({ "status": "ok", "health": "/health" }));

    let (status, body) = send(&app, get("/health")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "healthy");
}

#[tokio::test]
async fn test_create_plan_and_fetch_latest() {
    let app = app().await;

    let (status, body) = send(&app, json_request("POST", "/plan", plan_body())).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["profile"]["days_per_week"], 6);
    assert_eq!(body["profile"]["session_minutes"], 90);
    assert_eq!(
        body["warnings"],
        json!([
            "Capped training days to 6 for recovery.",
            "Beginner sessions capped at 90 minutes."
        ])
    );
    assert_eq!(body["plan"]["workouts"].as_array().unwrap().len(), 6);
    assert_eq!(body["plan"]["nutrition"]["protein_g_per_day"], 128);
    assert_eq!(body["plan"]["explanation"], "Coach says hi.");

    let (status, body) = send(&app, get("/plan?profile_name=alex")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["plan"]["workouts"].as_array().unwrap().len(), 6);
    assert_eq!(body["warnings"].as_array().unwrap().len(), 2);
}

#[tokio::test]
async fn test_latest_plan_for_unknown_profile_is_not_found() {
    let app = app().await;

    let (status, body) = send(&app, get("/plan?profile_name=ghost")).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error_code"], "NOT_FOUND");
}

#[tokio::test]
async fn test_invalid_profile_is_rejected() {
    let app = app().await;
    let mut body = plan_body();
    body["name"] = json!("");

    let (status, body) = send(&app, json_request("POST", "/plan", body)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error_code"], "VALIDATION_ERROR");

    let mut body = plan_body();
    body["weight_kg"] = json!(10);
    let (status, _) = send(&app, json_request("POST", "/plan", body)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_blank_profile_name_is_rejected() {
    let app = app().await;
    let mut body = plan_body();
    body["name"] = json!("   ");

    let (status, body) = send(&app, json_request("POST", "/plan", body)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error_code"], "VALIDATION_ERROR");

    let (status, _) = send(&app, get("/plan?profile_name=%20%20%20")).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_unknown_equipment_gets_validation_error_body() {
    let app = app().await;
    let mut body = plan_body();
    body["equipment"] = json!("kettlebell");

    let (status, body) = send(&app, json_request("POST", "/plan", body)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error_code"], "VALIDATION_ERROR");
    assert!(body["details"]["errors"].as_str().unwrap().contains("kettlebell"));
}

#[tokio::test]
async fn test_malformed_json_gets_validation_error_body() {
    let app = app().await;
    let request = Request::builder()
        .method("POST")
        .uri("/plan")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from("{\"name\": "))
        .unwrap();

    let (status, body) = send(&app, request).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error_code"], "VALIDATION_ERROR");
}

#[tokio::test]
async fn test_provider_failure_persists_nothing() {
    let app = app_with(Arc::new(FailingNarrativeGenerator)).await;

    let (status, body) = send(&app, json_request("POST", "/plan", plan_body())).await;
    assert_eq!(status, StatusCode::BAD_GATEWAY);
    assert_eq!(body["error_code"], "NARRATIVE_UNAVAILABLE");

    let (status, _) = send(&app, get("/plan?profile_name=alex")).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_log_then_review() {
    let app = app().await;

    let (status, body) = send(&app, get("/review?profile_name=pat")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["adherence"], 0.0);
    assert_eq!(body["summary"], "No logs yet. Log a few days to get feedback.");

    for (date, done) in [
        ("2024-02-01", true),
        ("2024-02-02", true),
        ("2024-02-03", false),
        ("2024-02-04", true),
    ] {
        let (status, body) = send(
            &app,
            json_request(
                "POST",
                "/log?profile_name=pat",
                json!({ "date": date, "workout_done": done, "steps": 8000 }),
            ),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], "ok");
    }

    let (status, body) = send(&app, get("/review?profile_name=pat")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["adherence"], 0.75);
    assert_eq!(body["summary"], "Decent consistency. Keep the plan and reduce friction.");
    assert_eq!(body["coach_notes"], "Coach says hi.");
}

#[tokio::test]
async fn test_invalid_log_is_rejected() {
    let app = app().await;

    let (status, body) = send(
        &app,
        json_request(
            "POST",
            "/log?profile_name=pat",
            json!({ "date": "2024-02-01", "steps": 300000 }),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error_code"], "VALIDATION_ERROR");

    let (status, _) = send(
        &app,
        json_request("POST", "/log?profile_name=", json!({ "date": "2024-02-01" })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_non_iso_log_date_gets_validation_error_body() {
    let app = app().await;

    let (status, body) = send(
        &app,
        json_request(
            "POST",
            "/log?profile_name=pat",
            json!({ "date": "04/03/2024", "workout_done": true }),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error_code"], "VALIDATION_ERROR");

    let (status, body) = send(&app, get("/review?profile_name=pat")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["adherence"], 0.0);
}

#[tokio::test]
async fn test_missing_profile_name_query_gets_validation_error_body() {
    let app = app().await;

    let (status, body) = send(&app, get("/review")).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error_code"], "VALIDATION_ERROR");

    let (status, body) = send(&app, get("/plan")).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error_code"], "VALIDATION_ERROR");

    let (status, body) = send(
        &app,
        json_request("POST", "/log", json!({ "date": "2024-02-01" })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error_code"], "VALIDATION_ERROR");
}
