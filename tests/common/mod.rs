use std::sync::Arc;

use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode};
use chrono::NaiveDate;
use http_body_util::BodyExt;
use maktab::router::init_router;
use maktab::state::AppState;
use maktab_config::{CorsConfig, SweepConfig};
use maktab_core::FixedClock;
use maktab_store::MemoryStore;
use serde_json::{Value, json};
use tower::ServiceExt;

/// Build the app against a shared in-memory store with the clock pinned to
/// `today`. Rebuilding with the same store and a later date moves time
/// forward without losing records.
pub fn setup_test_app(store: Arc<MemoryStore>, today: NaiveDate) -> Router {
    dotenvy::dotenv().ok();
    let state = AppState {
        store,
        clock: Arc::new(FixedClock::on(today)),
        cors_config: CorsConfig::from_env(),
        sweep_config: SweepConfig::from_env(),
    };
    init_router(state)
}

pub fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

/// Send a bodyless request and return the status plus the parsed JSON body
/// (`Value::Null` when the body is empty, e.g. a route miss).
pub async fn send(app: Router, method: &str, uri: &str) -> (StatusCode, Value) {
    let request = Request::builder()
        .method(method)
        .uri(uri)
        .body(Body::empty())
        .unwrap();

    let response = app.oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let body = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
    (status, body)
}

/// Send a JSON request and return the status plus the parsed JSON body.
pub async fn send_json(app: Router, method: &str, uri: &str, body: &Value) -> (StatusCode, Value) {
    let request = Request::builder()
        .method(method)
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(serde_json::to_string(body).unwrap()))
        .unwrap();

    let response = app.oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let body = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
    (status, body)
}

/// A complete registration payload; tests vary the identity fields.
#[allow(dead_code)]
pub fn student_payload(name: &str, student_id: &str, ustadh: &str, class_teaching: &str) -> Value {
    json!({
        "studentId": student_id,
        "name": name,
        "gender": "Male",
        "dateJoined": "2023-09-01",
        "location": "Eastleigh",
        "madrassaLocation": "Main campus",
        "cell": "0712345678",
        "ustadh": ustadh,
        "classTeaching": class_teaching
    })
}

/// A complete exclusion payload with the conventional type tag.
#[allow(dead_code)]
pub fn exclusion_payload(exclusion_type: &str) -> Value {
    json!({
        "excludedBy": "Admin",
        "reason": "Left the area",
        "exclusionType": exclusion_type
    })
}
