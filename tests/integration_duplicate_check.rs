mod common;

use std::sync::Arc;

use axum::http::StatusCode;
use common::{date, exclusion_payload, send, send_json, setup_test_app, student_payload};
use maktab_store::MemoryStore;

fn today() -> chrono::NaiveDate {
    date(2024, 6, 15)
}

/// Register a student in the given register and return its database ID.
async fn register_at(
    store: &Arc<MemoryStore>,
    base: &str,
    name: &str,
    student_id: &str,
    on: chrono::NaiveDate,
) -> i64 {
    let app = setup_test_app(store.clone(), on);
    let (status, body) = send_json(
        app,
        "POST",
        &format!("/api/{}", base),
        &student_payload(name, student_id, "Ustadh Ali", "B1"),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    body["id"].as_i64().unwrap()
}

/// Register and immediately exclude a student, with the clock set to `on`.
async fn exclude_on(store: &Arc<MemoryStore>, name: &str, student_id: &str, on: chrono::NaiveDate) {
    let id = register_at(store, "students", name, student_id, on).await;
    let app = setup_test_app(store.clone(), on);
    let (status, _) = send_json(
        app,
        "POST",
        &format!("/api/exclude/student/{}", id),
        &exclusion_payload("transfer"),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
}

#[tokio::test]
async fn test_check_student_id_finds_each_register() {
    let store = Arc::new(MemoryStore::new());
    register_at(&store, "students", "Ahmed Yusuf", "STD-001", today()).await;
    register_at(&store, "adult-students", "Omar Abdi", "AD-001", today()).await;
    register_at(&store, "men-students", "Bilal Hassan", "MEN-001", today()).await;

    for (student_id, check_type, phrase) in [
        ("STD-001", "REGULAR_STUDENT", "as regular student"),
        ("AD-001", "ADULT_STUDENT", "as adult student"),
        ("MEN-001", "MEN_STUDENT", "in men's list"),
    ] {
        let app = setup_test_app(store.clone(), today());
        let (status, body) = send(
            app,
            "GET",
            &format!("/api/check-duplicate/student/{}", student_id),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["exists"], true);
        assert_eq!(body["type"], check_type);
        assert_eq!(body["data"]["studentId"], student_id);
        assert_eq!(
            body["message"],
            format!(
                "Student already registered {} with ID: {}",
                phrase, student_id
            )
        );
    }
}

#[tokio::test]
async fn test_check_student_id_probes_general_register_first() {
    let store = Arc::new(MemoryStore::new());
    register_at(&store, "students", "Ahmed Yusuf", "STD-007", today()).await;
    register_at(&store, "adult-students", "Omar Abdi", "STD-007", today()).await;

    let app = setup_test_app(store, today());
    let (status, body) = send(app, "GET", "/api/check-duplicate/student/STD-007").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["type"], "REGULAR_STUDENT");
    assert_eq!(body["data"]["name"], "Ahmed Yusuf");
}

#[tokio::test]
async fn test_check_student_id_available() {
    let store = Arc::new(MemoryStore::new());
    let app = setup_test_app(store, today());

    let (status, body) = send(app, "GET", "/api/check-duplicate/student/STD-404").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["exists"], false);
    assert_eq!(
        body["message"],
        "Student ID STD-404 is available for registration"
    );
    assert!(body.get("type").is_none());
    assert!(body.get("data").is_none());
}

#[tokio::test]
async fn test_recent_exclusion_blocks_reregistration_probe() {
    let store = Arc::new(MemoryStore::new());
    exclude_on(&store, "Ahmed Yusuf", "STD-009", date(2023, 6, 15)).await;

    let app = setup_test_app(store, today());
    let (status, body) = send(app, "GET", "/api/check-duplicate/student/STD-009").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["exists"], true);
    assert_eq!(body["type"], "EXCLUDED_STUDENT");
    assert_eq!(body["data"]["studentId"], "STD-009");
    assert_eq!(
        body["message"],
        "Student was excluded on 2023-06-15 and cannot re-register yet"
    );
}

#[tokio::test]
async fn test_old_exclusion_reports_available_but_create_stays_blocked() {
    let store = Arc::new(MemoryStore::new());
    exclude_on(&store, "Ahmed Yusuf", "STD-009", date(2020, 6, 10)).await;

    // past the retention window the probe no longer flags the ID
    let app = setup_test_app(store.clone(), today());
    let (status, body) = send(app, "GET", "/api/check-duplicate/student/STD-009").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["exists"], false);
    assert_eq!(
        body["message"],
        "Student ID STD-009 is available for registration"
    );

    // but a plain create still refuses it while the ledger row exists
    let app = setup_test_app(store.clone(), today());
    let (status, body) = send_json(
        app,
        "POST",
        "/api/students",
        &student_payload("Ahmed Yusuf", "STD-009", "Ustadh Ali", "B1"),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(
        body["error"],
        "Student ID 'STD-009' was previously excluded and cannot be reused (permanently blocked)"
    );
}

#[tokio::test]
async fn test_exclusion_exactly_at_cutoff_is_available() {
    let store = Arc::new(MemoryStore::new());
    exclude_on(&store, "Ahmed Yusuf", "STD-010", date(2021, 6, 15)).await;

    // three years to the day: the strict comparison no longer blocks
    let app = setup_test_app(store, today());
    let (status, body) = send(app, "GET", "/api/check-duplicate/student/STD-010").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["exists"], false);
}

#[tokio::test]
async fn test_check_name_pair_matches_case_insensitively() {
    let store = Arc::new(MemoryStore::new());
    register_at(&store, "students", "Ahmed Yusuf", "STD-001", today()).await;

    let app = setup_test_app(store, today());
    let (status, body) = send(
        app,
        "GET",
        "/api/check-duplicate/name?name=AHMED%20YUSUF&studentId=STD-001",
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["exists"], true);
    assert_eq!(body["type"], "REGULAR_STUDENT");
    assert_eq!(
        body["message"],
        "Student 'AHMED YUSUF' with ID 'STD-001' already registered as regular student"
    );
    // the name probe reports the match without the record body
    assert!(body.get("data").is_none());
}

#[tokio::test]
async fn test_check_name_pair_requires_exact_id() {
    let store = Arc::new(MemoryStore::new());
    register_at(&store, "students", "Ahmed Yusuf", "STD-001", today()).await;

    let app = setup_test_app(store, today());
    let (status, body) = send(
        app,
        "GET",
        "/api/check-duplicate/name?name=Ahmed%20Yusuf&studentId=STD-002",
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["exists"], false);
    assert_eq!(
        body["message"],
        "Name Ahmed Yusuf is available for registration"
    );
}

#[tokio::test]
async fn test_check_name_without_id_never_blocks() {
    let store = Arc::new(MemoryStore::new());
    register_at(&store, "students", "Ahmed Yusuf", "STD-001", today()).await;

    let app = setup_test_app(store.clone(), today());
    let (status, body) = send(
        app,
        "GET",
        "/api/check-duplicate/name?name=Ahmed%20Yusuf",
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["exists"], false);

    // a blank studentId is treated the same as a missing one
    let app = setup_test_app(store, today());
    let (status, body) = send(
        app,
        "GET",
        "/api/check-duplicate/name?name=Ahmed%20Yusuf&studentId=%20%20",
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["exists"], false);
}
