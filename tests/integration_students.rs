mod common;

use std::sync::Arc;

use axum::http::StatusCode;
use common::{date, exclusion_payload, send, send_json, setup_test_app, student_payload};
use maktab_store::MemoryStore;
use serde_json::json;

const TODAY: (i32, u32, u32) = (2024, 6, 15);

fn today() -> chrono::NaiveDate {
    date(TODAY.0, TODAY.1, TODAY.2)
}

#[tokio::test]
async fn test_create_student_returns_created() {
    let store = Arc::new(MemoryStore::new());
    let app = setup_test_app(store, today());

    let (status, body) = send_json(
        app,
        "POST",
        "/api/students",
        &student_payload("Ahmed Yusuf", "STD-001", "Ustadh Ali", "B1"),
    )
    .await;

    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["studentId"], "STD-001");
    assert_eq!(body["name"], "Ahmed Yusuf");
    assert_eq!(body["classTeaching"], "B1");
    assert!(body["id"].is_number());
}

#[tokio::test]
async fn test_create_duplicate_student_id_rejected() {
    let store = Arc::new(MemoryStore::new());

    let app = setup_test_app(store.clone(), today());
    let (status, _) = send_json(
        app,
        "POST",
        "/api/students",
        &student_payload("Ahmed Yusuf", "STD-001", "Ustadh Ali", "B1"),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);

    // same ID, different name: the register check fires first
    let app = setup_test_app(store.clone(), today());
    let (status, body) = send_json(
        app,
        "POST",
        "/api/students",
        &student_payload("Bilal Hassan", "STD-001", "Ustadh Musa", "C2"),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(
        body["error"],
        "Student with ID 'STD-001' already exists in active students"
    );
}

#[tokio::test]
async fn test_same_student_id_allowed_across_registers() {
    let store = Arc::new(MemoryStore::new());

    let app = setup_test_app(store.clone(), today());
    let (status, _) = send_json(
        app,
        "POST",
        "/api/students",
        &student_payload("Ahmed Yusuf", "STD-001", "Ustadh Ali", "B1"),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);

    let app = setup_test_app(store.clone(), today());
    let (status, _) = send_json(
        app,
        "POST",
        "/api/adult-students",
        &student_payload("Omar Abdi", "STD-001", "Ustadh Musa", "C2"),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);

    let app = setup_test_app(store.clone(), today());
    let (status, _) = send_json(
        app,
        "POST",
        "/api/men-students",
        &student_payload("Hassan Noor", "STD-001", "Ustadh Musa", "C2"),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
}

#[tokio::test]
async fn test_adult_register_uses_its_own_duplicate_message() {
    let store = Arc::new(MemoryStore::new());

    let app = setup_test_app(store.clone(), today());
    let (status, _) = send_json(
        app,
        "POST",
        "/api/adult-students",
        &student_payload("Omar Abdi", "AD-007", "Ustadh Musa", "C2"),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);

    let app = setup_test_app(store.clone(), today());
    let (status, body) = send_json(
        app,
        "POST",
        "/api/adult-students",
        &student_payload("Someone Else", "AD-007", "Ustadh Musa", "C2"),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Adult student with ID 'AD-007' already exists");
}

#[tokio::test]
async fn test_excluded_id_blocks_create_and_restore_bypasses() {
    let store = Arc::new(MemoryStore::new());

    let app = setup_test_app(store.clone(), today());
    let (status, body) = send_json(
        app,
        "POST",
        "/api/students",
        &student_payload("Ahmed Yusuf", "STD-009", "Ustadh Ali", "B1"),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    let id = body["id"].as_i64().unwrap();

    let app = setup_test_app(store.clone(), today());
    let (status, _) = send_json(
        app,
        "POST",
        &format!("/api/exclude/student/{}", id),
        &exclusion_payload("dropped_out"),
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    // the ledger blocks a plain create regardless of exclusion age
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

    let app = setup_test_app(store.clone(), today());
    let (status, body) = send_json(
        app,
        "POST",
        "/api/students?restore=true",
        &student_payload("Ahmed Yusuf", "STD-009", "Ustadh Ali", "B1"),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["studentId"], "STD-009");
}

#[tokio::test]
async fn test_excluded_id_does_not_block_adult_register() {
    let store = Arc::new(MemoryStore::new());

    let app = setup_test_app(store.clone(), today());
    let (status, body) = send_json(
        app,
        "POST",
        "/api/students",
        &student_payload("Ahmed Yusuf", "STD-009", "Ustadh Ali", "B1"),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    let id = body["id"].as_i64().unwrap();

    let app = setup_test_app(store.clone(), today());
    let (status, _) = send_json(
        app,
        "POST",
        &format!("/api/exclude/student/{}", id),
        &exclusion_payload("dropped_out"),
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    // the ledger check applies to the general register only
    let app = setup_test_app(store.clone(), today());
    let (status, _) = send_json(
        app,
        "POST",
        "/api/adult-students",
        &student_payload("Ahmed Yusuf", "STD-009", "Ustadh Ali", "B1"),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
}

#[tokio::test]
async fn test_create_student_missing_field_rejected() {
    let store = Arc::new(MemoryStore::new());
    let app = setup_test_app(store, today());

    let (status, body) = send_json(
        app,
        "POST",
        "/api/students",
        &json!({
            "studentId": "STD-001",
            "gender": "Male",
            "dateJoined": "2023-09-01",
            "location": "Eastleigh",
            "cell": "0712345678",
            "ustadh": "Ustadh Ali",
            "classTeaching": "B1"
        }),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "name is required");
}

#[tokio::test]
async fn test_create_student_empty_field_rejected() {
    let store = Arc::new(MemoryStore::new());
    let app = setup_test_app(store, today());

    let (status, _) = send_json(
        app,
        "POST",
        "/api/students",
        &student_payload("", "STD-001", "Ustadh Ali", "B1"),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_get_student_not_found_uses_register_label() {
    let store = Arc::new(MemoryStore::new());

    let app = setup_test_app(store.clone(), today());
    let (status, body) = send(app, "GET", "/api/students/999").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], "Student not found with id: 999");

    let app = setup_test_app(store.clone(), today());
    let (status, body) = send(app, "GET", "/api/adult-students/999").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], "Adult student not found with id: 999");

    let app = setup_test_app(store.clone(), today());
    let (status, body) = send(app, "GET", "/api/men-students/999").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], "Men student not found with id: 999");
}

#[tokio::test]
async fn test_get_student_by_student_id() {
    let store = Arc::new(MemoryStore::new());

    let app = setup_test_app(store.clone(), today());
    let (status, _) = send_json(
        app,
        "POST",
        "/api/students",
        &student_payload("Ahmed Yusuf", "STD-001", "Ustadh Ali", "B1"),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);

    let app = setup_test_app(store.clone(), today());
    let (status, body) = send(app, "GET", "/api/students/by-student-id/STD-001").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["name"], "Ahmed Yusuf");

    let app = setup_test_app(store.clone(), today());
    let (status, body) = send(app, "GET", "/api/students/by-student-id/STD-404").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], "Student not found with student ID: STD-404");
}

#[tokio::test]
async fn test_update_student_rejects_taken_id() {
    let store = Arc::new(MemoryStore::new());

    let app = setup_test_app(store.clone(), today());
    let (status, _) = send_json(
        app,
        "POST",
        "/api/students",
        &student_payload("Ahmed Yusuf", "STD-001", "Ustadh Ali", "B1"),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);

    let app = setup_test_app(store.clone(), today());
    let (status, body) = send_json(
        app,
        "POST",
        "/api/students",
        &student_payload("Bilal Hassan", "STD-002", "Ustadh Ali", "B1"),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    let second_id = body["id"].as_i64().unwrap();

    let app = setup_test_app(store.clone(), today());
    let (status, body) = send_json(
        app,
        "PUT",
        &format!("/api/students/{}", second_id),
        &student_payload("Bilal Hassan", "STD-001", "Ustadh Ali", "B1"),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(
        body["error"],
        "Student with ID 'STD-001' already exists in active students"
    );
}

#[tokio::test]
async fn test_update_student_unchanged_id_passes() {
    let store = Arc::new(MemoryStore::new());

    let app = setup_test_app(store.clone(), today());
    let (status, body) = send_json(
        app,
        "POST",
        "/api/students",
        &student_payload("Ahmed Yusuf", "STD-001", "Ustadh Ali", "B1"),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    let id = body["id"].as_i64().unwrap();

    let app = setup_test_app(store.clone(), today());
    let (status, body) = send_json(
        app,
        "PUT",
        &format!("/api/students/{}", id),
        &student_payload("Ahmed Yusuf Ali", "STD-001", "Ustadh Musa", "C2"),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["name"], "Ahmed Yusuf Ali");
    assert_eq!(body["ustadh"], "Ustadh Musa");
}

#[tokio::test]
async fn test_update_student_rejects_excluded_id() {
    let store = Arc::new(MemoryStore::new());

    let app = setup_test_app(store.clone(), today());
    let (status, body) = send_json(
        app,
        "POST",
        "/api/students",
        &student_payload("Ahmed Yusuf", "STD-009", "Ustadh Ali", "B1"),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    let excluded_id = body["id"].as_i64().unwrap();

    let app = setup_test_app(store.clone(), today());
    let (status, _) = send_json(
        app,
        "POST",
        &format!("/api/exclude/student/{}", excluded_id),
        &exclusion_payload("transfer"),
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    let app = setup_test_app(store.clone(), today());
    let (status, body) = send_json(
        app,
        "POST",
        "/api/students",
        &student_payload("Bilal Hassan", "STD-002", "Ustadh Ali", "B1"),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    let id = body["id"].as_i64().unwrap();

    let app = setup_test_app(store.clone(), today());
    let (status, body) = send_json(
        app,
        "PUT",
        &format!("/api/students/{}", id),
        &student_payload("Bilal Hassan", "STD-009", "Ustadh Ali", "B1"),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(
        body["error"],
        "Cannot change to ID 'STD-009' - it was previously excluded"
    );
}

#[tokio::test]
async fn test_delete_student_and_not_found() {
    let store = Arc::new(MemoryStore::new());

    let app = setup_test_app(store.clone(), today());
    let (status, body) = send_json(
        app,
        "POST",
        "/api/students",
        &student_payload("Ahmed Yusuf", "STD-001", "Ustadh Ali", "B1"),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    let id = body["id"].as_i64().unwrap();

    let app = setup_test_app(store.clone(), today());
    let (status, body) = send(app, "DELETE", &format!("/api/students/{}", id)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "Student deleted successfully");

    let app = setup_test_app(store.clone(), today());
    let (status, _) = send(app, "DELETE", &format!("/api/students/{}", id)).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_bulk_operations_by_teacher() {
    let store = Arc::new(MemoryStore::new());

    for (name, student_id) in [("Ahmed Yusuf", "STD-001"), ("Bilal Hassan", "STD-002")] {
        let app = setup_test_app(store.clone(), today());
        let (status, _) = send_json(
            app,
            "POST",
            "/api/students",
            &student_payload(name, student_id, "Ustadh Ali", "B1"),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);
    }

    let app = setup_test_app(store.clone(), today());
    let (status, body) = send(app, "GET", "/api/students/count-by-teacher/Ustadh%20Ali").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, 2);

    let app = setup_test_app(store.clone(), today());
    let (status, body) = send(
        app,
        "PUT",
        "/api/students/update-class?ustadh=Ustadh%20Ali&oldClassTeaching=B1&newClassTeaching=B2",
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "All students updated to new class successfully");

    let app = setup_test_app(store.clone(), today());
    let (status, body) = send(
        app,
        "GET",
        "/api/students/by-teacher-class?ustadh=Ustadh%20Ali&classTeaching=B2",
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body.as_array().unwrap().len(), 2);

    let app = setup_test_app(store.clone(), today());
    let (status, body) = send(app, "DELETE", "/api/students/by-teacher/Ustadh%20Ali").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body["message"],
        "All students for teacher Ustadh Ali deleted successfully"
    );

    let app = setup_test_app(store.clone(), today());
    let (status, body) = send(app, "GET", "/api/students/by-teacher/Ustadh%20Ali").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body.as_array().unwrap().len(), 0);
}

#[tokio::test]
async fn test_search_students_matches_name_and_id() {
    let store = Arc::new(MemoryStore::new());

    for (name, student_id) in [("Ahmed Yusuf", "STD-001"), ("Bilal Hassan", "STD-002")] {
        let app = setup_test_app(store.clone(), today());
        let (status, _) = send_json(
            app,
            "POST",
            "/api/students",
            &student_payload(name, student_id, "Ustadh Ali", "B1"),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);
    }

    let app = setup_test_app(store.clone(), today());
    let (status, body) = send(app, "GET", "/api/students/search?q=ahmed").await;
    assert_eq!(status, StatusCode::OK);
    let matches = body.as_array().unwrap();
    assert_eq!(matches.len(), 1);
    assert_eq!(matches[0]["name"], "Ahmed Yusuf");

    let app = setup_test_app(store.clone(), today());
    let (status, body) = send(app, "GET", "/api/students/search?q=STD-002").await;
    assert_eq!(status, StatusCode::OK);
    let matches = body.as_array().unwrap();
    assert_eq!(matches.len(), 1);
    assert_eq!(matches[0]["studentId"], "STD-002");
}

#[tokio::test]
async fn test_transfer_student() {
    let store = Arc::new(MemoryStore::new());

    let app = setup_test_app(store.clone(), today());
    let (status, body) = send_json(
        app,
        "POST",
        "/api/students",
        &student_payload("Ahmed Yusuf", "STD-001", "Ustadh Ali", "B1"),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    let id = body["id"].as_i64().unwrap();

    let app = setup_test_app(store.clone(), today());
    let (status, body) = send_json(
        app,
        "POST",
        &format!("/api/students/transfer/{}", id),
        &json!({
            "newUstadh": "Ustadh Musa",
            "newClassTeaching": "C2",
            "transferredBy": "Admin",
            "notes": "Moved centers"
        }),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["ustadh"], "Ustadh Musa");
    assert_eq!(body["classTeaching"], "C2");
}

#[tokio::test]
async fn test_transfer_requires_all_fields() {
    let store = Arc::new(MemoryStore::new());

    let app = setup_test_app(store.clone(), today());
    let (status, body) = send_json(
        app,
        "POST",
        "/api/students",
        &student_payload("Ahmed Yusuf", "STD-001", "Ustadh Ali", "B1"),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    let id = body["id"].as_i64().unwrap();

    // blank-after-trim counts as missing
    let app = setup_test_app(store.clone(), today());
    let (status, body) = send_json(
        app,
        "POST",
        &format!("/api/students/transfer/{}", id),
        &json!({
            "newUstadh": "  ",
            "newClassTeaching": "C2",
            "transferredBy": "Admin"
        }),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(
        body["error"],
        "Missing or empty required fields: newUstadh, newClassTeaching, transferredBy"
    );
}

#[tokio::test]
async fn test_transfer_route_is_general_only() {
    let store = Arc::new(MemoryStore::new());

    let app = setup_test_app(store.clone(), today());
    let (status, body) = send_json(
        app,
        "POST",
        "/api/adult-students",
        &student_payload("Omar Abdi", "AD-001", "Ustadh Musa", "C2"),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    let id = body["id"].as_i64().unwrap();

    let app = setup_test_app(store.clone(), today());
    let (status, _) = send_json(
        app,
        "POST",
        &format!("/api/adult-students/transfer/{}", id),
        &json!({
            "newUstadh": "Ustadh Ali",
            "newClassTeaching": "B1",
            "transferredBy": "Admin"
        }),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_list_students_ordered_by_name() {
    let store = Arc::new(MemoryStore::new());

    for (name, student_id) in [("Zainab Omar", "STD-003"), ("Ahmed Yusuf", "STD-001")] {
        let app = setup_test_app(store.clone(), today());
        let (status, _) = send_json(
            app,
            "POST",
            "/api/students",
            &student_payload(name, student_id, "Ustadh Ali", "B1"),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);
    }

    let app = setup_test_app(store.clone(), today());
    let (status, body) = send(app, "GET", "/api/students").await;
    assert_eq!(status, StatusCode::OK);
    let students = body.as_array().unwrap();
    assert_eq!(students[0]["name"], "Ahmed Yusuf");
    assert_eq!(students[1]["name"], "Zainab Omar");
}
