use axum_test::TestServer;
use http::StatusCode;
use serde_json::{json, Value};

mod common;

async fn seeded_server() -> TestServer {
    let app = common::setup_test_app(common::create_test_app_config())
        .await
        .unwrap();
    let server = TestServer::new(app).unwrap();

    server
        .post("/students")
        .json(&json!([
            common::create_test_student_json("Ann", "Lee", "ann@school.test"),
            common::create_test_student_json("Bob", "Lee", "bob@school.test"),
            common::create_test_student_json("Cy", "Ray", "cy@school.test"),
        ]))
        .await
        .assert_status(StatusCode::CREATED);

    server
}

#[tokio::test]
async fn test_bulk_create_returns_every_record() {
    let server = seeded_server().await;

    let body: Value = server.get("/students?classroom_id=1").await.json();
    assert_eq!(body["count"], 3);
    assert_eq!(common::ids(&body), vec![1, 2, 3]);
}

#[tokio::test]
async fn test_bulk_create_failure_commits_nothing() {
    let app = common::setup_test_app(common::create_test_app_config())
        .await
        .unwrap();
    let server = TestServer::new(app).unwrap();

    let response = server
        .post("/teachers")
        .json(&json!([
            common::create_test_teacher_json("Tom", "Hart", "tom@school.test", 1),
            {"first_name": "Nobody"},
            common::create_test_teacher_json("Amy", "Wu", "amy@school.test", 2),
        ]))
        .await;

    assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);
    let body: Value = response.json();
    assert_eq!(body["status"], "error");
    assert!(body["message"]
        .as_str()
        .unwrap()
        .contains("missing required fields"));

    let list = server.get("/teachers?id=1&id=2&id=3").await;
    assert_eq!(list.status_code(), StatusCode::OK);
    let listed: Value = list.json();
    assert_eq!(listed["count"], 0);
}

#[tokio::test]
async fn test_bulk_create_duplicate_email_rolls_back() {
    let app = common::setup_test_app(common::create_test_app_config())
        .await
        .unwrap();
    let server = TestServer::new(app).unwrap();

    let response = server
        .post("/students")
        .json(&json!([
            common::create_test_student_json("Ann", "Lee", "dup@school.test"),
            common::create_test_student_json("Bob", "Lee", "dup@school.test"),
        ]))
        .await;

    assert_eq!(response.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
    let body: Value = response.json();
    assert_eq!(body["message"], "Error accessing the database");

    let listed: Value = server.get("/students?last_name=Lee").await.json();
    assert_eq!(listed["count"], 0);
}

#[tokio::test]
async fn test_patch_many_updates_filtered_records() {
    let server = seeded_server().await;

    let response = server
        .patch("/students?last_name=Lee")
        .json(&json!({"classroom_id": 4}))
        .await;

    assert_eq!(response.status_code(), StatusCode::OK);
    let body: Value = response.json();
    assert_eq!(body["count"], 2);
    for record in body["data"].as_array().unwrap() {
        assert_eq!(record["classroom_id"], 4);
    }

    let untouched: Value = server.get("/students/3").await.json();
    assert_eq!(untouched["data"]["classroom_id"], 1);
}

#[tokio::test]
async fn test_patch_many_without_matches_is_not_found() {
    let server = seeded_server().await;

    let response = server
        .patch("/students?last_name=Nobody")
        .json(&json!({"classroom_id": 9}))
        .await;

    assert_eq!(response.status_code(), StatusCode::NOT_FOUND);

    let listed: Value = server.get("/students?classroom_id=9").await.json();
    assert_eq!(listed["count"], 0);
}

#[tokio::test]
async fn test_patch_many_requires_filter() {
    let server = seeded_server().await;

    let response = server
        .patch("/students?nickname=x")
        .json(&json!({"classroom_id": 9}))
        .await;

    assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);
    let body: Value = response.json();
    assert_eq!(body["message"], "At least one valid filter is required");
}

#[tokio::test]
async fn test_delete_many_reports_count() {
    let server = seeded_server().await;

    let response = server.delete("/students?id=1&id=3&id=oops").await;

    assert_eq!(response.status_code(), StatusCode::OK);
    let body: Value = response.json();
    assert_eq!(body, json!({"status": "success", "count_deleted": 2}));

    let remaining: Value = server.get("/students?classroom_id=1").await.json();
    assert_eq!(common::ids(&remaining), vec![2]);
}

#[tokio::test]
async fn test_delete_many_without_matches_is_not_found() {
    let server = seeded_server().await;

    let response = server.delete("/students?email=nobody@school.test").await;
    assert_eq!(response.status_code(), StatusCode::NOT_FOUND);

    let unfiltered = server.delete("/students").await;
    assert_eq!(unfiltered.status_code(), StatusCode::BAD_REQUEST);

    let remaining: Value = server.get("/students?classroom_id=1").await.json();
    assert_eq!(remaining["count"], 3);
}
