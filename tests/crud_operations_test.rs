use axum_test::TestServer;
use http::StatusCode;
use serde_json::{json, Value};

mod common;

#[tokio::test]
async fn test_student_crud_operations() {
    let app = common::setup_test_app(common::create_test_app_config())
        .await
        .unwrap();
    let server = TestServer::new(app).unwrap();

    // Create
    let create_response = server
        .post("/students")
        .json(&json!([common::create_test_student_json(
            "Ann",
            "Lee",
            "ann@school.test"
        )]))
        .await;

    assert_eq!(create_response.status_code(), StatusCode::CREATED);
    let created: Value = create_response.json();
    assert_eq!(created["status"], "success");
    assert_eq!(created["count"], 1);
    let student = created["data"][0].clone();
    let id = student["id"].as_i64().unwrap();

    // Read
    let get_response = server.get(&format!("/students/{}", id)).await;
    assert_eq!(get_response.status_code(), StatusCode::OK);
    let fetched: Value = get_response.json();
    assert_eq!(fetched["data"], student);
    assert!(fetched.get("count").is_none());

    // Replace
    let put_response = server
        .put(&format!("/students/{}", id))
        .json(&json!({
            "first_name": "Anna",
            "last_name": "Lee",
            "email": "anna@school.test",
            "classroom_id": 2
        }))
        .await;
    assert_eq!(put_response.status_code(), StatusCode::OK);
    let replaced: Value = put_response.json();
    assert_eq!(replaced["data"]["id"], id);
    assert_eq!(replaced["data"]["first_name"], "Anna");
    assert_eq!(replaced["data"]["classroom_id"], 2);

    // Patch
    let patch_response = server
        .patch(&format!("/students/{}", id))
        .json(&json!({"last_name": "Park", "unknown": "ignored"}))
        .await;
    assert_eq!(patch_response.status_code(), StatusCode::OK);
    let patched: Value = patch_response.json();
    assert_eq!(patched["data"]["last_name"], "Park");
    assert_eq!(patched["data"]["first_name"], "Anna");

    // Delete
    let delete_response = server.delete(&format!("/students/{}", id)).await;
    assert_eq!(delete_response.status_code(), StatusCode::OK);
    let deleted: Value = delete_response.json();
    assert_eq!(deleted, json!({"status": "success", "id": id}));

    let gone = server.get(&format!("/students/{}", id)).await;
    assert_eq!(gone.status_code(), StatusCode::NOT_FOUND);
    let body: Value = gone.json();
    assert_eq!(body["status"], "error");
    assert_eq!(body["message"], "Student not found");
}

#[tokio::test]
async fn test_create_then_get_returns_equal_record() {
    let app = common::setup_test_app(common::create_test_app_config())
        .await
        .unwrap();
    let server = TestServer::new(app).unwrap();

    let payload = json!([{
        "room_number": "B12",
        "building": "Science",
        "capacity": 28
    }]);
    let created: Value = server.post("/classrooms").json(&payload).await.json();
    let classroom = &created["data"][0];

    let fetched: Value = server
        .get(&format!("/classrooms/{}", classroom["id"]))
        .await
        .json();

    assert_eq!(&fetched["data"], classroom);
}

#[tokio::test]
async fn test_every_entity_is_routed() {
    let app = common::setup_test_app(common::create_test_app_config())
        .await
        .unwrap();
    let server = TestServer::new(app).unwrap();

    let payloads = [
        (
            "/teachers",
            common::create_test_teacher_json("Tom", "Hart", "tom@school.test", 2),
        ),
        (
            "/students",
            common::create_test_student_json("Sue", "Bell", "sue@school.test"),
        ),
        (
            "/classrooms",
            json!({"room_number": "1A", "building": "Main", "capacity": 30}),
        ),
        (
            "/subjects",
            json!({"name": "Biology", "description": "Cells and organisms", "total_hours": 60}),
        ),
        (
            "/executives",
            json!({
                "first_name": "Eve",
                "last_name": "Stone",
                "email": "eve@school.test",
                "username": "estone",
                "role": "principal"
            }),
        ),
    ];

    for (path, payload) in payloads {
        let response = server.post(path).json(&json!([payload])).await;
        assert_eq!(response.status_code(), StatusCode::CREATED, "POST {}", path);

        let body: Value = response.json();
        let id = body["data"][0]["id"].as_i64().unwrap();
        let fetched = server.get(&format!("{}/{}", path, id)).await;
        assert_eq!(fetched.status_code(), StatusCode::OK, "GET {}/{}", path, id);
    }
}

#[tokio::test]
async fn test_client_identity_is_ignored_on_create() {
    let app = common::setup_test_app(common::create_test_app_config())
        .await
        .unwrap();
    let server = TestServer::new(app).unwrap();

    let mut payload = common::create_test_student_json("Ann", "Lee", "ann@school.test");
    payload["id"] = json!(500);

    let created: Value = server.post("/students").json(&json!([payload])).await.json();

    assert_eq!(created["data"][0]["id"], 1);
}

#[tokio::test]
async fn test_root_and_health() {
    let app = common::setup_test_app(common::create_test_app_config())
        .await
        .unwrap();
    let server = TestServer::new(app).unwrap();

    let root = server.get("/").await;
    root.assert_status_ok();
    assert_eq!(root.text(), "Welcome to the school API");

    let health = server.get("/health").await;
    health.assert_status_ok();
    let body: Value = health.json();
    assert_eq!(body["status"], "ok");
}
