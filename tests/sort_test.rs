use axum_test::TestServer;
use serde_json::{json, Value};

mod common;

async fn seeded_server() -> TestServer {
    let app = common::setup_test_app(common::create_test_app_config())
        .await
        .unwrap();
    let server = TestServer::new(app).unwrap();

    server
        .post("/teachers")
        .json(&json!([
            common::create_test_teacher_json("Bea", "Moss", "bea@school.test", 1),
            common::create_test_teacher_json("Al", "Moss", "al@school.test", 2),
            common::create_test_teacher_json("Al", "Zane", "alz@school.test", 1),
            common::create_test_teacher_json("Cal", "Ames", "cal@school.test", 2),
        ]))
        .await
        .assert_status(http::StatusCode::CREATED);

    server
}

fn names(body: &Value) -> Vec<String> {
    body["data"]
        .as_array()
        .unwrap()
        .iter()
        .map(|t| format!("{} {}", t["first_name"].as_str().unwrap(), t["last_name"].as_str().unwrap()))
        .collect()
}

#[tokio::test]
async fn test_multi_key_sort_skips_malformed_entries() {
    let server = seeded_server().await;

    let body: Value = server
        .get("/teachers?classroom_id=1&sort_by=first_name:asc&sort_by=bogus:up&sort_by=last_name:desc")
        .await
        .json();

    assert_eq!(
        names(&body),
        vec!["Al Zane", "Al Moss", "Bea Moss", "Cal Ames"]
    );
}

#[tokio::test]
async fn test_sort_direction_is_case_insensitive() {
    let server = seeded_server().await;

    let body: Value = server
        .get("/teachers?id=1&id=2&id=3&id=4&sort_by=last_name:ASC&sort_by=first_name:Desc")
        .await
        .json();

    assert_eq!(
        names(&body),
        vec!["Cal Ames", "Bea Moss", "Al Moss", "Al Zane"]
    );
}

#[tokio::test]
async fn test_filters_combine_with_and() {
    let server = seeded_server().await;

    let body: Value = server
        .get("/teachers?first_name=Al&subject_id=2")
        .await
        .json();

    assert_eq!(body["count"], 1);
    assert_eq!(names(&body), vec!["Al Moss"]);
}

#[tokio::test]
async fn test_only_first_value_of_plain_field_is_used() {
    let server = seeded_server().await;

    let body: Value = server
        .get("/teachers?last_name=Ames&last_name=Moss")
        .await
        .json();

    assert_eq!(names(&body), vec!["Cal Ames"]);
}

#[tokio::test]
async fn test_identity_filter_drops_invalid_values() {
    let server = seeded_server().await;

    let body: Value = server
        .get("/teachers?id=2&id=abc&id=4&sort_by=id:desc")
        .await
        .json();

    assert_eq!(common::ids(&body), vec![4, 2]);
}

#[tokio::test]
async fn test_filter_values_are_bound_not_interpolated() {
    let server = seeded_server().await;

    let response = server
        .get("/teachers?last_name=x'%20OR%20'1'%3D'1")
        .await;

    response.assert_status_ok();
    let body: Value = response.json();
    assert_eq!(body["count"], 0);
}

#[tokio::test]
async fn test_unknown_sort_field_is_ignored() {
    let server = seeded_server().await;

    let body: Value = server
        .get("/teachers?last_name=Moss&sort_by=password:asc&sort_by=first_name:desc")
        .await
        .json();

    assert_eq!(names(&body), vec!["Bea Moss", "Al Moss"]);
}
