#![allow(dead_code)]

use axum::Router;
use school_api::config::AppConfig;
use school_api::error::AppResult;
use school_api::startup;
use serde_json::{json, Value};

/// Default configuration with the rate limiter disabled
pub fn create_test_app_config() -> AppConfig {
    let mut config = AppConfig::default_config();
    config.rate_limit.enabled = false;
    config
}

/// Full application, middleware included, over a fresh in-memory database
pub async fn setup_test_app(app_config: AppConfig) -> AppResult<Router> {
    let backend = startup::build_backend(&app_config).await?;
    Ok(startup::build_router(backend, &app_config))
}

pub fn create_test_student_json(first_name: &str, last_name: &str, email: &str) -> Value {
    json!({
        "first_name": first_name,
        "last_name": last_name,
        "email": email,
        "classroom_id": 1
    })
}

pub fn create_test_teacher_json(
    first_name: &str,
    last_name: &str,
    email: &str,
    subject_id: i64,
) -> Value {
    json!({
        "first_name": first_name,
        "last_name": last_name,
        "email": email,
        "classroom_id": 1,
        "subject_id": subject_id
    })
}

pub fn ids(body: &Value) -> Vec<i64> {
    body["data"]
        .as_array()
        .map(|records| records.iter().filter_map(|r| r["id"].as_i64()).collect())
        .unwrap_or_default()
}
