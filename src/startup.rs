use axum::{
    http::{header, HeaderName, HeaderValue, Method},
    middleware,
    routing::get,
    Router,
};
use std::sync::Arc;
use std::time::Duration;
use tower_http::compression::CompressionLayer;
use tower_http::cors::{AllowOrigin, CorsLayer};
use tower_http::timeout::TimeoutLayer;

use crate::backend::database::SqliteBackend;
use crate::backend::Backend;
use crate::config::{AppConfig, CorsConfig};
use crate::error::AppResult;
use crate::logging::logging_middleware;
use crate::middleware::{rate_limit_middleware, security_headers_middleware, RateLimiter};
use crate::models::{Classroom, Executive, Student, Subject, Teacher};
use crate::resource::record::record_routes;
use crate::resource::{root, AppState};

/// Connect to the configured database and create missing tables
pub async fn build_backend(config: &AppConfig) -> AppResult<Arc<SqliteBackend>> {
    let backend = SqliteBackend::connect(&config.database.to_backend_config()).await?;
    backend.init_schema().await?;
    Ok(Arc::new(backend))
}

/// Routes for every record type, without middleware
pub fn api_routes(backend: AppState) -> Router {
    Router::new()
        .route("/", get(root::root))
        .route("/health", get(root::health))
        .merge(record_routes::<Teacher>())
        .merge(record_routes::<Student>())
        .merge(record_routes::<Classroom>())
        .merge(record_routes::<Subject>())
        .merge(record_routes::<Executive>())
        .with_state(backend)
}

pub fn build_router(backend: AppState, config: &AppConfig) -> Router {
    apply_middleware(api_routes(backend), config)
}

/// Layers listed innermost first; the access log ends up outermost
pub fn apply_middleware(router: Router, config: &AppConfig) -> Router {
    let mut router = router
        .layer(CompressionLayer::new())
        .layer(middleware::from_fn(security_headers_middleware))
        .layer(TimeoutLayer::new(config.server.request_timeout()));

    if config.rate_limit.enabled {
        let limiter = Arc::new(RateLimiter::from_config(&config.rate_limit));
        router = router.layer(middleware::from_fn_with_state(
            limiter,
            rate_limit_middleware,
        ));
    }

    router
        .layer(cors_layer(&config.cors))
        .layer(middleware::from_fn(logging_middleware))
}

fn cors_layer(config: &CorsConfig) -> CorsLayer {
    let origins: Vec<HeaderValue> = config
        .allowed_origins
        .iter()
        .filter(|origin| origin.trim() != "*")
        .filter_map(|origin| match origin.parse() {
            Ok(value) => Some(value),
            Err(_) => {
                tracing::warn!(%origin, "ignoring invalid CORS origin");
                None
            }
        })
        .collect();

    CorsLayer::new()
        .allow_origin(AllowOrigin::list(origins))
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::PATCH,
            Method::DELETE,
        ])
        .allow_headers([header::CONTENT_TYPE, header::AUTHORIZATION])
        .expose_headers([HeaderName::from_static("authorization")])
        .allow_credentials(true)
        .max_age(Duration::from_secs(3600))
}
