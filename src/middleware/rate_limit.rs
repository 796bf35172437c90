use axum::{
    extract::{ConnectInfo, Request, State},
    middleware::Next,
    response::{IntoResponse, Response},
};
use std::collections::HashMap;
use std::net::SocketAddr;
use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant};

use crate::config::RateLimitConfig;
use crate::error::AppError;

/// Fixed-window request counter keyed by visitor address.
///
/// All counts are cleared together once the window has elapsed; the reset is
/// applied by the first request that observes it.
#[derive(Debug)]
pub struct RateLimiter {
    max_requests: u32,
    window: Duration,
    state: Mutex<WindowState>,
}

#[derive(Debug)]
struct WindowState {
    started: Instant,
    visitors: HashMap<String, u32>,
}

impl RateLimiter {
    pub fn new(max_requests: u32, window: Duration) -> Self {
        Self {
            max_requests,
            window,
            state: Mutex::new(WindowState {
                started: Instant::now(),
                visitors: HashMap::new(),
            }),
        }
    }

    pub fn from_config(config: &RateLimitConfig) -> Self {
        Self::new(config.max_requests, config.window())
    }

    /// Count one request for `visitor`; false once the budget is spent
    pub fn check(&self, visitor: &str) -> bool {
        self.check_at(visitor, Instant::now())
    }

    fn check_at(&self, visitor: &str, now: Instant) -> bool {
        let mut state = self.state.lock().unwrap_or_else(|e| e.into_inner());

        if now.duration_since(state.started) >= self.window {
            state.visitors.clear();
            state.started = now;
        }

        let count = state.visitors.entry(visitor.to_string()).or_insert(0);
        *count = count.saturating_add(1);
        *count <= self.max_requests
    }
}

fn visitor_key(request: &Request) -> String {
    if let Some(ConnectInfo(addr)) = request.extensions().get::<ConnectInfo<SocketAddr>>() {
        return addr.ip().to_string();
    }

    request
        .headers()
        .get("x-forwarded-for")
        .and_then(|h| h.to_str().ok())
        .and_then(|v| v.split(',').next())
        .or_else(|| {
            request
                .headers()
                .get("x-real-ip")
                .and_then(|h| h.to_str().ok())
        })
        .map(|v| v.trim().to_string())
        .unwrap_or_else(|| "unknown".to_string())
}

pub async fn rate_limit_middleware(
    State(limiter): State<Arc<RateLimiter>>,
    request: Request,
    next: Next,
) -> Response {
    let visitor = visitor_key(&request);
    if !limiter.check(&visitor) {
        tracing::warn!(%visitor, "rate limit exceeded");
        return AppError::RateLimited.into_response();
    }
    next.run(request).await
}
