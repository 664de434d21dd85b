//! API 模块
//!
//! 提供 REST API 支持。

pub mod app_state;
pub mod dto;
pub mod handlers;
pub mod routes;

use std::sync::Arc;
use std::time::Duration;

use axum::{
    Router,
    extract::DefaultBodyLimit,
    http::{HeaderValue, Method, header},
};
use tower_http::{
    cors::{Any, CorsLayer},
    timeout::TimeoutLayer,
    trace::TraceLayer,
};

use crate::api::app_state::AppState;
use crate::config::config::ServerConfig;
use crate::error::AppError;
use crate::observability::{ObservabilityState, create_observability_router, metrics_middleware};
use crate::security::auth::ApiKeyAuth;
use crate::security::middleware::{api_key_middleware, security_headers_middleware};

/// `/api/v1` 下的业务路由，受 API key 保护
pub fn create_router(app_state: AppState, auth: Arc<ApiKeyAuth>) -> Router {
    let api = Router::new()
        .merge(routes::analysis_routes::create_analysis_router())
        .merge(routes::entry_routes::create_entry_router())
        .merge(routes::recommendation_routes::create_recommendation_router())
        .layer(axum::middleware::from_fn_with_state(
            auth,
            api_key_middleware,
        ));

    let metrics = app_state.metrics.clone();

    Router::new()
        .nest("/api/v1", api)
        .layer(axum::middleware::from_fn_with_state(
            metrics,
            metrics_middleware,
        ))
        // Add security headers middleware to all routes
        .layer(axum::middleware::from_fn(security_headers_middleware))
        .with_state(app_state)
}

fn cors_layer(allowed_origins: &[String]) -> CorsLayer {
    let layer = CorsLayer::new()
        .allow_methods([Method::GET, Method::POST, Method::DELETE])
        .allow_headers([
            header::CONTENT_TYPE,
            header::AUTHORIZATION,
            header::HeaderName::from_static("x-api-key"),
        ]);

    if allowed_origins.iter().any(|origin| origin == "*") {
        return layer.allow_origin(Any);
    }

    let origins: Vec<HeaderValue> = allowed_origins
        .iter()
        .filter_map(|origin| origin.parse().ok())
        .collect();
    layer.allow_origin(origins)
}

/// 组装完整应用：业务路由 + 健康检查/指标路由 + 通用中间件
pub fn build_app(
    app_state: AppState,
    auth: Arc<ApiKeyAuth>,
    observability: Arc<ObservabilityState>,
    server: &ServerConfig,
) -> Router {
    create_router(app_state, auth)
        .merge(create_observability_router(observability))
        .layer(DefaultBodyLimit::max(server.max_request_size))
        .layer(TimeoutLayer::new(Duration::from_secs(server.request_timeout)))
        .layer(cors_layer(&server.allowed_origins))
        .layer(TraceLayer::new_for_http())
}

pub async fn initialize_api(
    app_state: AppState,
    auth: Arc<ApiKeyAuth>,
    observability: Arc<ObservabilityState>,
    server: &ServerConfig,
) -> Result<Router, AppError> {
    tracing::info!(
        "Initializing API router (api key auth: {})",
        if auth.is_enabled() { "enabled" } else { "disabled" }
    );
    Ok(build_app(app_state, auth, observability, server))
}
