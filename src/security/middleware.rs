//! Security Middleware Module
//!
//! Axum middleware for API key authentication and security response headers.

use axum::{
    extract::{Request, State},
    http::HeaderValue,
    middleware::Next,
    response::Response,
};
use std::sync::Arc;

use crate::error::AppError;
use crate::security::auth::{ApiKeyAuth, Credentials};

/// Authentication middleware
pub async fn api_key_middleware(
    State(auth): State<Arc<ApiKeyAuth>>,
    req: Request,
    next: Next,
) -> Result<Response, AppError> {
    if auth.is_enabled() {
        let credentials = Credentials::from_headers(req.headers());
        auth.authenticate(&credentials)?;
    }

    Ok(next.run(req).await)
}

const SECURITY_HEADERS: &[(&str, &str)] = &[
    ("X-Content-Type-Options", "nosniff"),
    ("X-Frame-Options", "DENY"),
    ("Referrer-Policy", "strict-origin-when-cross-origin"),
    ("Permissions-Policy", "geolocation=(), microphone=(), camera=()"),
];

/// Security headers middleware
pub async fn security_headers_middleware(req: Request, next: Next) -> Response {
    let mut response = next.run(req).await;

    for (name, value) in SECURITY_HEADERS {
        response
            .headers_mut()
            .insert(*name, HeaderValue::from_static(value));
    }

    response
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{Router, body::Body, http::StatusCode, routing::get};
    use tower::ServiceExt;

    fn app(auth: ApiKeyAuth) -> Router {
        Router::new()
            .route("/", get(|| async { "ok" }))
            .layer(axum::middleware::from_fn_with_state(
                Arc::new(auth),
                api_key_middleware,
            ))
            .layer(axum::middleware::from_fn(security_headers_middleware))
    }

    async fn call(app: Router, key: Option<&str>) -> Response {
        let mut builder = axum::http::Request::builder().uri("/");
        if let Some(key) = key {
            builder = builder.header("X-API-Key", key);
        }
        app.oneshot(builder.body(Body::empty()).unwrap())
            .await
            .unwrap()
    }

    #[tokio::test]
    async fn test_rejects_missing_key() {
        let response = call(app(ApiKeyAuth::new("secret")), None).await;
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
        // 错误响应同样带安全头
        assert_eq!(response.headers()["X-Frame-Options"], "DENY");
    }

    #[tokio::test]
    async fn test_accepts_valid_key() {
        let response = call(app(ApiKeyAuth::new("secret")), Some("secret")).await;
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(response.headers()["X-Content-Type-Options"], "nosniff");
    }

    #[tokio::test]
    async fn test_disabled_auth_passes_through() {
        let response = call(app(ApiKeyAuth::disabled()), None).await;
        assert_eq!(response.status(), StatusCode::OK);
    }
}
