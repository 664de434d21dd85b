//! 可观测性模块
//!
//! 提供 Prometheus 格式指标、结构化日志初始化和健康检查。

use axum::{
    Json, Router,
    extract::{Request, State},
    middleware::Next,
    response::{IntoResponse, Response},
    routing::get,
};
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

use crate::config::config::LoggingConfig;
use crate::storage::factory::EntryStore;

// ===== Simple Metrics =====

/// 应用指标
#[derive(Debug, Default)]
pub struct AppMetrics {
    pub http_requests_total: AtomicU64,
    pub http_request_duration_ms_sum: AtomicU64,
    pub analyses_total: AtomicU64,
    pub entries_created_total: AtomicU64,
    pub entries_deleted_total: AtomicU64,
    pub recommendations_total: AtomicU64,
    pub recommendations_degraded_total: AtomicU64,
    pub errors_total: AtomicU64,
}

impl AppMetrics {
    /// 记录 HTTP 请求
    pub fn record_http_request(&self, duration_ms: u64, is_error: bool) {
        self.http_requests_total.fetch_add(1, Ordering::Relaxed);
        self.http_request_duration_ms_sum
            .fetch_add(duration_ms, Ordering::Relaxed);
        if is_error {
            self.errors_total.fetch_add(1, Ordering::Relaxed);
        }
    }

    pub fn record_analysis(&self) {
        self.analyses_total.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_entry_created(&self) {
        self.entries_created_total.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_entry_deleted(&self) {
        self.entries_deleted_total.fetch_add(1, Ordering::Relaxed);
    }

    /// 记录一次推荐，`degraded` 表示未能给出结果
    pub fn record_recommendation(&self, degraded: bool) {
        self.recommendations_total.fetch_add(1, Ordering::Relaxed);
        if degraded {
            self.recommendations_degraded_total
                .fetch_add(1, Ordering::Relaxed);
        }
    }

    /// 生成 Prometheus 格式指标
    pub fn gather(&self) -> String {
        let requests = self.http_requests_total.load(Ordering::Relaxed);
        format!(
            r#"# HELP http_requests_total Total HTTP requests
# TYPE http_requests_total counter
http_requests_total {}
# HELP http_request_duration_seconds HTTP request duration in seconds
# TYPE http_request_duration_seconds summary
http_request_duration_seconds_sum {}
http_request_duration_seconds_count {}
# HELP sentiment_analyses_total Texts scored by the sentiment analyzer
# TYPE sentiment_analyses_total counter
sentiment_analyses_total {}
# HELP journal_entries_created_total Journal entries created
# TYPE journal_entries_created_total counter
journal_entries_created_total {}
# HELP journal_entries_deleted_total Journal entries deleted
# TYPE journal_entries_deleted_total counter
journal_entries_deleted_total {}
# HELP recommendations_total Recommendation requests
# TYPE recommendations_total counter
recommendations_total {}
# HELP recommendations_degraded_total Recommendation requests answered without a result
# TYPE recommendations_degraded_total counter
recommendations_degraded_total {}
# HELP errors_total Total error responses
# TYPE errors_total counter
errors_total {}
"#,
            requests,
            self.http_request_duration_ms_sum.load(Ordering::Relaxed) as f64 / 1000.0,
            requests,
            self.analyses_total.load(Ordering::Relaxed),
            self.entries_created_total.load(Ordering::Relaxed),
            self.entries_deleted_total.load(Ordering::Relaxed),
            self.recommendations_total.load(Ordering::Relaxed),
            self.recommendations_degraded_total.load(Ordering::Relaxed),
            self.errors_total.load(Ordering::Relaxed),
        )
    }
}

// ===== Health Check =====

/// 健康检查状态
#[derive(Debug, Serialize)]
pub struct HealthStatus {
    pub status: String,
    pub timestamp: String,
    pub version: String,
    pub uptime_seconds: f64,
    pub checks: Vec<HealthCheck>,
}

/// 单个健康检查项
#[derive(Debug, Serialize)]
pub struct HealthCheck {
    pub name: String,
    pub status: String,
    pub message: Option<String>,
    pub latency_ms: Option<u64>,
}

/// 可观测性状态
#[derive(Clone)]
pub struct ObservabilityState {
    pub metrics: Arc<AppMetrics>,
    pub store: EntryStore,
    pub start_time: DateTime<Utc>,
    pub version: String,
}

impl ObservabilityState {
    pub fn new(version: String, metrics: Arc<AppMetrics>, store: EntryStore) -> Self {
        Self {
            metrics,
            store,
            start_time: Utc::now(),
            version,
        }
    }

    /// 获取应用正常运行时间
    pub fn uptime_seconds(&self) -> f64 {
        (Utc::now() - self.start_time).num_seconds() as f64
    }

    /// 探测存储是否可用
    async fn check_storage(&self) -> HealthCheck {
        let start = std::time::Instant::now();
        let result = match self.store.health().await {
            Ok(()) => self.store.count().await,
            Err(e) => Err(e),
        };
        let latency_ms = start.elapsed().as_millis() as u64;

        match result {
            Ok(count) => HealthCheck {
                name: "storage".to_string(),
                status: "healthy".to_string(),
                message: Some(format!("{} entries", count)),
                latency_ms: Some(latency_ms),
            },
            Err(e) => HealthCheck {
                name: "storage".to_string(),
                status: "unhealthy".to_string(),
                message: Some(e.to_string()),
                latency_ms: Some(latency_ms),
            },
        }
    }
}

// ===== Health Check Handlers =====

/// 获取完整健康状态
pub async fn health_check(State(state): State<Arc<ObservabilityState>>) -> impl IntoResponse {
    let checks = vec![state.check_storage().await];
    let all_healthy = checks.iter().all(|c| c.status == "healthy");

    let health_status = HealthStatus {
        status: if all_healthy { "healthy" } else { "unhealthy" }.to_string(),
        timestamp: Utc::now().to_rfc3339(),
        version: state.version.clone(),
        uptime_seconds: state.uptime_seconds(),
        checks,
    };

    let status_code = if all_healthy {
        axum::http::StatusCode::OK
    } else {
        axum::http::StatusCode::SERVICE_UNAVAILABLE
    };

    (status_code, Json(health_status))
}

/// 简单存活检查
pub async fn liveness() -> impl IntoResponse {
    "OK"
}

/// 就绪检查（检查存储）
pub async fn readiness(State(state): State<Arc<ObservabilityState>>) -> impl IntoResponse {
    if state.check_storage().await.status == "healthy" {
        (axum::http::StatusCode::OK, "Ready")
    } else {
        (axum::http::StatusCode::SERVICE_UNAVAILABLE, "Not Ready")
    }
}

/// Prometheus 指标端点
pub async fn metrics(State(state): State<Arc<ObservabilityState>>) -> impl IntoResponse {
    (axum::http::StatusCode::OK, state.metrics.gather())
}

/// 版本信息端点
pub async fn version(State(state): State<Arc<ObservabilityState>>) -> impl IntoResponse {
    Json(serde_json::json!({
        "version": state.version,
        "uptime_seconds": state.uptime_seconds(),
        "timestamp": Utc::now().to_rfc3339(),
    }))
}

/// 创建可观测性路由
pub fn create_observability_router(state: Arc<ObservabilityState>) -> Router {
    Router::new()
        .route("/health", get(health_check))
        .route("/health/live", get(liveness))
        .route("/health/ready", get(readiness))
        .route("/metrics", get(metrics))
        .route("/version", get(version))
        .with_state(state)
}

// ===== Structured Logging =====

/// 初始化日志
///
/// `RUST_LOG` 优先于配置中的级别。配置了 `log_dir` 时同时按天写入文件，
/// 返回的 guard 需要在进程生命周期内持有。
pub fn init_tracing(config: &LoggingConfig) -> Option<WorkerGuard> {
    let level = if config.level.is_empty() {
        "info"
    } else {
        config.level.as_str()
    };
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("{},tower_http=info", level)));

    let (file_writer, guard) = match &config.log_dir {
        Some(dir) => {
            let appender = tracing_appender::rolling::daily(dir, "mood-diary.log");
            let (writer, guard) = tracing_appender::non_blocking(appender);
            (Some(writer), Some(guard))
        }
        None => (None, None),
    };

    let file_layer = file_writer.map(|writer| {
        fmt::layer()
            .json()
            .with_ansi(false)
            .with_writer(writer)
    });

    let registry = tracing_subscriber::registry()
        .with(env_filter)
        .with(file_layer);

    let result = if config.structured {
        registry
            .with(fmt::layer().json().with_target(true))
            .try_init()
    } else {
        registry
            .with(fmt::layer().with_target(true).with_line_number(true))
            .try_init()
    };

    if let Err(e) = result {
        eprintln!("tracing subscriber already initialized: {}", e);
    }

    guard
}

// ===== Request Metrics Middleware =====

/// 记录请求指标的中间件
pub async fn metrics_middleware(
    State(metrics): State<Arc<AppMetrics>>,
    req: Request,
    next: Next,
) -> Response {
    let start = std::time::Instant::now();

    let response = next.run(req).await;

    let duration_ms = start.elapsed().as_millis() as u64;
    let status = response.status();
    metrics.record_http_request(duration_ms, status.is_client_error() || status.is_server_error());

    response
}
