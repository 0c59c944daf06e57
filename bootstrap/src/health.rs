//! 健康检查模块
//!
//! 提供 /health/live 和 /health/ready 端点

use axum::{Json, Router, extract::State, http::StatusCode, response::IntoResponse, routing::get};
use redis::aio::ConnectionManager;
use sqlx::PgPool;
use xplor_adapter_postgres::check_connection as check_postgres;
use xplor_adapter_redis::check_connection as check_redis;
use xplor_telemetry::HealthStatus;

/// 健康检查器
#[derive(Clone, Default)]
pub struct HealthChecker {
    postgres: Option<PgPool>,
    redis: Option<ConnectionManager>,
}

impl HealthChecker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_postgres(mut self, pool: PgPool) -> Self {
        self.postgres = Some(pool);
        self
    }

    pub fn with_redis(mut self, conn: ConnectionManager) -> Self {
        self.redis = Some(conn);
        self
    }

    /// 就绪检查：逐个探测已注册的依赖
    pub async fn readiness(&self) -> HealthStatus {
        let mut status = HealthStatus::new();

        if let Some(pool) = &self.postgres {
            match check_postgres(pool).await {
                Ok(()) => status.add_check("postgres", true, None),
                Err(e) => status.add_check("postgres", false, Some(e.to_string())),
            }
        }

        if let Some(conn) = &self.redis {
            match check_redis(conn).await {
                Ok(()) => status.add_check("redis", true, None),
                Err(e) => status.add_check("redis", false, Some(e.to_string())),
            }
        }

        status
    }
}

async fn liveness() -> impl IntoResponse {
    (StatusCode::OK, Json(HealthStatus::new()))
}

async fn readiness(State(checker): State<HealthChecker>) -> impl IntoResponse {
    let status = checker.readiness().await;
    let code = if status.healthy {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };
    (code, Json(status))
}

/// 健康检查路由
pub fn health_router(checker: HealthChecker) -> Router {
    Router::new()
        .route("/health/live", get(liveness))
        .route("/health/ready", get(readiness))
        .with_state(checker)
}
