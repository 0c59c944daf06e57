//! 服务启动器
//!
//! 统一的 HTTP 服务启动流程：
//! 1. 加载配置
//! 2. 初始化运行时（日志）与可选的 Prometheus 记录器
//! 3. 创建基础设施资源（数据库、Redis、TokenService、KeyCipher）
//! 4. 调用闭包构建业务路由
//! 5. 挂载健康检查与 metrics 路由后启动服务器，处理 graceful shutdown

use std::future::Future;
use std::net::SocketAddr;

use axum::{Router, routing::get};
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::info;
use xplor_config::AppConfig;
use xplor_errors::AppResult;
use xplor_telemetry::init_metrics;

use crate::health::{HealthChecker, health_router};
use crate::infrastructure::Infrastructure;
use crate::runtime::{init_runtime, shutdown_signal};

/// 运行 HTTP 服务
///
/// # 示例
///
/// ```ignore
/// #[tokio::main]
/// async fn main() -> Result<(), Box<dyn std::error::Error>> {
///     xplor_bootstrap::run("config", |infra| async move {
///         Ok(build_router(infra))
///     })
///     .await
/// }
/// ```
pub async fn run<F, Fut>(config_dir: &str, app_builder: F) -> Result<(), Box<dyn std::error::Error>>
where
    F: FnOnce(Infrastructure) -> Fut,
    Fut: Future<Output = AppResult<Router>>,
{
    let config = AppConfig::load(config_dir)?;
    init_runtime(&config);

    info!("Starting {} service", config.app_name);

    let metrics_handle = if config.telemetry.metrics_enabled {
        Some(init_metrics()?)
    } else {
        None
    };

    let infra = Infrastructure::from_config(config.clone()).await?;
    let health = HealthChecker::new()
        .with_postgres(infra.postgres_pool())
        .with_redis(infra.redis_connection_manager());

    let mut app = app_builder(infra).await?.merge(health_router(health));

    if let Some(handle) = metrics_handle {
        app = app.route(
            "/metrics",
            get(move || {
                let handle = handle.clone();
                async move { handle.render() }
            }),
        );
    }

    let app = app
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive());

    let addr: SocketAddr = format!("{}:{}", config.server.host, config.server.port).parse()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;

    info!(%addr, "HTTP server starting");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Service stopped");

    Ok(())
}
