//! Redis 连接管理

use redis::Client;
use redis::aio::ConnectionManager;
use tracing::debug;
use xplor_errors::{AppError, AppResult};

/// 创建 Redis 连接管理器
pub async fn create_connection_manager(url: &str) -> AppResult<ConnectionManager> {
    let client = Client::open(url)
        .map_err(|e| AppError::internal(format!("Failed to create Redis client: {}", e)))?;

    let manager = ConnectionManager::new(client).await.map_err(|e| {
        AppError::internal(format!("Failed to create Redis connection manager: {}", e))
    })?;
    debug!("Redis connection manager ready");
    Ok(manager)
}

/// 检查 Redis 连接
pub async fn check_connection(conn: &ConnectionManager) -> AppResult<()> {
    let mut conn = conn.clone();
    redis::cmd("PING")
        .query_async::<String>(&mut conn)
        .await
        .map_err(|e| AppError::internal(format!("Redis health check failed: {}", e)))?;
    Ok(())
}
