//! Cache trait 定义

use async_trait::async_trait;
use std::time::Duration;
use xplor_errors::AppResult;

/// 缓存 trait
#[async_trait]
pub trait CachePort: Send + Sync {
    /// 获取缓存值
    async fn get(&self, key: &str) -> AppResult<Option<String>>;

    /// 设置缓存值
    async fn set(&self, key: &str, value: &str, ttl: Option<Duration>) -> AppResult<()>;

    /// 删除缓存
    async fn delete(&self, key: &str) -> AppResult<()>;

    /// 获取整数值，键不存在时返回 None
    async fn get_int(&self, key: &str) -> AppResult<Option<i64>>;

    /// 原子递增；键首次创建时设置 TTL，返回递增后的值
    async fn incr_with_ttl(&self, key: &str, ttl: Duration) -> AppResult<i64>;
}
