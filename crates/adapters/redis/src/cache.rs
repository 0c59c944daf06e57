//! Redis Cache 实现

use async_trait::async_trait;
use redis::aio::ConnectionManager;
use redis::{AsyncCommands, RedisError, Script};
use std::time::Duration;
use xplor_errors::{AppError, AppResult};
use xplor_ports::CachePort;

/// INCR，首次创建时附带 EXPIRE
const INCR_WITH_TTL: &str = r"
local current = redis.call('INCR', KEYS[1])
if current == 1 then
    redis.call('EXPIRE', KEYS[1], ARGV[1])
end
return current
";

fn redis_err(op: &'static str) -> impl FnOnce(RedisError) -> AppError {
    move |e| AppError::internal(format!("Redis {} failed: {}", op, e))
}

/// Redis Cache
#[derive(Clone)]
pub struct RedisCache {
    conn: ConnectionManager,
}

impl RedisCache {
    pub fn new(conn: ConnectionManager) -> Self {
        Self { conn }
    }

    pub fn connection(&self) -> &ConnectionManager {
        &self.conn
    }
}

#[async_trait]
impl CachePort for RedisCache {
    async fn get(&self, key: &str) -> AppResult<Option<String>> {
        let mut conn = self.conn.clone();
        conn.get(key).await.map_err(redis_err("get"))
    }

    async fn set(&self, key: &str, value: &str, ttl: Option<Duration>) -> AppResult<()> {
        let mut conn = self.conn.clone();
        match ttl {
            Some(duration) => conn
                .set_ex(key, value, duration.as_secs())
                .await
                .map_err(redis_err("set")),
            None => conn.set(key, value).await.map_err(redis_err("set")),
        }
    }

    async fn delete(&self, key: &str) -> AppResult<()> {
        let mut conn = self.conn.clone();
        conn.del(key).await.map_err(redis_err("delete"))
    }

    async fn get_int(&self, key: &str) -> AppResult<Option<i64>> {
        let mut conn = self.conn.clone();
        conn.get(key).await.map_err(redis_err("get_int"))
    }

    async fn incr_with_ttl(&self, key: &str, ttl: Duration) -> AppResult<i64> {
        let mut conn = self.conn.clone();
        Script::new(INCR_WITH_TTL)
            .key(key)
            .arg(ttl.as_secs())
            .invoke_async(&mut conn)
            .await
            .map_err(redis_err("incr_with_ttl"))
    }
}
