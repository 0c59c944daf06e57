//! 基础设施资源管理

use std::sync::Arc;
use std::time::Duration;

use redis::aio::ConnectionManager;
use secrecy::ExposeSecret;
use sqlx::PgPool;
use tracing::info;
use xplor_adapter_postgres::{PostgresConfig, create_pool};
use xplor_adapter_redis::{RedisCache, create_connection_manager};
use xplor_auth_core::{KeyCipher, TokenService};
use xplor_config::AppConfig;
use xplor_errors::AppResult;

use crate::retry::{RetryConfig, with_retry};

const TOKEN_ISSUER: &str = "xplor-user-identity";

/// 基础设施资源容器
#[derive(Clone)]
pub struct Infrastructure {
    config: AppConfig,
    postgres_pool: PgPool,
    redis_conn: ConnectionManager,
    token_service: Arc<TokenService>,
    key_cipher: Arc<KeyCipher>,
}

impl Infrastructure {
    /// 从配置创建基础设施资源（带重试）
    pub async fn from_config(config: AppConfig) -> AppResult<Self> {
        let retry_config = RetryConfig::default();

        let pg_config = PostgresConfig::new(config.database.url.expose_secret())
            .with_max_connections(config.database.max_connections)
            .with_connect_timeout(Duration::from_secs(config.database.connect_timeout_secs));
        let postgres_pool = with_retry(&retry_config, "PostgreSQL connection", || {
            let cfg = pg_config.clone();
            async move { create_pool(&cfg).await }
        })
        .await?;
        info!(
            max_connections = config.database.max_connections,
            "PostgreSQL connection pool created"
        );

        let redis_url = config.redis.url.clone();
        let redis_conn = with_retry(&retry_config, "Redis connection", || {
            let url = redis_url.expose_secret().clone();
            async move { create_connection_manager(&url).await }
        })
        .await?;
        info!("Redis connection created");

        let token_service = Arc::new(TokenService::new(
            config.jwt.access_secret.expose_secret(),
            config.jwt.refresh_secret.expose_secret(),
            config.jwt.access_expires_in as i64,
            config.jwt.refresh_expires_in as i64,
            TOKEN_ISSUER,
        ));

        let key_cipher = Arc::new(KeyCipher::from_hex_key(config.crypto.key.expose_secret())?);

        Ok(Self {
            config,
            postgres_pool,
            redis_conn,
            token_service,
            key_cipher,
        })
    }

    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    pub fn postgres_pool(&self) -> PgPool {
        self.postgres_pool.clone()
    }

    pub fn redis_connection_manager(&self) -> ConnectionManager {
        self.redis_conn.clone()
    }

    pub fn redis_cache(&self) -> RedisCache {
        RedisCache::new(self.redis_conn.clone())
    }

    pub fn token_service(&self) -> Arc<TokenService> {
        self.token_service.clone()
    }

    pub fn key_cipher(&self) -> Arc<KeyCipher> {
        self.key_cipher.clone()
    }
}
