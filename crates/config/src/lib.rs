//! xplor-config - 配置加载库
//!
//! 加载顺序：`default.toml` -> `{APP_ENV}.toml` -> `XPLOR_` 前缀环境变量（`__` 分隔层级）

use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use serde::Deserialize;
use thiserror::Error;

use secrecy::Secret;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to load config: {0}")]
    Load(#[from] figment::Error),
}

/// 数据库配置
#[derive(Debug, Clone, Deserialize)]
pub struct DatabaseConfig {
    pub url: Secret<String>,
    #[serde(default = "default_max_connections")]
    pub max_connections: u32,
    /// 获取连接超时（秒）
    #[serde(default = "default_connect_timeout_secs")]
    pub connect_timeout_secs: u64,
}

fn default_max_connections() -> u32 {
    10
}

fn default_connect_timeout_secs() -> u64 {
    30
}

/// Redis 配置
#[derive(Debug, Clone, Deserialize)]
pub struct RedisConfig {
    pub url: Secret<String>,
}

/// JWT 配置（访问令牌与刷新令牌使用不同密钥）
#[derive(Debug, Clone, Deserialize)]
pub struct JwtConfig {
    pub access_secret: Secret<String>,
    #[serde(default = "default_access_expires_in")]
    pub access_expires_in: u64,
    pub refresh_secret: Secret<String>,
    #[serde(default = "default_refresh_expires_in")]
    pub refresh_expires_in: u64,
}

fn default_access_expires_in() -> u64 {
    3600
}

fn default_refresh_expires_in() -> u64 {
    604800
}

/// OTP 配置
#[derive(Debug, Clone, Deserialize)]
pub struct OtpConfig {
    /// 测试环境下固定返回的验证码
    #[serde(default = "default_otp")]
    pub default_otp: String,
    #[serde(default = "default_otp_ttl")]
    pub ttl_secs: u64,
    #[serde(default = "default_otp_ttl")]
    pub send_attempts_ttl_secs: u64,
    #[serde(default = "default_max_login_sends")]
    pub max_login_sends: i64,
    #[serde(default = "default_max_mpin_sends")]
    pub max_mpin_sends: i64,
    #[serde(default = "default_max_verify_attempts")]
    pub max_verify_attempts: i64,
}

fn default_otp() -> String {
    "123456".to_string()
}

fn default_otp_ttl() -> u64 {
    300
}

fn default_max_login_sends() -> i64 {
    5
}

fn default_max_mpin_sends() -> i64 {
    6
}

fn default_max_verify_attempts() -> i64 {
    5
}

impl Default for OtpConfig {
    fn default() -> Self {
        Self {
            default_otp: default_otp(),
            ttl_secs: default_otp_ttl(),
            send_attempts_ttl_secs: default_otp_ttl(),
            max_login_sends: default_max_login_sends(),
            max_mpin_sends: default_max_mpin_sends(),
            max_verify_attempts: default_max_verify_attempts(),
        }
    }
}

/// 关联键加密配置
#[derive(Debug, Clone, Deserialize)]
pub struct CryptoConfig {
    /// 64 位十六进制（32 字节）AES-256 密钥
    pub key: Secret<String>,
}

/// Twilio 短信配置
#[derive(Debug, Clone, Deserialize)]
pub struct TwilioConfig {
    pub account_sid: String,
    pub auth_token: Secret<String>,
    pub sender_phone_number: String,
    #[serde(default = "default_twilio_base_url")]
    pub base_url: String,
}

fn default_twilio_base_url() -> String {
    "https://api.twilio.com".to_string()
}

/// 语言偏好配置
#[derive(Debug, Clone, Deserialize)]
pub struct LanguageConfig {
    /// 区域语言缓存记录被读取超过此次数后失效
    #[serde(default = "default_regional_access_limit")]
    pub regional_access_limit: i32,
}

fn default_regional_access_limit() -> i32 {
    20
}

impl Default for LanguageConfig {
    fn default() -> Self {
        Self {
            regional_access_limit: default_regional_access_limit(),
        }
    }
}

/// 服务器配置
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

/// 遥测配置
#[derive(Debug, Clone, Deserialize)]
pub struct TelemetryConfig {
    #[serde(default = "default_log_level")]
    pub log_level: String,
    #[serde(default)]
    pub metrics_enabled: bool,
}

fn default_log_level() -> String {
    "info".to_string()
}

/// 应用配置
#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    pub app_name: String,
    pub app_env: String,
    pub database: DatabaseConfig,
    pub redis: RedisConfig,
    pub jwt: JwtConfig,
    #[serde(default)]
    pub otp: OtpConfig,
    pub crypto: CryptoConfig,
    pub twilio: TwilioConfig,
    #[serde(default)]
    pub language: LanguageConfig,
    pub server: ServerConfig,
    pub telemetry: TelemetryConfig,
}

impl AppConfig {
    /// 从配置文件和环境变量加载配置
    pub fn load(config_dir: &str) -> Result<Self, ConfigError> {
        let env = std::env::var("APP_ENV").unwrap_or_else(|_| "development".to_string());

        let config: Self = Figment::new()
            .merge(Toml::file(format!("{}/default.toml", config_dir)))
            .merge(Toml::file(format!("{}/{}.toml", config_dir, env)))
            .merge(Serialized::default("app_env", &env))
            .merge(Env::prefixed("XPLOR_").split("__"))
            .extract()?;

        Ok(config)
    }

    /// 是否为生产环境
    pub fn is_production(&self) -> bool {
        self.app_env == "production"
    }

    /// 是否为开发环境
    pub fn is_development(&self) -> bool {
        self.app_env == "development"
    }

    /// 是否为测试环境（OTP 使用固定值且不发送短信）
    pub fn is_test(&self) -> bool {
        self.app_env == "test"
    }
}
