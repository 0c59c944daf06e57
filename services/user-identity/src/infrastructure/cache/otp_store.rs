//! OTP 缓存
//!
//! 验证码、校验次数、发送次数与已验证 MPIN key 都存放在缓存中，按 key 前缀区分

use std::sync::Arc;
use std::time::Duration;

use tracing::{debug, warn};
use xplor_config::OtpConfig;
use xplor_errors::AppResult;
use xplor_ports::CachePort;

use crate::domain::value_objects::OtpKind;
use crate::error::IdentityError;

const LOGIN_OTP_PREFIX: &str = "otpLogin:";
const MPIN_OTP_PREFIX: &str = "otpMpin:";
const ATTEMPTS_PREFIX: &str = "attempts:";
const SEND_ATTEMPTS_PREFIX: &str = "sendAttempts:";
const VERIFIED_MPIN_KEY_PREFIX: &str = "verifiedMpinKey:";

#[derive(Clone)]
pub struct OtpStore {
    cache: Arc<dyn CachePort>,
    config: OtpConfig,
}

impl OtpStore {
    pub fn new(cache: Arc<dyn CachePort>, config: OtpConfig) -> Self {
        Self { cache, config }
    }

    fn otp_key(kind: OtpKind, key: &str) -> String {
        match kind {
            OtpKind::Login => format!("{}{}", LOGIN_OTP_PREFIX, key),
            OtpKind::Mpin => format!("{}{}", MPIN_OTP_PREFIX, key),
        }
    }

    fn attempts_key(key: &str) -> String {
        format!("{}{}", ATTEMPTS_PREFIX, key)
    }

    fn send_attempts_key(key: &str) -> String {
        format!("{}{}", SEND_ATTEMPTS_PREFIX, key)
    }

    fn verified_mpin_key(key: &str) -> String {
        format!("{}{}", VERIFIED_MPIN_KEY_PREFIX, key)
    }

    fn otp_ttl(&self) -> Duration {
        Duration::from_secs(self.config.ttl_secs)
    }

    fn send_ttl(&self) -> Duration {
        Duration::from_secs(self.config.send_attempts_ttl_secs)
    }

    async fn store(
        &self,
        kind: OtpKind,
        key: &str,
        send_key: &str,
        otp: &str,
        max_sends: i64,
    ) -> AppResult<()> {
        let send_attempts_key = Self::send_attempts_key(send_key);
        let sends = self.cache.get_int(&send_attempts_key).await?.unwrap_or(0);
        if sends >= max_sends {
            warn!(kind = %kind, sends, "OTP send limit reached");
            return Err(IdentityError::AttemptsExhausted.into());
        }

        let ttl = self.otp_ttl();
        self.cache
            .set(&Self::otp_key(kind, key), otp, Some(ttl))
            .await?;
        self.cache
            .set(&Self::attempts_key(key), "0", Some(ttl))
            .await?;
        let sends = self
            .cache
            .incr_with_ttl(&send_attempts_key, self.send_ttl())
            .await?;

        debug!(kind = %kind, sends, "OTP stored");
        Ok(())
    }

    /// 保存登录 OTP，发送次数按手机号计
    pub async fn set_login_otp(&self, key: &str, otp: &str) -> AppResult<()> {
        self.store(OtpKind::Login, key, key, otp, self.config.max_login_sends)
            .await
    }

    /// 保存 MPIN OTP，发送次数按 `send_key`（用户 ID）计
    pub async fn set_mpin_otp(&self, key: &str, send_key: &str, otp: &str) -> AppResult<()> {
        self.store(OtpKind::Mpin, key, send_key, otp, self.config.max_mpin_sends)
            .await
    }

    async fn take(&self, kind: OtpKind, key: &str) -> AppResult<Option<String>> {
        let attempts_key = Self::attempts_key(key);
        let attempts = self.cache.get_int(&attempts_key).await?.unwrap_or(0);
        if attempts >= self.config.max_verify_attempts {
            warn!(kind = %kind, attempts, "OTP verify limit reached");
            return Err(IdentityError::AttemptsExhausted.into());
        }

        let otp = self.cache.get(&Self::otp_key(kind, key)).await?;
        if otp.is_some() {
            self.cache
                .incr_with_ttl(&attempts_key, self.otp_ttl())
                .await?;
        }
        Ok(otp)
    }

    /// 取出登录 OTP 并计一次校验
    pub async fn take_login_otp(&self, key: &str) -> AppResult<Option<String>> {
        self.take(OtpKind::Login, key).await
    }

    pub async fn take_mpin_otp(&self, key: &str) -> AppResult<Option<String>> {
        self.take(OtpKind::Mpin, key).await
    }

    /// 校验成功后删除 OTP 与校验次数
    pub async fn consume(&self, kind: OtpKind, key: &str) -> AppResult<()> {
        self.cache.delete(&Self::otp_key(kind, key)).await?;
        self.cache.delete(&Self::attempts_key(key)).await
    }

    pub async fn reset_send_attempts(&self, key: &str) -> AppResult<()> {
        self.cache.delete(&Self::send_attempts_key(key)).await
    }

    pub async fn set_verified_mpin_key(&self, key: &str, user_id: &str) -> AppResult<()> {
        self.cache
            .set(&Self::verified_mpin_key(key), user_id, Some(self.otp_ttl()))
            .await
    }

    pub async fn get_verified_mpin_key(&self, key: &str) -> AppResult<Option<String>> {
        self.cache.get(&Self::verified_mpin_key(key)).await
    }

    pub async fn clear_verified_mpin_key(&self, key: &str) -> AppResult<()> {
        self.cache.delete(&Self::verified_mpin_key(key)).await
    }
}
