//! 认证服务
//!
//! 手机号 OTP 登录、MPIN 二次认证、访问令牌刷新与登出

use std::sync::Arc;

use chrono::Utc;
use tracing::{info, warn};
use xplor_auth_core::{KeyCipher, TokenService};
use xplor_common::UserId;
use xplor_errors::AppResult;
use xplor_ports::SmsPort;

use crate::application::dto::{
    AccessTokenResponse, LoginResponse, LogoutResponse, MpinOtpResponse, MpinRequest,
    MpinVerifiedResponse, RefreshTokenRequest, ResendOtpRequest, ResetMpinRequest,
    SendOtpRequest, SendOtpResponse, VerifiedMpinKeyResponse, VerifyOtpRequest,
    VerifyOtpResponse,
};
use crate::domain::entities::User;
use crate::domain::repositories::{DevicePreferenceRepository, UserRepository};
use crate::domain::value_objects::{HashedMpin, Mpin, OtpCode, OtpKind, PhoneNumber};
use crate::error::IdentityError;
use crate::infrastructure::cache::OtpStore;
use crate::infrastructure::observability::metrics;

pub const TOKEN_TYPE: &str = "Bearer";
const DEFAULT_LANGUAGE: &str = "en";

/// OTP 下发行为
#[derive(Debug, Clone)]
pub struct AuthSettings {
    /// 测试模式下使用固定验证码、不发短信，并在响应中返回验证码
    pub test_mode: bool,
    pub default_otp: String,
}

pub struct AuthService {
    users: Arc<dyn UserRepository>,
    device_preferences: Arc<dyn DevicePreferenceRepository>,
    otp_store: OtpStore,
    sms: Arc<dyn SmsPort>,
    tokens: Arc<TokenService>,
    cipher: Arc<KeyCipher>,
    settings: AuthSettings,
}

impl AuthService {
    pub fn new(
        users: Arc<dyn UserRepository>,
        device_preferences: Arc<dyn DevicePreferenceRepository>,
        otp_store: OtpStore,
        sms: Arc<dyn SmsPort>,
        tokens: Arc<TokenService>,
        cipher: Arc<KeyCipher>,
        settings: AuthSettings,
    ) -> Self {
        Self {
            users,
            device_preferences,
            otp_store,
            sms,
            tokens,
            cipher,
            settings,
        }
    }

    fn next_otp(&self) -> OtpCode {
        if self.settings.test_mode {
            OtpCode::from_stored(self.settings.default_otp.clone())
        } else {
            OtpCode::generate()
        }
    }

    fn otp_message(otp: &OtpCode) -> String {
        format!(
            "Login otp for your Xplor Account is {}, this message will expire in 5 mins",
            otp.as_str()
        )
    }

    /// 测试模式下返回验证码，其余情况发送短信
    async fn deliver(&self, phone_number: &str, otp: &OtpCode) -> AppResult<Option<String>> {
        if self.settings.test_mode {
            return Ok(Some(otp.as_str().to_string()));
        }
        self.sms
            .send_sms(phone_number, &Self::otp_message(otp))
            .await?;
        Ok(None)
    }

    async fn find_user(&self, id: &UserId) -> AppResult<User> {
        self.users
            .find_by_id(id)
            .await?
            .ok_or_else(|| IdentityError::UserNotFound.into())
    }

    async fn issue_login_otp(&self, phone: &PhoneNumber) -> AppResult<SendOtpResponse> {
        let otp = self.next_otp();
        self.otp_store
            .set_login_otp(phone.as_str(), otp.as_str())
            .await?;
        let otp = self.deliver(phone.as_str(), &otp).await?;
        metrics::record_otp_sent(OtpKind::Login);

        Ok(SendOtpResponse {
            key: phone.as_str().to_string(),
            otp,
        })
    }

    pub async fn send_otp(&self, request: SendOtpRequest) -> AppResult<SendOtpResponse> {
        let phone = PhoneNumber::parse(&request.phone_number)?;

        if request.user_check.unwrap_or(false) {
            let user = self.users.find_by_phone(phone.as_str()).await?;
            if !user.is_some_and(|u| u.has_kyc()) {
                return Err(IdentityError::UserNotFound.into());
            }
        }

        self.issue_login_otp(&phone).await
    }

    /// key 即去除空格后的手机号
    pub async fn resend_otp(&self, request: ResendOtpRequest) -> AppResult<SendOtpResponse> {
        require_key(&request.key)?;
        let phone = PhoneNumber::parse(&request.key)?;
        self.issue_login_otp(&phone).await
    }

    pub async fn send_mpin_otp(&self, user_id: &UserId) -> AppResult<MpinOtpResponse> {
        let user = self.find_user(user_id).await?;
        let mpin_key = self.cipher.encrypt(user.id.as_str())?;

        let otp = self.next_otp();
        self.otp_store
            .set_mpin_otp(&mpin_key, user.id.as_str(), otp.as_str())
            .await?;
        let otp = self.deliver(&user.phone_number, &otp).await?;
        metrics::record_otp_sent(OtpKind::Mpin);

        Ok(MpinOtpResponse { mpin_key, otp })
    }

    pub async fn verify_otp(
        &self,
        kind: OtpKind,
        request: VerifyOtpRequest,
    ) -> AppResult<VerifyOtpResponse> {
        require_key(&request.key)?;
        let otp = OtpCode::parse(&request.otp)?;

        let stored = match kind {
            OtpKind::Login => self.otp_store.take_login_otp(&request.key).await?,
            OtpKind::Mpin => self.otp_store.take_mpin_otp(&request.key).await?,
        }
        .ok_or(IdentityError::InvalidKey)?;

        if stored != otp.as_str() {
            metrics::record_otp_verification(kind, false);
            warn!(kind = %kind, "OTP mismatch");
            return Err(IdentityError::IncorrectOtp.into());
        }

        metrics::record_otp_verification(kind, true);

        // 完成登录或签发已验证 key 之后才作废验证码，失败时可重试
        let key = request.key.clone();
        let response = match kind {
            OtpKind::Login => VerifyOtpResponse::Login(self.complete_login(request).await?),
            OtpKind::Mpin => {
                VerifyOtpResponse::Mpin(self.complete_mpin_verification(&request.key).await?)
            }
        };
        self.otp_store.consume(kind, &key).await?;
        Ok(response)
    }

    async fn complete_login(&self, request: VerifyOtpRequest) -> AppResult<LoginResponse> {
        let phone_number = request.key;
        let mut user = match self.users.find_by_phone(&phone_number).await? {
            Some(user) => user,
            None => {
                let user = User::from_verified_phone(phone_number.clone(), request.country_code);
                self.users.save(&user).await?;
                info!(user_id = %user.id, "User created on first login");
                user
            }
        };

        if let Some(device_id) = request.device_id.as_deref() {
            if let Some(preference) = self.device_preferences.find_by_device_id(device_id).await? {
                user.apply_device_preference(&preference);
            }
        }

        let (access_token, refresh_token) = self.issue_tokens(&mut user)?;
        self.users.update(&user).await?;
        self.otp_store.reset_send_attempts(&phone_number).await?;

        info!(user_id = %user.id, "User logged in");
        Ok(LoginResponse {
            access_token,
            refresh_token,
            token_type: TOKEN_TYPE.to_string(),
            user_id: user.id.0,
        })
    }

    async fn complete_mpin_verification(&self, key: &str) -> AppResult<VerifiedMpinKeyResponse> {
        let user_id = UserId::from_string(self.cipher.decrypt(key)?);
        let user = self.find_user(&user_id).await?;

        let verified_mpin_key = self.cipher.encrypt(user.id.as_str())?;
        self.otp_store
            .set_verified_mpin_key(&verified_mpin_key, user.id.as_str())
            .await?;
        self.otp_store.reset_send_attempts(user.id.as_str()).await?;

        Ok(VerifiedMpinKeyResponse { verified_mpin_key })
    }

    /// 签发访问/刷新令牌并记录到用户上，调用方负责持久化
    fn issue_tokens(&self, user: &mut User) -> AppResult<(String, String)> {
        let language = user
            .language_preference
            .as_deref()
            .unwrap_or(DEFAULT_LANGUAGE);
        let role = user.role.as_ref().map(|r| r.as_str());

        let access = self.tokens.generate_access_token(&user.id, role, language)?;
        let refresh = self.tokens.generate_refresh_token(&user.id, role)?;
        user.record_session(refresh.token.clone(), access.expires_at, refresh.expires_at);

        metrics::record_token_issued("access");
        metrics::record_token_issued("refresh");
        Ok((access.token, refresh.token))
    }

    pub async fn create_mpin(&self, user_id: &UserId, request: MpinRequest) -> AppResult<()> {
        let mpin = Mpin::parse(&request.m_pin)?;
        let mut user = self.find_user(user_id).await?;
        if user.has_mpin() {
            return Err(IdentityError::MpinAlreadyCreated.into());
        }

        user.set_mpin(HashedMpin::from_plain(&mpin)?);
        self.users.update(&user).await?;
        info!(user_id = %user.id, "MPIN created");
        Ok(())
    }

    pub async fn verify_mpin(
        &self,
        user_id: &UserId,
        request: MpinRequest,
    ) -> AppResult<MpinVerifiedResponse> {
        let mpin = Mpin::parse(&request.m_pin)?;
        let user = self.find_user(user_id).await?;
        let hashed = user.mpin.as_ref().ok_or(IdentityError::MpinNotSet)?;

        if !hashed.verify(&mpin)? {
            metrics::record_mpin_verification(false);
            return Err(IdentityError::IncorrectMpin.into());
        }

        metrics::record_mpin_verification(true);
        Ok(MpinVerifiedResponse { verified: true })
    }

    pub async fn reset_mpin(&self, user_id: &UserId, request: ResetMpinRequest) -> AppResult<()> {
        require_key(&request.key)?;
        let mpin = Mpin::parse(&request.m_pin)?;

        let owner = self
            .otp_store
            .get_verified_mpin_key(&request.key)
            .await?
            .ok_or(IdentityError::VerifiedKeyExpired)?;
        if owner != user_id.as_str() {
            return Err(IdentityError::KeyUserMismatch.into());
        }

        let mut user = self.find_user(user_id).await?;
        let current = user.mpin.as_ref().ok_or(IdentityError::MpinNotCreated)?;
        if current.verify(&mpin)? {
            return Err(IdentityError::MpinUnchanged.into());
        }

        user.set_mpin(HashedMpin::from_plain(&mpin)?);
        self.users.update(&user).await?;
        self.otp_store.clear_verified_mpin_key(&request.key).await?;
        info!(user_id = %user.id, "MPIN reset");
        Ok(())
    }

    pub async fn refresh_access_token(
        &self,
        request: RefreshTokenRequest,
    ) -> AppResult<AccessTokenResponse> {
        let claims = self
            .tokens
            .validate_refresh_token(&request.refresh_token)
            .map_err(|_| IdentityError::InvalidRefreshToken)?;

        let mut user = self.find_user(&claims.user_id()).await?;
        if user.refresh_token.as_deref() != Some(request.refresh_token.as_str()) {
            return Err(IdentityError::InvalidRefreshToken.into());
        }
        if !user.refresh_token_valid_at(Utc::now()) {
            return Err(IdentityError::RefreshTokenExpired.into());
        }

        let language = user
            .language_preference
            .as_deref()
            .unwrap_or(DEFAULT_LANGUAGE);
        let role = user.role.as_ref().map(|r| r.as_str());
        let access = self.tokens.generate_access_token(&user.id, role, language)?;

        user.record_access_token(access.expires_at);
        self.users.update(&user).await?;
        metrics::record_token_issued("access");

        Ok(AccessTokenResponse {
            access_token: access.token,
            token_type: TOKEN_TYPE.to_string(),
        })
    }

    pub async fn logout(&self, user_id: &UserId) -> AppResult<LogoutResponse> {
        let mut user = self.find_user(user_id).await?;
        user.invalidate_session();
        self.users.update(&user).await?;
        info!(user_id = %user.id, "User logged out");

        Ok(LogoutResponse { user_id: user.id.0 })
    }
}

fn require_key(key: &str) -> Result<(), IdentityError> {
    if key.trim().is_empty() {
        return Err(IdentityError::MissingKey);
    }
    Ok(())
}
