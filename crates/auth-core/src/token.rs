//! JWT 签发与校验

use chrono::{DateTime, Duration, Utc};
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use xplor_common::UserId;
use xplor_errors::{AppError, AppResult};

/// 令牌类型
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TokenKind {
    Access,
    Refresh,
}

impl TokenKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Access => "access",
            Self::Refresh => "refresh",
        }
    }
}

/// JWT Claims
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    /// Subject (user ID)
    pub sub: String,
    /// 角色 ID（未分配时为空）
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,
    /// 仅访问令牌携带
    #[serde(
        rename = "languageCode",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub language_code: Option<String>,
    pub token_type: TokenKind,
    /// Expiration time
    pub exp: i64,
    /// Issued at
    pub iat: i64,
    /// JWT ID
    pub jti: String,
    /// Issuer
    #[serde(default)]
    pub iss: String,
}

impl Claims {
    fn new(
        user_id: &UserId,
        role: Option<&str>,
        language_code: Option<&str>,
        kind: TokenKind,
        issued_at: DateTime<Utc>,
        expires_at: DateTime<Utc>,
        issuer: &str,
    ) -> Self {
        Self {
            sub: user_id.to_string(),
            role: role.map(str::to_string),
            language_code: language_code.map(str::to_string),
            token_type: kind,
            exp: expires_at.timestamp(),
            iat: issued_at.timestamp(),
            jti: Uuid::now_v7().to_string(),
            iss: issuer.to_string(),
        }
    }

    pub fn user_id(&self) -> UserId {
        UserId::from_string(self.sub.clone())
    }
}

/// 已签发的令牌及其过期时间
#[derive(Debug, Clone)]
pub struct IssuedToken {
    pub token: String,
    pub expires_at: DateTime<Utc>,
}

#[derive(Clone)]
struct SigningKeys {
    encoding: EncodingKey,
    decoding: DecodingKey,
    expires_in: i64,
}

impl SigningKeys {
    fn from_secret(secret: &str, expires_in: i64) -> Self {
        Self {
            encoding: EncodingKey::from_secret(secret.as_bytes()),
            decoding: DecodingKey::from_secret(secret.as_bytes()),
            expires_in,
        }
    }
}

/// Token 服务
#[derive(Clone)]
pub struct TokenService {
    access: SigningKeys,
    refresh: SigningKeys,
    issuer: String,
}

impl TokenService {
    pub fn new(
        access_secret: &str,
        refresh_secret: &str,
        access_token_expires_in: i64,
        refresh_token_expires_in: i64,
        issuer: impl Into<String>,
    ) -> Self {
        Self {
            access: SigningKeys::from_secret(access_secret, access_token_expires_in),
            refresh: SigningKeys::from_secret(refresh_secret, refresh_token_expires_in),
            issuer: issuer.into(),
        }
    }

    fn keys(&self, kind: TokenKind) -> &SigningKeys {
        match kind {
            TokenKind::Access => &self.access,
            TokenKind::Refresh => &self.refresh,
        }
    }

    fn sign(
        &self,
        kind: TokenKind,
        user_id: &UserId,
        role: Option<&str>,
        language_code: Option<&str>,
    ) -> AppResult<IssuedToken> {
        let keys = self.keys(kind);
        let now = Utc::now();
        let expires_at = now + Duration::seconds(keys.expires_in);
        let claims = Claims::new(
            user_id,
            role,
            language_code,
            kind,
            now,
            expires_at,
            &self.issuer,
        );

        let token = encode(&Header::default(), &claims, &keys.encoding).map_err(|e| {
            AppError::internal(format!("Failed to generate {} token: {}", kind.as_str(), e))
        })?;

        Ok(IssuedToken { token, expires_at })
    }

    /// 生成访问令牌
    pub fn generate_access_token(
        &self,
        user_id: &UserId,
        role: Option<&str>,
        language_code: &str,
    ) -> AppResult<IssuedToken> {
        self.sign(TokenKind::Access, user_id, role, Some(language_code))
    }

    /// 生成刷新令牌
    pub fn generate_refresh_token(
        &self,
        user_id: &UserId,
        role: Option<&str>,
    ) -> AppResult<IssuedToken> {
        self.sign(TokenKind::Refresh, user_id, role, None)
    }

    fn validate(&self, token: &str, kind: TokenKind) -> AppResult<Claims> {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.set_issuer(&[&self.issuer]);
        validation.validate_exp = true;
        validation.validate_nbf = false;
        validation.leeway = 0;

        let token_data = decode::<Claims>(token, &self.keys(kind).decoding, &validation)
            .map_err(|e| AppError::unauthorized(format!("Invalid token: {}", e)))?;

        let claims = token_data.claims;

        if claims.token_type != kind {
            return Err(AppError::unauthorized(format!(
                "Token type mismatch, expected {}",
                kind.as_str()
            )));
        }

        if claims.jti.is_empty() {
            return Err(AppError::unauthorized("Token ID (jti) missing"));
        }

        Ok(claims)
    }

    /// 验证访问令牌
    pub fn validate_access_token(&self, token: &str) -> AppResult<Claims> {
        self.validate(token, TokenKind::Access)
    }

    /// 验证刷新令牌
    pub fn validate_refresh_token(&self, token: &str) -> AppResult<Claims> {
        self.validate(token, TokenKind::Refresh)
    }

    /// 获取访问令牌过期时间（秒）
    pub fn access_token_expires_in(&self) -> i64 {
        self.access.expires_in
    }

    /// 获取刷新令牌过期时间（秒）
    pub fn refresh_token_expires_in(&self) -> i64 {
        self.refresh.expires_in
    }
}
