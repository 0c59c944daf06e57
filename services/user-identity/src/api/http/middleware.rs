//! Bearer 令牌认证

use axum::{
    extract::{FromRequestParts, Request, State},
    http::{header::AUTHORIZATION, request::Parts},
    middleware::Next,
    response::Response,
};
use tracing::{debug, warn};
use xplor_auth_core::Claims;
use xplor_common::UserId;
use xplor_errors::AppError;

use super::AppState;
use crate::error::IdentityError;

/// 已认证请求的 Claims，需在 `auth_middleware` 之后使用
pub struct AuthClaims(pub Claims);

impl AuthClaims {
    pub fn user_id(&self) -> UserId {
        self.0.user_id()
    }
}

impl<S> FromRequestParts<S> for AuthClaims
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<Claims>()
            .cloned()
            .map(AuthClaims)
            .ok_or_else(|| IdentityError::TokenMissing.into())
    }
}

/// 校验访问令牌并将 claims 注入请求扩展
pub async fn auth_middleware(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Result<Response, AppError> {
    let token = request
        .headers()
        .get(AUTHORIZATION)
        .and_then(|h| h.to_str().ok())
        .and_then(|h| h.strip_prefix("Bearer "))
        .map(str::trim)
        .filter(|t| !t.is_empty());

    let Some(token) = token else {
        warn!("Missing bearer token");
        return Err(IdentityError::TokenMissing.into());
    };

    let claims = state.tokens.validate_access_token(token).map_err(|e| {
        warn!(error = %e, "Token validation failed");
        AppError::from(IdentityError::InvalidToken)
    })?;

    debug!(user_id = %claims.sub, "Token validated");
    request.extensions_mut().insert(claims);
    Ok(next.run(request).await)
}
