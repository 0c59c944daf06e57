use axum::extract::State;
use xplor_common::{ApiResponse, ResponseMessage};
use xplor_errors::AppResult;

use crate::api::http::AppState;
use crate::api::http::extract::{AppJson, AppQuery};
use crate::api::http::middleware::AuthClaims;
use crate::application::dto::{
    AccessTokenResponse, LogoutResponse, MpinOtpResponse, MpinRequest, MpinVerifiedResponse,
    RefreshTokenRequest, ResendOtpRequest, ResetMpinRequest, SendOtpRequest, SendOtpResponse,
    VerifyOtpQuery, VerifyOtpRequest, VerifyOtpResponse,
};

pub async fn send_otp(
    State(state): State<AppState>,
    AppJson(request): AppJson<SendOtpRequest>,
) -> AppResult<ApiResponse<SendOtpResponse>> {
    let data = state.auth.send_otp(request).await?;
    Ok(ApiResponse::ok(data))
}

pub async fn resend_otp(
    State(state): State<AppState>,
    AppJson(request): AppJson<ResendOtpRequest>,
) -> AppResult<ApiResponse<SendOtpResponse>> {
    let data = state.auth.resend_otp(request).await?;
    Ok(ApiResponse::ok(data))
}

pub async fn verify_otp(
    State(state): State<AppState>,
    AppQuery(query): AppQuery<VerifyOtpQuery>,
    AppJson(request): AppJson<VerifyOtpRequest>,
) -> AppResult<ApiResponse<VerifyOtpResponse>> {
    let data = state.auth.verify_otp(query.otp_type, request).await?;
    let message = match data {
        VerifyOtpResponse::Login(_) => ResponseMessage::LoggedIn,
        VerifyOtpResponse::Mpin(_) => ResponseMessage::VerificationPassed,
    };
    Ok(ApiResponse::with_message(data, message))
}

pub async fn access_token(
    State(state): State<AppState>,
    AppJson(request): AppJson<RefreshTokenRequest>,
) -> AppResult<ApiResponse<AccessTokenResponse>> {
    let data = state.auth.refresh_access_token(request).await?;
    Ok(ApiResponse::ok(data))
}

pub async fn send_mpin_otp(
    State(state): State<AppState>,
    claims: AuthClaims,
) -> AppResult<ApiResponse<MpinOtpResponse>> {
    let data = state.auth.send_mpin_otp(&claims.user_id()).await?;
    Ok(ApiResponse::ok(data))
}

pub async fn create_mpin(
    State(state): State<AppState>,
    claims: AuthClaims,
    AppJson(request): AppJson<MpinRequest>,
) -> AppResult<ApiResponse<()>> {
    state.auth.create_mpin(&claims.user_id(), request).await?;
    Ok(ApiResponse::created(()))
}

pub async fn verify_mpin(
    State(state): State<AppState>,
    claims: AuthClaims,
    AppJson(request): AppJson<MpinRequest>,
) -> AppResult<ApiResponse<MpinVerifiedResponse>> {
    let data = state.auth.verify_mpin(&claims.user_id(), request).await?;
    Ok(ApiResponse::with_message(
        data,
        ResponseMessage::VerificationPassed,
    ))
}

pub async fn reset_mpin(
    State(state): State<AppState>,
    claims: AuthClaims,
    AppJson(request): AppJson<ResetMpinRequest>,
) -> AppResult<ApiResponse<()>> {
    state.auth.reset_mpin(&claims.user_id(), request).await?;
    Ok(ApiResponse::ok(()))
}

pub async fn logout(
    State(state): State<AppState>,
    claims: AuthClaims,
) -> AppResult<ApiResponse<LogoutResponse>> {
    let data = state.auth.logout(&claims.user_id()).await?;
    Ok(ApiResponse::ok(data))
}
