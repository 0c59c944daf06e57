use axum::extract::State;
use xplor_common::ApiResponse;
use xplor_errors::AppResult;

use crate::api::http::AppState;
use crate::api::http::extract::AppJson;
use crate::api::http::middleware::AuthClaims;
use crate::application::dto::{
    CreateUserRequest, KycRequest, PersonaRequest, UpdateUserRequest, UpdateUserRoleRequest,
    UserResponse,
};
use crate::domain::entities::Journey;

pub async fn create_user(
    State(state): State<AppState>,
    AppJson(request): AppJson<CreateUserRequest>,
) -> AppResult<ApiResponse<UserResponse>> {
    let data = state.users.create_user(request).await?;
    Ok(ApiResponse::created(data))
}

pub async fn find_all(
    State(state): State<AppState>,
    _claims: AuthClaims,
) -> AppResult<ApiResponse<Vec<UserResponse>>> {
    let data = state.users.find_all().await?;
    Ok(ApiResponse::ok(data))
}

pub async fn find_current(
    State(state): State<AppState>,
    claims: AuthClaims,
) -> AppResult<ApiResponse<UserResponse>> {
    let data = state.users.find_one(&claims.user_id()).await?;
    Ok(ApiResponse::ok(data))
}

pub async fn update(
    State(state): State<AppState>,
    claims: AuthClaims,
    AppJson(request): AppJson<UpdateUserRequest>,
) -> AppResult<ApiResponse<UserResponse>> {
    let data = state.users.update(&claims.user_id(), request).await?;
    Ok(ApiResponse::ok(data))
}

pub async fn remove(
    State(state): State<AppState>,
    claims: AuthClaims,
) -> AppResult<ApiResponse<UserResponse>> {
    let data = state.users.remove(&claims.user_id()).await?;
    Ok(ApiResponse::ok(data))
}

pub async fn journey(
    State(state): State<AppState>,
    claims: AuthClaims,
) -> AppResult<ApiResponse<Journey>> {
    let data = state.users.journey(&claims.user_id()).await?;
    Ok(ApiResponse::ok(data))
}

pub async fn update_persona(
    State(state): State<AppState>,
    claims: AuthClaims,
    AppJson(request): AppJson<PersonaRequest>,
) -> AppResult<ApiResponse<UserResponse>> {
    let data = state.users.update_persona(&claims.user_id(), request).await?;
    Ok(ApiResponse::ok(data))
}

pub async fn update_kyc(
    State(state): State<AppState>,
    claims: AuthClaims,
    AppJson(request): AppJson<KycRequest>,
) -> AppResult<ApiResponse<UserResponse>> {
    let data = state.users.update_kyc(&claims.user_id(), request).await?;
    Ok(ApiResponse::ok(data))
}

pub async fn update_role(
    State(state): State<AppState>,
    claims: AuthClaims,
    AppJson(request): AppJson<UpdateUserRoleRequest>,
) -> AppResult<ApiResponse<UserResponse>> {
    let data = state.users.update_role(&claims.user_id(), request).await?;
    Ok(ApiResponse::ok(data))
}
