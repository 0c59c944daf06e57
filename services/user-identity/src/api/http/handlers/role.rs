use axum::extract::{Path, State};
use xplor_common::{ApiResponse, RoleId};
use xplor_errors::AppResult;

use crate::api::http::AppState;
use crate::api::http::extract::AppJson;
use crate::application::dto::{CreateRoleRequest, UpdateRoleRequest};
use crate::domain::entities::Role;

pub async fn create(
    State(state): State<AppState>,
    AppJson(request): AppJson<CreateRoleRequest>,
) -> AppResult<ApiResponse<Role>> {
    let data = state.roles.create(request).await?;
    Ok(ApiResponse::created(data))
}

pub async fn find_all(State(state): State<AppState>) -> AppResult<ApiResponse<Vec<Role>>> {
    let data = state.roles.find_all().await?;
    Ok(ApiResponse::ok(data))
}

pub async fn find_one(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<ApiResponse<Role>> {
    let data = state.roles.find_one(&RoleId::from_string(id)).await?;
    Ok(ApiResponse::ok(data))
}

pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<String>,
    AppJson(request): AppJson<UpdateRoleRequest>,
) -> AppResult<ApiResponse<Role>> {
    let data = state.roles.update(&RoleId::from_string(id), request).await?;
    Ok(ApiResponse::ok(data))
}

pub async fn remove(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<ApiResponse<Role>> {
    let data = state.roles.remove(&RoleId::from_string(id)).await?;
    Ok(ApiResponse::ok(data))
}
