use axum::extract::{Path, State};
use xplor_common::ApiResponse;
use xplor_errors::AppResult;

use crate::api::http::AppState;
use crate::api::http::extract::AppJson;
use crate::application::dto::{DevicePreferenceRequest, DevicePreferenceResponse};
use crate::domain::entities::DevicePreference;

pub async fn create(
    State(state): State<AppState>,
    AppJson(request): AppJson<DevicePreferenceRequest>,
) -> AppResult<ApiResponse<DevicePreference>> {
    let data = state.device_preferences.create(request).await?;
    Ok(ApiResponse::created(data))
}

pub async fn update(
    State(state): State<AppState>,
    AppJson(request): AppJson<DevicePreferenceRequest>,
) -> AppResult<ApiResponse<DevicePreference>> {
    let data = state.device_preferences.update(request).await?;
    Ok(ApiResponse::ok(data))
}

pub async fn get(
    State(state): State<AppState>,
    Path(device_id): Path<String>,
) -> AppResult<ApiResponse<DevicePreferenceResponse>> {
    let data = state.device_preferences.get(&device_id).await?;
    Ok(ApiResponse::ok(data))
}

pub async fn delete(
    State(state): State<AppState>,
    Path(device_id): Path<String>,
) -> AppResult<ApiResponse<DevicePreference>> {
    let data = state.device_preferences.delete(&device_id).await?;
    Ok(ApiResponse::ok(data))
}
