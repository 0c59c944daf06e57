use axum::extract::State;
use xplor_common::ApiResponse;
use xplor_errors::AppResult;

use crate::api::http::AppState;
use crate::api::http::extract::{AppJson, AppQuery};
use crate::application::dto::{
    DeviceIdQuery, LanguagePreferenceRequest, RegionLanguageRequest, RegionQuery,
};
use crate::domain::entities::{LanguagePreference, RegionLanguage};

pub async fn create(
    State(state): State<AppState>,
    AppJson(request): AppJson<LanguagePreferenceRequest>,
) -> AppResult<ApiResponse<LanguagePreference>> {
    let data = state.languages.create(request).await?;
    Ok(ApiResponse::created(data))
}

pub async fn get(
    State(state): State<AppState>,
    AppQuery(query): AppQuery<DeviceIdQuery>,
) -> AppResult<ApiResponse<LanguagePreference>> {
    let data = state.languages.get(&query.device_id).await?;
    Ok(ApiResponse::ok(data))
}

pub async fn delete(
    State(state): State<AppState>,
    AppQuery(query): AppQuery<DeviceIdQuery>,
) -> AppResult<ApiResponse<LanguagePreference>> {
    let data = state.languages.delete(&query.device_id).await?;
    Ok(ApiResponse::ok(data))
}

pub async fn create_region(
    State(state): State<AppState>,
    AppJson(request): AppJson<RegionLanguageRequest>,
) -> AppResult<ApiResponse<RegionLanguage>> {
    let data = state.languages.create_region_languages(request).await?;
    Ok(ApiResponse::created(data))
}

pub async fn find_region(
    State(state): State<AppState>,
    AppQuery(query): AppQuery<RegionQuery>,
) -> AppResult<ApiResponse<Vec<RegionLanguage>>> {
    let data = state.languages.find_region_languages(&query.region).await?;
    Ok(ApiResponse::ok(data))
}
