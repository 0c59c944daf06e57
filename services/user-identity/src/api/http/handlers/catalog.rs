use axum::extract::State;
use xplor_common::ApiResponse;
use xplor_errors::AppResult;

use crate::api::http::AppState;
use crate::api::http::extract::AppJson;
use crate::application::dto::{CreateCategoryRequest, CreateDomainRequest};
use crate::domain::entities::{Category, Domain};

pub async fn create_domain(
    State(state): State<AppState>,
    AppJson(request): AppJson<CreateDomainRequest>,
) -> AppResult<ApiResponse<Domain>> {
    let data = state.catalog.create_domain(request).await?;
    Ok(ApiResponse::created(data))
}

pub async fn list_domains(State(state): State<AppState>) -> AppResult<ApiResponse<Vec<Domain>>> {
    let data = state.catalog.list_domains().await?;
    Ok(ApiResponse::ok(data))
}

pub async fn create_category(
    State(state): State<AppState>,
    AppJson(request): AppJson<CreateCategoryRequest>,
) -> AppResult<ApiResponse<Category>> {
    let data = state.catalog.create_category(request).await?;
    Ok(ApiResponse::created(data))
}

pub async fn list_categories(
    State(state): State<AppState>,
) -> AppResult<ApiResponse<Vec<Category>>> {
    let data = state.catalog.list_categories().await?;
    Ok(ApiResponse::ok(data))
}
