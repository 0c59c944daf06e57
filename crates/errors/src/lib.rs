//! xplor-errors - 统一错误处理
//!
//! 错误体兼容 RFC 7807 Problem Details，并保留客户端依赖的 `statusCode`/`message` 字段

use axum::Json;
use axum::extract::rejection::{JsonRejection, QueryRejection};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// 应用错误类型
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    #[error("Forbidden: {0}")]
    Forbidden(String),

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Internal error: {0}")]
    Internal(String),

    #[error("Database error: {0}")]
    Database(String),

    #[error("External service error: {0}")]
    ExternalService(String),

    #[error("Resource exhausted: {0}")]
    ResourceExhausted(String),
}

impl AppError {
    pub fn not_found(msg: impl Into<String>) -> Self {
        Self::NotFound(msg.into())
    }

    pub fn bad_request(msg: impl Into<String>) -> Self {
        Self::BadRequest(msg.into())
    }

    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    pub fn unauthorized(msg: impl Into<String>) -> Self {
        Self::Unauthorized(msg.into())
    }

    pub fn forbidden(msg: impl Into<String>) -> Self {
        Self::Forbidden(msg.into())
    }

    pub fn conflict(msg: impl Into<String>) -> Self {
        Self::Conflict(msg.into())
    }

    pub fn internal(msg: impl Into<String>) -> Self {
        Self::Internal(msg.into())
    }

    pub fn database(msg: impl Into<String>) -> Self {
        Self::Database(msg.into())
    }

    pub fn external_service(msg: impl Into<String>) -> Self {
        Self::ExternalService(msg.into())
    }

    pub fn resource_exhausted(msg: impl Into<String>) -> Self {
        Self::ResourceExhausted(msg.into())
    }

    /// 转换为 HTTP 状态码
    pub fn status_code(&self) -> u16 {
        match self {
            Self::NotFound(_) => 404,
            Self::BadRequest(_) | Self::Validation(_) => 400,
            Self::Unauthorized(_) => 401,
            Self::Forbidden(_) => 403,
            Self::Conflict(_) => 409,
            Self::Internal(_) | Self::Database(_) => 500,
            Self::ExternalService(_) => 502,
            Self::ResourceExhausted(_) => 429,
        }
    }

    /// 原始错误信息（不带分类前缀）
    pub fn message(&self) -> &str {
        match self {
            Self::NotFound(m)
            | Self::BadRequest(m)
            | Self::Validation(m)
            | Self::Unauthorized(m)
            | Self::Forbidden(m)
            | Self::Conflict(m)
            | Self::Internal(m)
            | Self::Database(m)
            | Self::ExternalService(m)
            | Self::ResourceExhausted(m) => m,
        }
    }

    /// 是否为服务端错误（细节不返回给客户端）
    pub fn is_server_error(&self) -> bool {
        matches!(self, Self::Internal(_) | Self::Database(_))
    }

    /// 转换为 Problem Details
    pub fn to_problem_details(&self) -> ProblemDetails {
        let message = if self.is_server_error() {
            "Internal Server Error".to_string()
        } else {
            self.message().to_string()
        };

        ProblemDetails {
            r#type: self.problem_type().to_string(),
            title: self.problem_title().to_string(),
            status_code: self.status_code(),
            message,
            instance: None,
        }
    }

    fn problem_type(&self) -> &'static str {
        match self {
            Self::NotFound(_) => "https://api.xplor.io/problems/not-found",
            Self::BadRequest(_) => "https://api.xplor.io/problems/bad-request",
            Self::Validation(_) => "https://api.xplor.io/problems/validation",
            Self::Unauthorized(_) => "https://api.xplor.io/problems/unauthorized",
            Self::Forbidden(_) => "https://api.xplor.io/problems/forbidden",
            Self::Conflict(_) => "https://api.xplor.io/problems/conflict",
            Self::Internal(_) => "https://api.xplor.io/problems/internal",
            Self::Database(_) => "https://api.xplor.io/problems/database",
            Self::ExternalService(_) => "https://api.xplor.io/problems/external-service",
            Self::ResourceExhausted(_) => "https://api.xplor.io/problems/resource-exhausted",
        }
    }

    fn problem_title(&self) -> &'static str {
        match self {
            Self::NotFound(_) => "Not Found",
            Self::BadRequest(_) | Self::Validation(_) => "Bad Request",
            Self::Unauthorized(_) => "Unauthorized",
            Self::Forbidden(_) => "Forbidden",
            Self::Conflict(_) => "Conflict",
            Self::Internal(_) | Self::Database(_) => "Internal Server Error",
            Self::ExternalService(_) => "Bad Gateway",
            Self::ResourceExhausted(_) => "Too Many Requests",
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        if self.is_server_error() {
            tracing::error!(error = %self, "Request failed");
        } else {
            tracing::debug!(error = %self, "Request rejected");
        }

        let status =
            StatusCode::from_u16(self.status_code()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
        (status, Json(self.to_problem_details())).into_response()
    }
}

/// RFC 7807 Problem Details
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProblemDetails {
    pub r#type: String,
    #[serde(rename = "error")]
    pub title: String,
    #[serde(rename = "statusCode")]
    pub status_code: u16,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub instance: Option<String>,
}

/// 请求体解析失败
impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        Self::validation(rejection.body_text())
    }
}

/// 查询参数解析失败
impl From<QueryRejection> for AppError {
    fn from(rejection: QueryRejection) -> Self {
        Self::validation(rejection.body_text())
    }
}

/// Result 类型别名
pub type AppResult<T> = Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_codes() {
        assert_eq!(AppError::not_found("x").status_code(), 404);
        assert_eq!(AppError::bad_request("x").status_code(), 400);
        assert_eq!(AppError::unauthorized("x").status_code(), 401);
        assert_eq!(AppError::forbidden("x").status_code(), 403);
        assert_eq!(AppError::conflict("x").status_code(), 409);
        assert_eq!(AppError::resource_exhausted("x").status_code(), 429);
        assert_eq!(AppError::database("x").status_code(), 500);
    }

    #[test]
    fn test_problem_details_hides_server_errors() {
        let details = AppError::database("connection refused on 10.0.0.3").to_problem_details();
        assert_eq!(details.message, "Internal Server Error");

        let details = AppError::forbidden("MPIN already created").to_problem_details();
        assert_eq!(details.message, "MPIN already created");
        assert_eq!(details.title, "Forbidden");
    }

    #[tokio::test]
    async fn test_into_response_body() {
        let response = AppError::unauthorized("Invalid Token").into_response();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let body: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(body["statusCode"], 401);
        assert_eq!(body["message"], "Invalid Token");
        assert_eq!(body["error"], "Unauthorized");
    }

    #[derive(Debug, Deserialize)]
    struct Named {
        #[allow(dead_code)]
        name: String,
    }

    #[tokio::test]
    async fn test_json_rejection_maps_to_validation() {
        use axum::body::Body;
        use axum::extract::FromRequest;
        use axum::http::Request;

        let request = Request::builder()
            .method("POST")
            .header("content-type", "application/json")
            .body(Body::from("{}"))
            .unwrap();
        let rejection = Json::<Named>::from_request(request, &()).await.unwrap_err();

        let err = AppError::from(rejection);
        assert!(matches!(err, AppError::Validation(_)));
        assert_eq!(err.status_code(), 400);
        assert!(err.message().contains("name"));
    }

    #[tokio::test]
    async fn test_query_rejection_maps_to_validation() {
        use axum::extract::{FromRequestParts, Query};
        use axum::http::Request;

        let (mut parts, _) = Request::builder()
            .uri("/items?other=1")
            .body(())
            .unwrap()
            .into_parts();
        let rejection = Query::<Named>::from_request_parts(&mut parts, &())
            .await
            .unwrap_err();

        let err = AppError::from(rejection);
        assert!(matches!(err, AppError::Validation(_)));
        assert_eq!(err.status_code(), 400);
    }
}
