//! 统一成功响应信封

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;

/// 标准响应消息
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResponseMessage {
    Ok,
    Created,
    LoggedIn,
    VerificationPassed,
    VerificationFailed,
}

impl ResponseMessage {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Ok => "OK",
            Self::Created => "Created",
            Self::LoggedIn => "Logged In Successfully",
            Self::VerificationPassed => "Verification Successful",
            Self::VerificationFailed => "Verification Failed",
        }
    }
}

/// `{ statusCode, message, data }`
#[derive(Debug, Clone, Serialize)]
pub struct ApiResponse<T> {
    #[serde(rename = "statusCode")]
    pub status_code: u16,
    pub message: String,
    pub data: T,
}

impl<T: Serialize> ApiResponse<T> {
    pub fn new(status: StatusCode, message: ResponseMessage, data: T) -> Self {
        Self {
            status_code: status.as_u16(),
            message: message.as_str().to_string(),
            data,
        }
    }

    pub fn ok(data: T) -> Self {
        Self::new(StatusCode::OK, ResponseMessage::Ok, data)
    }

    pub fn created(data: T) -> Self {
        Self::new(StatusCode::CREATED, ResponseMessage::Created, data)
    }

    pub fn with_message(data: T, message: ResponseMessage) -> Self {
        Self::new(StatusCode::OK, message, data)
    }
}

impl<T: Serialize> IntoResponse for ApiResponse<T> {
    fn into_response(self) -> Response {
        let status = StatusCode::from_u16(self.status_code).unwrap_or(StatusCode::OK);
        (status, Json(self)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_envelope_shape() {
        let body = serde_json::to_value(ApiResponse::ok(json!({"key": "+15550001111"}))).unwrap();
        assert_eq!(body["statusCode"], 200);
        assert_eq!(body["message"], "OK");
        assert_eq!(body["data"]["key"], "+15550001111");
    }

    #[tokio::test]
    async fn test_created_status() {
        let response = ApiResponse::created(json!({})).into_response();
        assert_eq!(response.status(), StatusCode::CREATED);
    }
}
