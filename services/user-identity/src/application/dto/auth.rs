use serde::{Deserialize, Serialize};

use crate::domain::value_objects::OtpKind;

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SendOtpRequest {
    /// 缺省为空串，由手机号校验给出错误信息
    #[serde(default)]
    pub phone_number: String,
    /// 为 true 时要求用户已存在且完成 KYC
    #[serde(default)]
    pub user_check: Option<bool>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ResendOtpRequest {
    #[serde(default)]
    pub key: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SendOtpResponse {
    pub key: String,
    /// 仅测试环境返回
    #[serde(skip_serializing_if = "Option::is_none")]
    pub otp: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MpinOtpResponse {
    pub mpin_key: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub otp: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VerifyOtpQuery {
    pub otp_type: OtpKind,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VerifyOtpRequest {
    #[serde(default)]
    pub key: String,
    #[serde(default)]
    pub otp: String,
    #[serde(default)]
    pub device_id: Option<String>,
    #[serde(default)]
    pub country_code: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginResponse {
    pub access_token: String,
    pub refresh_token: String,
    pub token_type: String,
    pub user_id: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct VerifiedMpinKeyResponse {
    pub verified_mpin_key: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum VerifyOtpResponse {
    Login(LoginResponse),
    Mpin(VerifiedMpinKeyResponse),
}

#[derive(Debug, Clone, Deserialize)]
pub struct MpinRequest {
    #[serde(default, rename = "mPin")]
    pub m_pin: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ResetMpinRequest {
    #[serde(default)]
    pub key: String,
    #[serde(default, rename = "mPin")]
    pub m_pin: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct MpinVerifiedResponse {
    pub verified: bool,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RefreshTokenRequest {
    pub refresh_token: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AccessTokenResponse {
    pub access_token: String,
    pub token_type: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LogoutResponse {
    pub user_id: String,
}
