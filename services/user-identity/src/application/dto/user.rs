use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::entities::{Kyc, Persona, Provider, Role, User};

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct KycRequest {
    pub last_name: String,
    pub first_name: String,
    pub address: String,
    pub email: String,
    pub gender: String,
    #[serde(default)]
    pub dob: Option<String>,
    pub provider: Provider,
    #[serde(default)]
    pub wallet_id: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateUserRequest {
    pub phone_number: String,
    #[serde(default)]
    pub verified: Option<bool>,
    #[serde(default)]
    pub kyc_status: Option<bool>,
    #[serde(default)]
    pub role: Option<String>,
    #[serde(default)]
    pub kyc: Option<KycRequest>,
    #[serde(default)]
    pub wallet: Option<String>,
    #[serde(default, rename = "mPin")]
    pub m_pin: Option<String>,
}

/// 部分更新，缺省字段保持不变
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateUserRequest {
    pub phone_number: Option<String>,
    pub verified: Option<bool>,
    pub kyc_status: Option<bool>,
    pub role: Option<String>,
    pub wallet: Option<String>,
    pub language_preference: Option<String>,
    pub domains: Option<Vec<String>>,
    pub categories: Option<Vec<String>>,
    pub country_code: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AttributeRequest {
    pub name: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct PersonaRequest {
    #[serde(default)]
    pub interest: Vec<AttributeRequest>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateUserRoleRequest {
    pub role_id: String,
}

/// 角色字段：列表中为 ID，详情中展开为角色文档
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum UserRole {
    Id(String),
    Embedded(Role),
}

/// 对外的用户视图，不含 MPIN 哈希与刷新令牌
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserResponse {
    pub id: String,
    pub phone_number: String,
    pub verified: bool,
    pub kyc_status: bool,
    pub persona: Option<Persona>,
    pub role: Option<UserRole>,
    pub kyc: Option<Kyc>,
    pub wallet: Option<String>,
    pub language_preference: Option<String>,
    pub domains: Vec<String>,
    pub categories: Vec<String>,
    pub country_code: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl UserResponse {
    pub fn with_role(user: User, role: Option<Role>) -> Self {
        let mut response = Self::from(user);
        if let Some(role) = role {
            response.role = Some(UserRole::Embedded(role));
        }
        response
    }
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        Self {
            id: user.id.0,
            phone_number: user.phone_number,
            verified: user.verified,
            kyc_status: user.kyc_status,
            persona: user.persona,
            role: user.role.map(|r| UserRole::Id(r.0)),
            kyc: user.kyc,
            wallet: user.wallet,
            language_preference: user.language_preference,
            domains: user.domains,
            categories: user.categories,
            country_code: user.country_code,
            created_at: user.timestamps.created_at,
            updated_at: user.timestamps.updated_at,
        }
    }
}
