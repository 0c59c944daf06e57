//! 用户实体

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use xplor_common::{RoleId, Timestamps, UserId, prefixed_id};

use super::DevicePreference;
use crate::domain::value_objects::HashedMpin;

/// 兴趣属性
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Attribute {
    pub id: String,
    pub name: String,
    #[serde(flatten)]
    pub timestamps: Timestamps,
}

impl Attribute {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: prefixed_id("attr"),
            name: name.into(),
            timestamps: Timestamps::now(),
        }
    }
}

/// 用户画像
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Persona {
    pub id: String,
    #[serde(default)]
    pub interest: Vec<Attribute>,
    #[serde(flatten)]
    pub timestamps: Timestamps,
}

impl Persona {
    pub fn new() -> Self {
        Self {
            id: prefixed_id("pers"),
            interest: Vec::new(),
            timestamps: Timestamps::now(),
        }
    }
}

impl Default for Persona {
    fn default() -> Self {
        Self::new()
    }
}

/// KYC 提供方
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Provider {
    pub id: String,
    pub name: String,
}

/// KYC 信息
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Kyc {
    pub id: String,
    pub last_name: String,
    pub first_name: String,
    pub address: String,
    pub email: String,
    pub gender: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dob: Option<String>,
    pub provider: Provider,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub wallet_id: Option<String>,
    #[serde(flatten)]
    pub timestamps: Timestamps,
}

/// 用户引导进度
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Journey {
    pub kyc_verified: bool,
    pub role_assigned: bool,
    pub m_pin_created: bool,
}

/// 用户实体
#[derive(Debug, Clone)]
pub struct User {
    pub id: UserId,
    pub phone_number: String,
    pub verified: bool,
    pub kyc_status: bool,
    pub persona: Option<Persona>,
    pub role: Option<RoleId>,
    pub kyc: Option<Kyc>,
    pub wallet: Option<String>,
    pub mpin: Option<HashedMpin>,
    pub language_preference: Option<String>,
    pub domains: Vec<String>,
    pub categories: Vec<String>,
    pub country_code: Option<String>,
    pub refresh_token: Option<String>,
    pub access_token_expiry: Option<DateTime<Utc>>,
    pub refresh_token_expiry: Option<DateTime<Utc>>,
    pub timestamps: Timestamps,
}

impl User {
    pub fn new(phone_number: impl Into<String>) -> Self {
        Self {
            id: UserId::new(),
            phone_number: phone_number.into(),
            verified: false,
            kyc_status: false,
            persona: None,
            role: None,
            kyc: None,
            wallet: None,
            mpin: None,
            language_preference: None,
            domains: Vec::new(),
            categories: Vec::new(),
            country_code: None,
            refresh_token: None,
            access_token_expiry: None,
            refresh_token_expiry: None,
            timestamps: Timestamps::now(),
        }
    }

    /// OTP 登录成功后创建，手机号已验证
    pub fn from_verified_phone(phone_number: impl Into<String>, country_code: Option<String>) -> Self {
        let mut user = Self::new(phone_number);
        user.verified = true;
        user.country_code = country_code;
        user
    }

    pub fn has_mpin(&self) -> bool {
        self.mpin.is_some()
    }

    pub fn has_kyc(&self) -> bool {
        self.kyc.is_some()
    }

    pub fn journey(&self) -> Journey {
        Journey {
            kyc_verified: self.has_kyc(),
            role_assigned: self.role.is_some(),
            m_pin_created: self.has_mpin(),
        }
    }

    /// 未登录前在设备上选择的偏好带入用户
    pub fn apply_device_preference(&mut self, preference: &DevicePreference) {
        if let Some(code) = &preference.language_code {
            self.language_preference = Some(code.clone());
        }
        self.domains = preference.domains.clone();
        self.categories = preference.categories.clone();
        if let Some(role_id) = &preference.role_id {
            self.role = Some(RoleId::from_string(role_id.clone()));
        }
        self.timestamps.touch();
    }

    pub fn set_mpin(&mut self, mpin: HashedMpin) {
        self.mpin = Some(mpin);
        self.timestamps.touch();
    }

    pub fn set_role(&mut self, role_id: RoleId) {
        self.role = Some(role_id);
        self.timestamps.touch();
    }

    pub fn set_kyc(&mut self, kyc: Kyc) {
        self.wallet = kyc.wallet_id.clone();
        self.kyc = Some(kyc);
        self.kyc_status = true;
        self.timestamps.touch();
    }

    /// 追加兴趣；空列表不改变画像
    pub fn add_interests<I>(&mut self, names: I)
    where
        I: IntoIterator<Item = String>,
    {
        let mut names = names.into_iter().peekable();
        if names.peek().is_none() {
            return;
        }
        let persona = self.persona.get_or_insert_with(Persona::new);
        persona.interest.extend(names.map(Attribute::new));
        persona.timestamps.touch();
        self.timestamps.touch();
    }

    /// 记录新签发的令牌对
    pub fn record_session(
        &mut self,
        refresh_token: String,
        access_token_expiry: DateTime<Utc>,
        refresh_token_expiry: DateTime<Utc>,
    ) {
        self.refresh_token = Some(refresh_token);
        self.access_token_expiry = Some(access_token_expiry);
        self.refresh_token_expiry = Some(refresh_token_expiry);
        self.timestamps.touch();
    }

    pub fn record_access_token(&mut self, access_token_expiry: DateTime<Utc>) {
        self.access_token_expiry = Some(access_token_expiry);
        self.timestamps.touch();
    }

    /// 刷新令牌过期时间置为 Unix 纪元
    pub fn invalidate_session(&mut self) {
        self.refresh_token_expiry = Some(DateTime::<Utc>::UNIX_EPOCH);
        self.timestamps.touch();
    }

    pub fn refresh_token_valid_at(&self, now: DateTime<Utc>) -> bool {
        self.refresh_token_expiry.is_some_and(|expiry| expiry > now)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kyc() -> Kyc {
        Kyc {
            id: prefixed_id("kyc"),
            last_name: "Doe".to_string(),
            first_name: "Jane".to_string(),
            address: "1 Main St".to_string(),
            email: "jane@example.com".to_string(),
            gender: "female".to_string(),
            dob: None,
            provider: Provider {
                id: "prov_1".to_string(),
                name: "DigiLocker".to_string(),
            },
            wallet_id: Some("wallet_1".to_string()),
            timestamps: Timestamps::now(),
        }
    }

    #[test]
    fn test_new_user_from_phone() {
        let user = User::from_verified_phone("+919876543210", Some("+91".to_string()));
        assert!(user.verified);
        assert!(user.id.as_str().starts_with("user_"));
        assert_eq!(user.country_code.as_deref(), Some("+91"));
        assert_eq!(
            user.journey(),
            Journey {
                kyc_verified: false,
                role_assigned: false,
                m_pin_created: false
            }
        );
    }

    #[test]
    fn test_set_kyc_copies_wallet() {
        let mut user = User::new("+919876543210");
        user.set_kyc(kyc());
        assert!(user.kyc_status);
        assert_eq!(user.wallet.as_deref(), Some("wallet_1"));
        assert!(user.journey().kyc_verified);
    }

    #[test]
    fn test_add_interests() {
        let mut user = User::new("+919876543210");
        user.add_interests(Vec::<String>::new());
        assert!(user.persona.is_none());

        user.add_interests(vec!["music".to_string(), "farming".to_string()]);
        user.add_interests(vec!["health".to_string()]);
        let persona = user.persona.as_ref().unwrap();
        assert_eq!(persona.interest.len(), 3);
        assert!(persona.id.starts_with("pers_"));
        assert!(persona.interest[0].id.starts_with("attr_"));
        assert_eq!(persona.interest[2].name, "health");
    }

    #[test]
    fn test_device_preference_applied() {
        let mut user = User::new("+919876543210");
        let mut preference = DevicePreference::new("device-1");
        preference.language_code = Some("hi".to_string());
        preference.role_id = Some("role_1".to_string());
        preference.domains = vec!["domain_1".to_string()];

        user.apply_device_preference(&preference);
        assert_eq!(user.language_preference.as_deref(), Some("hi"));
        assert_eq!(user.role.as_ref().map(|r| r.as_str()), Some("role_1"));
        assert_eq!(user.domains, vec!["domain_1".to_string()]);
    }

    #[test]
    fn test_invalidate_session() {
        let mut user = User::new("+919876543210");
        let now = Utc::now();
        user.record_session(
            "token".to_string(),
            now + chrono::Duration::hours(1),
            now + chrono::Duration::days(7),
        );
        assert!(user.refresh_token_valid_at(now));

        user.invalidate_session();
        assert_eq!(user.refresh_token_expiry, Some(DateTime::<Utc>::UNIX_EPOCH));
        assert!(!user.refresh_token_valid_at(now));
    }
}
