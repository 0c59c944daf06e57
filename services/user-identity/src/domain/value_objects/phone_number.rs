//! 手机号值对象

use std::fmt;

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use xplor_common::strip_spaces;

use crate::error::IdentityError;

/// `+` 开头，国家码首位非 0，共 8-15 位数字
static PHONE_PATTERN: Lazy<Regex> = Lazy::new(|| Regex::new(r"^\+[1-9]\d{7,14}$").unwrap());

/// 去掉空格后的 E.164 手机号，同时作为登录 OTP 的缓存 key
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PhoneNumber(String);

impl PhoneNumber {
    pub fn parse(raw: &str) -> Result<Self, IdentityError> {
        let normalized = strip_spaces(raw.trim());
        if normalized.is_empty() {
            return Err(IdentityError::EmptyPhoneNumber);
        }
        if !PHONE_PATTERN.is_match(&normalized) {
            return Err(IdentityError::InvalidPhoneNumber);
        }
        Ok(Self(normalized))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_inner(self) -> String {
        self.0
    }
}

impl fmt::Display for PhoneNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
