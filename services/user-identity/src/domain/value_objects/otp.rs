//! OTP 值对象

use std::fmt;

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::error::IdentityError;

pub const OTP_LENGTH: usize = 6;

/// OTP 用途
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OtpKind {
    Login,
    Mpin,
}

impl OtpKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Login => "login",
            Self::Mpin => "mpin",
        }
    }
}

impl fmt::Display for OtpKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// 6 位验证码
#[derive(Clone, PartialEq, Eq)]
pub struct OtpCode(String);

impl OtpCode {
    /// 校验用户提交的验证码长度
    pub fn parse(raw: &str) -> Result<Self, IdentityError> {
        if raw.chars().count() != OTP_LENGTH {
            return Err(IdentityError::InvalidOtpFormat);
        }
        Ok(Self(raw.to_string()))
    }

    /// 随机生成，首位不为 0
    pub fn generate() -> Self {
        let code = rand::thread_rng().gen_range(100_000..1_000_000u32);
        Self(code.to_string())
    }

    pub fn from_stored(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for OtpCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("OtpCode(******)")
    }
}
