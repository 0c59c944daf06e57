//! MPIN 值对象

use std::fmt;

use argon2::{
    Argon2,
    password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString, rand_core::OsRng},
};
use serde::{Deserialize, Serialize};

use crate::error::IdentityError;

/// 明文 MPIN，恰好 6 位数字
#[derive(Clone, PartialEq, Eq)]
pub struct Mpin(String);

impl Mpin {
    pub fn parse(raw: &str) -> Result<Self, IdentityError> {
        if raw.len() != 6 || !raw.bytes().all(|b| b.is_ascii_digit()) {
            return Err(IdentityError::InvalidMpinFormat);
        }
        Ok(Self(raw.to_string()))
    }

    fn as_bytes(&self) -> &[u8] {
        self.0.as_bytes()
    }
}

impl fmt::Debug for Mpin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Mpin([REDACTED])")
    }
}

/// Argon2 哈希后的 MPIN
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct HashedMpin(String);

impl HashedMpin {
    pub fn from_plain(mpin: &Mpin) -> Result<Self, IdentityError> {
        let salt = SaltString::generate(&mut OsRng);
        let hash = Argon2::default()
            .hash_password(mpin.as_bytes(), &salt)
            .map_err(|e| IdentityError::Hashing(e.to_string()))?
            .to_string();
        Ok(Self(hash))
    }

    pub fn verify(&self, mpin: &Mpin) -> Result<bool, IdentityError> {
        let parsed =
            PasswordHash::new(&self.0).map_err(|e| IdentityError::Hashing(e.to_string()))?;
        Ok(Argon2::default()
            .verify_password(mpin.as_bytes(), &parsed)
            .is_ok())
    }

    /// 从数据库中的哈希字符串恢复
    pub fn from_hash(hash: String) -> Self {
        Self(hash)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for HashedMpin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("HashedMpin([REDACTED])")
    }
}

impl fmt::Display for HashedMpin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("[REDACTED]")
    }
}
