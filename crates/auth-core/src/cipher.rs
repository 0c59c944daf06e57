//! 关联键加密
//!
//! MPIN 重置流程中以密文形式下发用户 ID。AES-256-GCM，随机 96 位 nonce 置于密文之前，整体十六进制编码。

use aes_gcm::aead::{Aead, AeadCore, KeyInit, OsRng};
use aes_gcm::{Aes256Gcm, Nonce};
use xplor_errors::{AppError, AppResult};

const NONCE_LEN: usize = 12;

#[derive(Clone)]
pub struct KeyCipher {
    cipher: Aes256Gcm,
}

impl KeyCipher {
    /// 从 64 位十六进制密钥创建
    pub fn from_hex_key(hex_key: &str) -> AppResult<Self> {
        let key = hex::decode(hex_key.trim())
            .map_err(|e| AppError::internal(format!("Invalid cipher key encoding: {}", e)))?;
        let cipher = Aes256Gcm::new_from_slice(&key)
            .map_err(|_| AppError::internal("Cipher key must be 32 bytes"))?;
        Ok(Self { cipher })
    }

    pub fn encrypt(&self, plaintext: &str) -> AppResult<String> {
        let nonce = Aes256Gcm::generate_nonce(&mut OsRng);
        let ciphertext = self
            .cipher
            .encrypt(&nonce, plaintext.as_bytes())
            .map_err(|_| AppError::internal("Failed to encrypt key"))?;

        let mut out = nonce.to_vec();
        out.extend_from_slice(&ciphertext);
        Ok(hex::encode(out))
    }

    /// 解密失败（格式错误、被篡改、密钥不符）一律视为无效 key
    pub fn decrypt(&self, encoded: &str) -> AppResult<String> {
        let invalid = || AppError::bad_request("Invalid key or key is expired");

        let bytes = hex::decode(encoded).map_err(|_| invalid())?;
        if bytes.len() <= NONCE_LEN {
            return Err(invalid());
        }
        let (nonce, ciphertext) = bytes.split_at(NONCE_LEN);
        let plaintext = self
            .cipher
            .decrypt(Nonce::from_slice(nonce), ciphertext)
            .map_err(|_| invalid())?;

        String::from_utf8(plaintext).map_err(|_| invalid())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const KEY: &str = "000102030405060708090a0b0c0d0e0f101112131415161718191a1b1c1d1e1f";

    #[test]
    fn test_decrypts_what_it_encrypts() {
        let cipher = KeyCipher::from_hex_key(KEY).unwrap();
        let encrypted = cipher.encrypt("user_42").unwrap();
        assert_ne!(encrypted, "user_42");
        assert_eq!(cipher.decrypt(&encrypted).unwrap(), "user_42");
    }

    #[test]
    fn test_nonce_makes_ciphertext_unique() {
        let cipher = KeyCipher::from_hex_key(KEY).unwrap();
        assert_ne!(
            cipher.encrypt("user_42").unwrap(),
            cipher.encrypt("user_42").unwrap()
        );
    }

    #[test]
    fn test_tampered_key_is_rejected() {
        let cipher = KeyCipher::from_hex_key(KEY).unwrap();
        let mut encrypted = cipher.encrypt("user_42").unwrap();
        let last = encrypted.pop().unwrap();
        encrypted.push(if last == '0' { '1' } else { '0' });

        assert!(matches!(
            cipher.decrypt(&encrypted),
            Err(AppError::BadRequest(_))
        ));
        assert!(cipher.decrypt("not-hex").is_err());
        assert!(cipher.decrypt("abcd").is_err());
    }

    #[test]
    fn test_short_key_rejected() {
        assert!(KeyCipher::from_hex_key("0011").is_err());
    }
}
