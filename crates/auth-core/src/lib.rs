//! xplor-auth-core - 认证核心库
//!
//! 访问/刷新双令牌签发与校验、关联键加密

mod cipher;
mod token;

pub use cipher::KeyCipher;
pub use token::{Claims, IssuedToken, TokenKind, TokenService};
