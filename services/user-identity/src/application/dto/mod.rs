//! 请求与响应 DTO（JSON 字段为 camelCase）

mod auth;
mod catalog;
mod preference;
mod role;
mod user;

pub use auth::*;
pub use catalog::*;
pub use preference::*;
pub use role::*;
pub use user::*;
