//! 路由处理函数

pub mod auth;
pub mod catalog;
pub mod device_preference;
pub mod language_preference;
pub mod role;
pub mod root;
pub mod user;
