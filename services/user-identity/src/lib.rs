//! Xplor User Identity Service Library
//!
//! 分层结构：
//! - `domain`: 实体、值对象与仓储 trait
//! - `application`: 认证、用户、角色、偏好与目录服务
//! - `infrastructure`: PostgreSQL 仓储、OTP 缓存、业务指标
//! - `api`: axum 路由、认证中间件与处理函数

pub mod api;
pub mod application;
pub mod domain;
pub mod error;
pub mod infrastructure;
mod wiring;

pub use wiring::build_app;
