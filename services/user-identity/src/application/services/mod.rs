//! 应用服务

mod auth_service;
mod catalog_service;
mod device_preference_service;
mod language_preference_service;
mod role_service;
mod user_service;

pub use auth_service::{AuthService, AuthSettings};
pub use catalog_service::CatalogService;
pub use device_preference_service::DevicePreferenceService;
pub use language_preference_service::LanguagePreferenceService;
pub use role_service::RoleService;
pub use user_service::UserService;
