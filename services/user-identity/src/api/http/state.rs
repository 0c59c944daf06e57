use std::sync::Arc;

use xplor_auth_core::TokenService;

use crate::application::services::{
    AuthService, CatalogService, DevicePreferenceService, LanguagePreferenceService, RoleService,
    UserService,
};

/// 路由共享状态
#[derive(Clone)]
pub struct AppState {
    pub auth: Arc<AuthService>,
    pub users: Arc<UserService>,
    pub roles: Arc<RoleService>,
    pub device_preferences: Arc<DevicePreferenceService>,
    pub languages: Arc<LanguagePreferenceService>,
    pub catalog: Arc<CatalogService>,
    pub tokens: Arc<TokenService>,
}
