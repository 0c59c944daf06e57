//! 测试辅助：内存仓储、内存缓存与记录型短信发送器

#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use user_identity::api::http::AppState;
use user_identity::application::services::{
    AuthService, AuthSettings, CatalogService, DevicePreferenceService, LanguagePreferenceService,
    RoleService, UserService,
};
use user_identity::domain::entities::{
    Category, DevicePreference, Domain, LanguagePreference, RegionLanguage, Role, User,
};
use user_identity::domain::repositories::{
    CatalogRepository, DevicePreferenceRepository, LanguagePreferenceRepository,
    RegionLanguageRepository, RoleRepository, UserRepository,
};
use user_identity::error::IdentityError;
use user_identity::infrastructure::cache::OtpStore;
use xplor_auth_core::{KeyCipher, TokenService};
use xplor_common::{RoleId, UserId};
use xplor_config::OtpConfig;
use xplor_errors::{AppError, AppResult};
use xplor_ports::{CachePort, SmsPort};

pub const CIPHER_KEY: &str = "000102030405060708090a0b0c0d0e0f101112131415161718191a1b1c1d1e1f";
pub const DEFAULT_OTP: &str = "123456";
pub const PHONE: &str = "+919876543210";

// ============================================================================
// 缓存
// ============================================================================

#[derive(Default)]
pub struct InMemoryCache {
    entries: Mutex<HashMap<String, String>>,
}

impl InMemoryCache {
    pub fn raw(&self, key: &str) -> Option<String> {
        self.entries.lock().unwrap().get(key).cloned()
    }

    /// 模拟 TTL 到期
    pub fn expire(&self, key: &str) {
        self.entries.lock().unwrap().remove(key);
    }
}

#[async_trait]
impl CachePort for InMemoryCache {
    async fn get(&self, key: &str) -> AppResult<Option<String>> {
        Ok(self.raw(key))
    }

    async fn set(&self, key: &str, value: &str, _ttl: Option<Duration>) -> AppResult<()> {
        self.entries
            .lock()
            .unwrap()
            .insert(key.to_string(), value.to_string());
        Ok(())
    }

    async fn delete(&self, key: &str) -> AppResult<()> {
        self.expire(key);
        Ok(())
    }

    async fn get_int(&self, key: &str) -> AppResult<Option<i64>> {
        match self.raw(key) {
            Some(v) => v
                .parse()
                .map(Some)
                .map_err(|_| AppError::internal("not an integer")),
            None => Ok(None),
        }
    }

    async fn incr_with_ttl(&self, key: &str, _ttl: Duration) -> AppResult<i64> {
        let mut entries = self.entries.lock().unwrap();
        let next = entries
            .get(key)
            .and_then(|v| v.parse::<i64>().ok())
            .unwrap_or(0)
            + 1;
        entries.insert(key.to_string(), next.to_string());
        Ok(next)
    }
}

// ============================================================================
// 短信
// ============================================================================

#[derive(Default)]
pub struct RecordingSms {
    pub sent: Mutex<Vec<(String, String)>>,
}

impl RecordingSms {
    pub fn messages(&self) -> Vec<(String, String)> {
        self.sent.lock().unwrap().clone()
    }
}

#[async_trait]
impl SmsPort for RecordingSms {
    async fn send_sms(&self, to: &str, body: &str) -> AppResult<()> {
        self.sent
            .lock()
            .unwrap()
            .push((to.to_string(), body.to_string()));
        Ok(())
    }
}

mockall::mock! {
    pub Sms {}

    #[async_trait]
    impl SmsPort for Sms {
        async fn send_sms(&self, to: &str, body: &str) -> AppResult<()>;
    }
}

// ============================================================================
// 仓储
// ============================================================================

#[derive(Default)]
pub struct InMemoryUserRepository {
    users: Mutex<HashMap<String, User>>,
}

impl InMemoryUserRepository {
    pub fn get(&self, id: &UserId) -> Option<User> {
        self.users.lock().unwrap().get(id.as_str()).cloned()
    }

    pub fn insert(&self, user: User) {
        self.users
            .lock()
            .unwrap()
            .insert(user.id.as_str().to_string(), user);
    }
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn find_by_id(&self, id: &UserId) -> AppResult<Option<User>> {
        Ok(self.get(id))
    }

    async fn find_by_phone(&self, phone_number: &str) -> AppResult<Option<User>> {
        Ok(self
            .users
            .lock()
            .unwrap()
            .values()
            .find(|u| u.phone_number == phone_number)
            .cloned())
    }

    async fn find_all(&self) -> AppResult<Vec<User>> {
        Ok(self.users.lock().unwrap().values().cloned().collect())
    }

    async fn save(&self, user: &User) -> AppResult<()> {
        let mut users = self.users.lock().unwrap();
        if users.values().any(|u| u.phone_number == user.phone_number) {
            return Err(AppError::conflict(
                "User with this phone number already exists",
            ));
        }
        users.insert(user.id.as_str().to_string(), user.clone());
        Ok(())
    }

    async fn update(&self, user: &User) -> AppResult<()> {
        self.insert(user.clone());
        Ok(())
    }

    async fn delete(&self, id: &UserId) -> AppResult<bool> {
        Ok(self.users.lock().unwrap().remove(id.as_str()).is_some())
    }
}

#[derive(Default)]
pub struct InMemoryRoleRepository {
    roles: Mutex<Vec<Role>>,
}

#[async_trait]
impl RoleRepository for InMemoryRoleRepository {
    async fn find_by_id(&self, id: &RoleId) -> AppResult<Option<Role>> {
        Ok(self
            .roles
            .lock()
            .unwrap()
            .iter()
            .find(|r| &r.id == id)
            .cloned())
    }

    async fn find_all(&self) -> AppResult<Vec<Role>> {
        Ok(self.roles.lock().unwrap().clone())
    }

    async fn save(&self, role: &Role) -> AppResult<()> {
        self.roles.lock().unwrap().push(role.clone());
        Ok(())
    }

    async fn update(&self, role: &Role) -> AppResult<()> {
        let mut roles = self.roles.lock().unwrap();
        if let Some(existing) = roles.iter_mut().find(|r| r.id == role.id) {
            *existing = role.clone();
        }
        Ok(())
    }

    async fn delete(&self, id: &RoleId) -> AppResult<bool> {
        let mut roles = self.roles.lock().unwrap();
        let before = roles.len();
        roles.retain(|r| &r.id != id);
        Ok(roles.len() != before)
    }

    async fn count(&self) -> AppResult<i64> {
        Ok(self.roles.lock().unwrap().len() as i64)
    }
}

#[derive(Default)]
pub struct InMemoryDevicePreferenceRepository {
    preferences: Mutex<HashMap<String, DevicePreference>>,
}

#[async_trait]
impl DevicePreferenceRepository for InMemoryDevicePreferenceRepository {
    async fn find_by_device_id(&self, device_id: &str) -> AppResult<Option<DevicePreference>> {
        Ok(self.preferences.lock().unwrap().get(device_id).cloned())
    }

    /// 与 device_id 唯一约束一致
    async fn save(&self, preference: &DevicePreference) -> AppResult<()> {
        let mut preferences = self.preferences.lock().unwrap();
        if preferences.contains_key(&preference.device_id) {
            return Err(IdentityError::DevicePreferenceExists.into());
        }
        preferences.insert(preference.device_id.clone(), preference.clone());
        Ok(())
    }

    async fn update(&self, preference: &DevicePreference) -> AppResult<()> {
        self.preferences
            .lock()
            .unwrap()
            .insert(preference.device_id.clone(), preference.clone());
        Ok(())
    }

    async fn delete_by_device_id(&self, device_id: &str) -> AppResult<bool> {
        Ok(self.preferences.lock().unwrap().remove(device_id).is_some())
    }
}

#[derive(Default)]
pub struct InMemoryLanguagePreferenceRepository {
    preferences: Mutex<Vec<LanguagePreference>>,
}

#[async_trait]
impl LanguagePreferenceRepository for InMemoryLanguagePreferenceRepository {
    async fn save(&self, preference: &LanguagePreference) -> AppResult<()> {
        self.preferences.lock().unwrap().push(preference.clone());
        Ok(())
    }

    async fn find_by_device_id(&self, device_id: &str) -> AppResult<Option<LanguagePreference>> {
        Ok(self
            .preferences
            .lock()
            .unwrap()
            .iter()
            .rev()
            .find(|p| p.device_id == device_id)
            .cloned())
    }

    async fn delete_by_id(&self, id: &str) -> AppResult<bool> {
        let mut preferences = self.preferences.lock().unwrap();
        let before = preferences.len();
        preferences.retain(|p| p.id != id);
        Ok(preferences.len() != before)
    }
}

#[derive(Default)]
pub struct InMemoryRegionLanguageRepository {
    regions: Mutex<Vec<RegionLanguage>>,
}

#[async_trait]
impl RegionLanguageRepository for InMemoryRegionLanguageRepository {
    async fn save(&self, region: &RegionLanguage) -> AppResult<()> {
        self.regions.lock().unwrap().push(region.clone());
        Ok(())
    }

    async fn find_by_region(&self, region: &str) -> AppResult<Vec<RegionLanguage>> {
        Ok(self
            .regions
            .lock()
            .unwrap()
            .iter()
            .filter(|r| r.region == region)
            .cloned()
            .collect())
    }

    async fn delete_by_region(&self, region: &str) -> AppResult<()> {
        let mut regions = self.regions.lock().unwrap();
        if let Some(pos) = regions.iter().position(|r| r.region == region) {
            regions.remove(pos);
        }
        Ok(())
    }

    async fn increment_access_count(&self, region: &str) -> AppResult<()> {
        if let Some(r) = self
            .regions
            .lock()
            .unwrap()
            .iter_mut()
            .find(|r| r.region == region)
        {
            r.access_count += 1;
        }
        Ok(())
    }
}

#[derive(Default)]
pub struct InMemoryCatalogRepository {
    domains: Mutex<Vec<Domain>>,
    categories: Mutex<Vec<Category>>,
}

#[async_trait]
impl CatalogRepository for InMemoryCatalogRepository {
    async fn save_domain(&self, domain: &Domain) -> AppResult<()> {
        self.domains.lock().unwrap().push(domain.clone());
        Ok(())
    }

    async fn list_domains(&self) -> AppResult<Vec<Domain>> {
        Ok(self.domains.lock().unwrap().clone())
    }

    async fn find_domains_by_ids(&self, ids: &[String]) -> AppResult<Vec<Domain>> {
        Ok(self
            .domains
            .lock()
            .unwrap()
            .iter()
            .filter(|d| ids.contains(&d.id))
            .cloned()
            .collect())
    }

    async fn save_category(&self, category: &Category) -> AppResult<()> {
        self.categories.lock().unwrap().push(category.clone());
        Ok(())
    }

    async fn list_categories(&self) -> AppResult<Vec<Category>> {
        Ok(self.categories.lock().unwrap().clone())
    }
}

// ============================================================================
// 组装
// ============================================================================

pub struct TestContext {
    pub users: Arc<InMemoryUserRepository>,
    pub roles: Arc<InMemoryRoleRepository>,
    pub device_preferences: Arc<InMemoryDevicePreferenceRepository>,
    pub languages: Arc<InMemoryLanguagePreferenceRepository>,
    pub regions: Arc<InMemoryRegionLanguageRepository>,
    pub catalog: Arc<InMemoryCatalogRepository>,
    pub cache: Arc<InMemoryCache>,
    pub sms: Arc<RecordingSms>,
    pub tokens: Arc<TokenService>,
    pub cipher: Arc<KeyCipher>,
}

impl TestContext {
    pub fn new() -> Self {
        Self {
            users: Arc::new(InMemoryUserRepository::default()),
            roles: Arc::new(InMemoryRoleRepository::default()),
            device_preferences: Arc::new(InMemoryDevicePreferenceRepository::default()),
            languages: Arc::new(InMemoryLanguagePreferenceRepository::default()),
            regions: Arc::new(InMemoryRegionLanguageRepository::default()),
            catalog: Arc::new(InMemoryCatalogRepository::default()),
            cache: Arc::new(InMemoryCache::default()),
            sms: Arc::new(RecordingSms::default()),
            tokens: Arc::new(TokenService::new(
                "access-secret",
                "refresh-secret",
                3600,
                604800,
                "xplor-user-identity",
            )),
            cipher: Arc::new(KeyCipher::from_hex_key(CIPHER_KEY).unwrap()),
        }
    }

    pub fn otp_store(&self) -> OtpStore {
        OtpStore::new(self.cache.clone(), OtpConfig::default())
    }

    fn build_auth(&self, sms: Arc<dyn SmsPort>, test_mode: bool) -> AuthService {
        AuthService::new(
            self.users.clone(),
            self.device_preferences.clone(),
            self.otp_store(),
            sms,
            self.tokens.clone(),
            self.cipher.clone(),
            AuthSettings {
                test_mode,
                default_otp: DEFAULT_OTP.to_string(),
            },
        )
    }

    /// 测试模式：固定验证码，不发短信
    pub fn auth_service(&self) -> AuthService {
        self.build_auth(self.sms.clone(), true)
    }

    /// 正常模式：随机验证码，通过短信下发
    pub fn live_auth_service(&self) -> AuthService {
        self.build_auth(self.sms.clone(), false)
    }

    pub fn live_auth_service_with_sms(&self, sms: Arc<dyn SmsPort>) -> AuthService {
        self.build_auth(sms, false)
    }

    pub fn user_service(&self) -> UserService {
        UserService::new(self.users.clone(), self.roles.clone())
    }

    pub fn role_service(&self) -> RoleService {
        RoleService::new(self.roles.clone())
    }

    pub fn device_preference_service(&self) -> DevicePreferenceService {
        DevicePreferenceService::new(self.device_preferences.clone(), self.catalog.clone())
    }

    pub fn language_service(&self, regional_access_limit: i32) -> LanguagePreferenceService {
        LanguagePreferenceService::new(
            self.languages.clone(),
            self.regions.clone(),
            regional_access_limit,
        )
    }

    pub fn catalog_service(&self) -> CatalogService {
        CatalogService::new(self.catalog.clone())
    }

    pub fn app_state(&self) -> AppState {
        AppState {
            auth: Arc::new(self.auth_service()),
            users: Arc::new(self.user_service()),
            roles: Arc::new(self.role_service()),
            device_preferences: Arc::new(self.device_preference_service()),
            languages: Arc::new(self.language_service(20)),
            catalog: Arc::new(self.catalog_service()),
            tokens: self.tokens.clone(),
        }
    }
}
