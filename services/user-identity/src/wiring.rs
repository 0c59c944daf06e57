//! 依赖装配

use std::sync::Arc;

use axum::Router;
use xplor_adapter_sms::{TwilioConfig, TwilioSmsClient};
use xplor_bootstrap::Infrastructure;
use xplor_errors::AppResult;
use xplor_ports::{CachePort, SmsPort};

use crate::api::http::{AppState, router};
use crate::application::services::{
    AuthService, AuthSettings, CatalogService, DevicePreferenceService, LanguagePreferenceService,
    RoleService, UserService,
};
use crate::domain::repositories::{
    CatalogRepository, DevicePreferenceRepository, LanguagePreferenceRepository,
    RegionLanguageRepository, RoleRepository, UserRepository,
};
use crate::infrastructure::cache::OtpStore;
use crate::infrastructure::persistence::{
    PostgresCatalogRepository, PostgresDevicePreferenceRepository,
    PostgresLanguagePreferenceRepository, PostgresRegionLanguageRepository, PostgresRoleRepository,
    PostgresUserRepository, run_migrations,
};

/// 执行迁移、写入默认角色并构建路由
pub async fn build_app(infra: Infrastructure) -> AppResult<Router> {
    let pool = infra.postgres_pool();
    let config = infra.config();

    run_migrations(pool.clone()).await?;

    // 组装 Repositories
    let users: Arc<dyn UserRepository> = Arc::new(PostgresUserRepository::new(pool.clone()));
    let roles: Arc<dyn RoleRepository> = Arc::new(PostgresRoleRepository::new(pool.clone()));
    let device_preferences: Arc<dyn DevicePreferenceRepository> =
        Arc::new(PostgresDevicePreferenceRepository::new(pool.clone()));
    let languages: Arc<dyn LanguagePreferenceRepository> =
        Arc::new(PostgresLanguagePreferenceRepository::new(pool.clone()));
    let regions: Arc<dyn RegionLanguageRepository> =
        Arc::new(PostgresRegionLanguageRepository::new(pool.clone()));
    let catalog: Arc<dyn CatalogRepository> = Arc::new(PostgresCatalogRepository::new(pool));

    // 缓存与短信
    let cache: Arc<dyn CachePort> = Arc::new(infra.redis_cache());
    let otp_store = OtpStore::new(cache, config.otp.clone());

    let twilio = &config.twilio;
    let sms_config = TwilioConfig::new(
        twilio.account_sid.clone(),
        twilio.auth_token.clone(),
        twilio.sender_phone_number.clone(),
    )
    .with_base_url(twilio.base_url.clone());
    let sms: Arc<dyn SmsPort> = Arc::new(TwilioSmsClient::new(sms_config)?);

    let role_service = Arc::new(RoleService::new(roles.clone()));
    role_service.seed_defaults().await?;

    let auth_service = Arc::new(AuthService::new(
        users.clone(),
        device_preferences.clone(),
        otp_store,
        sms,
        infra.token_service(),
        infra.key_cipher(),
        AuthSettings {
            test_mode: config.is_test(),
            default_otp: config.otp.default_otp.clone(),
        },
    ));

    let state = AppState {
        auth: auth_service,
        users: Arc::new(UserService::new(users, roles)),
        roles: role_service,
        device_preferences: Arc::new(DevicePreferenceService::new(
            device_preferences,
            catalog.clone(),
        )),
        languages: Arc::new(LanguagePreferenceService::new(
            languages,
            regions,
            config.language.regional_access_limit,
        )),
        catalog: Arc::new(CatalogService::new(catalog)),
        tokens: infra.token_service(),
    };

    Ok(router(state))
}
