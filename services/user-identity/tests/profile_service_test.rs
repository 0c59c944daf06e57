//! 用户资料、角色、偏好与目录服务测试

mod common;

use std::sync::Arc;

use async_trait::async_trait;
use common::{InMemoryDevicePreferenceRepository, PHONE, TestContext};
use user_identity::application::dto::{
    AttributeRequest, CreateCategoryRequest, CreateDomainRequest, CreateRoleRequest,
    CreateUserRequest, DevicePreferenceRequest, KycRequest, LanguagePreferenceRequest,
    PersonaRequest, RegionLanguageRequest, UpdateRoleRequest, UpdateUserRequest,
    UpdateUserRoleRequest, UserRole,
};
use user_identity::application::services::DevicePreferenceService;
use user_identity::domain::entities::{DevicePreference, LanguageShare, Provider};
use user_identity::domain::repositories::DevicePreferenceRepository;
use xplor_common::{RoleId, UserId};
use xplor_errors::{AppError, AppResult};

fn create_user_request(phone: &str) -> CreateUserRequest {
    CreateUserRequest {
        phone_number: phone.to_string(),
        verified: Some(true),
        kyc_status: None,
        role: None,
        kyc: None,
        wallet: None,
        m_pin: None,
    }
}

fn kyc_request() -> KycRequest {
    KycRequest {
        last_name: "Rao".to_string(),
        first_name: "Asha".to_string(),
        address: "Pune".to_string(),
        email: "asha@example.com".to_string(),
        gender: "F".to_string(),
        dob: Some("1990-01-01".to_string()),
        provider: Provider {
            id: "digilocker".to_string(),
            name: "DigiLocker".to_string(),
        },
        wallet_id: Some("wallet_9".to_string()),
    }
}

fn device_request(device_id: &str) -> DevicePreferenceRequest {
    DevicePreferenceRequest {
        device_id: device_id.to_string(),
        language_code: None,
        role_id: None,
        domains: None,
        categories: None,
    }
}

// ============================================================================
// 用户
// ============================================================================

#[tokio::test]
async fn test_create_user_rejects_duplicate_phone() {
    let ctx = TestContext::new();
    let users = ctx.user_service();

    let created = users.create_user(create_user_request(PHONE)).await.unwrap();
    assert_eq!(created.phone_number, PHONE);
    assert!(created.verified);

    let err = users
        .create_user(create_user_request("+91 98765 43210"))
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::Conflict(_)));
    assert_eq!(err.message(), "User with this phone number already exists");
}

#[tokio::test]
async fn test_create_user_hashes_mpin() {
    let ctx = TestContext::new();
    let users = ctx.user_service();
    let mut request = create_user_request(PHONE);
    request.m_pin = Some("123456".to_string());

    let created = users.create_user(request).await.unwrap();
    let stored = ctx.users.get(&UserId::from_string(created.id)).unwrap();
    assert!(stored.has_mpin());
    assert_ne!(stored.mpin.unwrap().as_str(), "123456");
}

#[tokio::test]
async fn test_response_hides_secrets() {
    let ctx = TestContext::new();
    let users = ctx.user_service();
    let mut request = create_user_request(PHONE);
    request.m_pin = Some("123456".to_string());
    let created = users.create_user(request).await.unwrap();

    let body = serde_json::to_value(&created).unwrap();
    assert!(body.get("mpin").is_none());
    assert!(body.get("refreshToken").is_none());
    assert_eq!(body["phoneNumber"], PHONE);
}

#[tokio::test]
async fn test_update_user_keeps_missing_fields() {
    let ctx = TestContext::new();
    let users = ctx.user_service();
    let created = users.create_user(create_user_request(PHONE)).await.unwrap();
    let id = UserId::from_string(created.id);

    let updated = users
        .update(
            &id,
            UpdateUserRequest {
                language_preference: Some("hi".to_string()),
                domains: Some(vec!["domain_1".to_string()]),
                ..Default::default()
            },
        )
        .await
        .unwrap();

    assert_eq!(updated.language_preference.as_deref(), Some("hi"));
    assert_eq!(updated.domains, vec!["domain_1".to_string()]);
    assert_eq!(updated.phone_number, PHONE);
    assert!(updated.verified);
}

#[tokio::test]
async fn test_find_and_remove_user() {
    let ctx = TestContext::new();
    let users = ctx.user_service();
    let created = users.create_user(create_user_request(PHONE)).await.unwrap();
    let id = UserId::from_string(created.id.clone());

    assert_eq!(users.find_all().await.unwrap().len(), 1);
    assert_eq!(users.find_one(&id).await.unwrap().id, created.id);
    assert!(users.find_by_phone(PHONE).await.unwrap().is_some());

    users.remove(&id).await.unwrap();
    let err = users.find_one(&id).await.unwrap_err();
    assert!(matches!(err, AppError::NotFound(_)));
    assert_eq!(err.message(), "User Not found");
}

#[tokio::test]
async fn test_persona_appends_interests() {
    let ctx = TestContext::new();
    let users = ctx.user_service();
    let id = UserId::from_string(users.create_user(create_user_request(PHONE)).await.unwrap().id);

    let interest = |name: &str| AttributeRequest {
        name: name.to_string(),
    };
    users
        .update_persona(
            &id,
            PersonaRequest {
                interest: vec![interest("farming")],
            },
        )
        .await
        .unwrap();
    let updated = users
        .update_persona(
            &id,
            PersonaRequest {
                interest: vec![interest("retail")],
            },
        )
        .await
        .unwrap();

    let persona = updated.persona.unwrap();
    let names: Vec<_> = persona.interest.iter().map(|a| a.name.as_str()).collect();
    assert_eq!(names, vec!["farming", "retail"]);
    assert!(persona.interest.iter().all(|a| a.id.starts_with("attr_")));

    let unchanged = users
        .update_persona(&id, PersonaRequest { interest: vec![] })
        .await
        .unwrap();
    assert_eq!(unchanged.persona.unwrap().interest.len(), 2);
}

#[tokio::test]
async fn test_kyc_updates_journey() {
    let ctx = TestContext::new();
    let users = ctx.user_service();
    let id = UserId::from_string(users.create_user(create_user_request(PHONE)).await.unwrap().id);

    let journey = users.journey(&id).await.unwrap();
    assert!(!journey.kyc_verified);
    assert!(!journey.role_assigned);
    assert!(!journey.m_pin_created);

    let updated = users.update_kyc(&id, kyc_request()).await.unwrap();
    assert!(updated.kyc_status);
    assert_eq!(updated.wallet.as_deref(), Some("wallet_9"));
    assert!(users.journey(&id).await.unwrap().kyc_verified);
}

#[tokio::test]
async fn test_update_role_embeds_role() {
    let ctx = TestContext::new();
    let roles = ctx.role_service();
    roles.seed_defaults().await.unwrap();
    let agent = roles
        .find_all()
        .await
        .unwrap()
        .into_iter()
        .find(|r| r.role_type == "AGENT")
        .unwrap();

    let users = ctx.user_service();
    let id = UserId::from_string(users.create_user(create_user_request(PHONE)).await.unwrap().id);

    let err = users
        .update_role(
            &id,
            UpdateUserRoleRequest {
                role_id: "role_missing".to_string(),
            },
        )
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::BadRequest(_)));
    assert_eq!(err.message(), "Invalid role");

    let updated = users
        .update_role(
            &id,
            UpdateUserRoleRequest {
                role_id: agent.id.to_string(),
            },
        )
        .await
        .unwrap();
    assert_eq!(updated.role, Some(UserRole::Embedded(agent.clone())));
    assert!(users.journey(&id).await.unwrap().role_assigned);

    // 详情同样展开角色
    let found = users.find_one(&id).await.unwrap();
    assert_eq!(found.role, Some(UserRole::Embedded(agent)));
}

// ============================================================================
// 角色
// ============================================================================

#[tokio::test]
async fn test_seed_defaults_only_once() {
    let ctx = TestContext::new();
    let roles = ctx.role_service();

    assert_eq!(roles.seed_defaults().await.unwrap(), 2);
    assert_eq!(roles.seed_defaults().await.unwrap(), 0);

    let mut types: Vec<_> = roles
        .find_all()
        .await
        .unwrap()
        .into_iter()
        .map(|r| r.role_type)
        .collect();
    types.sort();
    assert_eq!(types, vec!["AGENT".to_string(), "SEEKER".to_string()]);
}

#[tokio::test]
async fn test_role_crud() {
    let ctx = TestContext::new();
    let roles = ctx.role_service();

    let created = roles
        .create(CreateRoleRequest {
            role_type: "MENTOR".to_string(),
            title: "Mentor".to_string(),
            description: "Guides seekers".to_string(),
            image_url: "https://example.com/mentor.png".to_string(),
        })
        .await
        .unwrap();

    let updated = roles
        .update(
            &created.id,
            UpdateRoleRequest {
                title: Some("Senior Mentor".to_string()),
                ..Default::default()
            },
        )
        .await
        .unwrap();
    assert_eq!(updated.title, "Senior Mentor");
    assert_eq!(updated.role_type, "MENTOR");
    assert_eq!(roles.find_one(&created.id).await.unwrap().title, "Senior Mentor");

    roles.remove(&created.id).await.unwrap();
    let err = roles.find_one(&created.id).await.unwrap_err();
    assert_eq!(err.message(), "Role not found");

    let err = roles
        .remove(&RoleId::from_string("role_missing"))
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::NotFound(_)));
}

// ============================================================================
// 设备偏好
// ============================================================================

#[tokio::test]
async fn test_device_preference_lifecycle() {
    let ctx = TestContext::new();
    let catalog = ctx.catalog_service();
    let domain = catalog
        .create_domain(CreateDomainRequest {
            title: "Agriculture".to_string(),
            domain: "ONDC:AGR".to_string(),
            description: "Farm inputs".to_string(),
            icon: "agri.png".to_string(),
        })
        .await
        .unwrap();

    let preferences = ctx.device_preference_service();
    let mut request = device_request("device-1");
    request.language_code = Some("hi".to_string());
    request.domains = Some(vec![domain.id.clone()]);
    let created = preferences.create(request).await.unwrap();
    assert!(created.id.starts_with("device_"));

    let err = preferences.create(device_request("device-1")).await.unwrap_err();
    assert!(matches!(err, AppError::BadRequest(_)));
    assert_eq!(err.message(), "Device preference already exist");

    let found = preferences.get("device-1").await.unwrap();
    assert_eq!(found.domain_data, vec![domain]);

    let mut update = device_request("device-1");
    update.categories = Some(vec!["seeds".to_string()]);
    let updated = preferences.update(update).await.unwrap();
    assert_eq!(updated.categories, vec!["seeds".to_string()]);
    assert_eq!(updated.language_code.as_deref(), Some("hi"));

    preferences.delete("device-1").await.unwrap();
    let err = preferences.get("device-1").await.unwrap_err();
    assert_eq!(err.message(), "Device preference not found");
}

/// 读取总是落后于写入，模拟两个请求同时通过存在性检查
struct StaleReadDevicePreferences(Arc<InMemoryDevicePreferenceRepository>);

#[async_trait]
impl DevicePreferenceRepository for StaleReadDevicePreferences {
    async fn find_by_device_id(&self, _device_id: &str) -> AppResult<Option<DevicePreference>> {
        Ok(None)
    }

    async fn save(&self, preference: &DevicePreference) -> AppResult<()> {
        self.0.save(preference).await
    }

    async fn update(&self, preference: &DevicePreference) -> AppResult<()> {
        self.0.update(preference).await
    }

    async fn delete_by_device_id(&self, device_id: &str) -> AppResult<bool> {
        self.0.delete_by_device_id(device_id).await
    }
}

#[tokio::test]
async fn test_concurrent_device_preference_create_is_bad_request() {
    let ctx = TestContext::new();
    let preferences = DevicePreferenceService::new(
        Arc::new(StaleReadDevicePreferences(ctx.device_preferences.clone())),
        ctx.catalog.clone(),
    );

    preferences.create(device_request("device-1")).await.unwrap();
    let err = preferences.create(device_request("device-1")).await.unwrap_err();
    assert!(matches!(err, AppError::BadRequest(_)));
    assert_eq!(err.status_code(), 400);
    assert_eq!(err.message(), "Device preference already exist");
}

#[tokio::test]
async fn test_device_preference_requires_device_id() {
    let preferences = TestContext::new().device_preference_service();

    let err = preferences.create(device_request("  ")).await.unwrap_err();
    assert!(matches!(err, AppError::Validation(_)));

    let err = preferences.update(device_request("unknown")).await.unwrap_err();
    assert!(matches!(err, AppError::NotFound(_)));
}

// ============================================================================
// 语言偏好
// ============================================================================

#[tokio::test]
async fn test_language_preference_latest_wins() {
    let ctx = TestContext::new();
    let languages = ctx.language_service(20);

    let err = languages.get("device-1").await.unwrap_err();
    assert_eq!(err.message(), "Language preference not found");

    for code in ["en", "hi"] {
        languages
            .create(LanguagePreferenceRequest {
                language_code: code.to_string(),
                device_id: "device-1".to_string(),
            })
            .await
            .unwrap();
    }
    assert_eq!(languages.get("device-1").await.unwrap().language_code, "hi");

    // 删除只移除最新一条，较早的偏好重新生效
    let deleted = languages.delete("device-1").await.unwrap();
    assert_eq!(deleted.device_id, "device-1");
    assert_eq!(deleted.language_code, "hi");
    assert_eq!(languages.get("device-1").await.unwrap().language_code, "en");

    let deleted = languages.delete("device-1").await.unwrap();
    assert_eq!(deleted.language_code, "en");
    assert!(languages.get("device-1").await.is_err());
    assert!(languages.delete("device-1").await.is_err());
}

#[tokio::test]
async fn test_region_languages_expire_after_access_limit() {
    let ctx = TestContext::new();
    let languages = ctx.language_service(2);

    assert!(languages.find_region_languages("Maharashtra").await.unwrap().is_empty());

    let created = languages
        .create_region_languages(RegionLanguageRequest {
            region: "Maharashtra".to_string(),
            languages: vec![
                LanguageShare {
                    language: "mr".to_string(),
                    percentage: "70".to_string(),
                },
                LanguageShare {
                    language: "hi".to_string(),
                    percentage: "30".to_string(),
                },
            ],
        })
        .await
        .unwrap();
    assert_eq!(created.access_count, 1);

    // 计数 1 -> 2 -> 3，超过上限后删除
    assert_eq!(languages.find_region_languages("Maharashtra").await.unwrap().len(), 1);
    assert_eq!(languages.find_region_languages("Maharashtra").await.unwrap().len(), 1);
    assert!(languages.find_region_languages("Maharashtra").await.unwrap().is_empty());
    assert!(languages.find_region_languages("Maharashtra").await.unwrap().is_empty());
}

// ============================================================================
// 目录
// ============================================================================

#[tokio::test]
async fn test_catalog_listing() {
    let ctx = TestContext::new();
    let catalog = ctx.catalog_service();

    let first = catalog
        .create_domain(CreateDomainRequest {
            title: "Retail".to_string(),
            domain: "ONDC:RET".to_string(),
            description: "Retail goods".to_string(),
            icon: "retail.png".to_string(),
        })
        .await
        .unwrap();
    catalog
        .create_domain(CreateDomainRequest {
            title: "Mobility".to_string(),
            domain: "ONDC:TRV".to_string(),
            description: "Rides".to_string(),
            icon: "ride.png".to_string(),
        })
        .await
        .unwrap();
    let category = catalog
        .create_category(CreateCategoryRequest {
            title: "Seeds".to_string(),
            value: "seeds".to_string(),
        })
        .await
        .unwrap();

    assert_eq!(catalog.list_domains().await.unwrap().len(), 2);
    assert_eq!(
        catalog.domains_by_ids(&[first.id.clone()]).await.unwrap(),
        vec![first]
    );
    assert_eq!(catalog.list_categories().await.unwrap(), vec![category]);
}
