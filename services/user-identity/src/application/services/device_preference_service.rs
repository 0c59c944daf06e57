//! 设备偏好服务

use std::sync::Arc;

use xplor_errors::{AppError, AppResult};

use crate::application::dto::{DevicePreferenceRequest, DevicePreferenceResponse};
use crate::domain::entities::DevicePreference;
use crate::domain::repositories::{CatalogRepository, DevicePreferenceRepository};
use crate::error::IdentityError;

pub struct DevicePreferenceService {
    preferences: Arc<dyn DevicePreferenceRepository>,
    catalog: Arc<dyn CatalogRepository>,
}

impl DevicePreferenceService {
    pub fn new(
        preferences: Arc<dyn DevicePreferenceRepository>,
        catalog: Arc<dyn CatalogRepository>,
    ) -> Self {
        Self {
            preferences,
            catalog,
        }
    }

    pub async fn create(&self, request: DevicePreferenceRequest) -> AppResult<DevicePreference> {
        require_device_id(&request.device_id)?;
        if self
            .preferences
            .find_by_device_id(&request.device_id)
            .await?
            .is_some()
        {
            return Err(IdentityError::DevicePreferenceExists.into());
        }

        let mut preference = DevicePreference::new(request.device_id);
        preference.language_code = request.language_code;
        preference.role_id = request.role_id;
        preference.domains = request.domains.unwrap_or_default();
        preference.categories = request.categories.unwrap_or_default();

        self.preferences.save(&preference).await?;
        Ok(preference)
    }

    /// 按 deviceId 部分更新
    pub async fn update(&self, request: DevicePreferenceRequest) -> AppResult<DevicePreference> {
        require_device_id(&request.device_id)?;
        let mut preference = self.load(&request.device_id).await?;

        if let Some(language_code) = request.language_code {
            preference.language_code = Some(language_code);
        }
        if let Some(role_id) = request.role_id {
            preference.role_id = Some(role_id);
        }
        if let Some(domains) = request.domains {
            preference.domains = domains;
        }
        if let Some(categories) = request.categories {
            preference.categories = categories;
        }
        preference.timestamps.touch();

        self.preferences.update(&preference).await?;
        Ok(preference)
    }

    pub async fn get(&self, device_id: &str) -> AppResult<DevicePreferenceResponse> {
        let preference = self.load(device_id).await?;
        let domain_data = self
            .catalog
            .find_domains_by_ids(&preference.domains)
            .await?;
        Ok(DevicePreferenceResponse {
            preference,
            domain_data,
        })
    }

    pub async fn delete(&self, device_id: &str) -> AppResult<DevicePreference> {
        let preference = self.load(device_id).await?;
        self.preferences.delete_by_device_id(device_id).await?;
        Ok(preference)
    }

    async fn load(&self, device_id: &str) -> AppResult<DevicePreference> {
        self.preferences
            .find_by_device_id(device_id)
            .await?
            .ok_or_else(|| IdentityError::DevicePreferenceNotFound.into())
    }
}

fn require_device_id(device_id: &str) -> AppResult<()> {
    if device_id.trim().is_empty() {
        return Err(AppError::validation("deviceId should not be empty"));
    }
    Ok(())
}
