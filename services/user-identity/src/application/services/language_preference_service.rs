//! 语言偏好与区域语言服务

use std::sync::Arc;

use tracing::debug;
use xplor_errors::AppResult;

use crate::application::dto::{LanguagePreferenceRequest, RegionLanguageRequest};
use crate::domain::entities::{LanguagePreference, RegionLanguage};
use crate::domain::repositories::{LanguagePreferenceRepository, RegionLanguageRepository};
use crate::error::IdentityError;

pub struct LanguagePreferenceService {
    preferences: Arc<dyn LanguagePreferenceRepository>,
    regions: Arc<dyn RegionLanguageRepository>,
    regional_access_limit: i32,
}

impl LanguagePreferenceService {
    pub fn new(
        preferences: Arc<dyn LanguagePreferenceRepository>,
        regions: Arc<dyn RegionLanguageRepository>,
        regional_access_limit: i32,
    ) -> Self {
        Self {
            preferences,
            regions,
            regional_access_limit,
        }
    }

    pub async fn create(&self, request: LanguagePreferenceRequest) -> AppResult<LanguagePreference> {
        let preference = LanguagePreference::new(request.language_code, request.device_id);
        self.preferences.save(&preference).await?;
        Ok(preference)
    }

    pub async fn get(&self, device_id: &str) -> AppResult<LanguagePreference> {
        self.preferences
            .find_by_device_id(device_id)
            .await?
            .ok_or_else(|| IdentityError::LanguagePreferenceNotFound.into())
    }

    /// 只删除最新一条，较早的记录随之生效
    pub async fn delete(&self, device_id: &str) -> AppResult<LanguagePreference> {
        let preference = self.get(device_id).await?;
        self.preferences.delete_by_id(&preference.id).await?;
        Ok(preference)
    }

    pub async fn create_region_languages(
        &self,
        request: RegionLanguageRequest,
    ) -> AppResult<RegionLanguage> {
        let region = RegionLanguage::new(request.region, request.languages);
        self.regions.save(&region).await?;
        Ok(region)
    }

    /// 读取次数超过上限的记录被删除并返回空列表，其余情况计一次读取
    pub async fn find_region_languages(&self, region: &str) -> AppResult<Vec<RegionLanguage>> {
        let found = self.regions.find_by_region(region).await?;
        let Some(first) = found.first() else {
            return Ok(Vec::new());
        };

        if first.is_stale(self.regional_access_limit) {
            debug!(region, access_count = first.access_count, "Region languages expired");
            self.regions.delete_by_region(region).await?;
            return Ok(Vec::new());
        }

        self.regions.increment_access_count(region).await?;
        Ok(found)
    }
}
