//! 语言偏好与区域语言 Repository trait

use async_trait::async_trait;
use xplor_errors::AppResult;

use crate::domain::entities::{LanguagePreference, RegionLanguage};

#[async_trait]
pub trait LanguagePreferenceRepository: Send + Sync {
    async fn save(&self, preference: &LanguagePreference) -> AppResult<()>;

    /// 同一设备有多条记录时返回最新一条
    async fn find_by_device_id(&self, device_id: &str) -> AppResult<Option<LanguagePreference>>;

    async fn delete_by_id(&self, id: &str) -> AppResult<bool>;
}

#[async_trait]
pub trait RegionLanguageRepository: Send + Sync {
    async fn save(&self, region: &RegionLanguage) -> AppResult<()>;

    async fn find_by_region(&self, region: &str) -> AppResult<Vec<RegionLanguage>>;

    async fn delete_by_region(&self, region: &str) -> AppResult<()>;

    async fn increment_access_count(&self, region: &str) -> AppResult<()>;
}
