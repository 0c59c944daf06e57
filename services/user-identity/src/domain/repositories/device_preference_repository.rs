//! 设备偏好 Repository trait

use async_trait::async_trait;
use xplor_errors::AppResult;

use crate::domain::entities::DevicePreference;

#[async_trait]
pub trait DevicePreferenceRepository: Send + Sync {
    async fn find_by_device_id(&self, device_id: &str) -> AppResult<Option<DevicePreference>>;

    async fn save(&self, preference: &DevicePreference) -> AppResult<()>;

    async fn update(&self, preference: &DevicePreference) -> AppResult<()>;

    async fn delete_by_device_id(&self, device_id: &str) -> AppResult<bool>;
}
