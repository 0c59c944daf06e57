//! 设备偏好实体（登录前按设备保存的选择）

use serde::{Deserialize, Serialize};
use xplor_common::{Timestamps, prefixed_id};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DevicePreference {
    pub id: String,
    pub device_id: String,
    pub language_code: Option<String>,
    pub role_id: Option<String>,
    #[serde(default)]
    pub domains: Vec<String>,
    #[serde(default)]
    pub categories: Vec<String>,
    #[serde(flatten)]
    pub timestamps: Timestamps,
}

impl DevicePreference {
    pub fn new(device_id: impl Into<String>) -> Self {
        Self {
            id: prefixed_id("device"),
            device_id: device_id.into(),
            language_code: None,
            role_id: None,
            domains: Vec::new(),
            categories: Vec::new(),
            timestamps: Timestamps::now(),
        }
    }
}
