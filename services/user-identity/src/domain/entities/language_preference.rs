//! 语言偏好与区域语言

use serde::{Deserialize, Serialize};
use xplor_common::{Timestamps, prefixed_id};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LanguagePreference {
    pub id: String,
    pub language_code: String,
    pub device_id: String,
    #[serde(flatten)]
    pub timestamps: Timestamps,
}

impl LanguagePreference {
    pub fn new(language_code: impl Into<String>, device_id: impl Into<String>) -> Self {
        Self {
            id: prefixed_id("language"),
            language_code: language_code.into(),
            device_id: device_id.into(),
            timestamps: Timestamps::now(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LanguageShare {
    pub language: String,
    pub percentage: String,
}

/// 区域常用语言，读取次数超过上限后失效
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegionLanguage {
    pub id: String,
    pub region: String,
    pub languages: Vec<LanguageShare>,
    pub access_count: i32,
    #[serde(flatten)]
    pub timestamps: Timestamps,
}

impl RegionLanguage {
    pub fn new(region: impl Into<String>, languages: Vec<LanguageShare>) -> Self {
        Self {
            id: prefixed_id("region"),
            region: region.into(),
            languages,
            access_count: 1,
            timestamps: Timestamps::now(),
        }
    }

    pub fn is_stale(&self, access_limit: i32) -> bool {
        self.access_count > access_limit
    }
}
