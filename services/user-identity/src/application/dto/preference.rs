use serde::{Deserialize, Serialize};

use crate::domain::entities::{DevicePreference, Domain, LanguageShare};

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DevicePreferenceRequest {
    #[serde(default)]
    pub device_id: String,
    #[serde(default)]
    pub language_code: Option<String>,
    #[serde(default)]
    pub role_id: Option<String>,
    #[serde(default)]
    pub domains: Option<Vec<String>>,
    #[serde(default)]
    pub categories: Option<Vec<String>>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DevicePreferenceResponse {
    #[serde(flatten)]
    pub preference: DevicePreference,
    pub domain_data: Vec<Domain>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LanguagePreferenceRequest {
    pub language_code: String,
    pub device_id: String,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeviceIdQuery {
    pub device_id: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RegionLanguageRequest {
    pub region: String,
    pub languages: Vec<LanguageShare>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RegionQuery {
    pub region: String,
}
