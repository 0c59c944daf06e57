//! 角色实体

use serde::{Deserialize, Serialize};
use xplor_common::{RoleId, Timestamps};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Role {
    pub id: RoleId,
    #[serde(rename = "type")]
    pub role_type: String,
    pub title: String,
    pub description: String,
    pub image_url: String,
    #[serde(flatten)]
    pub timestamps: Timestamps,
}

impl Role {
    pub fn new(
        role_type: impl Into<String>,
        title: impl Into<String>,
        description: impl Into<String>,
        image_url: impl Into<String>,
    ) -> Self {
        Self {
            id: RoleId::new(),
            role_type: role_type.into(),
            title: title.into(),
            description: description.into(),
            image_url: image_url.into(),
            timestamps: Timestamps::now(),
        }
    }
}

/// 首次启动时写入的角色
pub fn default_roles() -> Vec<Role> {
    vec![
        Role::new(
            "AGENT",
            "I am an Agent",
            "An intermediary who helps in the distribution of the service",
            "assets/images/i_am_agent.png",
        ),
        Role::new(
            "SEEKER",
            "I am a Seeker",
            "Individual who is seeking for the service.",
            "assets/images/i_am_seeker.png",
        ),
    ]
}
