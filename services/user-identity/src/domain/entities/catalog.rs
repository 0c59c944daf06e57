//! 领域与类目

use serde::{Deserialize, Serialize};
use xplor_common::prefixed_id;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Domain {
    pub id: String,
    pub title: String,
    pub domain: String,
    pub description: String,
    pub icon: String,
}

impl Domain {
    pub fn new(
        title: impl Into<String>,
        domain: impl Into<String>,
        description: impl Into<String>,
        icon: impl Into<String>,
    ) -> Self {
        Self {
            id: prefixed_id("domain"),
            title: title.into(),
            domain: domain.into(),
            description: description.into(),
            icon: icon.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Category {
    pub id: String,
    pub title: String,
    pub value: String,
}

impl Category {
    pub fn new(title: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            id: prefixed_id("category"),
            title: title.into(),
            value: value.into(),
        }
    }
}
