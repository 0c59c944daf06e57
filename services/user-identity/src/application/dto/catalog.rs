use serde::Deserialize;

#[derive(Debug, Clone, Deserialize)]
pub struct CreateDomainRequest {
    pub title: String,
    pub domain: String,
    pub description: String,
    pub icon: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CreateCategoryRequest {
    pub title: String,
    pub value: String,
}
