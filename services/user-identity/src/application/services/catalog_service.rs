//! 领域与类目服务

use std::sync::Arc;

use xplor_errors::AppResult;

use crate::application::dto::{CreateCategoryRequest, CreateDomainRequest};
use crate::domain::entities::{Category, Domain};
use crate::domain::repositories::CatalogRepository;

pub struct CatalogService {
    catalog: Arc<dyn CatalogRepository>,
}

impl CatalogService {
    pub fn new(catalog: Arc<dyn CatalogRepository>) -> Self {
        Self { catalog }
    }

    pub async fn create_domain(&self, request: CreateDomainRequest) -> AppResult<Domain> {
        let domain = Domain::new(
            request.title,
            request.domain,
            request.description,
            request.icon,
        );
        self.catalog.save_domain(&domain).await?;
        Ok(domain)
    }

    pub async fn list_domains(&self) -> AppResult<Vec<Domain>> {
        self.catalog.list_domains().await
    }

    pub async fn domains_by_ids(&self, ids: &[String]) -> AppResult<Vec<Domain>> {
        self.catalog.find_domains_by_ids(ids).await
    }

    pub async fn create_category(&self, request: CreateCategoryRequest) -> AppResult<Category> {
        let category = Category::new(request.title, request.value);
        self.catalog.save_category(&category).await?;
        Ok(category)
    }

    pub async fn list_categories(&self) -> AppResult<Vec<Category>> {
        self.catalog.list_categories().await
    }
}
