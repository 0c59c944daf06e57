//! 领域与类目 Repository trait

use async_trait::async_trait;
use xplor_errors::AppResult;

use crate::domain::entities::{Category, Domain};

#[async_trait]
pub trait CatalogRepository: Send + Sync {
    async fn save_domain(&self, domain: &Domain) -> AppResult<()>;

    async fn list_domains(&self) -> AppResult<Vec<Domain>>;

    async fn find_domains_by_ids(&self, ids: &[String]) -> AppResult<Vec<Domain>>;

    async fn save_category(&self, category: &Category) -> AppResult<()>;

    async fn list_categories(&self) -> AppResult<Vec<Category>>;
}
