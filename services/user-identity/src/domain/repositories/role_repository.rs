//! 角色 Repository trait

use async_trait::async_trait;
use xplor_common::RoleId;
use xplor_errors::AppResult;

use crate::domain::entities::Role;

#[async_trait]
pub trait RoleRepository: Send + Sync {
    async fn find_by_id(&self, id: &RoleId) -> AppResult<Option<Role>>;

    async fn find_all(&self) -> AppResult<Vec<Role>>;

    async fn save(&self, role: &Role) -> AppResult<()>;

    async fn update(&self, role: &Role) -> AppResult<()>;

    async fn delete(&self, id: &RoleId) -> AppResult<bool>;

    async fn count(&self) -> AppResult<i64>;
}
