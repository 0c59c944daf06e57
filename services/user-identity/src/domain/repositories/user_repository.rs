//! 用户 Repository trait

use async_trait::async_trait;
use xplor_common::UserId;
use xplor_errors::AppResult;

use crate::domain::entities::User;

#[async_trait]
pub trait UserRepository: Send + Sync {
    async fn find_by_id(&self, id: &UserId) -> AppResult<Option<User>>;

    /// 手机号需已去除空格
    async fn find_by_phone(&self, phone_number: &str) -> AppResult<Option<User>>;

    async fn find_all(&self) -> AppResult<Vec<User>>;

    /// 插入新用户；手机号重复时返回 Conflict
    async fn save(&self, user: &User) -> AppResult<()>;

    async fn update(&self, user: &User) -> AppResult<()>;

    /// 返回是否删除了记录
    async fn delete(&self, id: &UserId) -> AppResult<bool>;
}
