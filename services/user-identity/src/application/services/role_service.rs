//! 角色服务

use std::sync::Arc;

use tracing::info;
use xplor_common::RoleId;
use xplor_errors::AppResult;

use crate::application::dto::{CreateRoleRequest, UpdateRoleRequest};
use crate::domain::entities::{Role, default_roles};
use crate::domain::repositories::RoleRepository;
use crate::error::IdentityError;

pub struct RoleService {
    roles: Arc<dyn RoleRepository>,
}

impl RoleService {
    pub fn new(roles: Arc<dyn RoleRepository>) -> Self {
        Self { roles }
    }

    /// 角色表为空时写入默认角色，返回写入数量
    pub async fn seed_defaults(&self) -> AppResult<usize> {
        if self.roles.count().await? > 0 {
            return Ok(0);
        }

        let roles = default_roles();
        for role in &roles {
            self.roles.save(role).await?;
        }
        info!(count = roles.len(), "Default roles seeded");
        Ok(roles.len())
    }

    pub async fn create(&self, request: CreateRoleRequest) -> AppResult<Role> {
        let role = Role::new(
            request.role_type,
            request.title,
            request.description,
            request.image_url,
        );
        self.roles.save(&role).await?;
        Ok(role)
    }

    pub async fn find_all(&self) -> AppResult<Vec<Role>> {
        self.roles.find_all().await
    }

    pub async fn find_one(&self, id: &RoleId) -> AppResult<Role> {
        self.roles
            .find_by_id(id)
            .await?
            .ok_or_else(|| IdentityError::RoleNotFound.into())
    }

    pub async fn update(&self, id: &RoleId, request: UpdateRoleRequest) -> AppResult<Role> {
        let mut role = self.find_one(id).await?;
        if let Some(role_type) = request.role_type {
            role.role_type = role_type;
        }
        if let Some(title) = request.title {
            role.title = title;
        }
        if let Some(description) = request.description {
            role.description = description;
        }
        if let Some(image_url) = request.image_url {
            role.image_url = image_url;
        }
        role.timestamps.touch();

        self.roles.update(&role).await?;
        Ok(role)
    }

    pub async fn remove(&self, id: &RoleId) -> AppResult<Role> {
        let role = self.find_one(id).await?;
        self.roles.delete(id).await?;
        Ok(role)
    }
}
