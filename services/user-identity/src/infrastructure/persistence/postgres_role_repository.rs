//! PostgreSQL 角色 Repository 实现

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use xplor_common::{RoleId, Timestamps};
use xplor_errors::{AppError, AppResult};

use crate::domain::entities::Role;
use crate::domain::repositories::RoleRepository;

pub struct PostgresRoleRepository {
    pool: PgPool,
}

impl PostgresRoleRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl RoleRepository for PostgresRoleRepository {
    async fn find_by_id(&self, id: &RoleId) -> AppResult<Option<Role>> {
        let row = sqlx::query_as::<_, RoleRow>(
            "SELECT id, type, title, description, image_url, created_at, updated_at FROM roles WHERE id = $1",
        )
        .bind(id.as_str())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::database(format!("Failed to find role: {}", e)))?;

        Ok(row.map(RoleRow::into_role))
    }

    async fn find_all(&self) -> AppResult<Vec<Role>> {
        let rows = sqlx::query_as::<_, RoleRow>(
            "SELECT id, type, title, description, image_url, created_at, updated_at FROM roles ORDER BY created_at ASC",
        )
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::database(format!("Failed to list roles: {}", e)))?;

        Ok(rows.into_iter().map(RoleRow::into_role).collect())
    }

    async fn save(&self, role: &Role) -> AppResult<()> {
        sqlx::query(
            r#"
            INSERT INTO roles (id, type, title, description, image_url, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            "#,
        )
        .bind(role.id.as_str())
        .bind(&role.role_type)
        .bind(&role.title)
        .bind(&role.description)
        .bind(&role.image_url)
        .bind(role.timestamps.created_at)
        .bind(role.timestamps.updated_at)
        .execute(&self.pool)
        .await
        .map_err(|e| AppError::database(format!("Failed to save role: {}", e)))?;

        Ok(())
    }

    async fn update(&self, role: &Role) -> AppResult<()> {
        sqlx::query(
            r#"
            UPDATE roles SET type = $2, title = $3, description = $4, image_url = $5, updated_at = $6
            WHERE id = $1
            "#,
        )
        .bind(role.id.as_str())
        .bind(&role.role_type)
        .bind(&role.title)
        .bind(&role.description)
        .bind(&role.image_url)
        .bind(role.timestamps.updated_at)
        .execute(&self.pool)
        .await
        .map_err(|e| AppError::database(format!("Failed to update role: {}", e)))?;

        Ok(())
    }

    async fn delete(&self, id: &RoleId) -> AppResult<bool> {
        let result = sqlx::query("DELETE FROM roles WHERE id = $1")
            .bind(id.as_str())
            .execute(&self.pool)
            .await
            .map_err(|e| AppError::database(format!("Failed to delete role: {}", e)))?;

        Ok(result.rows_affected() > 0)
    }

    async fn count(&self) -> AppResult<i64> {
        sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM roles")
            .fetch_one(&self.pool)
            .await
            .map_err(|e| AppError::database(format!("Failed to count roles: {}", e)))
    }
}

#[derive(sqlx::FromRow)]
struct RoleRow {
    id: String,
    #[sqlx(rename = "type")]
    role_type: String,
    title: String,
    description: String,
    image_url: String,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl RoleRow {
    fn into_role(self) -> Role {
        Role {
            id: RoleId::from_string(self.id),
            role_type: self.role_type,
            title: self.title,
            description: self.description,
            image_url: self.image_url,
            timestamps: Timestamps {
                created_at: self.created_at,
                updated_at: self.updated_at,
            },
        }
    }
}
