//! PostgreSQL 领域与类目 Repository 实现

use async_trait::async_trait;
use sqlx::PgPool;
use xplor_errors::{AppError, AppResult};

use crate::domain::entities::{Category, Domain};
use crate::domain::repositories::CatalogRepository;

pub struct PostgresCatalogRepository {
    pool: PgPool,
}

impl PostgresCatalogRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl CatalogRepository for PostgresCatalogRepository {
    async fn save_domain(&self, domain: &Domain) -> AppResult<()> {
        sqlx::query(
            "INSERT INTO domains (id, title, domain, description, icon) VALUES ($1, $2, $3, $4, $5)",
        )
        .bind(&domain.id)
        .bind(&domain.title)
        .bind(&domain.domain)
        .bind(&domain.description)
        .bind(&domain.icon)
        .execute(&self.pool)
        .await
        .map_err(|e| AppError::database(format!("Failed to save domain: {}", e)))?;

        Ok(())
    }

    async fn list_domains(&self) -> AppResult<Vec<Domain>> {
        let rows = sqlx::query_as::<_, (String, String, String, String, String)>(
            "SELECT id, title, domain, description, icon FROM domains ORDER BY title ASC",
        )
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::database(format!("Failed to list domains: {}", e)))?;

        Ok(rows.into_iter().map(into_domain).collect())
    }

    async fn find_domains_by_ids(&self, ids: &[String]) -> AppResult<Vec<Domain>> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }

        let rows = sqlx::query_as::<_, (String, String, String, String, String)>(
            "SELECT id, title, domain, description, icon FROM domains WHERE id = ANY($1)",
        )
        .bind(ids)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::database(format!("Failed to find domains: {}", e)))?;

        Ok(rows.into_iter().map(into_domain).collect())
    }

    async fn save_category(&self, category: &Category) -> AppResult<()> {
        sqlx::query("INSERT INTO categories (id, title, value) VALUES ($1, $2, $3)")
            .bind(&category.id)
            .bind(&category.title)
            .bind(&category.value)
            .execute(&self.pool)
            .await
            .map_err(|e| AppError::database(format!("Failed to save category: {}", e)))?;

        Ok(())
    }

    async fn list_categories(&self) -> AppResult<Vec<Category>> {
        let rows = sqlx::query_as::<_, (String, String, String)>(
            "SELECT id, title, value FROM categories ORDER BY title ASC",
        )
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::database(format!("Failed to list categories: {}", e)))?;

        Ok(rows
            .into_iter()
            .map(|(id, title, value)| Category { id, title, value })
            .collect())
    }
}

fn into_domain((id, title, domain, description, icon): (String, String, String, String, String)) -> Domain {
    Domain {
        id,
        title,
        domain,
        description,
        icon,
    }
}
