//! PostgreSQL 语言偏好与区域语言 Repository 实现

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use sqlx::types::Json;
use xplor_common::Timestamps;
use xplor_errors::{AppError, AppResult};

use crate::domain::entities::{LanguagePreference, LanguageShare, RegionLanguage};
use crate::domain::repositories::{LanguagePreferenceRepository, RegionLanguageRepository};

pub struct PostgresLanguagePreferenceRepository {
    pool: PgPool,
}

impl PostgresLanguagePreferenceRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl LanguagePreferenceRepository for PostgresLanguagePreferenceRepository {
    async fn save(&self, preference: &LanguagePreference) -> AppResult<()> {
        sqlx::query(
            r#"
            INSERT INTO language_preferences (id, language_code, device_id, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5)
            "#,
        )
        .bind(&preference.id)
        .bind(&preference.language_code)
        .bind(&preference.device_id)
        .bind(preference.timestamps.created_at)
        .bind(preference.timestamps.updated_at)
        .execute(&self.pool)
        .await
        .map_err(|e| AppError::database(format!("Failed to save language preference: {}", e)))?;

        Ok(())
    }

    async fn find_by_device_id(&self, device_id: &str) -> AppResult<Option<LanguagePreference>> {
        let row = sqlx::query_as::<_, LanguagePreferenceRow>(
            r#"
            SELECT id, language_code, device_id, created_at, updated_at
            FROM language_preferences
            WHERE device_id = $1
            ORDER BY created_at DESC
            LIMIT 1
            "#,
        )
        .bind(device_id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::database(format!("Failed to find language preference: {}", e)))?;

        Ok(row.map(|r| LanguagePreference {
            id: r.id,
            language_code: r.language_code,
            device_id: r.device_id,
            timestamps: Timestamps {
                created_at: r.created_at,
                updated_at: r.updated_at,
            },
        }))
    }

    async fn delete_by_id(&self, id: &str) -> AppResult<bool> {
        let result = sqlx::query("DELETE FROM language_preferences WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e| {
                AppError::database(format!("Failed to delete language preference: {}", e))
            })?;

        Ok(result.rows_affected() > 0)
    }
}

#[derive(sqlx::FromRow)]
struct LanguagePreferenceRow {
    id: String,
    language_code: String,
    device_id: String,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

pub struct PostgresRegionLanguageRepository {
    pool: PgPool,
}

impl PostgresRegionLanguageRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl RegionLanguageRepository for PostgresRegionLanguageRepository {
    async fn save(&self, region: &RegionLanguage) -> AppResult<()> {
        sqlx::query(
            r#"
            INSERT INTO region_languages (id, region, languages, access_count, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6)
            "#,
        )
        .bind(&region.id)
        .bind(&region.region)
        .bind(Json(&region.languages))
        .bind(region.access_count)
        .bind(region.timestamps.created_at)
        .bind(region.timestamps.updated_at)
        .execute(&self.pool)
        .await
        .map_err(|e| AppError::database(format!("Failed to save region languages: {}", e)))?;

        Ok(())
    }

    async fn find_by_region(&self, region: &str) -> AppResult<Vec<RegionLanguage>> {
        let rows = sqlx::query_as::<_, RegionLanguageRow>(
            r#"
            SELECT id, region, languages, access_count, created_at, updated_at
            FROM region_languages
            WHERE region = $1
            ORDER BY created_at ASC
            "#,
        )
        .bind(region)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::database(format!("Failed to find region languages: {}", e)))?;

        Ok(rows
            .into_iter()
            .map(|r| RegionLanguage {
                id: r.id,
                region: r.region,
                languages: r.languages.0,
                access_count: r.access_count,
                timestamps: Timestamps {
                    created_at: r.created_at,
                    updated_at: r.updated_at,
                },
            })
            .collect())
    }

    /// 只删除该区域最早的一条记录
    async fn delete_by_region(&self, region: &str) -> AppResult<()> {
        sqlx::query(
            r#"
            DELETE FROM region_languages
            WHERE id = (SELECT id FROM region_languages WHERE region = $1 ORDER BY created_at ASC LIMIT 1)
            "#,
        )
        .bind(region)
        .execute(&self.pool)
        .await
        .map_err(|e| AppError::database(format!("Failed to delete region languages: {}", e)))?;

        Ok(())
    }

    async fn increment_access_count(&self, region: &str) -> AppResult<()> {
        sqlx::query(
            r#"
            UPDATE region_languages SET access_count = access_count + 1, updated_at = NOW()
            WHERE id = (SELECT id FROM region_languages WHERE region = $1 ORDER BY created_at ASC LIMIT 1)
            "#,
        )
        .bind(region)
        .execute(&self.pool)
        .await
        .map_err(|e| AppError::database(format!("Failed to update region languages: {}", e)))?;

        Ok(())
    }
}

#[derive(sqlx::FromRow)]
struct RegionLanguageRow {
    id: String,
    region: String,
    languages: Json<Vec<LanguageShare>>,
    access_count: i32,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}
