//! PostgreSQL 设备偏好 Repository 实现

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use xplor_common::Timestamps;
use xplor_errors::{AppError, AppResult};

use crate::domain::entities::DevicePreference;
use crate::domain::repositories::DevicePreferenceRepository;
use crate::error::IdentityError;

pub struct PostgresDevicePreferenceRepository {
    pool: PgPool,
}

impl PostgresDevicePreferenceRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl DevicePreferenceRepository for PostgresDevicePreferenceRepository {
    async fn find_by_device_id(&self, device_id: &str) -> AppResult<Option<DevicePreference>> {
        let row = sqlx::query_as::<_, DevicePreferenceRow>(
            r#"
            SELECT id, device_id, language_code, role_id, domains, categories, created_at, updated_at
            FROM device_preferences
            WHERE device_id = $1
            "#,
        )
        .bind(device_id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::database(format!("Failed to find device preference: {}", e)))?;

        Ok(row.map(DevicePreferenceRow::into_preference))
    }

    async fn save(&self, preference: &DevicePreference) -> AppResult<()> {
        sqlx::query(
            r#"
            INSERT INTO device_preferences (id, device_id, language_code, role_id, domains, categories,
                                            created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            "#,
        )
        .bind(&preference.id)
        .bind(&preference.device_id)
        .bind(&preference.language_code)
        .bind(&preference.role_id)
        .bind(&preference.domains)
        .bind(&preference.categories)
        .bind(preference.timestamps.created_at)
        .bind(preference.timestamps.updated_at)
        .execute(&self.pool)
        .await
        .map_err(|e| match &e {
            // 并发创建同一设备时与预检查给出相同的错误
            sqlx::Error::Database(db) if db.is_unique_violation() => {
                AppError::from(IdentityError::DevicePreferenceExists)
            }
            _ => AppError::database(format!("Failed to save device preference: {}", e)),
        })?;

        Ok(())
    }

    async fn update(&self, preference: &DevicePreference) -> AppResult<()> {
        sqlx::query(
            r#"
            UPDATE device_preferences SET
                language_code = $2, role_id = $3, domains = $4, categories = $5, updated_at = $6
            WHERE device_id = $1
            "#,
        )
        .bind(&preference.device_id)
        .bind(&preference.language_code)
        .bind(&preference.role_id)
        .bind(&preference.domains)
        .bind(&preference.categories)
        .bind(preference.timestamps.updated_at)
        .execute(&self.pool)
        .await
        .map_err(|e| AppError::database(format!("Failed to update device preference: {}", e)))?;

        Ok(())
    }

    async fn delete_by_device_id(&self, device_id: &str) -> AppResult<bool> {
        let result = sqlx::query("DELETE FROM device_preferences WHERE device_id = $1")
            .bind(device_id)
            .execute(&self.pool)
            .await
            .map_err(|e| {
                AppError::database(format!("Failed to delete device preference: {}", e))
            })?;

        Ok(result.rows_affected() > 0)
    }
}

#[derive(sqlx::FromRow)]
struct DevicePreferenceRow {
    id: String,
    device_id: String,
    language_code: Option<String>,
    role_id: Option<String>,
    domains: Vec<String>,
    categories: Vec<String>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl DevicePreferenceRow {
    fn into_preference(self) -> DevicePreference {
        DevicePreference {
            id: self.id,
            device_id: self.device_id,
            language_code: self.language_code,
            role_id: self.role_id,
            domains: self.domains,
            categories: self.categories,
            timestamps: Timestamps {
                created_at: self.created_at,
                updated_at: self.updated_at,
            },
        }
    }
}
