//! PostgreSQL 用户 Repository 实现

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use sqlx::types::Json;
use xplor_common::{RoleId, Timestamps, UserId};
use xplor_errors::{AppError, AppResult};

use super::map_write_error;
use crate::domain::entities::{Kyc, Persona, User};
use crate::domain::repositories::UserRepository;
use crate::domain::value_objects::HashedMpin;

const USER_COLUMNS: &str = r#"
    id, phone_number, verified, kyc_status, persona, role_id, kyc, wallet, mpin_hash,
    language_preference, domains, categories, country_code, refresh_token,
    access_token_expiry, refresh_token_expiry, created_at, updated_at
"#;

pub struct PostgresUserRepository {
    pool: PgPool,
}

impl PostgresUserRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl UserRepository for PostgresUserRepository {
    async fn find_by_id(&self, id: &UserId) -> AppResult<Option<User>> {
        let sql = format!("SELECT {} FROM users WHERE id = $1", USER_COLUMNS);
        let row = sqlx::query_as::<_, UserRow>(&sql)
            .bind(id.as_str())
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| AppError::database(format!("Failed to find user: {}", e)))?;

        Ok(row.map(UserRow::into_user))
    }

    async fn find_by_phone(&self, phone_number: &str) -> AppResult<Option<User>> {
        let sql = format!("SELECT {} FROM users WHERE phone_number = $1", USER_COLUMNS);
        let row = sqlx::query_as::<_, UserRow>(&sql)
            .bind(phone_number)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| AppError::database(format!("Failed to find user: {}", e)))?;

        Ok(row.map(UserRow::into_user))
    }

    async fn find_all(&self) -> AppResult<Vec<User>> {
        let sql = format!("SELECT {} FROM users ORDER BY created_at ASC", USER_COLUMNS);
        let rows = sqlx::query_as::<_, UserRow>(&sql)
            .fetch_all(&self.pool)
            .await
            .map_err(|e| AppError::database(format!("Failed to list users: {}", e)))?;

        Ok(rows.into_iter().map(UserRow::into_user).collect())
    }

    async fn save(&self, user: &User) -> AppResult<()> {
        sqlx::query(
            r#"
            INSERT INTO users (id, phone_number, verified, kyc_status, persona, role_id, kyc, wallet,
                               mpin_hash, language_preference, domains, categories, country_code,
                               refresh_token, access_token_expiry, refresh_token_expiry,
                               created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14, $15, $16, $17, $18)
            "#,
        )
        .bind(user.id.as_str())
        .bind(&user.phone_number)
        .bind(user.verified)
        .bind(user.kyc_status)
        .bind(user.persona.as_ref().map(Json))
        .bind(user.role.as_ref().map(|r| r.as_str()))
        .bind(user.kyc.as_ref().map(Json))
        .bind(&user.wallet)
        .bind(user.mpin.as_ref().map(|m| m.as_str()))
        .bind(&user.language_preference)
        .bind(&user.domains)
        .bind(&user.categories)
        .bind(&user.country_code)
        .bind(&user.refresh_token)
        .bind(user.access_token_expiry)
        .bind(user.refresh_token_expiry)
        .bind(user.timestamps.created_at)
        .bind(user.timestamps.updated_at)
        .execute(&self.pool)
        .await
        .map_err(|e| {
            map_write_error(
                e,
                "Failed to save user",
                "User with this phone number already exists",
            )
        })?;

        Ok(())
    }

    async fn update(&self, user: &User) -> AppResult<()> {
        sqlx::query(
            r#"
            UPDATE users SET
                phone_number = $2, verified = $3, kyc_status = $4, persona = $5, role_id = $6,
                kyc = $7, wallet = $8, mpin_hash = $9, language_preference = $10, domains = $11,
                categories = $12, country_code = $13, refresh_token = $14,
                access_token_expiry = $15, refresh_token_expiry = $16, updated_at = $17
            WHERE id = $1
            "#,
        )
        .bind(user.id.as_str())
        .bind(&user.phone_number)
        .bind(user.verified)
        .bind(user.kyc_status)
        .bind(user.persona.as_ref().map(Json))
        .bind(user.role.as_ref().map(|r| r.as_str()))
        .bind(user.kyc.as_ref().map(Json))
        .bind(&user.wallet)
        .bind(user.mpin.as_ref().map(|m| m.as_str()))
        .bind(&user.language_preference)
        .bind(&user.domains)
        .bind(&user.categories)
        .bind(&user.country_code)
        .bind(&user.refresh_token)
        .bind(user.access_token_expiry)
        .bind(user.refresh_token_expiry)
        .bind(user.timestamps.updated_at)
        .execute(&self.pool)
        .await
        .map_err(|e| {
            map_write_error(
                e,
                "Failed to update user",
                "User with this phone number already exists",
            )
        })?;

        Ok(())
    }

    async fn delete(&self, id: &UserId) -> AppResult<bool> {
        let result = sqlx::query("DELETE FROM users WHERE id = $1")
            .bind(id.as_str())
            .execute(&self.pool)
            .await
            .map_err(|e| AppError::database(format!("Failed to delete user: {}", e)))?;

        Ok(result.rows_affected() > 0)
    }
}

#[derive(sqlx::FromRow)]
struct UserRow {
    id: String,
    phone_number: String,
    verified: bool,
    kyc_status: bool,
    persona: Option<Json<Persona>>,
    role_id: Option<String>,
    kyc: Option<Json<Kyc>>,
    wallet: Option<String>,
    mpin_hash: Option<String>,
    language_preference: Option<String>,
    domains: Vec<String>,
    categories: Vec<String>,
    country_code: Option<String>,
    refresh_token: Option<String>,
    access_token_expiry: Option<DateTime<Utc>>,
    refresh_token_expiry: Option<DateTime<Utc>>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl UserRow {
    fn into_user(self) -> User {
        User {
            id: UserId::from_string(self.id),
            phone_number: self.phone_number,
            verified: self.verified,
            kyc_status: self.kyc_status,
            persona: self.persona.map(|p| p.0),
            role: self.role_id.map(RoleId::from_string),
            kyc: self.kyc.map(|k| k.0),
            wallet: self.wallet,
            mpin: self.mpin_hash.map(HashedMpin::from_hash),
            language_preference: self.language_preference,
            domains: self.domains,
            categories: self.categories,
            country_code: self.country_code,
            refresh_token: self.refresh_token,
            access_token_expiry: self.access_token_expiry,
            refresh_token_expiry: self.refresh_token_expiry,
            timestamps: Timestamps {
                created_at: self.created_at,
                updated_at: self.updated_at,
            },
        }
    }
}
