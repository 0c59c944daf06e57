//! 表结构迁移

use sqlx::PgPool;
use tracing::info;
use xplor_adapter_postgres::{Migration, MigrationManager};
use xplor_errors::AppResult;

const CREATE_ROLES: &str = r#"
CREATE TABLE IF NOT EXISTS roles (
    id TEXT PRIMARY KEY,
    type TEXT NOT NULL,
    title TEXT NOT NULL,
    description TEXT NOT NULL,
    image_url TEXT NOT NULL,
    created_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),
    updated_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
);
"#;

const CREATE_USERS: &str = r#"
CREATE TABLE IF NOT EXISTS users (
    id TEXT PRIMARY KEY,
    phone_number TEXT NOT NULL UNIQUE,
    verified BOOLEAN NOT NULL DEFAULT FALSE,
    kyc_status BOOLEAN NOT NULL DEFAULT FALSE,
    persona JSONB,
    role_id TEXT,
    kyc JSONB,
    wallet TEXT,
    mpin_hash TEXT,
    language_preference TEXT,
    domains TEXT[] NOT NULL DEFAULT '{}',
    categories TEXT[] NOT NULL DEFAULT '{}',
    country_code TEXT,
    refresh_token TEXT,
    access_token_expiry TIMESTAMPTZ,
    refresh_token_expiry TIMESTAMPTZ,
    created_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),
    updated_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
);
"#;

const CREATE_PREFERENCES: &str = r#"
CREATE TABLE IF NOT EXISTS device_preferences (
    id TEXT PRIMARY KEY,
    device_id TEXT NOT NULL UNIQUE,
    language_code TEXT,
    role_id TEXT,
    domains TEXT[] NOT NULL DEFAULT '{}',
    categories TEXT[] NOT NULL DEFAULT '{}',
    created_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),
    updated_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
);

CREATE TABLE IF NOT EXISTS language_preferences (
    id TEXT PRIMARY KEY,
    language_code TEXT NOT NULL,
    device_id TEXT NOT NULL,
    created_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),
    updated_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
);
CREATE INDEX IF NOT EXISTS idx_language_preferences_device_id ON language_preferences (device_id);

CREATE TABLE IF NOT EXISTS region_languages (
    id TEXT PRIMARY KEY,
    region TEXT NOT NULL,
    languages JSONB NOT NULL DEFAULT '[]',
    access_count INTEGER NOT NULL DEFAULT 1,
    created_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),
    updated_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
);
CREATE INDEX IF NOT EXISTS idx_region_languages_region ON region_languages (region);
"#;

const CREATE_CATALOG: &str = r#"
CREATE TABLE IF NOT EXISTS domains (
    id TEXT PRIMARY KEY,
    title TEXT NOT NULL,
    domain TEXT NOT NULL,
    description TEXT NOT NULL,
    icon TEXT NOT NULL
);

CREATE TABLE IF NOT EXISTS categories (
    id TEXT PRIMARY KEY,
    title TEXT NOT NULL,
    value TEXT NOT NULL
);
"#;

pub fn migrations() -> Vec<Migration> {
    vec![
        Migration::new(1, "create_roles", CREATE_ROLES),
        Migration::new(2, "create_users", CREATE_USERS),
        Migration::new(3, "create_preferences", CREATE_PREFERENCES),
        Migration::new(4, "create_catalog", CREATE_CATALOG),
    ]
}

pub async fn run_migrations(pool: PgPool) -> AppResult<()> {
    let applied = MigrationManager::new(pool).migrate(&migrations()).await?;
    info!(applied, "Database migrations complete");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_versions_are_unique_and_ordered() {
        let versions: Vec<i64> = migrations().iter().map(|m| m.version).collect();
        let mut sorted = versions.clone();
        sorted.sort();
        sorted.dedup();
        assert_eq!(versions, sorted);
    }
}
