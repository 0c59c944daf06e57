//! PostgreSQL 持久化实现

mod migrations;
mod postgres_catalog_repository;
mod postgres_device_preference_repository;
mod postgres_language_preference_repository;
mod postgres_role_repository;
mod postgres_user_repository;

pub use migrations::{migrations, run_migrations};
pub use postgres_catalog_repository::PostgresCatalogRepository;
pub use postgres_device_preference_repository::PostgresDevicePreferenceRepository;
pub use postgres_language_preference_repository::{
    PostgresLanguagePreferenceRepository, PostgresRegionLanguageRepository,
};
pub use postgres_role_repository::PostgresRoleRepository;
pub use postgres_user_repository::PostgresUserRepository;

use xplor_errors::AppError;

/// 唯一约束冲突映射为 Conflict，其余为数据库错误
fn map_write_error(err: sqlx::Error, context: &str, conflict_message: &str) -> AppError {
    match &err {
        sqlx::Error::Database(db) if db.is_unique_violation() => {
            AppError::conflict(conflict_message)
        }
        _ => AppError::database(format!("{}: {}", context, err)),
    }
}
