//! 仓储 trait

mod catalog_repository;
mod device_preference_repository;
mod language_preference_repository;
mod role_repository;
mod user_repository;

pub use catalog_repository::CatalogRepository;
pub use device_preference_repository::DevicePreferenceRepository;
pub use language_preference_repository::{LanguagePreferenceRepository, RegionLanguageRepository};
pub use role_repository::RoleRepository;
pub use user_repository::UserRepository;
