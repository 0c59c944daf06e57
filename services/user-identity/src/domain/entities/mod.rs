//! 领域实体

mod catalog;
mod device_preference;
mod language_preference;
mod role;
mod user;

pub use catalog::{Category, Domain};
pub use device_preference::DevicePreference;
pub use language_preference::{LanguagePreference, LanguageShare, RegionLanguage};
pub use role::{Role, default_roles};
pub use user::{Attribute, Journey, Kyc, Persona, Provider, User};
