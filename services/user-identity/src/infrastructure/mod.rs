pub mod cache;
pub mod observability;
pub mod persistence;
