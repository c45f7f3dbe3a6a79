//! Infrastructure layer - external concerns

pub mod crypto;
pub mod database;

pub use database::{init_database, seed_default_admin, DatabaseConfig};
