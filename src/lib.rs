//! # Store Ratings Service
//!
//! Role-based store rating backend: users browse and rate stores, store
//! owners track their store's performance, administrators manage users and
//! stores and view analytics.
//!
//! ## Architecture
//!
//! The project follows Clean Architecture principles:
//!
//! - **domain**: Core business entities, DTOs and repository traits
//! - **application**: Use-case services (identity, catalog, ratings)
//! - **infrastructure**: External concerns (database, crypto)
//! - **interfaces**: REST API with Swagger documentation
//! - **shared**: Error taxonomy, pagination, validation, shutdown

pub mod application;
pub mod config;
pub mod domain;
pub mod infrastructure;
pub mod interfaces;
pub mod shared;

pub use config::{default_config_path, AppConfig};

// Re-export database types for easy access
pub use infrastructure::database::{init_database, seed_default_admin, DatabaseConfig};

// Re-export API router
pub use interfaces::http::create_api_router;
