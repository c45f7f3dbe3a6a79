pub mod entities;
pub mod migrator;
pub mod repositories;

use sea_orm::{
    ActiveModelTrait, Database, DatabaseConnection, DbErr, EntityTrait, PaginatorTrait, Set,
};
use tracing::{info, warn};

use crate::config::AdminSeedConfig;
use crate::infrastructure::crypto::password::hash_password;

use entities::user::{self, UserRole};

/// Database configuration
#[derive(Debug, Clone)]
pub struct DatabaseConfig {
    /// Database URL (e.g., "sqlite://./store_ratings.db?mode=rwc")
    pub url: String,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            url: "sqlite://./store_ratings.db?mode=rwc".to_string(),
        }
    }
}

impl DatabaseConfig {
    /// Create config for SQLite
    pub fn sqlite(path: &str) -> Self {
        Self {
            url: format!("sqlite://{}?mode=rwc", path),
        }
    }

    /// Create config from environment variable
    pub fn from_env() -> Self {
        Self {
            url: std::env::var("DATABASE_URL")
                .unwrap_or_else(|_| "sqlite://./store_ratings.db?mode=rwc".to_string()),
        }
    }
}

/// Initialize database connection
pub async fn init_database(config: &DatabaseConfig) -> Result<DatabaseConnection, DbErr> {
    info!("Connecting to database: {}", config.url);
    let db = Database::connect(&config.url).await?;
    info!("Database connected successfully");
    Ok(db)
}

/// Create the default admin user if the users table is empty.
///
/// Guarantees a fresh deployment is usable without an external seed: the
/// admin is retrievable by the configured seed email afterwards.
pub async fn seed_default_admin(
    db: &DatabaseConnection,
    seed: &AdminSeedConfig,
) -> Result<(), DbErr> {
    let users_count = user::Entity::find().count(db).await?;
    if users_count > 0 {
        return Ok(());
    }

    info!("No users found, creating default admin user...");

    let password_hash = hash_password(&seed.password)
        .map_err(|e| DbErr::Custom(format!("Failed to hash admin password: {}", e)))?;

    let now = chrono::Utc::now();
    let admin = user::ActiveModel {
        id: Set(uuid::Uuid::new_v4().to_string()),
        name: Set(seed.name.clone()),
        email: Set(seed.email.clone()),
        password_hash: Set(password_hash),
        address: Set(seed.address.clone()),
        role: Set(UserRole::Admin),
        created_at: Set(now),
        updated_at: Set(now),
    };

    admin.insert(db).await?;
    info!("Default admin created: {}", seed.email);
    warn!("Please change the admin password immediately!");

    Ok(())
}
