//!
//! Role-based store rating backend.
//! Reads configuration from TOML file (~/.config/store-ratings/config.toml).

use std::sync::Arc;

use sea_orm_migration::MigratorTrait;
use tracing::{error, info, warn};

use store_ratings::application::{RatingService, StoreService, UserService};
use store_ratings::infrastructure::crypto::jwt::JwtConfig;
use store_ratings::infrastructure::database::migrator::Migrator;
use store_ratings::infrastructure::database::repositories::{
    RatingRepository, StoreRepository, UserRepository,
};
use store_ratings::shared::shutdown::{listen_for_shutdown_signals, ShutdownSignal};
use store_ratings::{
    create_api_router, default_config_path, init_database, seed_default_admin, AppConfig,
    DatabaseConfig,
};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // ── Load configuration ─────────────────────────────────────
    let config_path = std::env::var("STORE_RATINGS_CONFIG")
        .map(std::path::PathBuf::from)
        .unwrap_or_else(|_| default_config_path());
    let app_cfg = match AppConfig::load(&config_path) {
        Ok(cfg) => {
            tracing_subscriber::fmt()
                .with_env_filter(
                    tracing_subscriber::EnvFilter::try_from_default_env()
                        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&cfg.logging.level)),
                )
                .init();
            info!("Configuration loaded from {}", config_path.display());
            cfg
        }
        Err(e) => {
            tracing_subscriber::fmt()
                .with_env_filter(tracing_subscriber::EnvFilter::new("info"))
                .init();
            error!("Failed to load config: {}. Using defaults.", e);
            AppConfig::default()
        }
    };

    info!("Starting Store Ratings Service...");

    // ── Database ───────────────────────────────────────────────
    let db_config = DatabaseConfig {
        url: app_cfg.database.connection_url(),
    };
    info!("Database: {}", db_config.url);

    let db = match init_database(&db_config).await {
        Ok(db) => db,
        Err(e) => {
            error!("Failed to connect to database: {}", e);
            return Err(e.into());
        }
    };

    info!("Running database migrations...");
    if let Err(e) = Migrator::up(&db, None).await {
        error!("Failed to run migrations: {}", e);
        return Err(e.into());
    }
    info!("Migrations completed");

    // Seed the default admin when the users table is empty
    if let Err(e) = seed_default_admin(&db, &app_cfg.admin).await {
        error!("Failed to seed default admin: {}", e);
    }

    // ── Services ───────────────────────────────────────────────
    let jwt_config = JwtConfig {
        secret: app_cfg.security.jwt_secret.clone(),
        expiration_hours: app_cfg.security.jwt_expiration_hours,
        issuer: "store-ratings".to_string(),
    };
    info!(
        "JWT configured with {}h token expiration",
        jwt_config.expiration_hours
    );

    let user_repo = Arc::new(UserRepository::new(db.clone()));
    let store_repo = Arc::new(StoreRepository::new(db.clone()));
    let rating_repo = Arc::new(RatingRepository::new(db.clone()));

    let user_service = Arc::new(UserService::new(user_repo.clone(), jwt_config.clone()));
    let store_service = Arc::new(StoreService::new(store_repo.clone(), user_repo.clone()));
    let rating_service = Arc::new(RatingService::new(rating_repo, store_repo, user_repo));

    // ── HTTP server ────────────────────────────────────────────
    let api_router = create_api_router(user_service, store_service, rating_service, jwt_config);

    let shutdown_signal = ShutdownSignal::new();
    tokio::spawn(listen_for_shutdown_signals(shutdown_signal.clone()));

    let api_addr = app_cfg.server.address();
    let listener = tokio::net::TcpListener::bind(&api_addr).await?;
    info!("REST API server listening on http://{}", api_addr);
    info!("Swagger UI available at http://{}/docs/", api_addr);

    let api_shutdown = shutdown_signal.clone();
    axum::serve(listener, api_router)
        .with_graceful_shutdown(async move {
            api_shutdown.wait().await;
            info!("REST API server received shutdown signal");
        })
        .await?;

    // ── Final cleanup ──────────────────────────────────────────
    if let Err(e) = db.close().await {
        warn!("Error closing database connection: {}", e);
    } else {
        info!("Database connection closed");
    }

    info!("Store Ratings Service shutdown complete");
    Ok(())
}
