pub mod rating_repository;
pub mod store_repository;
pub mod user_repository;

pub use rating_repository::RatingRepository;
pub use store_repository::StoreRepository;
pub use user_repository::UserRepository;

use crate::shared::types::DomainError;

pub(crate) fn db_err(e: sea_orm::DbErr) -> DomainError {
    DomainError::Internal(format!("Database error: {}", e))
}

pub(crate) fn is_unique_violation(e: &sea_orm::DbErr) -> bool {
    let msg = e.to_string();
    msg.contains("UNIQUE") || msg.contains("duplicate")
}
