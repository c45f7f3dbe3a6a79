//! Domain layer — entities, DTOs and repository traits.

pub mod rating;
pub mod store;
pub mod user;

// Re-export commonly used types
pub use rating::{Rating, RatingRepositoryInterface, SubmitRatingDto};
pub use store::{
    CreateStoreDto, GetStoresDto, Store, StoreRepositoryInterface, UpdateStoreDto,
};
pub use user::{
    CreateUserDto, GetUsersDto, UpdateUserDto, User, UserRepositoryInterface, UserRole,
};

pub use crate::shared::types::{DomainError, DomainResult};
