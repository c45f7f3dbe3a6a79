//! Store aggregate
//!
//! A store is owned by a user with the `store_owner` role. Its
//! `average_rating` and `total_ratings` fields are derived from the rating
//! records that reference it and are never authored directly.

pub mod model;
pub mod repository;

mod dto_create;
mod dto_get;
mod dto_update;

pub use model::Store;

pub use dto_create::CreateStoreDto;
pub use dto_get::GetStoresDto;
pub use dto_update::UpdateStoreDto;

pub use repository::StoreRepositoryInterface;
