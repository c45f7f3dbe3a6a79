pub mod dto;
pub mod handlers;

pub use dto::{CreateStoreRequest, ListStoresParams, StoreDto, UpdateStoreRequest};
pub use handlers::StoreHandlerState;
