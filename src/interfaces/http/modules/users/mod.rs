pub mod dto;
pub mod handlers;

pub use dto::{CreateUserRequest, ListUsersParams, UpdateUserRequest, UserDto};
pub use handlers::UserHandlerState;
