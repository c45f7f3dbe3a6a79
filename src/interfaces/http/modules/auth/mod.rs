pub mod dto;
pub mod handlers;

pub use dto::{ChangePasswordRequest, LoginRequest, LoginResponse, RegisterRequest, UserInfo};
pub use handlers::AuthHandlerState;
