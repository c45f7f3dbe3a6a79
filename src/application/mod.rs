//! Application layer — use-case services.
//!
//! HTTP handlers are thin wrappers that delegate to these services.

pub mod catalog;
pub mod identity;
pub mod ratings;

pub use catalog::StoreService;
pub use identity::{AuthResult, UserService};
pub use ratings::{RatingService, StoreRatingRecord};
