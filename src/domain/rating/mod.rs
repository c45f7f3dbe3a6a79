//! Rating aggregate
//!
//! At most one rating exists per (user, store) pair; a second submission
//! updates the existing record instead of creating a duplicate.

pub mod model;
pub mod repository;

mod dto_submit;

pub use model::Rating;

pub use dto_submit::SubmitRatingDto;

pub use repository::RatingRepositoryInterface;
