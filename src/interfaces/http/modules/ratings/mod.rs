pub mod dto;
pub mod handlers;

pub use dto::{ListRatingsParams, RatingDto, StoreRatingDto, SubmitRatingRequest};
pub use handlers::RatingHandlerState;
