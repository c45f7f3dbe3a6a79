//! Ratings module — rating submission and aggregate maintenance
//!
//! Contains the `RatingService` which enforces the one-rating-per-user
//! invariant and keeps store rating summaries consistent.

pub mod service;

pub use service::{RatingService, StoreRatingRecord};
